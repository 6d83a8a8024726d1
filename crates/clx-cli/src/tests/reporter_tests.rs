use super::Reporter;
use clx_common::Diagnostic;

fn diagnostic(file: &str, start: u32, length: u32, message: &str, code: u32) -> Diagnostic {
    Diagnostic::error(file.to_string(), start, length, message.to_string(), code)
}

#[test]
fn formats_location_code_and_snippet() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("a.js", "let a;\nclass A { var x = 1; }\n");
    let output = reporter.format_diagnostic(&diagnostic(
        "a.js",
        21,
        5,
        "Instance variables initializer is disabled.",
        2001,
    ));
    assert_eq!(
        output,
        "a.js:2:15 - error CLX2001: Instance variables initializer is disabled.\n    2   class A { var x = 1; }\n                      ~~~~~"
    );
}

#[test]
fn zero_length_span_gets_one_marker() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("b.js", "x = ");
    let output = reporter.format_diagnostic(&diagnostic("b.js", 4, 0, "Expression expected.", 1109));
    assert!(output.starts_with("b.js:1:5 - error CLX1109: Expression expected."));
    assert!(output.ends_with("            ~"));
}

#[test]
fn missing_source_falls_back_to_file_name() {
    let mut reporter = Reporter::new(false);
    let output = reporter.format_diagnostic(&diagnostic(
        "/definitely/missing/file.js",
        3,
        1,
        "Unexpected token.",
        1012,
    ));
    assert_eq!(
        output,
        "/definitely/missing/file.js - error CLX1012: Unexpected token."
    );
}

#[test]
fn render_joins_with_newlines() {
    let mut reporter = Reporter::new(false);
    reporter.add_source("c.js", "a\nb\n");
    let rendered = reporter.render(&[
        diagnostic("c.js", 0, 1, "first", 1012),
        diagnostic("c.js", 2, 1, "second", 1012),
    ]);
    assert!(rendered.contains("c.js:1:1 - error CLX1012: first"));
    assert!(rendered.contains("\nc.js:2:1 - error CLX1012: second"));
}
