//! `object <operator> name` expressions.

use clx_classes::{ProfileTable, SyntaxOptions, new_parser, resolve};
use clx_parser::ast_json::to_json;
use clx_parser::{NodeConvention, ParserOptions, ParserState};
use serde_json::Value;

fn parse_json(options: &SyntaxOptions, source: &str) -> (ParserState, Value) {
    let resolved = resolve(&ProfileTable::builtin(), options).unwrap().into_shared();
    let mut parser = new_parser(
        "test.js".to_string(),
        source.to_string(),
        ParserOptions::default(),
        resolved,
    );
    let root = parser.parse_source_file();
    let json = to_json(parser.get_arena(), root, NodeConvention::Default);
    (parser, json)
}

fn first_expression(json: &Value) -> &Value {
    &json["body"][0]["expression"]
}

#[test]
fn default_operator_builds_hidden_member_access() {
    let (parser, json) = parse_json(&SyntaxOptions::default(), "obj->hiddenField;");
    assert!(parser.get_diagnostics().is_empty());
    let access = first_expression(&json);
    assert_eq!(access["type"], "HiddenMemberAccess");
    assert_eq!(access["start"], 0);
    assert_eq!(access["end"], 16);
    assert_eq!(access["object"]["name"], "obj");
    assert_eq!(access["hiddenName"]["type"], "Identifier");
    assert_eq!(access["hiddenName"]["name"], "hiddenField");
    assert_eq!(access["computed"], false);
}

#[test]
fn hidden_access_chains_with_base_subscripts() {
    let (parser, json) = parse_json(&SyntaxOptions::default(), "this->items.length->x(1);");
    assert!(parser.get_diagnostics().is_empty());
    let call = first_expression(&json);
    assert_eq!(call["type"], "CallExpression");
    let inner = &call["callee"];
    assert_eq!(inner["type"], "HiddenMemberAccess");
    assert_eq!(inner["hiddenName"]["name"], "x");
    let member = &inner["object"];
    assert_eq!(member["type"], "MemberExpression");
    assert_eq!(member["property"]["name"], "length");
    assert_eq!(member["object"]["type"], "HiddenMemberAccess");
    assert_eq!(member["object"]["object"]["type"], "ThisExpression");
}

#[test]
fn operator_requires_plain_identifier() {
    let (parser, _) = parse_json(&SyntaxOptions::default(), "obj->class;");
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics[0].code, 1003);
    assert_eq!(diagnostics[0].start, 5);

    let (parser, _) = parse_json(&SyntaxOptions::default(), "obj->;");
    assert_eq!(parser.get_diagnostics()[0].code, 1003);
}

#[test]
fn minus_greater_than_still_works_with_spacing() {
    let (parser, json) = parse_json(&SyntaxOptions::default(), "a - -x > b;");
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(first_expression(&json)["type"], "BinaryExpression");
    assert_eq!(first_expression(&json)["operator"], ">");
}

#[test]
fn profile_operators() {
    for (profile, source) in [("my", "a::b;"), ("internal", "a~>b;"), ("minimal", "a->b;")] {
        let (parser, json) = parse_json(&SyntaxOptions::with_profile(profile), source);
        assert!(parser.get_diagnostics().is_empty(), "{profile}");
        assert_eq!(first_expression(&json)["type"], "HiddenMemberAccess", "{profile}");
    }
}

#[test]
fn other_profile_operator_is_not_recognized() {
    // Under `my`, `->` is just `-` followed by `>`
    let (parser, json) = parse_json(&SyntaxOptions::with_profile("my"), "a->b;");
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics[0].code, 1109);
    assert_eq!(diagnostics[0].start, 2);
    assert_ne!(first_expression(&json)["type"], "HiddenMemberAccess");
}

#[test]
fn custom_operator_override() {
    let options = SyntaxOptions {
        operator: Some(".#".to_string()),
        ..SyntaxOptions::default()
    };
    let (parser, json) = parse_json(&options, "a.#b.c;");
    assert!(parser.get_diagnostics().is_empty());
    let member = first_expression(&json);
    assert_eq!(member["type"], "MemberExpression");
    assert_eq!(member["object"]["type"], "HiddenMemberAccess");
}

#[test]
fn hidden_access_inside_class_methods() {
    let source = "class A { var x; hidden get() { return this->x; } f(o) { return o->get(); } }";
    let (parser, json) = parse_json(&SyntaxOptions::default(), source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let members = &json["body"][0]["body"]["body"];
    let returned = &members[1]["body"]["body"][0]["argument"];
    assert_eq!(returned["type"], "HiddenMemberAccess");
    let call = &members[2]["body"]["body"][0]["argument"];
    assert_eq!(call["callee"]["type"], "HiddenMemberAccess");
    assert_eq!(call["callee"]["hiddenName"]["name"], "get");
}
