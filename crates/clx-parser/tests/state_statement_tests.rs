//! Statement and expression parsing through the public `ParserState` API.

use clx_parser::syntax_kind_ext::*;
use clx_parser::{NodeIndex, ParserState};

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn statement_kinds(source: &str) -> Vec<u16> {
    let (parser, root) = parse_source(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    arena
        .statements_of(root)
        .iter()
        .filter_map(|&s| arena.kind_at(s))
        .collect()
}

#[test]
fn parses_statement_forms() {
    let kinds = statement_kinds(
        "var a = 1;\n\
         ;\n\
         { a; }\n\
         if (a) b(); else { c(); }\n\
         while (a) a = a - 1;\n\
         function f(x, y) { return x + y; }\n\
         class C extends B {}\n\
         throw new Error('x');",
    );
    assert_eq!(
        kinds,
        vec![
            VARIABLE_STATEMENT,
            EMPTY_STATEMENT,
            BLOCK,
            IF_STATEMENT,
            WHILE_STATEMENT,
            FUNCTION_DECLARATION,
            CLASS_DECLARATION,
            THROW_STATEMENT,
        ]
    );
}

#[test]
fn parses_expression_forms() {
    let source = "x = a ? b : c;\n\
                  y = !a && b || c ?? d;\n\
                  z = typeof a === 'string';\n\
                  o = { a: 1, b, 'c': [1, 2, 3] };\n\
                  f = function* g() {};\n\
                  K = class { m() {} };\n\
                  a.b[c](d)?.e;\n\
                  new Foo(1).bar;";
    let kinds = statement_kinds(source);
    assert_eq!(kinds.len(), 8);
    assert!(kinds.iter().all(|&k| k == EXPRESSION_STATEMENT));
}

#[test]
fn reports_expression_expected() {
    let (parser, _) = parse_source("a = ;");
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics[0].code, 1109);
    assert_eq!(diagnostics[0].start, 4);
}

#[test]
fn recovers_from_stray_tokens() {
    let (parser, root) = parse_source("} var a = 1;");
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics[0].code, 1128);
    assert_eq!(diagnostics[0].start, 0);
    let arena = parser.get_arena();
    assert!(
        arena
            .statements_of(root)
            .iter()
            .any(|&s| arena.kind_at(s) == Some(VARIABLE_STATEMENT))
    );
}

#[test]
fn reports_unterminated_string() {
    let (parser, _) = parse_source("a = 'abc");
    assert!(parser.get_diagnostics().iter().any(|d| d.code == 1002));
}

#[test]
fn reserved_word_is_not_a_binding() {
    let (parser, _) = parse_source("var class = 1;");
    assert_eq!(parser.get_diagnostics()[0].code, 1003);
}

#[test]
fn reserved_words_are_property_names() {
    let kinds = statement_kinds("a.class = b.var;");
    assert_eq!(kinds, vec![EXPRESSION_STATEMENT]);
}

#[test]
fn member_access_nodes() {
    let (parser, root) = parse_source("a.b[c];");
    let arena = parser.get_arena();
    let statement = arena.statements_of(root)[0];
    let node = arena.get(statement).unwrap();
    let outer = arena.get_expression_statement(node).unwrap().expression;
    assert_eq!(arena.kind_at(outer), Some(ELEMENT_ACCESS_EXPRESSION));
    let outer_node = arena.get(outer).unwrap();
    assert_eq!((outer_node.pos, outer_node.end), (0, 6));
    let inner = arena.get_access_expr(outer_node).unwrap().expression;
    assert_eq!(arena.kind_at(inner), Some(PROPERTY_ACCESS_EXPRESSION));
}

#[test]
fn diagnostics_convert_to_file_diagnostics() {
    let (parser, _) = parse_source("a = ;\nb = ;");
    let diagnostics = parser.to_diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.file == "test.js"));
    assert!(diagnostics[0].start < diagnostics[1].start);
}
