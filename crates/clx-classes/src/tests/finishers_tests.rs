use super::*;
use crate::profile::{ProfileTable, SyntaxOptions, resolve};
use clx_parser::ParserOptions;
use clx_scanner::SyntaxKind;

/// Parse `source` with the base grammar only and return the first member
/// of the first class.
fn base_member(source: &str, convention: NodeConvention) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::with_options(
        "test.js".to_string(),
        source.to_string(),
        ParserOptions::default().with_convention(convention),
    );
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let class = arena.statements_of(root)[0];
    let member = arena.class_members(class)[0];
    (parser, member)
}

#[test]
fn test_marker_for_convention() {
    assert_eq!(marker_for(NodeConvention::Default).method_kind(), CLASS_METHOD);
    assert_eq!(marker_for(NodeConvention::Flat).method_kind(), METHOD_DEFINITION);
}

#[test]
fn test_class_method_marker_retypes() {
    let (mut parser, member) = base_member("class A { foo() {} }", NodeConvention::Default);
    finish_hidden_method(&mut parser, &ClassMethodMarker, member);
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(parser.get_arena().kind_at(member), Some(CLASS_HIDDEN_METHOD));
}

#[test]
fn test_method_definition_marker_sets_flag() {
    let (mut parser, member) = base_member("class A { foo() {} }", NodeConvention::Flat);
    finish_hidden_method(&mut parser, &MethodDefinitionMarker, member);
    let node = parser.get_arena().get(member).unwrap();
    assert_eq!(node.kind, METHOD_DEFINITION);
    assert!(node.has_flag(node_flags::HIDDEN));
}

#[test]
fn test_literal_and_computed_keys_are_unexpected() {
    for (source, key_pos) in [
        ("class A { 'foo'() {} }", 10),
        ("class A { 1() {} }", 10),
        ("class A { [foo]() {} }", 11),
    ] {
        for convention in [NodeConvention::Default, NodeConvention::Flat] {
            let (mut parser, member) = base_member(source, convention);
            let before = parser.get_arena().kind_at(member);
            finish_hidden_method(&mut parser, marker_for(convention).as_ref(), member);
            let diagnostics = parser.get_diagnostics();
            assert_eq!(diagnostics.len(), 1, "{source}");
            assert_eq!(diagnostics[0].code, 1012, "{source}");
            assert_eq!(diagnostics[0].start, key_pos, "{source}");
            assert_eq!(parser.get_arena().kind_at(member), before);
        }
    }
}

#[test]
fn test_property_cannot_be_hidden() {
    let (mut parser, member) = base_member("class A { foo = 1; }", NodeConvention::Default);
    finish_hidden_method(&mut parser, &ClassMethodMarker, member);
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 2003);
    assert_eq!((diagnostics[0].start, diagnostics[0].length), (10, 3));
}

#[test]
fn test_wrong_convention_marker_is_rejected() {
    let (mut parser, member) = base_member("class A { foo() {} }", NodeConvention::Flat);
    finish_hidden_method(&mut parser, &ClassMethodMarker, member);
    assert_eq!(parser.get_diagnostics()[0].code, 2003);
}

#[test]
fn test_class_variable_initializer_check_reports_each_declarator() {
    let mut parser = ParserState::new("test.js".to_string(), "var a = 1, b, c = 2;".to_string());
    let root = parser.parse_source_file();
    let statement = parser.get_arena().statements_of(root)[0];
    let minimal = resolve(&ProfileTable::builtin(), &SyntaxOptions::with_profile("minimal")).unwrap();
    finish_class_variable(&mut parser, &minimal, statement);

    assert_eq!(
        parser.get_arena().kind_at(statement),
        Some(CLASS_VARIABLE_DECLARATION)
    );
    let starts: Vec<(u32, u32)> = parser
        .get_diagnostics()
        .iter()
        .map(|d| (d.start, d.code))
        .collect();
    assert_eq!(starts, vec![(4, 2001), (14, 2001)]);
}

#[test]
fn test_class_variable_with_initializers_enabled() {
    let mut parser = ParserState::new("test.js".to_string(), "var a = 1;".to_string());
    let root = parser.parse_source_file();
    let statement = parser.get_arena().statements_of(root)[0];
    let default = resolve(&ProfileTable::builtin(), &SyntaxOptions::default()).unwrap();
    finish_class_variable(&mut parser, &default, statement);
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(
        parser.get_arena().kind_at(statement),
        Some(CLASS_VARIABLE_DECLARATION)
    );
}

#[test]
fn test_class_initializer_node() {
    let mut parser = ParserState::new("test.js".to_string(), "{ x = 1; }".to_string());
    parser.next_token();
    let mut body = Vec::new();
    let initializer = finish_class_initializer(&mut parser, &mut body, 0);
    assert_eq!(body, vec![initializer]);
    assert!(parser.is_token(SyntaxKind::EndOfFileToken));
    let arena = parser.get_arena();
    let node = arena.get(initializer).unwrap();
    assert_eq!((node.kind, node.pos, node.end), (CLASS_INITIALIZER, 0, 10));
    let block = arena.get_class_initializer(node).unwrap().body;
    assert_eq!(arena.statements_of(block).len(), 1);
}

#[test]
fn test_marking_twice_is_unexpected_at_key() {
    for convention in [NodeConvention::Default, NodeConvention::Flat] {
        let (mut parser, member) = base_member("class A { foo() {} }", convention);
        let marker = marker_for(convention);
        finish_hidden_method(&mut parser, marker.as_ref(), member);
        assert!(parser.get_diagnostics().is_empty());

        finish_hidden_method(&mut parser, marker.as_ref(), member);
        let diagnostics = parser.get_diagnostics();
        assert_eq!(diagnostics.len(), 1, "{}", convention.name());
        assert_eq!(diagnostics[0].code, 1012);
        assert_eq!((diagnostics[0].start, diagnostics[0].length), (10, 3));
    }
}

#[test]
fn test_keyless_member_underlines_whole_node() {
    let mut parser = ParserState::new("test.js".to_string(), "{ x = 1; }".to_string());
    parser.next_token();
    let mut body = Vec::new();
    let initializer = finish_class_initializer(&mut parser, &mut body, 0);
    finish_hidden_method(&mut parser, &ClassMethodMarker, initializer);

    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 2003);
    assert_eq!((diagnostics[0].start, diagnostics[0].length), (0, 10));
}
