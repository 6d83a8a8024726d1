//! Class bodies parsed with the extension installed.

use clx_classes::{ProfileTable, SyntaxOptions, new_parser, resolve};
use clx_parser::ast_json::to_json;
use clx_parser::syntax_kind_ext::*;
use clx_parser::{NodeConvention, NodeIndex, ParserOptions, ParserState, node_flags};
use serde_json::Value;

fn parse_with(profile: &str, convention: NodeConvention, source: &str) -> (ParserState, NodeIndex) {
    let resolved = resolve(&ProfileTable::builtin(), &SyntaxOptions::with_profile(profile))
        .unwrap()
        .into_shared();
    let mut parser = new_parser(
        "test.js".to_string(),
        source.to_string(),
        ParserOptions::default().with_convention(convention),
        resolved,
    );
    let root = parser.parse_source_file();
    (parser, root)
}

fn first_class_members(parser: &ParserState, root: NodeIndex) -> Vec<NodeIndex> {
    let arena = parser.get_arena();
    let class = arena.statements_of(root)[0];
    arena.class_members(class).to_vec()
}

fn member_kinds(parser: &ParserState, root: NodeIndex) -> Vec<u16> {
    first_class_members(parser, root)
        .into_iter()
        .filter_map(|m| parser.get_arena().kind_at(m))
        .collect()
}

fn codes(parser: &ParserState) -> Vec<(u32, u32)> {
    parser
        .get_diagnostics()
        .iter()
        .map(|d| (d.code, d.start))
        .collect()
}

#[test]
fn default_profile_variable_then_hidden_method() {
    let source = "class A { var x = 1; hidden foo() { return 1; } }";
    let (parser, root) = parse_with("default", NodeConvention::Default, source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    assert_eq!(
        member_kinds(&parser, root),
        vec![CLASS_VARIABLE_DECLARATION, CLASS_HIDDEN_METHOD]
    );

    let ast = to_json(parser.get_arena(), root, NodeConvention::Default);
    let members = &ast["body"][0]["body"]["body"];
    let variable = &members[0];
    assert_eq!(variable["type"], "ClassVariableDeclaration");
    assert_eq!(variable["kind"], "var");
    assert_eq!(variable["start"], 10);
    assert_eq!(variable["end"], 20);
    assert_eq!(variable["declarations"][0]["id"]["name"], "x");
    assert_eq!(variable["declarations"][0]["init"]["value"], 1.0);

    let method = &members[1];
    assert_eq!(method["type"], "ClassHiddenMethod");
    assert_eq!(method["key"]["name"], "foo");
    assert_eq!(method["start"], 21);
    assert_eq!(method["body"]["body"][0]["type"], "ReturnStatement");
}

#[test]
fn my_profile_uses_one_keyword_for_both() {
    let (parser, root) = parse_with("my", NodeConvention::Default, "class A { my x; my foo() {} }");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    assert_eq!(
        member_kinds(&parser, root),
        vec![CLASS_VARIABLE_DECLARATION, CLASS_HIDDEN_METHOD]
    );
}

#[test]
fn internal_profile_structure() {
    let source = "class A { internal a, b = 2; internal run() {} }";
    let (parser, root) = parse_with("internal", NodeConvention::Default, source);
    assert!(parser.get_diagnostics().is_empty());
    let members = first_class_members(&parser, root);
    let arena = parser.get_arena();
    assert_eq!(arena.get_variable_at(members[0]).unwrap().declarations.len(), 2);
    assert_eq!(arena.kind_at(members[1]), Some(CLASS_HIDDEN_METHOD));
}

#[test]
fn keyword_of_another_profile_is_a_plain_name() {
    // `hidden` is only a keyword in the default and minimal profiles
    let (parser, root) = parse_with("my", NodeConvention::Default, "class A { hidden() {} var = 1; }");
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(member_kinds(&parser, root), vec![CLASS_METHOD, CLASS_PROPERTY]);

    let (parser, _) = parse_with("my", NodeConvention::Default, "class A { hidden foo() {} }");
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn method_named_like_instance_keyword() {
    for (profile, keyword) in [
        ("default", "var"),
        ("minimal", "var"),
        ("my", "my"),
        ("internal", "internal"),
    ] {
        let source = format!("class A {{ {keyword}() {{ return 1; }} }}");
        let (parser, root) = parse_with(profile, NodeConvention::Default, &source);
        assert!(parser.get_diagnostics().is_empty(), "{profile}");
        let members = first_class_members(&parser, root);
        let arena = parser.get_arena();
        assert_eq!(arena.kind_at(members[0]), Some(CLASS_METHOD), "{profile}");
        let method = arena.get_method_decl_at(members[0]).unwrap();
        assert_eq!(arena.identifier_text(method.name), Some(keyword));
    }
}

#[test]
fn minimal_profile_rejects_initializers() {
    let (parser, root) = parse_with("minimal", NodeConvention::Default, "class A { var x = 1; }");
    assert_eq!(codes(&parser), vec![(2001, 14)]);
    assert_eq!(
        parser.get_diagnostics()[0].message,
        "Instance variables initializer is disabled."
    );
    assert_eq!(member_kinds(&parser, root), vec![CLASS_VARIABLE_DECLARATION]);

    let (parser, _) = parse_with("minimal", NodeConvention::Default, "class A { var x; }");
    assert!(parser.get_diagnostics().is_empty());
}

#[test]
fn minimal_profile_reports_every_declarator() {
    let source = "class A { var a = 1, b, c = 2; }";
    let (parser, _) = parse_with("minimal", NodeConvention::Default, source);
    assert_eq!(codes(&parser), vec![(2001, 14), (2001, 24)]);
}

#[test]
fn hidden_method_rejects_computed_and_literal_keys() {
    for convention in [NodeConvention::Default, NodeConvention::Flat] {
        for (source, key_pos) in [
            ("class A { hidden [x]() {} }", 18),
            ("class A { hidden 'foo'() {} }", 17),
            ("class A { hidden 42() {} }", 17),
        ] {
            let (parser, _) = parse_with("default", convention, source);
            assert_eq!(codes(&parser), vec![(1012, key_pos)], "{source}");
        }
    }
}

#[test]
fn hidden_field_is_rejected() {
    let (parser, _) = parse_with("default", NodeConvention::Default, "class A { hidden x = 1; }");
    assert_eq!(codes(&parser), vec![(2003, 17)]);
}

#[test]
fn repeated_hidden_keyword_is_unexpected() {
    for convention in [NodeConvention::Default, NodeConvention::Flat] {
        let (parser, root) = parse_with("default", convention, "class A { hidden hidden foo() {} }");
        assert_eq!(codes(&parser), vec![(1012, 24)], "{}", convention.name());
        assert_eq!(first_class_members(&parser, root).len(), 1);
    }
}

#[test]
fn hidden_static_block_is_rejected_with_span() {
    let (parser, root) =
        parse_with("default", NodeConvention::Default, "class A { hidden static { } }");
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 2003);
    assert_eq!((diagnostics[0].start, diagnostics[0].length), (10, 17));
    assert_eq!(member_kinds(&parser, root), vec![CLASS_INITIALIZER]);
}

#[test]
fn deeply_repeated_hidden_keyword_reports_instead_of_overflowing() {
    let source = format!("class A {{ {}foo() {{}} }}", "hidden ".repeat(200_000));
    // Debug builds use large frames; the depth limit bounds nesting, not frame size.
    let handle = std::thread::Builder::new()
        .stack_size(32 * 1024 * 1024)
        .spawn(move || {
            let (parser, root) = parse_with("default", NodeConvention::Default, &source);
            let codes = codes(&parser);
            let kinds = member_kinds(&parser, root);
            (codes, kinds)
        })
        .unwrap();
    let (codes, kinds) = handle.join().unwrap();

    assert!(!codes.is_empty());
    assert!(codes.iter().all(|&(code, _)| code == 1012), "{codes:?}");
    assert_eq!(kinds, vec![CLASS_HIDDEN_METHOD]);
}

#[test]
fn flat_convention_sets_hidden_flag() {
    let source = "class A { hidden foo() {} bar() {} }";
    let (parser, root) = parse_with("default", NodeConvention::Flat, source);
    assert!(parser.get_diagnostics().is_empty());
    let members = first_class_members(&parser, root);
    let arena = parser.get_arena();
    assert_eq!(member_kinds(&parser, root), vec![METHOD_DEFINITION, METHOD_DEFINITION]);
    assert!(arena.get(members[0]).unwrap().has_flag(node_flags::HIDDEN));
    assert!(!arena.get(members[1]).unwrap().has_flag(node_flags::HIDDEN));

    let ast = to_json(arena, root, NodeConvention::Flat);
    let json_members = &ast["body"][0]["body"]["body"];
    assert_eq!(json_members[0]["hidden"], true);
    assert_eq!(json_members[1].get("hidden"), None);
}

#[test]
fn hidden_static_in_either_order() {
    for source in [
        "class A { hidden static f() {} }",
        "class A { static hidden f() {} }",
    ] {
        let (parser, root) = parse_with("default", NodeConvention::Default, source);
        assert!(parser.get_diagnostics().is_empty(), "{source}");
        let members = first_class_members(&parser, root);
        let arena = parser.get_arena();
        assert_eq!(arena.kind_at(members[0]), Some(CLASS_HIDDEN_METHOD), "{source}");
        let method = arena.get_method_decl_at(members[0]).unwrap();
        assert!(method.is_static, "{source}");
        assert_eq!(arena.get(members[0]).unwrap().pos, 10);
    }
}

#[test]
fn hidden_accessors_and_generators() {
    let source = "class A { hidden get x() { return 1; } hidden *gen() {} hidden async run() {} }";
    let (parser, root) = parse_with("default", NodeConvention::Default, source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    assert_eq!(
        member_kinds(&parser, root),
        vec![CLASS_HIDDEN_METHOD, CLASS_HIDDEN_METHOD, CLASS_HIDDEN_METHOD]
    );
}

#[test]
fn static_initializer_for_every_profile() {
    for profile in ["default", "minimal", "my", "internal"] {
        let source = "class A { foo() {} static { x = 1; } }";
        let (parser, root) = parse_with(profile, NodeConvention::Default, source);
        assert!(parser.get_diagnostics().is_empty(), "{profile}");
        assert_eq!(member_kinds(&parser, root), vec![CLASS_METHOD, CLASS_INITIALIZER]);

        let ast = to_json(parser.get_arena(), root, NodeConvention::Default);
        let initializer = &ast["body"][0]["body"]["body"][1];
        assert_eq!(initializer["type"], "ClassInitializer");
        assert_eq!(initializer["start"], 19);
        assert_eq!(initializer["body"]["type"], "BlockStatement");
        assert_eq!(initializer["body"]["body"].as_array().map(Vec::len), Some(1));
    }
}

#[test]
fn static_instance_variable_ignores_static() {
    let (parser, root) = parse_with("default", NodeConvention::Default, "class A { static var x; }");
    assert!(parser.get_diagnostics().is_empty());
    let members = first_class_members(&parser, root);
    assert_eq!(parser.get_arena().kind_at(members[0]), Some(CLASS_VARIABLE_DECLARATION));
    assert_eq!(parser.get_arena().get(members[0]).unwrap().pos, 10);
}

#[test]
fn base_members_are_unchanged() {
    let source = "class A extends B { constructor() { super(); } static m() {} get v() { return 1; } x = 2; }";
    let with_extension = parse_with("default", NodeConvention::Default, source);
    let mut plain = ParserState::new("test.js".to_string(), source.to_string());
    let plain_root = plain.parse_source_file();
    assert!(with_extension.0.get_diagnostics().is_empty());
    assert!(plain.get_diagnostics().is_empty());
    let extended_json = to_json(with_extension.0.get_arena(), with_extension.1, NodeConvention::Default);
    let plain_json = to_json(plain.get_arena(), plain_root, NodeConvention::Default);
    assert_eq!(extended_json, plain_json);
}

#[test]
fn class_expression_members() {
    let source = "let K = class { var a; hidden b() {} };";
    let (parser, root) = parse_with("default", NodeConvention::Default, source);
    assert!(parser.get_diagnostics().is_empty());
    let ast = to_json(parser.get_arena(), root, NodeConvention::Default);
    let class = &ast["body"][0]["declarations"][0]["init"];
    assert_eq!(class["type"], "ClassExpression");
    let types: Vec<&Value> = class["body"]["body"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| &m["type"])
        .collect();
    assert_eq!(types, vec!["ClassVariableDeclaration", "ClassHiddenMethod"]);
}
