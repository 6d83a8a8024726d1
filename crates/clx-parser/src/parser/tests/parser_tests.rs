use super::*;
use clx_scanner::SyntaxKind;

fn parse(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn first_statement(parser: &ParserState, root: NodeIndex) -> NodeIndex {
    parser.get_arena().statements_of(root)[0]
}

#[test]
fn test_node_index_none() {
    assert!(NodeIndex::NONE.is_none());
    assert!(!NodeIndex::NONE.is_some());
    assert!(NodeIndex(0).is_some());
}

#[test]
fn test_node_header_is_sixteen_bytes() {
    assert_eq!(std::mem::size_of::<node::Node>(), 16);
}

#[test]
fn test_retype_keeps_data() {
    let (mut parser, root) = parse("var a = 1;");
    let statement = first_statement(&parser, root);
    let arena = parser.arena_mut();
    arena.retype(statement, syntax_kind_ext::CLASS_VARIABLE_DECLARATION);
    assert_eq!(
        arena.kind_at(statement),
        Some(syntax_kind_ext::CLASS_VARIABLE_DECLARATION)
    );
    let variable = arena.get_variable_at(statement).expect("variable data");
    assert_eq!(variable.declarations.len(), 1);
}

#[test]
fn test_add_flags_accumulates() {
    let mut arena = NodeArena::new();
    let token = arena.add_token(SyntaxKind::ThisKeyword as u16, 0, 4);
    arena.add_flags(token, node_flags::HIDDEN);
    arena.add_flags(token, node_flags::LET);
    let node = arena.get(token).expect("token node");
    assert!(node.has_flag(node_flags::HIDDEN));
    assert!(node.has_flag(node_flags::LET));
    assert!(!node.has_flag(node_flags::CONST));
}

#[test]
fn test_typed_getter_rejects_other_kinds() {
    let (parser, root) = parse("f();");
    let arena = parser.get_arena();
    let statement = first_statement(&parser, root);
    assert!(arena.get_variable_at(statement).is_none());
    assert!(arena.get_class_at(statement).is_none());
    let node = arena.get(statement).expect("statement");
    assert!(arena.get_expression_statement(node).is_some());
}

#[test]
fn test_parse_empty_source() {
    let (parser, root) = parse("");
    assert!(parser.get_diagnostics().is_empty());
    assert!(parser.get_arena().statements_of(root).is_empty());
    assert_eq!(parser.get_arena().kind_at(root), Some(syntax_kind_ext::SOURCE_FILE));
}

#[test]
fn test_parse_var_let_const_flags() {
    let (parser, root) = parse("var a; let b = 1; const c = 2;");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let statements = arena.statements_of(root);
    assert_eq!(statements.len(), 3);
    let flags: Vec<bool> = statements
        .iter()
        .map(|&s| arena.get(s).is_some_and(|n| n.has_flag(node_flags::LET)))
        .collect();
    assert_eq!(flags, vec![false, true, false]);
    assert!(
        arena
            .get(statements[2])
            .is_some_and(|n| n.has_flag(node_flags::CONST))
    );
}

#[test]
fn test_statement_positions() {
    let (parser, root) = parse("  var a = 1;\nfoo();");
    let arena = parser.get_arena();
    let statements = arena.statements_of(root);
    let first = arena.get(statements[0]).expect("var");
    assert_eq!((first.pos, first.end), (2, 12));
    let second = arena.get(statements[1]).expect("call");
    assert_eq!((second.pos, second.end), (13, 19));
}

#[test]
fn test_asi_on_line_break() {
    let (parser, root) = parse("a = 1\nb = 2");
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(parser.get_arena().statements_of(root).len(), 2);
}

#[test]
fn test_missing_semicolon_reports_expected() {
    let (parser, _) = parse("a = 1 b = 2;");
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 1005);
    assert_eq!(diagnostics[0].message, "';' expected.");
    assert_eq!(diagnostics[0].start, 6);
}

#[test]
fn test_identifier_text_interned() {
    let (parser, root) = parse("hidden;");
    let arena = parser.get_arena();
    let statement = first_statement(&parser, root);
    let node = arena.get(statement).expect("statement");
    let expression = arena
        .get_expression_statement(node)
        .expect("expression statement")
        .expression;
    assert_eq!(arena.identifier_text(expression), Some("hidden"));
    assert!(arena.interner().lookup("hidden").is_some());
}

#[test]
fn test_class_members_default_convention() {
    let (parser, root) = parse("class A { constructor() {} static m() {} x = 1; get y() { return 1; } }");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let class = first_statement(&parser, root);
    let kinds: Vec<u16> = arena
        .class_members(class)
        .iter()
        .filter_map(|&m| arena.kind_at(m))
        .collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::CLASS_METHOD,
            syntax_kind_ext::CLASS_METHOD,
            syntax_kind_ext::CLASS_PROPERTY,
            syntax_kind_ext::CLASS_METHOD,
        ]
    );
    let members = arena.class_members(class);
    let constructor = arena.get_method_decl_at(members[0]).expect("constructor");
    assert_eq!(constructor.method_kind, node::MethodKind::Constructor);
    let method = arena.get_method_decl_at(members[1]).expect("static method");
    assert!(method.is_static);
    let getter = arena.get_method_decl_at(members[3]).expect("getter");
    assert_eq!(getter.method_kind, node::MethodKind::Get);
}

#[test]
fn test_class_members_flat_convention() {
    let mut parser = ParserState::with_options(
        "test.js".to_string(),
        "class A { m() {} x; }".to_string(),
        ParserOptions::default().with_convention(NodeConvention::Flat),
    );
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let class = arena.statements_of(root)[0];
    let kinds: Vec<u16> = arena
        .class_members(class)
        .iter()
        .filter_map(|&m| arena.kind_at(m))
        .collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::METHOD_DEFINITION,
            syntax_kind_ext::PROPERTY_DEFINITION
        ]
    );
}

#[test]
fn test_member_named_static() {
    let (parser, root) = parse("class A { static() {} static = 1; }");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let class = first_statement(&parser, root);
    let members = arena.class_members(class);
    let method = arena.get_method_decl_at(members[0]).expect("method");
    assert!(!method.is_static);
    assert_eq!(arena.identifier_text(method.name), Some("static"));
}

#[test]
fn test_duplicate_constructor() {
    let (parser, _) = parse("class A { constructor() {} constructor() {} }");
    let diagnostics = parser.get_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 2004);
    assert_eq!(diagnostics[0].start, 27);
}

#[test]
fn test_static_block_is_not_base_syntax() {
    let (parser, _) = parse("class A { static { x = 1; } }");
    assert!(!parser.get_diagnostics().is_empty());
}

#[test]
fn test_base_parsers_are_installed_by_default() {
    let parser = ParserState::new("a.js".to_string(), String::new());
    assert!(format!("{:?}", parser.class_member_parser()).contains("BaseClassMemberParser"));
    assert!(format!("{:?}", parser.subscript_parser()).contains("BaseSubscriptParser"));
}

#[derive(Debug)]
struct CountingMembers(std::sync::atomic::AtomicUsize);

impl ClassMemberParser for CountingMembers {
    fn parse_class_member_with_is_static(
        &self,
        parser: &mut ParserState,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
        is_static: bool,
    ) -> NodeIndex {
        self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        BaseClassMemberParser.parse_class_member_with_is_static(
            parser,
            body,
            member_start,
            state,
            is_static,
        )
    }
}

#[test]
fn test_installed_member_parser_sees_every_member() {
    let counter = std::sync::Arc::new(CountingMembers(Default::default()));
    let mut parser = ParserState::new(
        "a.js".to_string(),
        "class A { a() {} static b() {} ; c = 1; }".to_string(),
    );
    parser.set_class_member_parser(counter.clone());
    parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(counter.0.load(std::sync::atomic::Ordering::Relaxed), 3);
}
