//! ESTree-style JSON rendering of a parsed tree.
//!
//! Every node object starts with `type`, `start` and `end`. Class members
//! and literals follow the arena's `NodeConvention`: `ClassMethod` /
//! `StringLiteral` shapes for `Default`, `MethodDefinition` / `Literal`
//! shapes for `Flat`.

use super::base::{NodeIndex, NodeList};
use super::node::{MethodDeclData, Node, NodeArena};
use super::node_flags;
use super::options::NodeConvention;
use super::syntax_kind_ext::*;
use clx_scanner::{PUNCTUATION_TABLE, SyntaxKind, keyword_to_text};
use serde_json::{Map, Value, json};

/// Render the subtree rooted at `root`.
pub fn to_json(arena: &NodeArena, root: NodeIndex, convention: NodeConvention) -> Value {
    AstJsonWriter { arena, convention }.node(root)
}

/// Render the subtree rooted at `root` as a JSON string.
pub fn to_json_string(
    arena: &NodeArena,
    root: NodeIndex,
    convention: NodeConvention,
    pretty: bool,
) -> serde_json::Result<String> {
    let value = to_json(arena, root, convention);
    if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
}

struct AstJsonWriter<'a> {
    arena: &'a NodeArena,
    convention: NodeConvention,
}

fn operator_text(kind: u16) -> &'static str {
    let keyword = [
        SyntaxKind::InstanceOfKeyword,
        SyntaxKind::InKeyword,
        SyntaxKind::TypeOfKeyword,
        SyntaxKind::VoidKeyword,
        SyntaxKind::DeleteKeyword,
    ]
    .into_iter()
    .find(|k| *k as u16 == kind);
    if let Some(text) = keyword.and_then(keyword_to_text) {
        return text;
    }
    PUNCTUATION_TABLE
        .iter()
        .find(|(_, k)| *k as u16 == kind)
        .map_or("?", |&(text, _)| text)
}

impl AstJsonWriter<'_> {
    fn flat(&self) -> bool {
        self.convention == NodeConvention::Flat
    }

    fn base(&self, type_name: &str, node: &Node) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("type".into(), Value::from(type_name));
        map.insert("start".into(), Value::from(node.pos));
        map.insert("end".into(), Value::from(node.end));
        map
    }

    fn list(&self, list: &NodeList) -> Value {
        Value::Array(list.nodes.iter().map(|&index| self.node(index)).collect())
    }

    fn node(&self, index: NodeIndex) -> Value {
        let Some(node) = self.arena.get(index) else {
            return Value::Null;
        };
        self.render(node).unwrap_or_else(|| {
            let mut map = self.base(kind_name(node.kind), node);
            map.insert("kind".into(), Value::from(node.kind));
            Value::Object(map)
        })
    }

    fn render(&self, node: &Node) -> Option<Value> {
        let arena = self.arena;
        let object = match node.kind {
            SOURCE_FILE => {
                let sf = arena.get_source_file(node)?;
                let mut map = self.base("Program", node);
                map.insert("sourceType".into(), Value::from("script"));
                map.insert("body".into(), self.list(&sf.statements));
                map
            }
            k if k == SyntaxKind::Identifier as u16 => {
                let data = arena.get_identifier(node)?;
                let mut map = self.base("Identifier", node);
                map.insert(
                    "name".into(),
                    Value::from(arena.resolve_identifier_text(data)),
                );
                map
            }
            k if k == SyntaxKind::StringLiteral as u16 || k == SyntaxKind::NumericLiteral as u16 => {
                let lit = arena.get_literal(node)?;
                let value = match lit.value {
                    Some(number) => json!(number),
                    None => Value::from(lit.text.as_str()),
                };
                if self.flat() {
                    let mut map = self.base("Literal", node);
                    map.insert("value".into(), value);
                    map.insert("raw".into(), Value::from(lit.raw_text.as_str()));
                    map
                } else {
                    let type_name = if k == SyntaxKind::StringLiteral as u16 {
                        "StringLiteral"
                    } else {
                        "NumericLiteral"
                    };
                    let mut map = self.base(type_name, node);
                    map.insert("value".into(), value);
                    map
                }
            }
            k if k == SyntaxKind::TrueKeyword as u16 || k == SyntaxKind::FalseKeyword as u16 => {
                let value = k == SyntaxKind::TrueKeyword as u16;
                let type_name = if self.flat() { "Literal" } else { "BooleanLiteral" };
                let mut map = self.base(type_name, node);
                map.insert("value".into(), Value::from(value));
                map
            }
            k if k == SyntaxKind::NullKeyword as u16 => {
                let type_name = if self.flat() { "Literal" } else { "NullLiteral" };
                let mut map = self.base(type_name, node);
                if self.flat() {
                    map.insert("value".into(), Value::Null);
                }
                map
            }
            k if k == SyntaxKind::ThisKeyword as u16 => self.base("ThisExpression", node),
            k if k == SyntaxKind::SuperKeyword as u16 => self.base("Super", node),

            // Expressions
            ARRAY_LITERAL_EXPRESSION => {
                let data = arena.get_literal_expr(node)?;
                let mut map = self.base("ArrayExpression", node);
                map.insert("elements".into(), self.list(&data.elements));
                map
            }
            OBJECT_LITERAL_EXPRESSION => {
                let data = arena.get_literal_expr(node)?;
                let mut map = self.base("ObjectExpression", node);
                map.insert("properties".into(), self.list(&data.elements));
                map
            }
            PROPERTY_ASSIGNMENT => {
                let data = arena.get_property_assignment(node)?;
                let type_name = if self.flat() { "Property" } else { "ObjectProperty" };
                let mut map = self.base(type_name, node);
                map.insert("key".into(), self.node(data.name));
                map.insert("value".into(), self.node(data.initializer));
                map.insert("computed".into(), Value::from(data.computed));
                map.insert("shorthand".into(), Value::from(data.shorthand));
                if self.flat() {
                    map.insert("kind".into(), Value::from("init"));
                    map.insert("method".into(), Value::from(false));
                }
                map
            }
            PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
                let data = arena.get_access_expr(node)?;
                let mut map = self.base("MemberExpression", node);
                map.insert("object".into(), self.node(data.expression));
                map.insert("property".into(), self.node(data.name_or_argument));
                map.insert(
                    "computed".into(),
                    Value::from(node.kind == ELEMENT_ACCESS_EXPRESSION),
                );
                map.insert("optional".into(), Value::from(data.question_dot_token));
                map
            }
            HIDDEN_MEMBER_ACCESS => {
                let data = arena.get_access_expr(node)?;
                let mut map = self.base("HiddenMemberAccess", node);
                map.insert("object".into(), self.node(data.expression));
                map.insert("hiddenName".into(), self.node(data.name_or_argument));
                map.insert("computed".into(), Value::from(false));
                map
            }
            CALL_EXPRESSION | NEW_EXPRESSION => {
                let data = arena.get_call_expr(node)?;
                let type_name = if node.kind == CALL_EXPRESSION {
                    "CallExpression"
                } else {
                    "NewExpression"
                };
                let mut map = self.base(type_name, node);
                map.insert("callee".into(), self.node(data.expression));
                let arguments = data
                    .arguments
                    .as_ref()
                    .map_or(Value::Array(Vec::new()), |args| self.list(args));
                map.insert("arguments".into(), arguments);
                if node.kind == CALL_EXPRESSION {
                    map.insert(
                        "optional".into(),
                        Value::from(node.has_flag(node_flags::OPTIONAL_CHAIN)),
                    );
                }
                map
            }
            PREFIX_UNARY_EXPRESSION => {
                let data = arena.get_unary_expr(node)?;
                let mut map = self.base("UnaryExpression", node);
                map.insert("operator".into(), Value::from(operator_text(data.operator)));
                map.insert("prefix".into(), Value::from(true));
                map.insert("argument".into(), self.node(data.operand));
                map
            }
            BINARY_EXPRESSION => {
                let data = arena.get_binary_expr(node)?;
                let op = data.operator_token;
                let type_name = if (SyntaxKind::EqualsToken as u16..=SyntaxKind::PercentEqualsToken as u16)
                    .contains(&op)
                {
                    "AssignmentExpression"
                } else if op == SyntaxKind::AmpersandAmpersandToken as u16
                    || op == SyntaxKind::BarBarToken as u16
                    || op == SyntaxKind::QuestionQuestionToken as u16
                {
                    "LogicalExpression"
                } else {
                    "BinaryExpression"
                };
                let mut map = self.base(type_name, node);
                map.insert("operator".into(), Value::from(operator_text(op)));
                map.insert("left".into(), self.node(data.left));
                map.insert("right".into(), self.node(data.right));
                map
            }
            CONDITIONAL_EXPRESSION => {
                let data = arena.get_conditional_expr(node)?;
                let mut map = self.base("ConditionalExpression", node);
                map.insert("test".into(), self.node(data.condition));
                map.insert("consequent".into(), self.node(data.when_true));
                map.insert("alternate".into(), self.node(data.when_false));
                map
            }
            FUNCTION_EXPRESSION | FUNCTION_DECLARATION => {
                let data = arena.get_function(node)?;
                let type_name = if node.kind == FUNCTION_DECLARATION {
                    "FunctionDeclaration"
                } else {
                    "FunctionExpression"
                };
                let mut map = self.base(type_name, node);
                map.insert("id".into(), self.node(data.name));
                map.insert("generator".into(), Value::from(data.asterisk_token));
                map.insert("async".into(), Value::from(data.is_async));
                map.insert("params".into(), self.list(&data.parameters));
                map.insert("body".into(), self.node(data.body));
                map
            }
            CLASS_DECLARATION | CLASS_EXPRESSION => {
                let data = arena.get_class(node)?;
                let type_name = if node.kind == CLASS_DECLARATION {
                    "ClassDeclaration"
                } else {
                    "ClassExpression"
                };
                let mut map = self.base(type_name, node);
                map.insert("id".into(), self.node(data.name));
                map.insert("superClass".into(), self.node(data.heritage));
                let mut body = Map::new();
                body.insert("type".into(), Value::from("ClassBody"));
                body.insert("start".into(), Value::from(data.body_pos));
                body.insert("end".into(), Value::from(node.end));
                body.insert("body".into(), self.list(&data.members));
                map.insert("body".into(), Value::Object(body));
                map
            }

            // Class members
            CLASS_METHOD | CLASS_HIDDEN_METHOD => {
                let data = arena.get_method_decl(node)?;
                let type_name = if node.kind == CLASS_HIDDEN_METHOD {
                    "ClassHiddenMethod"
                } else {
                    "ClassMethod"
                };
                let mut map = self.base(type_name, node);
                self.method_head(&mut map, data);
                map.insert("id".into(), Value::Null);
                map.insert("generator".into(), Value::from(data.asterisk_token));
                map.insert("async".into(), Value::from(data.is_async));
                map.insert("params".into(), self.list(&data.parameters));
                map.insert("body".into(), self.node(data.body));
                map
            }
            METHOD_DEFINITION => {
                let data = arena.get_method_decl(node)?;
                let mut map = self.base("MethodDefinition", node);
                self.method_head(&mut map, data);
                let mut value = Map::new();
                value.insert("type".into(), Value::from("FunctionExpression"));
                value.insert("start".into(), Value::from(data.parameters_pos));
                value.insert("end".into(), Value::from(node.end));
                value.insert("id".into(), Value::Null);
                value.insert("generator".into(), Value::from(data.asterisk_token));
                value.insert("async".into(), Value::from(data.is_async));
                value.insert("params".into(), self.list(&data.parameters));
                value.insert("body".into(), self.node(data.body));
                map.insert("value".into(), Value::Object(value));
                if node.has_flag(node_flags::HIDDEN) {
                    map.insert("hidden".into(), Value::from(true));
                }
                map
            }
            CLASS_PROPERTY | PROPERTY_DEFINITION => {
                let data = arena.get_property_decl(node)?;
                let type_name = if node.kind == CLASS_PROPERTY {
                    "ClassProperty"
                } else {
                    "PropertyDefinition"
                };
                let mut map = self.base(type_name, node);
                map.insert("key".into(), self.node(data.name));
                map.insert("value".into(), self.node(data.initializer));
                map.insert("computed".into(), Value::from(data.computed));
                map.insert("static".into(), Value::from(data.is_static));
                map
            }
            CLASS_INITIALIZER => {
                let data = arena.get_class_initializer(node)?;
                let mut map = self.base("ClassInitializer", node);
                map.insert("body".into(), self.node(data.body));
                map
            }

            // Statements
            VARIABLE_STATEMENT | CLASS_VARIABLE_DECLARATION => {
                let data = arena.get_variable(node)?;
                let type_name = if node.kind == CLASS_VARIABLE_DECLARATION {
                    "ClassVariableDeclaration"
                } else {
                    "VariableDeclaration"
                };
                let kind = if node.has_flag(node_flags::CONST) {
                    "const"
                } else if node.has_flag(node_flags::LET) {
                    "let"
                } else {
                    "var"
                };
                let mut map = self.base(type_name, node);
                map.insert("declarations".into(), self.list(&data.declarations));
                map.insert("kind".into(), Value::from(kind));
                map
            }
            VARIABLE_DECLARATION => {
                let data = arena.get_variable_declaration(node)?;
                let mut map = self.base("VariableDeclarator", node);
                map.insert("id".into(), self.node(data.name));
                map.insert("init".into(), self.node(data.initializer));
                map
            }
            BLOCK => {
                let data = arena.get_block(node)?;
                let mut map = self.base("BlockStatement", node);
                map.insert("body".into(), self.list(&data.statements));
                map
            }
            EMPTY_STATEMENT => self.base("EmptyStatement", node),
            EXPRESSION_STATEMENT => {
                let data = arena.get_expression_statement(node)?;
                let mut map = self.base("ExpressionStatement", node);
                map.insert("expression".into(), self.node(data.expression));
                map
            }
            RETURN_STATEMENT | THROW_STATEMENT => {
                let data = arena.get_return_statement(node)?;
                let type_name = if node.kind == RETURN_STATEMENT {
                    "ReturnStatement"
                } else {
                    "ThrowStatement"
                };
                let mut map = self.base(type_name, node);
                map.insert("argument".into(), self.node(data.expression));
                map
            }
            IF_STATEMENT => {
                let data = arena.get_if_statement(node)?;
                let mut map = self.base("IfStatement", node);
                map.insert("test".into(), self.node(data.expression));
                map.insert("consequent".into(), self.node(data.then_statement));
                map.insert("alternate".into(), self.node(data.else_statement));
                map
            }
            WHILE_STATEMENT => {
                let data = arena.get_loop(node)?;
                let mut map = self.base("WhileStatement", node);
                map.insert("test".into(), self.node(data.condition));
                map.insert("body".into(), self.node(data.statement));
                map
            }
            _ => return None,
        };
        Some(Value::Object(object))
    }

    fn method_head(&self, map: &mut Map<String, Value>, data: &MethodDeclData) {
        map.insert("kind".into(), Value::from(data.method_kind.as_str()));
        map.insert("key".into(), self.node(data.name));
        map.insert("computed".into(), Value::from(data.computed));
        map.insert("static".into(), Value::from(data.is_static));
    }
}
