//! Thin node headers and typed data pools.
//!
//! Every node is a 16-byte `Node` header:
//! - `kind`: token kind (`SyntaxKind as u16`) or a `syntax_kind_ext` constant
//! - `flags`: packed `node_flags`
//! - `pos`/`end`: byte offsets into the source text
//! - `data_index`: index into the pool selected by `kind` (`u32::MAX` = no data)
//!
//! Kinds that share a data layout share a pool. Retyping a node (for
//! example `CLASS_METHOD` to `CLASS_HIDDEN_METHOD`) only rewrites `kind`
//! and leaves the pooled data in place.

use super::base::{NodeIndex, NodeList};
use clx_common::Interner;
use serde::Serialize;
use std::sync::Arc;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: u16,
    pub flags: u16,
    pub pos: u32,
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32 & flag) != 0
    }
}

// =============================================================================
// Typed Data Pools
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub atom: clx_common::Atom,
    pub escaped_text: String,
}

/// String and numeric literals.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    /// Cooked value for strings, source text for numbers
    pub text: String,
    pub raw_text: String,
    /// Numeric literals only
    pub value: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Call and `new` expressions. `new Foo` without parentheses has no arguments.
#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: Option<NodeList>,
}

/// Property access, element access, and hidden member access.
#[derive(Clone, Debug, Serialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub question_dot_token: bool,
}

/// Array and object literal elements.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
    pub computed: bool,
    pub shorthand: bool,
}

/// Function declarations and expressions.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    pub is_async: bool,
    pub asterisk_token: bool,
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassData {
    pub name: NodeIndex,
    pub heritage: NodeIndex,
    pub members: NodeList,
    /// Offset of the `{` opening the class body
    pub body_pos: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

impl MethodKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MethodKind::Method => "method",
            MethodKind::Get => "get",
            MethodKind::Set => "set",
            MethodKind::Constructor => "constructor",
        }
    }
}

/// Class methods in both node conventions (and hidden methods).
#[derive(Clone, Debug, Serialize)]
pub struct MethodDeclData {
    pub name: NodeIndex,
    pub computed: bool,
    pub method_kind: MethodKind,
    pub is_static: bool,
    pub is_async: bool,
    pub asterisk_token: bool,
    pub parameters: NodeList,
    pub body: NodeIndex,
    /// Offset of the `(` opening the parameter list
    pub parameters_pos: u32,
}

/// Class fields in both node conventions.
#[derive(Clone, Debug, Serialize)]
pub struct PropertyDeclData {
    pub name: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassInitializerData {
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Variable statements and class variable declarations.
/// The declared kind (`var`/`let`/`const`) lives in the node flags.
#[derive(Clone, Debug, Serialize)]
pub struct VariableData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

/// `return` and `throw`.
#[derive(Clone, Debug, Serialize)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub condition: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub file_name: String,
    #[serde(skip)]
    pub text: Arc<str>,
    pub statements: NodeList,
}

// =============================================================================
// Arena
// =============================================================================

/// Owns every node of one parse.
#[derive(Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub(crate) interner: Interner,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
    pub functions: Vec<FunctionData>,
    pub classes: Vec<ClassData>,
    pub method_decls: Vec<MethodDeclData>,
    pub property_decls: Vec<PropertyDeclData>,
    pub class_initializers: Vec<ClassInitializerData>,
    pub blocks: Vec<BlockData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub return_data: Vec<ReturnData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub source_files: Vec<SourceFileData>,
}
