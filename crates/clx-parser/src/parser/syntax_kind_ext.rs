//! Composite node kinds.
//!
//! Token kinds come from `clx_scanner::SyntaxKind` and stay below
//! `FIRST_NODE`; everything the parser assembles from several tokens uses
//! one of the constants here.

pub const FIRST_NODE: u16 = 200;

// Top level
pub const SOURCE_FILE: u16 = 200;

// Expressions
pub const ARRAY_LITERAL_EXPRESSION: u16 = 210;
pub const OBJECT_LITERAL_EXPRESSION: u16 = 211;
pub const PROPERTY_ASSIGNMENT: u16 = 212;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = 213;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = 214;
pub const CALL_EXPRESSION: u16 = 215;
pub const NEW_EXPRESSION: u16 = 216;
pub const PREFIX_UNARY_EXPRESSION: u16 = 217;
pub const BINARY_EXPRESSION: u16 = 218;
pub const CONDITIONAL_EXPRESSION: u16 = 219;
pub const FUNCTION_EXPRESSION: u16 = 220;
pub const CLASS_EXPRESSION: u16 = 221;
/// `object->name` through the extension operator
pub const HIDDEN_MEMBER_ACCESS: u16 = 222;

// Statements
pub const BLOCK: u16 = 240;
pub const EMPTY_STATEMENT: u16 = 241;
pub const VARIABLE_STATEMENT: u16 = 242;
pub const VARIABLE_DECLARATION: u16 = 243;
pub const EXPRESSION_STATEMENT: u16 = 244;
pub const IF_STATEMENT: u16 = 245;
pub const WHILE_STATEMENT: u16 = 246;
pub const RETURN_STATEMENT: u16 = 247;
pub const THROW_STATEMENT: u16 = 248;
pub const FUNCTION_DECLARATION: u16 = 249;
pub const CLASS_DECLARATION: u16 = 250;

// Class members
pub const CLASS_METHOD: u16 = 270;
pub const CLASS_PROPERTY: u16 = 271;
pub const METHOD_DEFINITION: u16 = 272;
pub const PROPERTY_DEFINITION: u16 = 273;
pub const CLASS_HIDDEN_METHOD: u16 = 274;
pub const CLASS_VARIABLE_DECLARATION: u16 = 275;
pub const CLASS_INITIALIZER: u16 = 276;

/// Human-readable name of a token or node kind, for debugging output.
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        SOURCE_FILE => "SourceFile",
        ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        PROPERTY_ASSIGNMENT => "PropertyAssignment",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        CALL_EXPRESSION => "CallExpression",
        NEW_EXPRESSION => "NewExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        FUNCTION_EXPRESSION => "FunctionExpression",
        CLASS_EXPRESSION => "ClassExpression",
        HIDDEN_MEMBER_ACCESS => "HiddenMemberAccess",
        BLOCK => "Block",
        EMPTY_STATEMENT => "EmptyStatement",
        VARIABLE_STATEMENT => "VariableStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        IF_STATEMENT => "IfStatement",
        WHILE_STATEMENT => "WhileStatement",
        RETURN_STATEMENT => "ReturnStatement",
        THROW_STATEMENT => "ThrowStatement",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        CLASS_DECLARATION => "ClassDeclaration",
        CLASS_METHOD => "ClassMethod",
        CLASS_PROPERTY => "ClassProperty",
        METHOD_DEFINITION => "MethodDefinition",
        PROPERTY_DEFINITION => "PropertyDefinition",
        CLASS_HIDDEN_METHOD => "ClassHiddenMethod",
        CLASS_VARIABLE_DECLARATION => "ClassVariableDeclaration",
        CLASS_INITIALIZER => "ClassInitializer",
        _ if kind < FIRST_NODE => "Token",
        _ => "Unknown",
    }
}
