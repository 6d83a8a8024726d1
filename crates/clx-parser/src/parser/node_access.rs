//! NodeArena access methods (get_* methods).
//!
//! Each typed getter checks the node kind before indexing its pool, so a
//! getter called on the wrong kind returns `None` instead of unrelated data.

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext::*;
use clx_scanner::SyntaxKind;

macro_rules! kind_checked_getter {
    ($($(#[$meta:meta])* $fn_name:ident => $pool:ident : $data:ty, [$($kind:expr),+ $(,)?];)+) => {
        impl NodeArena {
            $(
                $(#[$meta])*
                #[inline]
                pub fn $fn_name(&self, node: &Node) -> Option<&$data> {
                    if node.has_data() && ($(node.kind == $kind)||+) {
                        self.$pool.get(node.data_index as usize)
                    } else {
                        None
                    }
                }
            )+
        }
    };
}

kind_checked_getter! {
    get_identifier => identifiers: IdentifierData, [SyntaxKind::Identifier as u16];
    /// String or numeric literal data.
    get_literal => literals: LiteralData,
        [SyntaxKind::StringLiteral as u16, SyntaxKind::NumericLiteral as u16];
    get_binary_expr => binary_exprs: BinaryExprData, [BINARY_EXPRESSION];
    get_unary_expr => unary_exprs: UnaryExprData, [PREFIX_UNARY_EXPRESSION];
    get_conditional_expr => conditional_exprs: ConditionalExprData, [CONDITIONAL_EXPRESSION];
    get_call_expr => call_exprs: CallExprData, [CALL_EXPRESSION, NEW_EXPRESSION];
    /// Property, element, and hidden member access share one layout.
    get_access_expr => access_exprs: AccessExprData,
        [PROPERTY_ACCESS_EXPRESSION, ELEMENT_ACCESS_EXPRESSION, HIDDEN_MEMBER_ACCESS];
    get_literal_expr => literal_exprs: LiteralExprData,
        [ARRAY_LITERAL_EXPRESSION, OBJECT_LITERAL_EXPRESSION];
    get_property_assignment => property_assignments: PropertyAssignmentData, [PROPERTY_ASSIGNMENT];
    get_function => functions: FunctionData, [FUNCTION_DECLARATION, FUNCTION_EXPRESSION];
    get_class => classes: ClassData, [CLASS_DECLARATION, CLASS_EXPRESSION];
    /// Methods in either convention, hidden or not.
    get_method_decl => method_decls: MethodDeclData,
        [CLASS_METHOD, METHOD_DEFINITION, CLASS_HIDDEN_METHOD];
    get_property_decl => property_decls: PropertyDeclData, [CLASS_PROPERTY, PROPERTY_DEFINITION];
    get_class_initializer => class_initializers: ClassInitializerData, [CLASS_INITIALIZER];
    get_block => blocks: BlockData, [BLOCK];
    get_variable => variables: VariableData, [VARIABLE_STATEMENT, CLASS_VARIABLE_DECLARATION];
    get_variable_declaration => variable_declarations: VariableDeclarationData,
        [VARIABLE_DECLARATION];
    get_expression_statement => expr_statements: ExprStatementData, [EXPRESSION_STATEMENT];
    get_return_statement => return_data: ReturnData, [RETURN_STATEMENT, THROW_STATEMENT];
    get_if_statement => if_statements: IfStatementData, [IF_STATEMENT];
    get_loop => loops: LoopData, [WHILE_STATEMENT];
    get_source_file => source_files: SourceFileData, [SOURCE_FILE];
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn kind_at(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    pub fn get_source_file_at(&self, index: NodeIndex) -> Option<&SourceFileData> {
        self.get(index).and_then(|node| self.get_source_file(node))
    }

    pub fn get_class_at(&self, index: NodeIndex) -> Option<&ClassData> {
        self.get(index).and_then(|node| self.get_class(node))
    }

    pub fn get_method_decl_at(&self, index: NodeIndex) -> Option<&MethodDeclData> {
        self.get(index).and_then(|node| self.get_method_decl(node))
    }

    pub fn get_variable_at(&self, index: NodeIndex) -> Option<&VariableData> {
        self.get(index).and_then(|node| self.get_variable(node))
    }

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        let data = self.get_identifier(node)?;
        Some(self.resolve_identifier_text(data))
    }

    /// True for string and numeric literal nodes.
    pub fn is_literal(&self, index: NodeIndex) -> bool {
        self.kind_at(index).is_some_and(|kind| {
            kind == SyntaxKind::StringLiteral as u16 || kind == SyntaxKind::NumericLiteral as u16
        })
    }

    /// Statements of a source file or block, in order.
    pub fn statements_of(&self, index: NodeIndex) -> &[NodeIndex] {
        let Some(node) = self.get(index) else {
            return &[];
        };
        if let Some(sf) = self.get_source_file(node) {
            &sf.statements.nodes
        } else if let Some(block) = self.get_block(node) {
            &block.statements.nodes
        } else {
            &[]
        }
    }

    /// Members of a class declaration or expression, in order.
    pub fn class_members(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get_class_at(index)
            .map_or(&[], |class| class.members.nodes.as_slice())
    }
}
