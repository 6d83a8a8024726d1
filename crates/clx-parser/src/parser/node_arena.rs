//! NodeArena creation methods (add_* methods).

use super::base::NodeIndex;
use super::node::*;
use clx_common::interner::{Atom, Interner};

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        let mut interner = Interner::new();
        interner.intern_common();
        NodeArena {
            interner,
            ..NodeArena::default()
        }
    }

    /// Create an arena sized for roughly `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::new();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.identifiers = Vec::with_capacity(safe_capacity / 4);
        arena.literals = Vec::with_capacity(safe_capacity / 8);
        arena.access_exprs = Vec::with_capacity(safe_capacity / 8);
        arena.blocks = Vec::with_capacity(safe_capacity / 16);
        arena.source_files = Vec::with_capacity(1);
        arena
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn intern(&mut self, text: &str) -> Atom {
        self.interner.intern(text)
    }

    /// Resolve an identifier's text through its atom, falling back to the stored text.
    #[inline]
    pub fn resolve_identifier_text<'a>(&'a self, data: &'a IdentifierData) -> &'a str {
        if data.atom != Atom::NONE {
            self.interner.resolve(data.atom)
        } else {
            &data.escaped_text
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        macro_rules! clear_vecs {
            ($($field:ident),+ $(,)?) => {
                $(self.$field.clear();)+
            };
        }

        clear_vecs!(
            nodes,
            identifiers,
            literals,
            binary_exprs,
            unary_exprs,
            conditional_exprs,
            call_exprs,
            access_exprs,
            literal_exprs,
            property_assignments,
            functions,
            classes,
            method_decls,
            property_decls,
            class_initializers,
            blocks,
            variables,
            variable_declarations,
            expr_statements,
            return_data,
            if_statements,
            loops,
            source_files,
        );
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node (no additional data): `this`, `null`, `;` statements, ...
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new(kind, pos, end));
        NodeIndex(index)
    }

    /// Add an identifier node, interning its text.
    pub fn add_identifier_text(&mut self, kind: u16, pos: u32, end: u32, text: &str) -> NodeIndex {
        let atom = self.interner.intern(text);
        self.add_identifier(
            kind,
            pos,
            end,
            IdentifierData {
                atom,
                escaped_text: text.to_string(),
            },
        )
    }

    /// Set flags on an existing node.
    pub fn add_flags(&mut self, index: NodeIndex, flags: u32) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags as u16;
        }
    }

    /// Rewrite the kind of an existing node; pooled data stays in place.
    pub fn retype(&mut self, index: NodeIndex, kind: u16) {
        if let Some(node) = self.get_mut(index) {
            node.kind = kind;
        }
    }
}

macro_rules! pooled_adders {
    ($($(#[$meta:meta])* $fn_name:ident => $pool:ident : $data:ty;)+) => {
        impl NodeArena {
            $(
                $(#[$meta])*
                pub fn $fn_name(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                    let data_index = self.$pool.len() as u32;
                    self.$pool.push(data);
                    let index = self.nodes.len() as u32;
                    self.nodes.push(Node::with_data(kind, pos, end, data_index));
                    NodeIndex(index)
                }
            )+
        }
    };
}

pooled_adders! {
    add_identifier => identifiers: IdentifierData;
    /// String or numeric literal
    add_literal => literals: LiteralData;
    add_binary_expr => binary_exprs: BinaryExprData;
    add_unary_expr => unary_exprs: UnaryExprData;
    add_conditional_expr => conditional_exprs: ConditionalExprData;
    /// Call or `new` expression
    add_call_expr => call_exprs: CallExprData;
    /// Property, element, or hidden member access
    add_access_expr => access_exprs: AccessExprData;
    /// Array or object literal
    add_literal_expr => literal_exprs: LiteralExprData;
    add_property_assignment => property_assignments: PropertyAssignmentData;
    add_function => functions: FunctionData;
    add_class => classes: ClassData;
    add_method_decl => method_decls: MethodDeclData;
    add_property_decl => property_decls: PropertyDeclData;
    add_class_initializer => class_initializers: ClassInitializerData;
    add_block => blocks: BlockData;
    add_variable => variables: VariableData;
    add_variable_declaration => variable_declarations: VariableDeclarationData;
    add_expr_statement => expr_statements: ExprStatementData;
    /// `return` or `throw`
    add_return => return_data: ReturnData;
    add_if_statement => if_statements: IfStatementData;
    add_loop => loops: LoopData;
    add_source_file => source_files: SourceFileData;
}
