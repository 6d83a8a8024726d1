//! Turn parsed member fragments into the extension's node kinds.

use crate::profile::ResolvedProfile;
use clx_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use clx_parser::node::ClassInitializerData;
use clx_parser::syntax_kind_ext::{
    CLASS_HIDDEN_METHOD, CLASS_INITIALIZER, CLASS_METHOD, CLASS_VARIABLE_DECLARATION,
    METHOD_DEFINITION,
};
use clx_parser::{NodeArena, NodeConvention, NodeIndex, ParserState, node_flags};
use std::fmt;
use std::sync::Arc;

/// How a finished method is marked hidden in one node convention.
pub trait HiddenMethodMarker: Send + Sync + fmt::Debug {
    /// Node kind the base parser produces for a class method.
    fn method_kind(&self) -> u16;

    fn mark(&self, arena: &mut NodeArena, method: NodeIndex);
}

/// `ClassMethod` becomes `ClassHiddenMethod`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassMethodMarker;

impl HiddenMethodMarker for ClassMethodMarker {
    fn method_kind(&self) -> u16 {
        CLASS_METHOD
    }

    fn mark(&self, arena: &mut NodeArena, method: NodeIndex) {
        arena.retype(method, CLASS_HIDDEN_METHOD);
    }
}

/// `MethodDefinition` keeps its kind and gains the `hidden` flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodDefinitionMarker;

impl HiddenMethodMarker for MethodDefinitionMarker {
    fn method_kind(&self) -> u16 {
        METHOD_DEFINITION
    }

    fn mark(&self, arena: &mut NodeArena, method: NodeIndex) {
        arena.add_flags(method, node_flags::HIDDEN);
    }
}

pub fn marker_for(convention: NodeConvention) -> Arc<dyn HiddenMethodMarker> {
    match convention {
        NodeConvention::Default => Arc::new(ClassMethodMarker),
        NodeConvention::Flat => Arc::new(MethodDefinitionMarker),
    }
}

/// Mark `member` hidden. Computed and literal keys are unexpected tokens;
/// anything other than a method of the marker's kind cannot be hidden.
pub fn finish_hidden_method(
    parser: &mut ParserState,
    marker: &dyn HiddenMethodMarker,
    member: NodeIndex,
) {
    let arena = parser.get_arena();
    let Some(node) = arena.get(member) else {
        return;
    };
    let (kind, member_pos, member_end) = (node.kind, node.pos, node.end);
    let already_hidden = kind == CLASS_HIDDEN_METHOD || node.has_flag(node_flags::HIDDEN);
    let key = arena
        .get_method_decl(node)
        .map(|method| (method.name, method.computed))
        .or_else(|| {
            arena
                .get_property_decl(node)
                .map(|property| (property.name, property.computed))
        });
    let key_span = key.and_then(|(name, computed)| {
        let key_node = arena.get(name)?;
        Some((key_node.pos, key_node.end, computed || arena.is_literal(name)))
    });

    if let Some((pos, end, true)) = key_span {
        parser.unexpected_at(pos, end - pos);
        return;
    }
    // `hidden hidden f() {}`: the inner keyword already marked the method.
    if already_hidden {
        let (pos, end) = key_span.map_or((member_pos, member_end), |(pos, end, _)| (pos, end));
        parser.unexpected_at(pos, end - pos);
        return;
    }
    if kind == marker.method_kind() {
        marker.mark(parser.arena_mut(), member);
        return;
    }
    let (pos, end) = key_span.map_or((member_pos, member_end), |(pos, end, _)| (pos, end));
    parser.parse_error_at(
        pos,
        end - pos,
        diagnostic_messages::ONLY_METHODS_CAN_BE_MARKED_HIDDEN,
        diagnostic_codes::ONLY_METHODS_CAN_BE_MARKED_HIDDEN,
    );
}

/// Retype a parsed variable statement and enforce the initializer flag.
/// Every offending declarator gets its own diagnostic.
pub fn finish_class_variable(
    parser: &mut ParserState,
    profile: &ResolvedProfile,
    statement: NodeIndex,
) {
    parser
        .arena_mut()
        .retype(statement, CLASS_VARIABLE_DECLARATION);
    if profile.instance_variables_initializer() {
        return;
    }

    let arena = parser.get_arena();
    let violations: Vec<(u32, u32)> = arena
        .get_variable_at(statement)
        .map(|variable| {
            variable
                .declarations
                .nodes
                .iter()
                .filter_map(|&declaration| {
                    let node = arena.get(declaration)?;
                    let data = arena.get_variable_declaration(node)?;
                    data.initializer
                        .is_some()
                        .then_some((node.pos, node.end - node.pos))
                })
                .collect()
        })
        .unwrap_or_default();

    for (pos, length) in violations {
        parser.parse_error_at(
            pos,
            length,
            diagnostic_messages::INSTANCE_VARIABLES_INITIALIZER_IS_DISABLED,
            diagnostic_codes::INSTANCE_VARIABLES_INITIALIZER_IS_DISABLED,
        );
    }
}

/// Parse the `{ ... }` of a static initializer and append it to `body`.
pub fn finish_class_initializer(
    parser: &mut ParserState,
    body: &mut Vec<NodeIndex>,
    member_start: u32,
) -> NodeIndex {
    let block = parser.parse_block();
    let end = parser.last_token_end();
    let initializer = parser.arena_mut().add_class_initializer(
        CLASS_INITIALIZER,
        member_start,
        end,
        ClassInitializerData { body: block },
    );
    body.push(initializer);
    initializer
}

#[cfg(test)]
#[path = "tests/finishers_tests.rs"]
mod finishers_tests;
