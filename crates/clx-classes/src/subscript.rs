//! `object->name` member chains.

use crate::profile::ResolvedProfile;
use clx_parser::node::AccessExprData;
use clx_parser::syntax_kind_ext::HIDDEN_MEMBER_ACCESS;
use clx_parser::{NodeIndex, ParserState, SubscriptParser, SubscriptState};
use std::sync::Arc;

/// Subscript parser that turns `base <operator> identifier` into a
/// `HIDDEN_MEMBER_ACCESS` node and defers every other continuation to the
/// wrapped parser.
#[derive(Debug, Clone)]
pub struct HiddenSubscriptParser {
    profile: Arc<ResolvedProfile>,
    base: Arc<dyn SubscriptParser>,
}

impl HiddenSubscriptParser {
    pub fn new(profile: Arc<ResolvedProfile>, base: Arc<dyn SubscriptParser>) -> Self {
        HiddenSubscriptParser { profile, base }
    }
}

impl SubscriptParser for HiddenSubscriptParser {
    fn parse_subscript(
        &self,
        parser: &mut ParserState,
        base: NodeIndex,
        start_pos: u32,
        no_calls: bool,
        state: &mut SubscriptState,
    ) -> NodeIndex {
        if !parser.parse_optional(self.profile.operator_token_kind) {
            return self.base.parse_subscript(parser, base, start_pos, no_calls, state);
        }
        // Only a plain identifier may follow; reserved words are rejected.
        let hidden_name = parser.parse_identifier();
        let end = parser.last_token_end();
        parser.arena_mut().add_access_expr(
            HIDDEN_MEMBER_ACCESS,
            start_pos,
            end,
            AccessExprData {
                expression: base,
                name_or_argument: hidden_name,
                question_dot_token: false,
            },
        )
    }
}
