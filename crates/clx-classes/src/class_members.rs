//! Class member dispatch for instance variables, hidden methods and static
//! initializer blocks.
//!
//! `ClassesMemberParser` decorates the parser's previous
//! [`ClassMemberParser`]. Members that start with neither extension keyword
//! go to the wrapped parser untouched.

use crate::finishers::{self, HiddenMethodMarker};
use crate::profile::ResolvedProfile;
use clx_parser::{ClassBodyState, ClassMemberParser, NodeIndex, ParserState, node_flags};
use clx_scanner::SyntaxKind;
use std::sync::Arc;
use tracing::debug;

/// What the current member turned out to be, decided from its first token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberStart {
    /// Not an extension keyword, or a method named like one.
    Base,
    InstanceVariable,
    HiddenMethod,
}

#[derive(Debug, Clone)]
pub struct ClassesMemberParser {
    profile: Arc<ResolvedProfile>,
    base: Arc<dyn ClassMemberParser>,
    marker: Arc<dyn HiddenMethodMarker>,
}

impl ClassesMemberParser {
    pub fn new(
        profile: Arc<ResolvedProfile>,
        base: Arc<dyn ClassMemberParser>,
        marker: Arc<dyn HiddenMethodMarker>,
    ) -> Self {
        ClassesMemberParser {
            profile,
            base,
            marker,
        }
    }

    /// Classify the member at the current token without consuming anything.
    ///
    /// Keywords match by text on identifier and reserved-word tokens only,
    /// so a string key `"var"() {}` is never a keyword. A keyword directly
    /// followed by `(` names an ordinary method.
    pub fn classify(&self, parser: &mut ParserState) -> MemberStart {
        if !parser.is_identifier_or_keyword() {
            return MemberStart::Base;
        }
        let value = parser.token_value();
        let is_instance = value == self.profile.instance_variables_keyword();
        let is_hidden = value == self.profile.hidden_methods_keyword();
        if !is_instance && !is_hidden {
            return MemberStart::Base;
        }
        if parser.look_ahead() == SyntaxKind::OpenParenToken {
            return MemberStart::Base;
        }
        match (is_instance, is_hidden) {
            (true, true) if method_follows_keyword(parser) => MemberStart::HiddenMethod,
            (true, _) => MemberStart::InstanceVariable,
            _ => MemberStart::HiddenMethod,
        }
    }

    fn parse_class_variable(
        &self,
        parser: &mut ParserState,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
    ) -> NodeIndex {
        parser.next_token();
        let statement = parser.parse_var_statement(member_start, node_flags::NONE);
        finishers::finish_class_variable(parser, &self.profile, statement);
        body.push(statement);
        statement
    }

    fn parse_hidden_method(
        &self,
        parser: &mut ParserState,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
        is_static: bool,
    ) -> NodeIndex {
        parser.next_token();
        let member = if is_static {
            self.base
                .parse_class_member_with_is_static(parser, body, member_start, state, true)
        } else {
            // Re-enters this dispatcher after a `static` prefix: `hidden static f() {}`.
            // Repeated keywords nest one level each.
            if !parser.enter_recursion() {
                return NodeIndex::NONE;
            }
            let member = self.base.parse_class_member(parser, body, member_start, state);
            parser.exit_recursion();
            member
        };
        if member.is_some() {
            finishers::finish_hidden_method(parser, self.marker.as_ref(), member);
        }
        member
    }
}

impl ClassMemberParser for ClassesMemberParser {
    fn parse_class_member_with_is_static(
        &self,
        parser: &mut ParserState,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
        is_static: bool,
    ) -> NodeIndex {
        if is_static && parser.is_token(SyntaxKind::OpenBraceToken) {
            debug!(pos = member_start, "class initializer");
            return finishers::finish_class_initializer(parser, body, member_start);
        }

        let start = self.classify(parser);
        if start != MemberStart::Base {
            debug!(pos = member_start, is_static, member = ?start, "extension class member");
        }
        match start {
            MemberStart::Base => self
                .base
                .parse_class_member_with_is_static(parser, body, member_start, state, is_static),
            MemberStart::InstanceVariable => self.parse_class_variable(parser, body, member_start),
            MemberStart::HiddenMethod => {
                self.parse_hidden_method(parser, body, member_start, state, is_static)
            }
        }
    }
}

/// With one keyword for both constructs (`my x;` and `my foo() {}`), look past
/// the keyword: a method head follows when the next name is followed by `(`,
/// or the member starts with something a declarator name never does.
fn method_follows_keyword(parser: &mut ParserState) -> bool {
    parser.look_ahead_with(|p| match p.token() {
        SyntaxKind::AsteriskToken
        | SyntaxKind::OpenBracketToken
        | SyntaxKind::StringLiteral
        | SyntaxKind::NumericLiteral => true,
        _ if p.is_identifier_or_keyword() => {
            let modifier = ["static", "async", "get", "set"]
                .iter()
                .any(|word| p.is_contextual(word));
            p.next_token();
            match p.token() {
                SyntaxKind::OpenParenToken => true,
                SyntaxKind::CommaToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken => false,
                _ => modifier && !p.has_preceding_line_break(),
            }
        }
        _ => false,
    })
}

#[cfg(test)]
#[path = "tests/class_members_tests.rs"]
mod class_members_tests;
