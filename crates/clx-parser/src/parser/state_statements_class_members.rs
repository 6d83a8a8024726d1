//! Parser state - class member parsing.
//!
//! Class bodies are parsed one member at a time through the installed
//! [`ClassMemberParser`]. The parser keeps the implementation behind an
//! `Arc`, so an extension can decorate [`BaseClassMemberParser`] and fall
//! back to it for anything it does not handle.

use super::base::{NodeIndex, NodeList};
use super::node::{MethodDeclData, MethodKind, PropertyDeclData};
use super::options::NodeConvention;
use super::state::ParserState;
use super::syntax_kind_ext;
use clx_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use clx_scanner::SyntaxKind;
use std::fmt;

/// Mutable state shared by all members of one class body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassBodyState {
    pub had_constructor: bool,
}

/// Class member parsing capability.
///
/// Both entry points append the finished member to `body` and return it
/// (`NodeIndex::NONE` when nothing was produced). `member_start` is the
/// offset where the member began, before any `static` prefix.
pub trait ClassMemberParser: Send + Sync + fmt::Debug {
    /// Parse a single member from its first token: consume a `static`
    /// prefix if present, then dispatch through the parser's installed
    /// `parse_class_member_with_is_static`.
    fn parse_class_member(
        &self,
        parser: &mut ParserState,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
    ) -> NodeIndex {
        parser.parse_class_member_modifiers(body, member_start, state)
    }

    /// Parse the rest of a member once `static` has been decided.
    fn parse_class_member_with_is_static(
        &self,
        parser: &mut ParserState,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
        is_static: bool,
    ) -> NodeIndex;
}

/// Methods, accessors, constructors and fields of the base grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseClassMemberParser;

impl ClassMemberParser for BaseClassMemberParser {
    fn parse_class_member_with_is_static(
        &self,
        parser: &mut ParserState,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
        is_static: bool,
    ) -> NodeIndex {
        parser.parse_class_element(body, member_start, state, is_static)
    }
}

/// Tokens after a modifier-like word that make the word a member name instead.
fn is_member_name_terminator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenParenToken
            | SyntaxKind::EqualsToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken
    )
}

impl ParserState {
    /// Parse `{ ... }` members up to (not including) the closing brace.
    pub(crate) fn parse_class_members(&mut self) -> NodeList {
        let mut members = Vec::new();
        let mut state = ClassBodyState::default();

        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let member_start = self.token_pos();
            let dispatcher = self.class_member_parser();
            dispatcher.parse_class_member(self, &mut members, member_start, &mut state);

            // Recovery: a member that consumed nothing
            if self.token_pos() == member_start
                && !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                self.parse_error_at_current_token(
                    diagnostic_messages::UNEXPECTED_TOKEN,
                    diagnostic_codes::UNEXPECTED_TOKEN,
                );
                self.next_token();
            }
        }

        self.make_node_list(members)
    }

    /// Handle a `static` prefix and dispatch the member through the
    /// installed class member parser.
    ///
    /// `static` directly followed by `(`, `=`, `;` or `}` is a member named
    /// `static`, not a modifier.
    pub fn parse_class_member_modifiers(
        &mut self,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
    ) -> NodeIndex {
        let is_static =
            self.is_contextual("static") && !is_member_name_terminator(self.look_ahead());
        if is_static {
            self.next_token();
        }
        let dispatcher = self.class_member_parser();
        dispatcher.parse_class_member_with_is_static(self, body, member_start, state, is_static)
    }

    /// Parse a method, accessor, constructor or field and append it to `body`.
    pub fn parse_class_element(
        &mut self,
        body: &mut Vec<NodeIndex>,
        member_start: u32,
        state: &mut ClassBodyState,
        is_static: bool,
    ) -> NodeIndex {
        let mut is_async = false;
        if self.is_contextual("async") {
            let is_modifier = self.look_ahead_with(|p| {
                !is_member_name_terminator(p.token()) && !p.has_preceding_line_break()
            });
            if is_modifier {
                self.next_token();
                is_async = true;
            }
        }
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);

        let mut method_kind = MethodKind::Method;
        if !is_async
            && !asterisk_token
            && (self.is_contextual("get") || self.is_contextual("set"))
            && !is_member_name_terminator(self.look_ahead())
        {
            method_kind = if self.token_value() == "get" {
                MethodKind::Get
            } else {
                MethodKind::Set
            };
            self.next_token();
        }

        let key_pos = self.token_pos();
        let key_end = self.token_end();
        let (name, computed) = self.parse_property_name();
        if name.is_none() {
            return NodeIndex::NONE;
        }

        let member = if self.is_token(SyntaxKind::OpenParenToken) {
            if method_kind == MethodKind::Method
                && !is_static
                && !computed
                && !is_async
                && !asterisk_token
                && self.property_name_text(name) == Some("constructor")
            {
                if state.had_constructor {
                    self.parse_error_at(
                        key_pos,
                        key_end - key_pos,
                        diagnostic_messages::DUPLICATE_CONSTRUCTOR_IN_THE_SAME_CLASS,
                        diagnostic_codes::DUPLICATE_CONSTRUCTOR_IN_THE_SAME_CLASS,
                    );
                }
                state.had_constructor = true;
                method_kind = MethodKind::Constructor;
            }
            self.parse_class_method(
                member_start,
                MethodDeclData {
                    name,
                    computed,
                    method_kind,
                    is_static,
                    is_async,
                    asterisk_token,
                    parameters: NodeList::new(),
                    body: NodeIndex::NONE,
                    parameters_pos: 0,
                },
            )
        } else {
            if is_async || asterisk_token || method_kind != MethodKind::Method {
                self.error_token_expected("(");
            }
            self.parse_class_property(member_start, name, computed, is_static)
        };

        body.push(member);
        member
    }

    /// Parse `[expr]`, an identifier or keyword, or a string/numeric literal.
    /// Returns the key and whether it is computed.
    pub(crate) fn parse_property_name(&mut self) -> (NodeIndex, bool) {
        match self.token() {
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.parse_assignment_expression();
                if expression.is_none() {
                    self.error_expression_expected();
                }
                self.parse_expected(SyntaxKind::CloseBracketToken);
                (expression, true)
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => (self.parse_literal(), false),
            _ if self.is_identifier_or_keyword() => (self.parse_identifier_name(), false),
            _ => {
                self.error_identifier_expected();
                (NodeIndex::NONE, false)
            }
        }
    }

    /// Static text of an identifier or string-literal key.
    fn property_name_text(&self, name: NodeIndex) -> Option<&str> {
        let node = self.arena.get(name)?;
        if let Some(identifier) = self.arena.get_identifier(node) {
            return Some(self.arena.resolve_identifier_text(identifier));
        }
        if node.kind == SyntaxKind::StringLiteral as u16 {
            return self.arena.get_literal(node).map(|lit| lit.text.as_str());
        }
        None
    }

    fn parse_class_method(&mut self, member_start: u32, mut data: MethodDeclData) -> NodeIndex {
        data.parameters_pos = self.token_pos();
        data.parameters = self.parse_parameter_list();
        data.body = self.parse_function_body();
        let kind = match self.convention() {
            NodeConvention::Default => syntax_kind_ext::CLASS_METHOD,
            NodeConvention::Flat => syntax_kind_ext::METHOD_DEFINITION,
        };
        self.arena
            .add_method_decl(kind, member_start, self.last_token_end(), data)
    }

    fn parse_class_property(
        &mut self,
        member_start: u32,
        name: NodeIndex,
        computed: bool,
        is_static: bool,
    ) -> NodeIndex {
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            let init = self.parse_assignment_expression();
            if init.is_none() {
                self.error_expression_expected();
            }
            init
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let kind = match self.convention() {
            NodeConvention::Default => syntax_kind_ext::CLASS_PROPERTY,
            NodeConvention::Flat => syntax_kind_ext::PROPERTY_DEFINITION,
        };
        self.arena.add_property_decl(
            kind,
            member_start,
            self.last_token_end(),
            PropertyDeclData {
                name,
                computed,
                is_static,
                initializer,
            },
        )
    }
}
