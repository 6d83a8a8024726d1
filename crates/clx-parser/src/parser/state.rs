//! Parser state: token cursor, lookahead, node construction helpers, and
//! recorded diagnostics.
//!
//! Parsing never aborts. Errors are pushed as `ParseDiagnostic`s and the
//! parser recovers, so the caller of `parse_source_file` always gets a tree
//! plus the list of problems found.

use super::base::{NodeIndex, NodeList};
use super::node::{IdentifierData, LiteralData, NodeArena, SourceFileData};
use super::options::{NodeConvention, ParserOptions};
use super::state_expressions::{BaseSubscriptParser, SubscriptParser};
use super::state_statements_class_members::{BaseClassMemberParser, ClassMemberParser};
use super::syntax_kind_ext;
use clx_common::Diagnostic;
use clx_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use clx_scanner::{
    ScannerState, SyntaxKind, TokenReader, parse_numeric_text, punctuation_to_text,
    token_is_identifier_or_keyword,
};
use std::sync::Arc;
use tracing::debug;

/// Maximum nesting depth before the parser stops descending.
pub const MAX_RECURSION_DEPTH: u32 = 1000;

/// A syntax error recorded during parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) options: ParserOptions,
    pub(crate) current_token: SyntaxKind,
    /// End offset of the most recently consumed token
    pub(crate) prev_token_end: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) class_member_parser: Arc<dyn ClassMemberParser>,
    pub(crate) subscript_parser: Arc<dyn SubscriptParser>,
    recursion_depth: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        Self::with_options(file_name, source_text, ParserOptions::default())
    }

    pub fn with_options(
        file_name: String,
        source_text: String,
        options: ParserOptions,
    ) -> ParserState {
        let estimated_nodes = source_text.len() / 8;
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::with_capacity(estimated_nodes),
            file_name,
            options,
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            parse_diagnostics: Vec::new(),
            class_member_parser: Arc::new(BaseClassMemberParser),
            subscript_parser: Arc::new(BaseSubscriptParser),
            recursion_depth: 0,
        }
    }

    // =========================================================================
    // Extension points
    // =========================================================================

    /// Install the class member parser every class body dispatches through.
    pub fn set_class_member_parser(&mut self, parser: Arc<dyn ClassMemberParser>) {
        self.class_member_parser = parser;
    }

    /// Install the parser consulted at every member-chain continuation.
    pub fn set_subscript_parser(&mut self, parser: Arc<dyn SubscriptParser>) {
        self.subscript_parser = parser;
    }

    /// Install a token reader on this parser's scanner.
    pub fn set_token_reader(&mut self, reader: Arc<dyn TokenReader>) {
        self.scanner.set_token_reader(Some(reader));
    }

    pub fn class_member_parser(&self) -> Arc<dyn ClassMemberParser> {
        Arc::clone(&self.class_member_parser)
    }

    pub fn subscript_parser(&self) -> Arc<dyn SubscriptParser> {
        Arc::clone(&self.subscript_parser)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn convention(&self) -> NodeConvention {
        self.options.convention
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_text(&self) -> &str {
        self.scanner.source_text()
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    /// Diagnostics as file-anchored `Diagnostic`s, ordered by position.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = self
            .parse_diagnostics
            .iter()
            .map(|d| {
                Diagnostic::error(
                    self.file_name.clone(),
                    d.start,
                    d.length,
                    d.message.clone(),
                    d.code,
                )
            })
            .collect();
        diagnostics.sort_by_key(|d| d.start);
        diagnostics
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub fn token_pos(&self) -> u32 {
        self.scanner.get_token_pos()
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        self.scanner.get_token_end()
    }

    /// End of the last consumed token; the end position of a finished node.
    #[inline]
    pub fn last_token_end(&self) -> u32 {
        self.prev_token_end
    }

    /// Cooked value of the current token (identifier name, string contents).
    #[inline]
    pub fn token_value(&self) -> &str {
        self.scanner.get_token_value_ref()
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub fn is_identifier_or_keyword(&self) -> bool {
        token_is_identifier_or_keyword(self.current_token)
    }

    /// True when the current token is the identifier `word` (contextual keyword).
    pub fn is_contextual(&self, word: &str) -> bool {
        self.is_token(SyntaxKind::Identifier) && self.token_value() == word
    }

    pub fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    /// Kind of the token after the current one, without consuming anything.
    pub fn look_ahead(&mut self) -> SyntaxKind {
        self.look_ahead_with(|parser| parser.token())
    }

    /// Run `f` one token ahead, then rewind.
    pub fn look_ahead_with<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let saved_token = self.current_token;
        let saved_end = self.prev_token_end;
        self.next_token();
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = saved_token;
        self.prev_token_end = saved_end;
        result
    }

    /// Consume the current token if it is `kind`.
    pub fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." at the current token.
    pub fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let text = punctuation_to_text(kind)
            .or_else(|| clx_scanner::keyword_to_text(kind))
            .unwrap_or("token");
        self.error_token_expected(text);
        false
    }

    /// Whether a statement may end here: `;`, `}`, end of file, or a line break.
    pub fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    /// Consume a statement terminator, applying automatic semicolon insertion.
    pub fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        self.error_token_expected(";");
        false
    }

    /// Step one level deeper into a nested construct. At `MAX_RECURSION_DEPTH`
    /// reports an unexpected token and returns false; the caller must bail out
    /// without calling `exit_recursion`.
    pub fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.parse_error_at_current_token(
                diagnostic_messages::UNEXPECTED_TOKEN,
                diagnostic_codes::UNEXPECTED_TOKEN,
            );
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record an error at `start`. A second error at the same offset is dropped.
    pub fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    /// Report "Unexpected token." at `pos`.
    pub fn unexpected_at(&mut self, pos: u32, length: u32) {
        self.parse_error_at(
            pos,
            length,
            diagnostic_messages::UNEXPECTED_TOKEN,
            diagnostic_codes::UNEXPECTED_TOKEN,
        );
    }

    pub fn error_token_expected(&mut self, token: &str) {
        let message = format_message(diagnostic_messages::EXPECTED, &[token]);
        self.parse_error_at_current_token(&message, diagnostic_codes::EXPECTED);
    }

    pub fn error_identifier_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
    }

    pub fn error_expression_expected(&mut self) {
        self.parse_error_at_current_token(
            diagnostic_messages::EXPRESSION_EXPECTED,
            diagnostic_codes::EXPRESSION_EXPECTED,
        );
    }

    fn merge_scanner_diagnostics(&mut self) {
        let scanner_diagnostics: Vec<ParseDiagnostic> = self
            .scanner
            .get_scanner_diagnostics()
            .iter()
            .map(|d| ParseDiagnostic {
                start: d.pos,
                length: d.length,
                message: d.message.to_string(),
                code: d.code,
            })
            .collect();
        self.parse_diagnostics.extend(scanner_diagnostics);
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }

    // =========================================================================
    // Leaf nodes
    // =========================================================================

    /// Parse a plain identifier. Reserved words are rejected.
    pub fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::Identifier) {
            self.error_identifier_expected();
            return NodeIndex::NONE;
        }
        self.parse_identifier_name()
    }

    /// Parse an identifier, accepting reserved words (property names).
    pub fn parse_identifier_name(&mut self) -> NodeIndex {
        if !self.is_identifier_or_keyword() {
            self.error_identifier_expected();
            return NodeIndex::NONE;
        }
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let text = self.scanner.get_token_value();
        let atom = self.arena.intern(&text);
        self.next_token();
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            start_pos,
            end_pos,
            IdentifierData {
                atom,
                escaped_text: text,
            },
        )
    }

    /// Parse the current string or numeric literal token.
    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let kind = self.token();
        let start_pos = self.token_pos();
        let end_pos = self.token_end();
        let text = self.scanner.get_token_value();
        let raw_text = self.scanner.get_token_text().to_string();
        let value = if kind == SyntaxKind::NumericLiteral {
            parse_numeric_text(&text)
        } else {
            None
        };
        self.next_token();
        self.arena.add_literal(
            kind as u16,
            start_pos,
            end_pos,
            LiteralData {
                text,
                raw_text,
                value,
            },
        )
    }

    pub(crate) fn make_node_list(&self, nodes: Vec<NodeIndex>) -> NodeList {
        NodeList::from(nodes)
    }

    // =========================================================================
    // Entry point
    // =========================================================================

    /// Parse the whole source text into a `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        debug!(
            file = %self.file_name,
            convention = self.options.convention.name(),
            token_reader = self.scanner.has_token_reader(),
            "parsing source file"
        );
        self.next_token();
        let statements = self.parse_statements_until(SyntaxKind::EndOfFileToken);
        self.merge_scanner_diagnostics();

        let text = self.scanner.source_text_arc();
        let end_pos = text.len() as u32;
        let root = self.arena.add_source_file(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end_pos,
            SourceFileData {
                file_name: self.file_name.clone(),
                text,
                statements,
            },
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }
}
