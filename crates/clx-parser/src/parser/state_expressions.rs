//! Parser state - expression parsing methods.
//!
//! Member chains (`a.b`, `a[b]`, `a(b)`) are built by `parse_subscripts`,
//! which hands every continuation step to the installed [`SubscriptParser`].

use super::base::NodeIndex;
use super::node::*;
use super::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;
use clx_scanner::{SyntaxKind, token_is_assignment_operator};
use std::fmt;

/// State of one member chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubscriptState {
    /// Set when no further continuation applies; ends the chain.
    pub stop: bool,
}

/// Member-chain continuation capability.
pub trait SubscriptParser: Send + Sync + fmt::Debug {
    /// Parse one continuation of `base`, whose expression began at
    /// `start_pos`. Returns the extended expression, or `base` with
    /// `state.stop` set when the chain ends here. With `no_calls` set
    /// argument lists are not consumed (the callee of `new`).
    fn parse_subscript(
        &self,
        parser: &mut ParserState,
        base: NodeIndex,
        start_pos: u32,
        no_calls: bool,
        state: &mut SubscriptState,
    ) -> NodeIndex;
}

/// `.name`, `?.name`, `[expr]` and call continuations of the base grammar.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseSubscriptParser;

impl SubscriptParser for BaseSubscriptParser {
    fn parse_subscript(
        &self,
        parser: &mut ParserState,
        base: NodeIndex,
        start_pos: u32,
        no_calls: bool,
        state: &mut SubscriptState,
    ) -> NodeIndex {
        parser.parse_base_subscript(base, start_pos, no_calls, state)
    }
}

fn binary_operator_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken => 1,
        SyntaxKind::BarBarToken => 2,
        SyntaxKind::AmpersandAmpersandToken => 3,
        SyntaxKind::BarToken => 4,
        SyntaxKind::CaretToken => 5,
        SyntaxKind::AmpersandToken => 6,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 7,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 8,
        SyntaxKind::LessThanLessThanToken | SyntaxKind::GreaterThanGreaterThanToken => 9,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 10,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 11,
        _ => 0,
    }
}

impl ParserState {
    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    pub fn parse_expression(&mut self) -> NodeIndex {
        self.parse_assignment_expression()
    }

    /// Parse assignment expression (right associative).
    pub fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let start_pos = self.token_pos();
        let left = self.parse_conditional_expression();
        let result = if left.is_some() && token_is_assignment_operator(self.token()) {
            let operator_token = self.token() as u16;
            self.next_token();
            let right = self.parse_assignment_expression();
            if right.is_none() {
                self.error_expression_expected();
            }
            self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.last_token_end(),
                BinaryExprData {
                    left,
                    operator_token,
                    right,
                },
            )
        } else {
            left
        };
        self.exit_recursion();
        result
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let condition = self.parse_binary_expression(1);
        if condition.is_none() || !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let when_true = self.parse_assignment_expression();
        if when_true.is_none() {
            self.error_expression_expected();
        }
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        if when_false.is_none() {
            self.error_expression_expected();
        }
        self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start_pos,
            self.last_token_end(),
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    /// Parse binary expression with precedence climbing.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        if left.is_none() {
            return left;
        }

        loop {
            let op = self.token();
            let precedence = binary_operator_precedence(op);
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1);
            if right.is_none() {
                self.error_expression_expected();
                return left;
            }
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.last_token_end(),
                BinaryExprData {
                    left,
                    operator_token: op as u16,
                    right,
                },
            );
        }

        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                if !self.enter_recursion() {
                    return NodeIndex::NONE;
                }
                let start_pos = self.token_pos();
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                self.exit_recursion();
                if operand.is_none() {
                    self.error_expression_expected();
                }
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.last_token_end(),
                    UnaryExprData { operator, operand },
                )
            }
            _ => self.parse_left_hand_side_expression(),
        }
    }

    /// Parse a primary expression followed by its member chain.
    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expr = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if expr.is_none() {
            return expr;
        }
        self.parse_subscripts(expr, start_pos, false)
    }

    /// `new Callee[.member...] [(args)]`
    fn parse_new_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let callee_start = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if callee.is_none() {
            self.error_expression_expected();
            return NodeIndex::NONE;
        }
        let callee = self.parse_subscripts(callee, callee_start, true);
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start_pos,
            self.last_token_end(),
            CallExprData {
                expression: callee,
                arguments,
            },
        )
    }

    /// Extend `base` with member accesses and calls until the installed
    /// subscript parser stops the chain.
    pub fn parse_subscripts(&mut self, base: NodeIndex, start_pos: u32, no_calls: bool) -> NodeIndex {
        let mut state = SubscriptState::default();
        let mut expr = base;
        loop {
            let subscript_parser = self.subscript_parser();
            let next = subscript_parser.parse_subscript(self, expr, start_pos, no_calls, &mut state);
            if state.stop {
                return next;
            }
            expr = next;
        }
    }

    /// One step of the base grammar's member chain.
    pub fn parse_base_subscript(
        &mut self,
        base: NodeIndex,
        start_pos: u32,
        no_calls: bool,
        state: &mut SubscriptState,
    ) -> NodeIndex {
        match self.token() {
            SyntaxKind::DotToken => {
                self.next_token();
                let name = self.parse_identifier_name();
                self.add_access(syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION, base, name, start_pos, false)
            }
            SyntaxKind::QuestionDotToken if !no_calls => {
                self.next_token();
                match self.token() {
                    SyntaxKind::OpenBracketToken => {
                        let argument = self.parse_element_argument();
                        self.add_access(
                            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                            base,
                            argument,
                            start_pos,
                            true,
                        )
                    }
                    SyntaxKind::OpenParenToken => {
                        let call = self.parse_call(base, start_pos);
                        self.arena.add_flags(call, node_flags::OPTIONAL_CHAIN);
                        call
                    }
                    _ => {
                        let name = self.parse_identifier_name();
                        self.add_access(
                            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                            base,
                            name,
                            start_pos,
                            true,
                        )
                    }
                }
            }
            SyntaxKind::OpenBracketToken => {
                let argument = self.parse_element_argument();
                self.add_access(syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION, base, argument, start_pos, false)
            }
            SyntaxKind::OpenParenToken if !no_calls => self.parse_call(base, start_pos),
            _ => {
                state.stop = true;
                base
            }
        }
    }

    fn parse_element_argument(&mut self) -> NodeIndex {
        self.next_token();
        let argument = self.parse_expression();
        if argument.is_none() {
            self.error_expression_expected();
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        argument
    }

    fn add_access(
        &mut self,
        kind: u16,
        expression: NodeIndex,
        name_or_argument: NodeIndex,
        start_pos: u32,
        question_dot_token: bool,
    ) -> NodeIndex {
        let access = self.arena.add_access_expr(
            kind,
            start_pos,
            self.last_token_end(),
            AccessExprData {
                expression,
                name_or_argument,
                question_dot_token,
            },
        );
        if question_dot_token {
            self.arena.add_flags(access, node_flags::OPTIONAL_CHAIN);
        }
        access
    }

    fn parse_call(&mut self, callee: NodeIndex, start_pos: u32) -> NodeIndex {
        let arguments = self.parse_argument_list();
        self.arena.add_call_expr(
            syntax_kind_ext::CALL_EXPRESSION,
            start_pos,
            self.last_token_end(),
            CallExprData {
                expression: callee,
                arguments: Some(arguments),
            },
        )
    }

    /// Parse `( expr, expr, ... )`.
    fn parse_argument_list(&mut self) -> super::base::NodeList {
        let mut arguments = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let argument = self.parse_assignment_expression();
            if argument.is_none() {
                self.error_expression_expected();
                break;
            }
            arguments.push(argument);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(arguments)
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::Identifier => {
                if self.is_contextual("async")
                    && self.look_ahead_with(|p| {
                        p.is_token(SyntaxKind::FunctionKeyword) && !p.has_preceding_line_break()
                    })
                {
                    return self.parse_function(syntax_kind_ext::FUNCTION_EXPRESSION, true);
                }
                self.parse_identifier()
            }
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral => self.parse_literal(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token() as u16;
                let start_pos = self.token_pos();
                self.next_token();
                self.arena.add_token(kind, start_pos, self.last_token_end())
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_expression();
                if expression.is_none() {
                    self.error_expression_expected();
                }
                self.parse_expected(SyntaxKind::CloseParenToken);
                expression
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                self.parse_function(syntax_kind_ext::FUNCTION_EXPRESSION, false)
            }
            SyntaxKind::ClassKeyword => self.parse_class(syntax_kind_ext::CLASS_EXPRESSION),
            _ => {
                self.error_expression_expected();
                NodeIndex::NONE
            }
        }
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let element = self.parse_assignment_expression();
            if element.is_none() {
                break;
            }
            elements.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start_pos,
            self.last_token_end(),
            LiteralExprData {
                elements: self.make_node_list(elements),
            },
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let property = self.parse_property_assignment();
            if property.is_none() {
                break;
            }
            properties.push(property);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start_pos,
            self.last_token_end(),
            LiteralExprData {
                elements: self.make_node_list(properties),
            },
        )
    }

    /// `key: value` or shorthand `key`.
    fn parse_property_assignment(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let is_plain_identifier = self.is_token(SyntaxKind::Identifier);
        let (name, computed) = self.parse_property_name();
        if name.is_none() {
            return NodeIndex::NONE;
        }
        let shorthand = is_plain_identifier && !self.is_token(SyntaxKind::ColonToken);
        let initializer = if shorthand {
            name
        } else {
            self.parse_expected(SyntaxKind::ColonToken);
            let value = self.parse_assignment_expression();
            if value.is_none() {
                self.error_expression_expected();
            }
            value
        };
        self.arena.add_property_assignment(
            syntax_kind_ext::PROPERTY_ASSIGNMENT,
            start_pos,
            self.last_token_end(),
            PropertyAssignmentData {
                name,
                initializer,
                computed,
                shorthand,
            },
        )
    }
}
