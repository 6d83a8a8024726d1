//! Parser state - statement and declaration parsing.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;
use clx_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use clx_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// Parse statements until `terminator` (not consumed) or end of file.
    pub(crate) fn parse_statements_until(&mut self, terminator: SyntaxKind) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(terminator) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let start_pos = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            // Recovery: skip a token that no statement could start with
            if self.token_pos() == start_pos && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.parse_error_at_current_token(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        self.make_node_list(statements)
    }

    pub fn parse_statement(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let start_pos = self.token_pos();
                self.next_token();
                self.arena.add_token(
                    syntax_kind_ext::EMPTY_STATEMENT,
                    start_pos,
                    self.last_token_end(),
                )
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::ClassKeyword => self.parse_class_declaration(),
            SyntaxKind::ReturnKeyword => {
                self.parse_return_or_throw(syntax_kind_ext::RETURN_STATEMENT)
            }
            SyntaxKind::ThrowKeyword => self.parse_return_or_throw(syntax_kind_ext::THROW_STATEMENT),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => NodeIndex::NONE,
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse `{ statements }`.
    pub fn parse_block(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return NodeIndex::NONE;
        }
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let statements = self.parse_statements_until(SyntaxKind::CloseBraceToken);
        self.exit_recursion();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_block(
            syntax_kind_ext::BLOCK,
            start_pos,
            self.last_token_end(),
            BlockData { statements },
        )
    }

    // =========================================================================
    // Variables
    // =========================================================================

    /// Parse `var`/`let`/`const` declarations as a statement.
    pub(crate) fn parse_variable_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::LetKeyword => node_flags::LET,
            SyntaxKind::ConstKeyword => node_flags::CONST,
            _ => node_flags::NONE,
        };
        self.next_token();
        self.parse_var_statement(start_pos, flags)
    }

    /// Parse the declarator list and terminator of a variable statement whose
    /// keyword has already been consumed. `flags` selects the declared kind
    /// (`node_flags::LET`, `node_flags::CONST`, or none for `var`).
    pub fn parse_var_statement(&mut self, start_pos: u32, flags: u32) -> NodeIndex {
        let mut declarations = Vec::new();
        loop {
            let declaration = self.parse_variable_declaration();
            if declaration.is_none() {
                break;
            }
            declarations.push(declaration);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_semicolon();

        let statement = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_STATEMENT,
            start_pos,
            self.last_token_end(),
            VariableData {
                declarations: self.make_node_list(declarations),
            },
        );
        self.arena.add_flags(statement, flags);
        statement
    }

    /// Parse `name [= initializer]`.
    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let name = self.parse_identifier();
        if name.is_none() {
            return NodeIndex::NONE;
        }
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            let init = self.parse_assignment_expression();
            if init.is_none() {
                self.error_expression_expected();
            }
            init
        } else {
            NodeIndex::NONE
        };
        self.arena.add_variable_declaration(
            syntax_kind_ext::VARIABLE_DECLARATION,
            start_pos,
            self.last_token_end(),
            VariableDeclarationData { name, initializer },
        )
    }

    // =========================================================================
    // Simple statements
    // =========================================================================

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let expression = self.parse_expression();
        if expression.is_none() {
            return NodeIndex::NONE;
        }
        self.parse_semicolon();
        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start_pos,
            self.last_token_end(),
            ExprStatementData { expression },
        )
    }

    fn parse_return_or_throw(&mut self, kind: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        if kind == syntax_kind_ext::THROW_STATEMENT && expression.is_none() {
            self.error_expression_expected();
        }
        self.parse_semicolon();
        self.arena.add_return(
            kind,
            start_pos,
            self.last_token_end(),
            ReturnData { expression },
        )
    }

    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        if condition.is_none() {
            self.error_expression_expected();
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        condition
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_nested_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_nested_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            start_pos,
            self.last_token_end(),
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let statement = self.parse_nested_statement();
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start_pos,
            self.last_token_end(),
            LoopData {
                condition,
                statement,
            },
        )
    }

    fn parse_nested_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let statement = self.parse_statement();
        self.exit_recursion();
        if statement.is_none() {
            self.parse_error_at_current_token(
                diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
            );
        }
        statement
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn parse_function_declaration(&mut self) -> NodeIndex {
        self.parse_function(syntax_kind_ext::FUNCTION_DECLARATION, false)
    }

    /// Parse `[async] function [*] [name] (params) { body }`.
    pub(crate) fn parse_function(&mut self, kind: u16, is_async: bool) -> NodeIndex {
        let start_pos = self.token_pos();
        if is_async {
            self.next_token();
        }
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk_token = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            if kind == syntax_kind_ext::FUNCTION_DECLARATION {
                self.error_identifier_expected();
            }
            NodeIndex::NONE
        };
        let parameters = self.parse_parameter_list();
        let body = self.parse_function_body();
        self.arena.add_function(
            kind,
            start_pos,
            self.last_token_end(),
            FunctionData {
                is_async,
                asterisk_token,
                name,
                parameters,
                body,
            },
        )
    }

    /// Parse `( a, b, c )`. Parameters are plain identifiers.
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return self.make_node_list(parameters);
        }
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let parameter = self.parse_identifier();
            if parameter.is_none() {
                break;
            }
            parameters.push(parameter);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.make_node_list(parameters)
    }

    pub(crate) fn parse_function_body(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.error_token_expected("{");
            NodeIndex::NONE
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn parse_class_declaration(&mut self) -> NodeIndex {
        self.parse_class(syntax_kind_ext::CLASS_DECLARATION)
    }

    /// Parse `class [name] [extends expr] { members }`.
    pub(crate) fn parse_class(&mut self, kind: u16) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            if kind == syntax_kind_ext::CLASS_DECLARATION {
                self.error_identifier_expected();
            }
            NodeIndex::NONE
        };
        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            let start = self.token_pos();
            let base = self.parse_primary_expression();
            let heritage = self.parse_subscripts(base, start, false);
            if heritage.is_none() {
                self.error_expression_expected();
            }
            heritage
        } else {
            NodeIndex::NONE
        };

        let body_pos = self.token_pos();
        let members = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let members = self.parse_class_members();
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            NodeList::new()
        };

        self.arena.add_class(
            kind,
            start_pos,
            self.last_token_end(),
            ClassData {
                name,
                heritage,
                members,
                body_pos,
            },
        )
    }
}
