//! Diagnostic types and message lookup for the parser.
//!
//! Parse errors are recorded rather than thrown: the parser pushes a
//! `Diagnostic` and recovers, and the caller of the top-level parse decides
//! what to do with the collected list.

use serde::Serialize;
use std::fmt;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parse diagnostic anchored at a byte offset of one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}): {} CLX{}: {}",
            self.file, self.start, self.category, self.code, self.message_text
        )
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const UNEXPECTED_TOKEN: u32 = 1012;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const INSTANCE_VARIABLES_INITIALIZER_IS_DISABLED: u32 = 2001;
    pub const ONLY_METHODS_CAN_BE_MARKED_HIDDEN: u32 = 2003;
    pub const DUPLICATE_CONSTRUCTOR_IN_THE_SAME_CLASS: u32 = 2004;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const INSTANCE_VARIABLES_INITIALIZER_IS_DISABLED: &str =
        "Instance variables initializer is disabled.";
    pub const ONLY_METHODS_CAN_BE_MARKED_HIDDEN: &str = "Only methods can be marked hidden.";
    pub const DUPLICATE_CONSTRUCTOR_IN_THE_SAME_CLASS: &str =
        "Duplicate constructor in the same class.";
}

macro_rules! message {
    ($name:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::Error,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(UNTERMINATED_STRING_LITERAL),
    message!(IDENTIFIER_EXPECTED),
    message!(EXPECTED),
    message!(ASTERISK_SLASH_EXPECTED),
    message!(UNEXPECTED_TOKEN),
    message!(EXPRESSION_EXPECTED),
    message!(INVALID_CHARACTER),
    message!(DECLARATION_OR_STATEMENT_EXPECTED),
    message!(INSTANCE_VARIABLES_INITIALIZER_IS_DISABLED),
    message!(ONLY_METHODS_CAN_BE_MARKED_HIDDEN),
    message!(DUPLICATE_CONSTRUCTOR_IN_THE_SAME_CLASS),
];

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
