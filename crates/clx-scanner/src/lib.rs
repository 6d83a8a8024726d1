//! JavaScript scanner/tokenizer for the clx parser.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `TokenReader` - Hook that lets an extension claim tokens before default scanning
//! - `CharacterCodes` - Character classification utilities

pub mod char_codes;
pub use char_codes::CharacterCodes;

pub mod syntax_kind;
pub use syntax_kind::*;

pub mod scanner_impl;
pub use scanner_impl::{
    ScannerDiagnostic, ScannerSnapshot, ScannerState, TokenFlags, TokenReader, parse_numeric_text,
};

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
