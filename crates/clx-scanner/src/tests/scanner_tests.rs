//! Tests for the keyword/punctuation tables and character classes.

use crate::char_codes::{is_identifier_start, is_identifier_text, is_line_break};
use crate::*;

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::VarKeyword));
    assert!(token_is_keyword(SyntaxKind::LetKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_token_is_identifier_or_keyword() {
    assert!(token_is_identifier_or_keyword(SyntaxKind::Identifier));
    assert!(token_is_identifier_or_keyword(SyntaxKind::ClassKeyword));
    assert!(!token_is_identifier_or_keyword(SyntaxKind::StringLiteral));
}

#[test]
fn test_token_is_punctuation() {
    assert!(token_is_punctuation(SyntaxKind::OpenBraceToken));
    assert!(token_is_punctuation(SyntaxKind::EqualsToken));
    assert!(!token_is_punctuation(SyntaxKind::ExtensionOperatorToken));
    assert!(!token_is_punctuation(SyntaxKind::Identifier));
}

#[test]
fn test_token_is_assignment_operator() {
    assert!(token_is_assignment_operator(SyntaxKind::EqualsToken));
    assert!(token_is_assignment_operator(SyntaxKind::PlusEqualsToken));
    assert!(!token_is_assignment_operator(SyntaxKind::PlusToken));
}

#[test]
fn test_text_to_keyword() {
    assert_eq!(text_to_keyword("var"), Some(SyntaxKind::VarKeyword));
    assert_eq!(text_to_keyword("class"), Some(SyntaxKind::ClassKeyword));
    // Contextual words and extension keywords stay identifiers
    assert_eq!(text_to_keyword("static"), None);
    assert_eq!(text_to_keyword("hidden"), None);
    assert_eq!(text_to_keyword("my"), None);
    assert_eq!(text_to_keyword("VAR"), None);
}

#[test]
fn test_keyword_and_punctuation_text() {
    assert_eq!(keyword_to_text(SyntaxKind::FunctionKeyword), Some("function"));
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
    assert_eq!(punctuation_to_text(SyntaxKind::EqualsGreaterThanToken), Some("=>"));
    assert_eq!(punctuation_to_text(SyntaxKind::DotDotDotToken), Some("..."));
    assert_eq!(text_to_punctuation("&&"), Some(SyntaxKind::AmpersandAmpersandToken));
    assert_eq!(text_to_punctuation("->"), None);
    assert_eq!(text_to_punctuation("::"), None);
}

#[test]
fn test_punctuation_table_is_longest_first() {
    for (i, (text, _)) in PUNCTUATION_TABLE.iter().enumerate() {
        for (later, _) in &PUNCTUATION_TABLE[i + 1..] {
            assert!(
                !(later.len() > text.len() && later.starts_with(text)),
                "'{later}' must come before its prefix '{text}'"
            );
        }
    }
}

#[test]
fn test_character_classes() {
    assert!(is_identifier_start('a' as u32));
    assert!(is_identifier_start('$' as u32));
    assert!(is_identifier_start('é' as u32));
    assert!(!is_identifier_start('1' as u32));
    assert!(is_line_break('\n' as u32));
    assert!(is_line_break(CharacterCodes::LINE_SEPARATOR));
    assert!(is_identifier_text("internal"));
    assert!(is_identifier_text("_x1"));
    assert!(!is_identifier_text("1x"));
    assert!(!is_identifier_text("a b"));
    assert!(!is_identifier_text(""));
}
