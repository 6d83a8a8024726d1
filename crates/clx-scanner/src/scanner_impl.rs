//! Scanner state machine.
//!
//! `ScannerState` turns source text into tokens on demand. The parser pulls
//! one token at a time with `scan()` and uses `save_state`/`restore_state`
//! for lookahead. Trivia (whitespace and comments) is skipped; a line break
//! inside skipped trivia is reported through `has_preceding_line_break`.
//!
//! Positions are byte offsets into the source text.

use crate::char_codes::{
    CharacterCodes, is_digit, is_identifier_part, is_identifier_start, is_line_break,
    is_white_space_single_line,
};
use crate::syntax_kind::{PUNCTUATION_TABLE, SyntaxKind, text_to_keyword};
use clx_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use std::fmt;
use std::sync::Arc;

/// Per-token flags.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenFlags {
    None = 0,
    PrecedingLineBreak = 1 << 0,
    Unterminated = 1 << 2,
    HexSpecifier = 1 << 6,
    BinarySpecifier = 1 << 7,
    OctalSpecifier = 1 << 8,
}

/// Hook consulted before default tokenization of every token.
///
/// `code` is the code point at the cursor. A reader that recognizes a token
/// finishes it with [`ScannerState::finish_op`] and returns `true`; on `false`
/// the cursor must be left where it was and default scanning proceeds.
pub trait TokenReader: Send + Sync + fmt::Debug {
    fn try_read_token(&self, scanner: &mut ScannerState, code: u32) -> bool;
}

/// A lexical error recorded while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: u32,
    pub length: u32,
    pub message: &'static str,
    pub code: u32,
}

/// Everything needed to rewind the scanner after a lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start_pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    diagnostics_len: usize,
}

#[derive(Debug)]
pub struct ScannerState {
    text: Arc<str>,
    /// Current position (end of the current token)
    pos: usize,
    /// Start of the current token including leading trivia
    full_start_pos: usize,
    /// Start of the current token excluding trivia
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    token_reader: Option<Arc<dyn TokenReader>>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        ScannerState {
            text: Arc::from(text),
            pos: 0,
            full_start_pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: 0,
            token_reader: None,
            diagnostics: Vec::new(),
        }
    }

    /// Install (or clear) the token reader consulted before default scanning.
    pub fn set_token_reader(&mut self, reader: Option<Arc<dyn TokenReader>>) {
        self.token_reader = reader;
    }

    pub fn has_token_reader(&self) -> bool {
        self.token_reader.is_some()
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    // =========================================================================
    // Token accessors
    // =========================================================================

    #[inline]
    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    /// Current cursor position (end of the current token).
    #[inline]
    pub fn get_pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn get_token_pos(&self) -> u32 {
        self.token_start as u32
    }

    #[inline]
    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    #[inline]
    pub fn get_token_full_start(&self) -> u32 {
        self.full_start_pos as u32
    }

    pub fn get_token_value(&self) -> String {
        self.token_value.clone()
    }

    #[inline]
    pub fn get_token_value_ref(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    #[inline]
    pub fn get_token_flags(&self) -> u32 {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        (self.token_flags & TokenFlags::PrecedingLineBreak as u32) != 0
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        (self.token_flags & TokenFlags::Unterminated as u32) != 0
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    // =========================================================================
    // Lookahead support
    // =========================================================================

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start_pos: self.full_start_pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start_pos = snapshot.full_start_pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    // =========================================================================
    // Character access
    // =========================================================================

    /// Code point starting at byte offset `pos`, or `None` past the end or
    /// inside a multi-byte sequence.
    #[inline]
    pub fn char_code_at(&self, pos: usize) -> Option<u32> {
        self.text.get(pos..)?.chars().next().map(|c| c as u32)
    }

    #[inline]
    fn char_len_at(&self, pos: usize) -> usize {
        self.text
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8)
    }

    /// Finish the current token as `kind`, covering the next `len` bytes.
    pub fn finish_op(&mut self, kind: SyntaxKind, len: usize) {
        let end = (self.pos + len).min(self.text.len());
        self.token_value.clear();
        self.token_value.push_str(&self.text[self.pos..end]);
        self.pos = end;
        self.token = kind;
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: pos as u32,
            length: length as u32,
            message,
            code,
        });
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token and make it current.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start_pos = self.pos;
        self.token_flags = 0;

        let ch = loop {
            self.token_start = self.pos;
            let Some(ch) = self.char_code_at(self.pos) else {
                self.token = SyntaxKind::EndOfFileToken;
                self.token_value.clear();
                return self.token;
            };

            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
                self.pos += self.char_len_at(self.pos);
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += self.char_len_at(self.pos);
                continue;
            }
            if ch == CharacterCodes::SLASH {
                match self.char_code_at(self.pos + 1) {
                    Some(CharacterCodes::SLASH) => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some(CharacterCodes::ASTERISK) => {
                        self.skip_block_comment();
                        continue;
                    }
                    _ => {}
                }
            }
            break ch;
        };

        if let Some(reader) = self.token_reader.clone()
            && reader.try_read_token(self, ch)
        {
            return self.token;
        }

        if is_identifier_start(ch) {
            return self.scan_identifier();
        }
        if is_digit(ch)
            || (ch == CharacterCodes::DOT && self.char_code_at(self.pos + 1).is_some_and(is_digit))
        {
            return self.scan_number();
        }
        if ch == CharacterCodes::DOUBLE_QUOTE || ch == CharacterCodes::SINGLE_QUOTE {
            return self.scan_string(ch);
        }
        self.scan_punctuation()
    }

    fn skip_line_comment(&mut self) {
        self.pos += 2;
        while let Some(ch) = self.char_code_at(self.pos) {
            if is_line_break(ch) {
                break;
            }
            self.pos += self.char_len_at(self.pos);
        }
    }

    fn skip_block_comment(&mut self) {
        let body_start = self.pos + 2;
        let bytes = self.text.as_bytes();
        match memchr::memmem::find(&bytes[body_start..], b"*/") {
            Some(offset) => {
                let body = &self.text[body_start..body_start + offset];
                if body.chars().any(|c| is_line_break(c as u32)) {
                    self.token_flags |= TokenFlags::PrecedingLineBreak as u32;
                }
                self.pos = body_start + offset + 2;
            }
            None => {
                self.pos = self.text.len();
                self.error(
                    self.pos,
                    0,
                    diagnostic_messages::ASTERISK_SLASH_EXPECTED,
                    diagnostic_codes::ASTERISK_SLASH_EXPECTED,
                );
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.char_code_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += self.char_len_at(self.pos);
        }
        self.token_value.clear();
        self.token_value.push_str(&self.text[start..self.pos]);
        self.token = text_to_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier);
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let radix_flag = if self.char_code_at(start) == Some(CharacterCodes::_0) {
            match self.char_code_at(start + 1) {
                Some(0x78 | 0x58) => Some(TokenFlags::HexSpecifier),
                Some(0x62 | 0x42) => Some(TokenFlags::BinarySpecifier),
                Some(0x6F | 0x4F) => Some(TokenFlags::OctalSpecifier),
                _ => None,
            }
        } else {
            None
        };

        if let Some(flag) = radix_flag {
            self.token_flags |= flag as u32;
            self.pos += 2;
            while self
                .char_code_at(self.pos)
                .is_some_and(|c| char::from_u32(c).is_some_and(|c| c.is_ascii_hexdigit()))
            {
                self.pos += 1;
            }
        } else {
            self.skip_digits();
            if self.char_code_at(self.pos) == Some(CharacterCodes::DOT) {
                self.pos += 1;
                self.skip_digits();
            }
            if matches!(self.char_code_at(self.pos), Some(0x65 | 0x45)) {
                let exponent_start = self.pos;
                self.pos += 1;
                if matches!(self.char_code_at(self.pos), Some(0x2B | 0x2D)) {
                    self.pos += 1;
                }
                if self.char_code_at(self.pos).is_some_and(is_digit) {
                    self.skip_digits();
                } else {
                    // `1e` is the number 1 followed by an identifier
                    self.pos = exponent_start;
                }
            }
        }

        self.token_value.clear();
        self.token_value.push_str(&self.text[start..self.pos]);
        self.token = SyntaxKind::NumericLiteral;
        self.token
    }

    fn skip_digits(&mut self) {
        while self.char_code_at(self.pos).is_some_and(is_digit) {
            self.pos += 1;
        }
    }

    fn scan_string(&mut self, quote: u32) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();

        loop {
            let Some(ch) = self.char_code_at(self.pos) else {
                self.report_unterminated_string(start);
                break;
            };
            if is_line_break(ch) {
                self.report_unterminated_string(start);
                break;
            }
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == CharacterCodes::BACKSLASH {
                self.pos += 1;
                self.scan_escape_sequence(&mut value);
                continue;
            }
            let len = self.char_len_at(self.pos);
            value.push_str(&self.text[self.pos..self.pos + len]);
            self.pos += len;
        }

        self.token_value = value;
        self.token = SyntaxKind::StringLiteral;
        self.token
    }

    fn report_unterminated_string(&mut self, start: usize) {
        self.token_flags |= TokenFlags::Unterminated as u32;
        self.error(
            start,
            self.pos - start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    fn scan_escape_sequence(&mut self, value: &mut String) {
        let Some(ch) = self.char_code_at(self.pos) else {
            return;
        };
        let len = self.char_len_at(self.pos);
        self.pos += len;
        let escaped = match char::from_u32(ch).unwrap_or('\u{FFFD}') {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{C}',
            'v' => '\u{B}',
            '0' if !self.char_code_at(self.pos).is_some_and(is_digit) => '\0',
            'x' => self.scan_hex_escape(2),
            'u' => {
                if self.char_code_at(self.pos) == Some(0x7B) {
                    self.scan_braced_unicode_escape()
                } else {
                    self.scan_hex_escape(4)
                }
            }
            '\r' => {
                // Line continuation; `\r\n` counts as one break
                if self.char_code_at(self.pos) == Some(CharacterCodes::LINE_FEED) {
                    self.pos += 1;
                }
                return;
            }
            '\n' | '\u{2028}' | '\u{2029}' => return,
            other => other,
        };
        value.push(escaped);
    }

    fn scan_hex_escape(&mut self, digits: usize) -> char {
        let start = self.pos;
        let end = (start + digits).min(self.text.len());
        let parsed = self
            .text
            .get(start..end)
            .filter(|hex| hex.len() == digits)
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        match parsed {
            Some(c) => {
                self.pos = end;
                c
            }
            None => '\u{FFFD}',
        }
    }

    fn scan_braced_unicode_escape(&mut self) -> char {
        let open = self.pos;
        let Some(close) = self.text[open..].find('}') else {
            return '\u{FFFD}';
        };
        let parsed = u32::from_str_radix(&self.text[open + 1..open + close], 16)
            .ok()
            .and_then(char::from_u32);
        self.pos = open + close + 1;
        parsed.unwrap_or('\u{FFFD}')
    }

    fn scan_punctuation(&mut self) -> SyntaxKind {
        let rest = &self.text[self.pos..];
        for &(text, kind) in PUNCTUATION_TABLE {
            if !rest.starts_with(text) {
                continue;
            }
            // `a?.5:b` is a conditional, not optional chaining
            if kind == SyntaxKind::QuestionDotToken
                && self.char_code_at(self.pos + 2).is_some_and(is_digit)
            {
                continue;
            }
            self.finish_op(kind, text.len());
            return self.token;
        }

        let len = self.char_len_at(self.pos);
        self.error(
            self.pos,
            len,
            diagnostic_messages::INVALID_CHARACTER,
            diagnostic_codes::INVALID_CHARACTER,
        );
        self.finish_op(SyntaxKind::Unknown, len);
        self.token
    }
}

/// Numeric value of a numeric literal's source text.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let lower = text.to_ascii_lowercase();
    let parse_radix =
        |digits: &str, base: u32| u64::from_str_radix(digits, base).ok().map(|v| v as f64);
    if let Some(hex) = lower.strip_prefix("0x") {
        parse_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        parse_radix(bin, 2)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        parse_radix(oct, 8)
    } else {
        lower.parse::<f64>().ok()
    }
}

#[cfg(test)]
#[path = "tests/scanner_impl_tests.rs"]
mod scanner_impl_tests;
