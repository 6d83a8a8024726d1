//! Custom operator recognition at the scanner cursor.

use crate::profile::ResolvedProfile;
use clx_scanner::{ScannerState, TokenReader};
use std::sync::Arc;
use tracing::trace;

/// Claims the profile's operator before default punctuation scanning, so a
/// multi-character operator like `->` is never split into `-` and `>`.
#[derive(Debug, Clone)]
pub struct OperatorReader {
    profile: Arc<ResolvedProfile>,
}

impl OperatorReader {
    pub fn new(profile: Arc<ResolvedProfile>) -> OperatorReader {
        OperatorReader { profile }
    }

    /// Whether the operator starts at the cursor, given the code point there.
    /// Never moves the cursor.
    pub fn is_operator_at(&self, scanner: &ScannerState, code: u32) -> bool {
        let codes = &self.profile.operator_char_codes;
        let Some((&first, rest)) = codes.split_first() else {
            return false;
        };
        if code != first {
            return false;
        }
        let mut offset = scanner.get_pos() + utf8_len(first);
        for &expected in rest {
            if scanner.char_code_at(offset) != Some(expected) {
                return false;
            }
            offset += utf8_len(expected);
        }
        true
    }
}

impl TokenReader for OperatorReader {
    fn try_read_token(&self, scanner: &mut ScannerState, code: u32) -> bool {
        if !self.is_operator_at(scanner, code) {
            return false;
        }
        trace!(pos = scanner.get_pos(), operator = self.profile.operator(), "operator token");
        scanner.finish_op(self.profile.operator_token_kind, self.profile.operator().len());
        true
    }
}

#[inline]
fn utf8_len(code: u32) -> usize {
    char::from_u32(code).map_or(1, char::len_utf8)
}

#[cfg(test)]
#[path = "tests/operator_tests.rs"]
mod operator_tests;
