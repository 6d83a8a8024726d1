//! Character codes and classification helpers.

pub struct CharacterCodes;

impl CharacterCodes {
    pub const NULL: u32 = 0x00;
    pub const TAB: u32 = 0x09;
    pub const LINE_FEED: u32 = 0x0A;
    pub const VERTICAL_TAB: u32 = 0x0B;
    pub const FORM_FEED: u32 = 0x0C;
    pub const CARRIAGE_RETURN: u32 = 0x0D;
    pub const SPACE: u32 = 0x20;
    pub const DOUBLE_QUOTE: u32 = 0x22;
    pub const DOLLAR: u32 = 0x24;
    pub const SINGLE_QUOTE: u32 = 0x27;
    pub const ASTERISK: u32 = 0x2A;
    pub const DOT: u32 = 0x2E;
    pub const SLASH: u32 = 0x2F;
    pub const _0: u32 = 0x30;
    pub const _9: u32 = 0x39;
    pub const UPPER_A: u32 = 0x41;
    pub const UPPER_Z: u32 = 0x5A;
    pub const BACKSLASH: u32 = 0x5C;
    pub const UNDERSCORE: u32 = 0x5F;
    pub const BACKTICK: u32 = 0x60;
    pub const LOWER_A: u32 = 0x61;
    pub const LOWER_Z: u32 = 0x7A;
    pub const NON_BREAKING_SPACE: u32 = 0xA0;
    pub const LINE_SEPARATOR: u32 = 0x2028;
    pub const PARAGRAPH_SEPARATOR: u32 = 0x2029;
    pub const BYTE_ORDER_MARK: u32 = 0xFEFF;
}

#[inline]
pub fn is_line_break(ch: u32) -> bool {
    ch == CharacterCodes::LINE_FEED
        || ch == CharacterCodes::CARRIAGE_RETURN
        || ch == CharacterCodes::LINE_SEPARATOR
        || ch == CharacterCodes::PARAGRAPH_SEPARATOR
}

#[inline]
pub fn is_white_space_single_line(ch: u32) -> bool {
    ch == CharacterCodes::SPACE
        || ch == CharacterCodes::TAB
        || ch == CharacterCodes::VERTICAL_TAB
        || ch == CharacterCodes::FORM_FEED
        || ch == CharacterCodes::NON_BREAKING_SPACE
        || ch == CharacterCodes::BYTE_ORDER_MARK
}

#[inline]
pub fn is_digit(ch: u32) -> bool {
    (CharacterCodes::_0..=CharacterCodes::_9).contains(&ch)
}

#[inline]
pub fn is_identifier_start(ch: u32) -> bool {
    (CharacterCodes::UPPER_A..=CharacterCodes::UPPER_Z).contains(&ch)
        || (CharacterCodes::LOWER_A..=CharacterCodes::LOWER_Z).contains(&ch)
        || ch == CharacterCodes::DOLLAR
        || ch == CharacterCodes::UNDERSCORE
        || (ch > 0x7F && char::from_u32(ch).is_some_and(char::is_alphabetic))
}

#[inline]
pub fn is_identifier_part(ch: u32) -> bool {
    is_identifier_start(ch)
        || is_digit(ch)
        || (ch > 0x7F && char::from_u32(ch).is_some_and(char::is_alphanumeric))
}

/// True when `text` is a single identifier-like word.
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars().map(|c| c as u32);
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}
