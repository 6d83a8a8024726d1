//! Token kinds and keyword/punctuation tables.
//!
//! Token kinds occupy the low `u16` range; composite node kinds produced by
//! the parser start at `syntax_kind_ext::FIRST_NODE` in `clx-parser`.

use serde::Serialize;

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken = 1,

    // Literals
    NumericLiteral = 8,
    StringLiteral = 9,

    // Punctuation
    OpenBraceToken = 18,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    HashToken,

    // Assignments
    EqualsToken = 64,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,

    /// Token produced by a registered `TokenReader`. A scanner carries at
    /// most one reader, so within one parser instance this kind identifies
    /// exactly one operator string.
    ExtensionOperatorToken = 78,

    Identifier = 80,

    // Reserved words
    BreakKeyword = 83,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
    LetKeyword,
}

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("break", SyntaxKind::BreakKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("debugger", SyntaxKind::DebuggerKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delete", SyntaxKind::DeleteKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("instanceof", SyntaxKind::InstanceOfKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("super", SyntaxKind::SuperKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("with", SyntaxKind::WithKeyword),
    ("let", SyntaxKind::LetKeyword),
];

/// Punctuators of the base grammar, longest first so that a linear scan
/// performs longest-match tokenization.
pub const PUNCTUATION_TABLE: &[(&str, SyntaxKind)] = &[
    ("===", SyntaxKind::EqualsEqualsEqualsToken),
    ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
    ("...", SyntaxKind::DotDotDotToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("=>", SyntaxKind::EqualsGreaterThanToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    (">=", SyntaxKind::GreaterThanEqualsToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("<<", SyntaxKind::LessThanLessThanToken),
    (">>", SyntaxKind::GreaterThanGreaterThanToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("??", SyntaxKind::QuestionQuestionToken),
    ("?.", SyntaxKind::QuestionDotToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*=", SyntaxKind::AsteriskEqualsToken),
    ("/=", SyntaxKind::SlashEqualsToken),
    ("%=", SyntaxKind::PercentEqualsToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (".", SyntaxKind::DotToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("*", SyntaxKind::AsteriskToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("&", SyntaxKind::AmpersandToken),
    ("|", SyntaxKind::BarToken),
    ("^", SyntaxKind::CaretToken),
    ("!", SyntaxKind::ExclamationToken),
    ("~", SyntaxKind::TildeToken),
    ("?", SyntaxKind::QuestionToken),
    (":", SyntaxKind::ColonToken),
    ("@", SyntaxKind::AtToken),
    ("#", SyntaxKind::HashToken),
    ("=", SyntaxKind::EqualsToken),
];

/// Map reserved-word text to its keyword kind.
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == text)
        .map(|&(_, kind)| kind)
}

pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|&(text, _)| text)
}

pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    PUNCTUATION_TABLE
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|&(text, _)| text)
}

/// Exact-match lookup of a punctuator string.
pub fn text_to_punctuation(text: &str) -> Option<SyntaxKind> {
    PUNCTUATION_TABLE
        .iter()
        .find(|(punct, _)| *punct == text)
        .map(|&(_, kind)| kind)
}

pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::BreakKeyword && kind <= SyntaxKind::LetKeyword
}

pub fn token_is_identifier_or_keyword(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || token_is_keyword(kind)
}

pub fn token_is_punctuation(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::OpenBraceToken && kind <= SyntaxKind::PercentEqualsToken
}

pub fn token_is_assignment_operator(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::EqualsToken && kind <= SyntaxKind::PercentEqualsToken
}
