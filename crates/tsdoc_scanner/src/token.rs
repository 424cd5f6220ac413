//! Tokens produced by the tokenizer.

use std::fmt;

use tsdoc_core::TextRange;

/// The kind of a [`Token`].
///
/// Only `Spacing`, `AsciiWord`, and `Other` ever span more than one
/// character; every punctuation kind is exactly one character long.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Synthetic token marking the end of the input. Its range is empty.
    EndOfInput,
    /// Synthetic token appended after each line. Its range is empty.
    Newline,
    /// A run of spaces and tabs.
    Spacing,
    /// A run of `[a-zA-Z0-9_]`.
    AsciiWord,
    /// A CommonMark punctuation character without a dedicated kind, e.g. `!` or `;`.
    OtherPunctuation,
    /// A run of characters that are not classified above, including non-ASCII text.
    Other,
    Backslash,
    LessThan,
    GreaterThan,
    Equals,
    SingleQuote,
    DoubleQuote,
    Slash,
    Hyphen,
    AtSign,
    LeftCurlyBracket,
    RightCurlyBracket,
    Backtick,
    Period,
    Colon,
    Comma,
    LeftSquareBracket,
    RightSquareBracket,
    Pipe,
    LeftParenthesis,
    RightParenthesis,
    PoundSymbol,
    Plus,
    DollarSign,
}

impl TokenKind {
    /// Whether consecutive characters of this kind merge into one token.
    #[inline]
    pub fn is_multi_character(self) -> bool {
        matches!(
            self,
            TokenKind::Spacing | TokenKind::AsciiWord | TokenKind::Other
        )
    }

    /// Whether this kind is a CommonMark punctuation character, i.e. something
    /// a backslash may legally escape.
    #[inline]
    pub fn is_punctuation(self) -> bool {
        !matches!(
            self,
            TokenKind::EndOfInput
                | TokenKind::Newline
                | TokenKind::Spacing
                | TokenKind::AsciiWord
                | TokenKind::Other
        )
    }
}

/// A classified slice of one comment line.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The characters covered by this token.
    pub range: TextRange<'a>,
    /// The whole line this token was read from.
    pub line: TextRange<'a>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, range: TextRange<'a>, line: TextRange<'a>) -> Self {
        Self { kind, range, line }
    }

    /// The text of this token. Empty for `Newline` and `EndOfInput`.
    #[inline]
    pub fn text(&self) -> &'a str {
        match self.kind {
            // The synthetic newline stands for a line break that was stripped
            // together with the leading `*` of the next line.
            TokenKind::Newline => "\n",
            _ => self.range.as_str(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})@{:?}", self.kind, self.text(), self.range)
    }
}
