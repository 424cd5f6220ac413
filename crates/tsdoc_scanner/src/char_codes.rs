//! Character classification table used by the tokenizer.

use crate::token::TokenKind;

/// Every ASCII punctuation character recognized by CommonMark.
pub const MARKDOWN_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^`{|}~";

/// Word characters; runs of these merge into one `AsciiWord` token.
pub const WORD_CHARACTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Punctuation that gets its own dedicated token kind.
const SPECIAL_CHARACTERS: &[(u8, TokenKind)] = &[
    (b'\\', TokenKind::Backslash),
    (b'<', TokenKind::LessThan),
    (b'>', TokenKind::GreaterThan),
    (b'=', TokenKind::Equals),
    (b'\'', TokenKind::SingleQuote),
    (b'"', TokenKind::DoubleQuote),
    (b'/', TokenKind::Slash),
    (b'-', TokenKind::Hyphen),
    (b'@', TokenKind::AtSign),
    (b'{', TokenKind::LeftCurlyBracket),
    (b'}', TokenKind::RightCurlyBracket),
    (b'`', TokenKind::Backtick),
    (b'.', TokenKind::Period),
    (b':', TokenKind::Colon),
    (b',', TokenKind::Comma),
    (b'[', TokenKind::LeftSquareBracket),
    (b']', TokenKind::RightSquareBracket),
    (b'|', TokenKind::Pipe),
    (b'(', TokenKind::LeftParenthesis),
    (b')', TokenKind::RightParenthesis),
    (b'#', TokenKind::PoundSymbol),
    (b'+', TokenKind::Plus),
    (b'$', TokenKind::DollarSign),
];

/// Token kind for each ASCII code point; anything outside the table is `Other`.
pub static ASCII_TABLE: [TokenKind; 128] = build_ascii_table();

const fn build_ascii_table() -> [TokenKind; 128] {
    let mut table = [TokenKind::Other; 128];

    let punctuation = MARKDOWN_PUNCTUATION.as_bytes();
    let mut i = 0;
    while i < punctuation.len() {
        table[punctuation[i] as usize] = TokenKind::OtherPunctuation;
        i += 1;
    }

    let mut i = 0;
    while i < SPECIAL_CHARACTERS.len() {
        let (byte, kind) = SPECIAL_CHARACTERS[i];
        table[byte as usize] = kind;
        i += 1;
    }

    let word = WORD_CHARACTERS.as_bytes();
    let mut i = 0;
    while i < word.len() {
        table[word[i] as usize] = TokenKind::AsciiWord;
        i += 1;
    }

    table[b' ' as usize] = TokenKind::Spacing;
    table[b'\t' as usize] = TokenKind::Spacing;
    table
}

/// Classify a single character.
#[inline]
pub fn classify(ch: char) -> TokenKind {
    if (ch as u32) < 128 {
        ASCII_TABLE[ch as usize]
    } else {
        TokenKind::Other
    }
}
