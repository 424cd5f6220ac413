//! Character scanner for declaration reference text.
//!
//! The scanner yields punctuators, quoted strings and runs of plain text.
//! Module sources, meanings and overload indices are not lexed directly;
//! the parser asks for them by rescanning the current token.

use std::fmt;

/// Kinds of token produced by [`Scanner`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    None,
    EofToken,
    // Punctuators
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    ExclamationToken,
    DotToken,
    HashToken,
    TildeToken,
    ColonToken,
    CommaToken,
    AtToken,
    DecimalDigits,
    // Identifiers
    Text,
    String,
    ModuleSource,
    // Keywords
    ClassKeyword,
    InterfaceKeyword,
    TypeKeyword,
    EnumKeyword,
    NamespaceKeyword,
    FunctionKeyword,
    VarKeyword,
    ConstructorKeyword,
    MemberKeyword,
    EventKeyword,
    CallKeyword,
    NewKeyword,
    IndexKeyword,
    ComplexKeyword,
}

impl TokenKind {
    /// The text used for this kind in parser error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::None => "<none>",
            TokenKind::EofToken => "<eof>",
            TokenKind::OpenBraceToken => "{",
            TokenKind::CloseBraceToken => "}",
            TokenKind::OpenParenToken => "(",
            TokenKind::CloseParenToken => ")",
            TokenKind::OpenBracketToken => "[",
            TokenKind::CloseBracketToken => "]",
            TokenKind::ExclamationToken => "!",
            TokenKind::DotToken => ".",
            TokenKind::HashToken => "#",
            TokenKind::TildeToken => "~",
            TokenKind::ColonToken => ":",
            TokenKind::CommaToken => ",",
            TokenKind::AtToken => "@",
            TokenKind::DecimalDigits => "<decimal digits>",
            TokenKind::Text => "<text>",
            TokenKind::String => "<string>",
            TokenKind::ModuleSource => "<module source>",
            TokenKind::ClassKeyword => "class",
            TokenKind::InterfaceKeyword => "interface",
            TokenKind::TypeKeyword => "type",
            TokenKind::EnumKeyword => "enum",
            TokenKind::NamespaceKeyword => "namespace",
            TokenKind::FunctionKeyword => "function",
            TokenKind::VarKeyword => "var",
            TokenKind::ConstructorKeyword => "constructor",
            TokenKind::MemberKeyword => "member",
            TokenKind::EventKeyword => "event",
            TokenKind::CallKeyword => "call",
            TokenKind::NewKeyword => "new",
            TokenKind::IndexKeyword => "index",
            TokenKind::ComplexKeyword => "complex",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of the scanner, restored after an unaccepted speculation.
#[derive(Debug, Copy, Clone)]
pub struct ScannerState {
    pub pos: usize,
    pub token_pos: usize,
    pub token: TokenKind,
    pub string_is_unterminated: bool,
}

/// Scanner over declaration reference text. Positions are byte offsets.
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    token_pos: usize,
    token: TokenKind,
    string_is_unterminated: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            token_pos: 0,
            token: TokenKind::None,
            string_is_unterminated: false,
        }
    }

    #[inline]
    pub fn token(&self) -> TokenKind {
        self.token
    }

    /// The source text of the current token.
    #[inline]
    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_pos..self.pos]
    }

    #[inline]
    pub fn token_pos(&self) -> usize {
        self.token_pos
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Whether the last string token ran into a line break or the end of input.
    #[inline]
    pub fn string_is_unterminated(&self) -> bool {
        self.string_is_unterminated
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_pos: self.token_pos,
            token: self.token,
            string_is_unterminated: self.string_is_unterminated,
        }
    }

    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_pos = state.token_pos;
        self.token = state.token;
        self.string_is_unterminated = state.string_is_unterminated;
    }

    /// Run `f` speculatively. The scanner state is restored afterwards unless
    /// `f` sets its `accepted` flag.
    pub fn speculate<T>(&mut self, f: impl FnOnce(&mut Self, &mut bool) -> T) -> T {
        let saved = self.save_state();
        let mut accepted = false;
        let result = f(self, &mut accepted);
        if !accepted {
            self.restore_state(saved);
        }
        result
    }

    /// Scan the next token without consuming it.
    pub fn peek(&mut self) -> TokenKind {
        self.speculate(|scanner, _| scanner.scan())
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn scan(&mut self) -> TokenKind {
        self.token_pos = self.pos;
        self.string_is_unterminated = false;
        let Some(ch) = self.next_char() else {
            self.token = TokenKind::EofToken;
            return self.token;
        };
        self.token = match ch {
            '{' => TokenKind::OpenBraceToken,
            '}' => TokenKind::CloseBraceToken,
            '(' => TokenKind::OpenParenToken,
            ')' => TokenKind::CloseParenToken,
            '[' => TokenKind::OpenBracketToken,
            ']' => TokenKind::CloseBracketToken,
            '!' => TokenKind::ExclamationToken,
            '.' => TokenKind::DotToken,
            '#' => TokenKind::HashToken,
            '~' => TokenKind::TildeToken,
            ':' => TokenKind::ColonToken,
            ',' => TokenKind::CommaToken,
            '@' => TokenKind::AtToken,
            '"' => {
                self.scan_string();
                TokenKind::String
            }
            _ => {
                self.scan_text();
                TokenKind::Text
            }
        };
        self.token
    }

    /// Reinterpret the current position as a module source ending at `!`.
    ///
    /// A module source is either one quoted string or a run of unquoted
    /// characters; mixing the two is rejected and leaves the scanner as it was.
    pub fn rescan_module_source(&mut self) -> TokenKind {
        if matches!(self.token, TokenKind::ModuleSource | TokenKind::EofToken) {
            return self.token;
        }

        #[derive(PartialEq)]
        enum Scanned {
            None,
            String,
            Other,
        }

        self.speculate(|scanner, accepted| {
            let original = scanner.token;
            scanner.pos = scanner.token_pos;
            scanner.string_is_unterminated = false;
            let mut scanned = Scanned::None;
            while let Some(ch) = scanner.current_char() {
                if ch == '!' {
                    if scanned == Scanned::None {
                        return original;
                    }
                    *accepted = true;
                    scanner.token = TokenKind::ModuleSource;
                    return scanner.token;
                }
                scanner.pos += ch.len_utf8();
                if ch == '"' {
                    if scanned == Scanned::Other {
                        return original;
                    }
                    scanned = Scanned::String;
                    scanner.scan_string();
                } else {
                    if scanned == Scanned::String {
                        return original;
                    }
                    scanned = Scanned::Other;
                    if !is_punctuator(ch) {
                        scanner.scan_text();
                    }
                }
            }
            original
        })
    }

    /// Reinterpret a text token as a meaning keyword.
    pub fn rescan_meaning(&mut self) -> TokenKind {
        if self.token == TokenKind::Text {
            let keyword = match self.token_text() {
                "class" => Some(TokenKind::ClassKeyword),
                "interface" => Some(TokenKind::InterfaceKeyword),
                "type" => Some(TokenKind::TypeKeyword),
                "enum" => Some(TokenKind::EnumKeyword),
                "namespace" => Some(TokenKind::NamespaceKeyword),
                "function" => Some(TokenKind::FunctionKeyword),
                "var" => Some(TokenKind::VarKeyword),
                "constructor" => Some(TokenKind::ConstructorKeyword),
                "member" => Some(TokenKind::MemberKeyword),
                "event" => Some(TokenKind::EventKeyword),
                "call" => Some(TokenKind::CallKeyword),
                "new" => Some(TokenKind::NewKeyword),
                "index" => Some(TokenKind::IndexKeyword),
                "complex" => Some(TokenKind::ComplexKeyword),
                _ => None,
            };
            if let Some(keyword) = keyword {
                self.token = keyword;
            }
        }
        self.token
    }

    /// Reinterpret a text token made only of ASCII digits as decimal digits.
    pub fn rescan_decimal_digits(&mut self) -> TokenKind {
        if self.token == TokenKind::Text {
            let text = self.token_text();
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                self.token = TokenKind::DecimalDigits;
            }
        }
        self.token
    }

    // ========================================================================
    // Strings and text
    // ========================================================================

    fn scan_string(&mut self) {
        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return,
                '\\' => self.scan_escape_sequence(),
                _ if is_line_terminator(ch) => {
                    self.string_is_unterminated = true;
                    return;
                }
                _ => {}
            }
        }
        self.string_is_unterminated = true;
    }

    /// ECMAScript escape sequences, entered just after the backslash.
    fn scan_escape_sequence(&mut self) {
        let Some(ch) = self.current_char() else {
            self.string_is_unterminated = true;
            return;
        };

        if is_character_escape(ch) {
            self.pos += ch.len_utf8();
            return;
        }

        // `\0` not followed by a digit
        if ch == '0' && !self.char_at(self.pos + 1).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            return;
        }

        // `\xHH`
        if ch == 'x' && self.hex_digits_at(self.pos + 1, 2) {
            self.pos += 3;
            return;
        }

        if ch == 'u' {
            // `\uHHHH`
            if self.hex_digits_at(self.pos + 1, 4) {
                self.pos += 5;
                return;
            }
            // `\u{H...}`
            if self.char_at(self.pos + 1) == Some('{') {
                let digits_start = self.pos + 2;
                let digits_len = self.text[digits_start..]
                    .bytes()
                    .take_while(|b| b.is_ascii_hexdigit())
                    .count();
                let close = digits_start + digits_len;
                if digits_len > 0 && self.char_at(close) == Some('}') {
                    let in_range = u32::from_str_radix(&self.text[digits_start..close], 16)
                        .is_ok_and(|value| value <= 0x10FFFF);
                    if in_range {
                        self.pos = close + 1;
                        return;
                    }
                }
            }
        }

        self.string_is_unterminated = true;
    }

    fn hex_digits_at(&self, pos: usize, count: usize) -> bool {
        self.text
            .as_bytes()
            .get(pos..pos + count)
            .is_some_and(|digits| digits.iter().all(|b| b.is_ascii_hexdigit()))
    }

    fn scan_text(&mut self) {
        while let Some(ch) = self.current_char() {
            if is_line_terminator(ch) || is_punctuator(ch) || ch == '"' {
                return;
            }
            self.pos += ch.len_utf8();
        }
    }
}

pub(crate) fn is_punctuator(ch: char) -> bool {
    matches!(
        ch,
        '{' | '}' | '(' | ')' | '[' | ']' | '!' | '.' | '#' | '~' | ':' | ',' | '@'
    )
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\r' | '\n' | '\u{2028}' | '\u{2029}')
}

fn is_single_escape_character(ch: char) -> bool {
    matches!(ch, '\'' | '"' | '\\' | 'b' | 'f' | 'n' | 'r' | 't' | 'v')
}

fn is_escape_character(ch: char) -> bool {
    is_single_escape_character(ch) || ch.is_ascii_digit() || ch == 'x' || ch == 'u'
}

fn is_character_escape(ch: char) -> bool {
    is_single_escape_character(ch) || (!is_escape_character(ch) && !is_line_terminator(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(text: &str) -> Vec<(TokenKind, String)> {
        let mut scanner = Scanner::new(text);
        let mut tokens = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == TokenKind::EofToken {
                break;
            }
            tokens.push((kind, scanner.token_text().to_string()));
        }
        tokens
    }

    #[test]
    fn test_scan_punctuators_and_text() {
        let tokens = scan_all("Foo.bar#baz:1");
        let kinds: Vec<TokenKind> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Text,
                TokenKind::DotToken,
                TokenKind::Text,
                TokenKind::HashToken,
                TokenKind::Text,
                TokenKind::ColonToken,
                TokenKind::Text,
            ]
        );
        assert_eq!(tokens[2].1, "bar");
    }

    #[test]
    fn test_scan_string_with_escapes() {
        let mut scanner = Scanner::new(r#""a\"b\x41A\u{1F600}\0""#);
        assert_eq!(scanner.scan(), TokenKind::String);
        assert!(!scanner.string_is_unterminated());
        assert_eq!(scanner.scan(), TokenKind::EofToken);
    }

    #[test]
    fn test_scan_unterminated_string() {
        let mut scanner = Scanner::new(r#""abc"#);
        assert_eq!(scanner.scan(), TokenKind::String);
        assert!(scanner.string_is_unterminated());

        let mut scanner = Scanner::new("\"ab\ncd\"");
        assert_eq!(scanner.scan(), TokenKind::String);
        assert!(scanner.string_is_unterminated());
    }

    #[test]
    fn test_scan_bad_escapes() {
        for text in [r#""\x4""#, r#""\u12""#, r#""\u{110000}""#, r#""\01""#] {
            let mut scanner = Scanner::new(text);
            scanner.scan();
            assert!(scanner.string_is_unterminated(), "{text}");
        }
    }

    #[test]
    fn test_rescan_module_source() {
        let mut scanner = Scanner::new("@scope/pkg/lib!Foo");
        scanner.scan();
        assert_eq!(scanner.rescan_module_source(), TokenKind::ModuleSource);
        assert_eq!(scanner.token_text(), "@scope/pkg/lib");
        assert_eq!(scanner.scan(), TokenKind::ExclamationToken);
        assert_eq!(scanner.scan(), TokenKind::Text);
    }

    #[test]
    fn test_rescan_quoted_module_source() {
        let mut scanner = Scanner::new(r#""my pkg"!Foo"#);
        scanner.scan();
        assert_eq!(scanner.rescan_module_source(), TokenKind::ModuleSource);
        assert_eq!(scanner.token_text(), r#""my pkg""#);
    }

    #[test]
    fn test_rescan_module_source_restores_on_failure() {
        for text in ["Foo.bar", r#"a"b"!c"#, r#""a"b!c"#] {
            let mut scanner = Scanner::new(text);
            let first = scanner.scan();
            let first_text = scanner.token_text().to_string();
            assert_eq!(scanner.rescan_module_source(), first, "{text}");
            assert_eq!(scanner.token_text(), first_text);
        }
    }

    #[test]
    fn test_rescan_meaning_and_digits() {
        let mut scanner = Scanner::new("class");
        scanner.scan();
        assert_eq!(scanner.rescan_meaning(), TokenKind::ClassKeyword);

        let mut scanner = Scanner::new("classy");
        scanner.scan();
        assert_eq!(scanner.rescan_meaning(), TokenKind::Text);

        let mut scanner = Scanner::new("42");
        scanner.scan();
        assert_eq!(scanner.rescan_decimal_digits(), TokenKind::DecimalDigits);

        let mut scanner = Scanner::new("4a");
        scanner.scan();
        assert_eq!(scanner.rescan_decimal_digits(), TokenKind::Text);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut scanner = Scanner::new("a.b");
        scanner.scan();
        assert_eq!(scanner.peek(), TokenKind::DotToken);
        assert_eq!(scanner.token(), TokenKind::Text);
        assert_eq!(scanner.token_text(), "a");
    }
}
