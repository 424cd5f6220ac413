//! Converts comment lines into a flat token list.

use tsdoc_core::{TextPos, TextRange};

use crate::char_codes;
use crate::token::{Token, TokenKind};

/// Stateless tokenizer over the lines of a doc comment.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenize every line, appending a `Newline` after each one and a single
    /// `EndOfInput` after the last.
    pub fn read_tokens<'a>(lines: &[TextRange<'a>]) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        for line in lines {
            Self::push_tokens_for_line(&mut tokens, *line);
        }

        match lines.last() {
            Some(last) => {
                let end = last.get_new_range(last.end(), last.end());
                tokens.push(Token::new(TokenKind::EndOfInput, end, *last));
            }
            None => {
                tokens.push(Token::new(
                    TokenKind::EndOfInput,
                    TextRange::empty(),
                    TextRange::empty(),
                ));
            }
        }
        tokens
    }

    /// See [`TokenKind::is_punctuation`].
    #[inline]
    pub fn is_punctuation(kind: TokenKind) -> bool {
        kind.is_punctuation()
    }

    fn push_tokens_for_line<'a>(tokens: &mut Vec<Token<'a>>, line: TextRange<'a>) {
        let base = line.pos();
        let mut current: Option<(TokenKind, TextPos)> = None;

        for (offset, ch) in line.as_str().char_indices() {
            let pos = base + offset as TextPos;
            let kind = char_codes::classify(ch);

            match current {
                Some((token_kind, _)) if token_kind == kind && kind.is_multi_character() => {}
                Some((token_kind, token_pos)) => {
                    tokens.push(Token::new(token_kind, line.get_new_range(token_pos, pos), line));
                    current = Some((kind, pos));
                }
                None => current = Some((kind, pos)),
            }
        }

        if let Some((token_kind, token_pos)) = current {
            tokens.push(Token::new(
                token_kind,
                line.get_new_range(token_pos, line.end()),
                line,
            ));
        }

        tokens.push(Token::new(
            TokenKind::Newline,
            line.get_new_range(line.end(), line.end()),
            line,
        ));
    }
}
