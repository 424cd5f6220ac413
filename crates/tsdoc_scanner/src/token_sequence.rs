//! Immutable slices of the token list.

use std::fmt;

use tsdoc_core::TextRange;

use crate::token::Token;

/// A `[start_index, end_index)` window over the shared token list.
///
/// Syntax nodes keep these as excerpts so the exact source text of every
/// construct can be recovered.
#[derive(Copy, Clone)]
pub struct TokenSequence<'a> {
    all_tokens: &'a [Token<'a>],
    start_index: usize,
    end_index: usize,
}

impl<'a> TokenSequence<'a> {
    pub fn new(all_tokens: &'a [Token<'a>], start_index: usize, end_index: usize) -> Self {
        assert!(
            start_index <= end_index,
            "TokenSequence: start index {} is after end index {}",
            start_index,
            end_index
        );
        assert!(
            end_index <= all_tokens.len(),
            "TokenSequence: end index {} exceeds {} tokens",
            end_index,
            all_tokens.len()
        );
        Self {
            all_tokens,
            start_index,
            end_index,
        }
    }

    /// An empty sequence over the given token list.
    pub fn create_empty(all_tokens: &'a [Token<'a>]) -> Self {
        Self::new(all_tokens, 0, 0)
    }

    #[inline]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    #[inline]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// The full token list this sequence points into.
    #[inline]
    pub fn all_tokens(&self) -> &'a [Token<'a>] {
        self.all_tokens
    }

    /// The tokens inside this sequence.
    #[inline]
    pub fn tokens(&self) -> &'a [Token<'a>] {
        &self.all_tokens[self.start_index..self.end_index]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// A new sequence over the same token list.
    pub fn get_new_sequence(&self, start_index: usize, end_index: usize) -> TokenSequence<'a> {
        TokenSequence::new(self.all_tokens, start_index, end_index)
    }

    /// The source range from the start of the first token to the end of the last.
    ///
    /// Tokens on different lines are not contiguous in the buffer, so the
    /// result may include stripped comment framing between them.
    pub fn get_containing_text_range(&self) -> TextRange<'a> {
        match (self.tokens().first(), self.tokens().last()) {
            (Some(first), Some(last)) => first
                .range
                .get_new_range(first.range.pos(), last.range.end()),
            _ => TextRange::empty(),
        }
    }
}

impl fmt::Display for TokenSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens() {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}

impl fmt::Debug for TokenSequence<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenSequence[{}..{}]({:?})",
            self.start_index,
            self.end_index,
            self.to_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tokenizer;

    #[test]
    fn test_sequence_text_and_range() {
        let text = "hello big world";
        let line = TextRange::from_string(text);
        let tokens = Tokenizer::read_tokens(&[line]);
        let sequence = TokenSequence::new(&tokens, 2, 5);
        assert_eq!(sequence.to_string(), "big world");
        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.get_containing_text_range().as_str(), "big world");

        let inner = sequence.get_new_sequence(2, 3);
        assert_eq!(inner.to_string(), "big");
    }

    #[test]
    fn test_empty_sequence() {
        let tokens = Tokenizer::read_tokens(&[]);
        let sequence = TokenSequence::create_empty(&tokens);
        assert!(sequence.is_empty());
        assert_eq!(sequence.to_string(), "");
        assert!(sequence.get_containing_text_range().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_inverted_bounds_panic() {
        let tokens = Tokenizer::read_tokens(&[]);
        TokenSequence::new(&tokens, 1, 0);
    }
}
