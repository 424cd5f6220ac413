//! Cursor over the token list with backtracking and an accumulated window.

use tsdoc_scanner::{Token, TokenKind, TokenSequence};

/// Reads tokens one at a time while remembering where the current
/// "accumulated" run began.
///
/// Every token read since the last extraction belongs to the accumulated
/// sequence; [`TokenReader::extract_accumulated_sequence`] hands that run out
/// as a [`TokenSequence`] and starts a new one. Markers allow the parser to
/// rewind after a speculative read.
pub struct TokenReader<'a> {
    tokens: &'a [Token<'a>],
    reader_start_index: usize,
    reader_end_index: usize,
    current_index: usize,
    accumulated_start_index: usize,
}

impl<'a> TokenReader<'a> {
    /// A reader over the whole token list.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            reader_start_index: 0,
            reader_end_index: tokens.len(),
            current_index: 0,
            accumulated_start_index: 0,
        }
    }

    /// A reader restricted to `sequence`. Peeking past its end reports
    /// `EndOfInput` even though more tokens follow in the list.
    pub fn embedded(sequence: TokenSequence<'a>) -> Self {
        Self {
            tokens: sequence.all_tokens(),
            reader_start_index: sequence.start_index(),
            reader_end_index: sequence.end_index(),
            current_index: sequence.start_index(),
            accumulated_start_index: sequence.start_index(),
        }
    }

    #[inline]
    pub fn tokens(&self) -> &'a [Token<'a>] {
        self.tokens
    }

    // ========================================================================
    // Accumulated sequence
    // ========================================================================

    /// Panics if nothing was read since the last extraction.
    pub fn extract_accumulated_sequence(&mut self) -> TokenSequence<'a> {
        assert!(
            self.accumulated_start_index != self.current_index,
            "Parser assertion failed: The queue is unexpectedly empty"
        );
        let sequence =
            TokenSequence::new(self.tokens, self.accumulated_start_index, self.current_index);
        self.accumulated_start_index = self.current_index;
        sequence
    }

    pub fn try_extract_accumulated_sequence(&mut self) -> Option<TokenSequence<'a>> {
        if self.is_accumulated_sequence_empty() {
            None
        } else {
            Some(self.extract_accumulated_sequence())
        }
    }

    #[inline]
    pub fn is_accumulated_sequence_empty(&self) -> bool {
        self.accumulated_start_index == self.current_index
    }

    pub fn assert_accumulated_sequence_is_empty(&self) {
        assert!(
            self.is_accumulated_sequence_empty(),
            "Parser assertion failed: The queue should be empty, but it contains {} tokens",
            self.current_index - self.accumulated_start_index
        );
    }

    // ========================================================================
    // Peeking
    // ========================================================================

    /// The next token. At the end of an embedded reader this is the token
    /// just past the window.
    pub fn peek_token(&self) -> Token<'a> {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[self.current_index.min(last)]
    }

    #[inline]
    pub fn peek_token_kind(&self) -> TokenKind {
        self.kind_at(self.current_index)
    }

    #[inline]
    pub fn peek_token_after_kind(&self) -> TokenKind {
        self.kind_at(self.current_index + 1)
    }

    #[inline]
    pub fn peek_token_after_after_kind(&self) -> TokenKind {
        self.kind_at(self.current_index + 2)
    }

    /// The kind of the token before the cursor, or `EndOfInput` at the start.
    pub fn peek_previous_token_kind(&self) -> TokenKind {
        if self.current_index <= self.reader_start_index {
            return TokenKind::EndOfInput;
        }
        self.tokens[self.current_index - 1].kind
    }

    fn kind_at(&self, index: usize) -> TokenKind {
        if index >= self.reader_end_index {
            return TokenKind::EndOfInput;
        }
        self.tokens[index].kind
    }

    // ========================================================================
    // Reading and backtracking
    // ========================================================================

    /// Consume one token. Panics at the end of input.
    pub fn read_token(&mut self) -> Token<'a> {
        assert!(
            self.current_index < self.reader_end_index,
            "Parser assertion failed: Cannot read past end of stream"
        );
        let token = self.tokens[self.current_index];
        assert!(
            token.kind != TokenKind::EndOfInput,
            "Parser assertion failed: The EndOfInput token cannot be read"
        );
        self.current_index += 1;
        token
    }

    #[inline]
    pub fn create_marker(&self) -> usize {
        self.current_index
    }

    /// Rewind to `marker`. Anything accumulated past it is forgotten.
    pub fn backtrack_to_marker(&mut self, marker: usize) {
        assert!(
            marker <= self.current_index,
            "Parser assertion failed: Attempt to backtrack to a future marker"
        );
        self.current_index = marker;
        if marker < self.accumulated_start_index {
            self.accumulated_start_index = marker;
        }
    }
}
