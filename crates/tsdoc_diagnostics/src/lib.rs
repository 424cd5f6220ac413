//! tsdoc_diagnostics: Parser messages and the per-parse message log.
//!
//! Every problem found in a doc comment is reported with a stable
//! identifier from [`TSDocMessageId`], a human-readable explanation, and the
//! source range it applies to. Messages never abort a parse.

mod message_id;

use std::fmt;

use tsdoc_core::TextRange;
use tsdoc_scanner::TokenSequence;

pub use message_id::TSDocMessageId;

/// A single problem reported while parsing a doc comment.
#[derive(Clone)]
pub struct ParserMessage<'a> {
    /// The stable identifier, e.g. `tsdoc-undefined-tag`.
    pub message_id: TSDocMessageId,
    /// The explanation without any location prefix.
    pub unformatted_text: String,
    /// The source range the message applies to.
    pub text_range: TextRange<'a>,
    /// The tokens the message applies to, when known.
    pub token_sequence: Option<TokenSequence<'a>>,
}

impl<'a> ParserMessage<'a> {
    pub fn new(
        message_id: TSDocMessageId,
        message_text: impl Into<String>,
        text_range: TextRange<'a>,
        token_sequence: Option<TokenSequence<'a>>,
    ) -> Self {
        Self {
            message_id,
            unformatted_text: message_text.into(),
            text_range,
            token_sequence,
        }
    }

    /// The message prefixed with its `(line,column)` location when the range
    /// is anchored in a source buffer.
    pub fn text(&self) -> String {
        let message = if self.unformatted_text.is_empty() {
            "An unknown error occurred"
        } else {
            self.unformatted_text.as_str()
        };

        if self.text_range.pos() != 0 || self.text_range.end() != 0 {
            format!("{}: {}", self.text_range.location(), message)
        } else {
            message.to_string()
        }
    }
}

impl fmt::Display for ParserMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Debug for ParserMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} @ {:?}",
            self.message_id, self.unformatted_text, self.text_range
        )
    }
}

/// The ordered list of messages produced by one parse.
#[derive(Debug, Clone, Default)]
pub struct ParserMessageLog<'a> {
    messages: Vec<ParserMessage<'a>>,
}

impl<'a> ParserMessageLog<'a> {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: ParserMessage<'a>) {
        self.messages.push(message);
    }

    pub fn add_message_for_text_range(
        &mut self,
        message_id: TSDocMessageId,
        message_text: impl Into<String>,
        text_range: TextRange<'a>,
    ) {
        self.add_message(ParserMessage::new(message_id, message_text, text_range, None));
    }

    pub fn add_message_for_token_sequence(
        &mut self,
        message_id: TSDocMessageId,
        message_text: impl Into<String>,
        token_sequence: TokenSequence<'a>,
    ) {
        self.add_message(ParserMessage::new(
            message_id,
            message_text,
            token_sequence.get_containing_text_range(),
            Some(token_sequence),
        ));
    }

    pub fn messages(&self) -> &[ParserMessage<'a>] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ParserMessage<'a>> {
        self.messages
    }

    /// Whether any message with the given id was logged.
    pub fn has_message(&self, message_id: TSDocMessageId) -> bool {
        self.messages.iter().any(|m| m.message_id == message_id)
    }

    /// The number of messages with the given id.
    pub fn count_of(&self, message_id: TSDocMessageId) -> usize {
        self.messages
            .iter()
            .filter(|m| m.message_id == message_id)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Sort messages by source position, keeping insertion order for ties.
    pub fn sort(&mut self) {
        self.messages.sort_by_key(|m| m.text_range.pos());
    }
}
