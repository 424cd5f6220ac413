//! Leaf text nodes.

use tsdoc_diagnostics::TSDocMessageId;
use tsdoc_scanner::TokenSequence;

use crate::excerpt::{DocExcerpt, ExcerptKind, NodeText};

/// A run of ordinary text with no special meaning. Never contains a newline.
#[derive(Debug, Clone)]
pub struct DocPlainText<'a> {
    text: NodeText<'a>,
}

impl<'a> DocPlainText<'a> {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(
            !text.contains('\n'),
            "The DocPlainText content must not contain newline characters"
        );
        Self {
            text: NodeText::raw(text),
        }
    }

    pub fn parsed(text_excerpt: TokenSequence<'a>) -> Self {
        Self {
            text: NodeText::parsed(ExcerptKind::PlainText, text_excerpt),
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn text_excerpt(&self) -> Option<&DocExcerpt<'a>> {
        self.text.excerpt()
    }
}

/// A line break inside a paragraph.
#[derive(Debug, Clone, Default)]
pub struct DocSoftBreak<'a> {
    soft_break_excerpt: Option<DocExcerpt<'a>>,
}

impl<'a> DocSoftBreak<'a> {
    pub fn new() -> Self {
        Self {
            soft_break_excerpt: None,
        }
    }

    pub fn parsed(soft_break_excerpt: TokenSequence<'a>) -> Self {
        Self {
            soft_break_excerpt: Some(DocExcerpt::new(ExcerptKind::SoftBreak, soft_break_excerpt)),
        }
    }

    pub fn soft_break_excerpt(&self) -> Option<&DocExcerpt<'a>> {
        self.soft_break_excerpt.as_ref()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EscapeStyle {
    /// A backslash followed by the escaped punctuation character.
    CommonMarkBackslash,
}

/// A backslash escape such as `\@`.
#[derive(Debug, Clone)]
pub struct DocEscapedText<'a> {
    encoded_text: NodeText<'a>,
    escape_style: EscapeStyle,
    decoded_text: String,
}

impl<'a> DocEscapedText<'a> {
    pub fn new(
        encoded_text: impl Into<String>,
        escape_style: EscapeStyle,
        decoded_text: impl Into<String>,
    ) -> Self {
        Self {
            encoded_text: NodeText::raw(encoded_text),
            escape_style,
            decoded_text: decoded_text.into(),
        }
    }

    pub fn parsed(
        encoded_text_excerpt: TokenSequence<'a>,
        escape_style: EscapeStyle,
        decoded_text: impl Into<String>,
    ) -> Self {
        Self {
            encoded_text: NodeText::parsed(ExcerptKind::EscapedText, encoded_text_excerpt),
            escape_style,
            decoded_text: decoded_text.into(),
        }
    }

    /// The text as written, including the backslash.
    pub fn encoded_text(&self) -> &str {
        self.encoded_text.as_str()
    }

    pub fn decoded_text(&self) -> &str {
        &self.decoded_text
    }

    pub fn escape_style(&self) -> EscapeStyle {
        self.escape_style
    }

    pub fn encoded_text_excerpt(&self) -> Option<&DocExcerpt<'a>> {
        self.encoded_text.excerpt()
    }
}

/// Input that could not be parsed, kept in the tree together with the error
/// that was reported for it.
#[derive(Debug, Clone)]
pub struct DocErrorText<'a> {
    text: NodeText<'a>,
    message_id: TSDocMessageId,
    error_message: String,
    error_location: TokenSequence<'a>,
}

impl<'a> DocErrorText<'a> {
    pub fn parsed(
        text_excerpt: TokenSequence<'a>,
        message_id: TSDocMessageId,
        error_message: impl Into<String>,
        error_location: TokenSequence<'a>,
    ) -> Self {
        Self {
            text: NodeText::parsed(ExcerptKind::ErrorText, text_excerpt),
            message_id,
            error_message: error_message.into(),
            error_location,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn message_id(&self) -> TSDocMessageId {
        self.message_id
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// The tokens the error points at. May be narrower than the text.
    pub fn error_location(&self) -> TokenSequence<'a> {
        self.error_location
    }

    pub fn text_excerpt(&self) -> Option<&DocExcerpt<'a>> {
        self.text.excerpt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_builder() {
        let node = DocPlainText::new("hello world");
        assert_eq!(node.text(), "hello world");
        assert!(node.text_excerpt().is_none());
    }

    #[test]
    #[should_panic(expected = "must not contain newline")]
    fn test_plain_text_rejects_newlines() {
        DocPlainText::new("a\nb");
    }

    #[test]
    fn test_escaped_text_builder() {
        let node = DocEscapedText::new("\\@", EscapeStyle::CommonMarkBackslash, "@");
        assert_eq!(node.encoded_text(), "\\@");
        assert_eq!(node.decoded_text(), "@");
    }
}
