//! HTML start and end tags.
//!
//! Only the tag syntax is checked. Attribute values are kept verbatim and
//! elements are never matched against each other.

use tsdoc_ast::{DocHtmlAttribute, DocHtmlEndTag, DocHtmlStartTag, DocNode};
use tsdoc_core::string_checks;
use tsdoc_diagnostics::TSDocMessageId;
use tsdoc_scanner::{TokenKind, TokenSequence};

use super::{Failure, NodeParser};
use crate::token_reader::TokenReader;

impl<'a, 'c> NodeParser<'a, 'c> {
    pub(super) fn parse_html_start_tag(&mut self, reader: &mut TokenReader<'a>) -> DocNode<'a> {
        reader.assert_accumulated_sequence_is_empty();
        let marker = reader.create_marker();

        let less_than = reader.read_token();
        assert!(
            less_than.kind == TokenKind::LessThan,
            "Parser assertion failed: Expecting an HTML tag starting with \"<\""
        );
        // CommonMark does not allow spacing after the "<".
        let opening_delimiter = reader.extract_accumulated_sequence();

        let name = match self.parse_html_name(reader, true) {
            Ok(name) => name,
            Err(failure) => {
                return self.backtrack_and_create_error_for_failure(
                    reader,
                    marker,
                    "Invalid HTML element: ",
                    failure,
                );
            }
        };

        let spacing_after_name = self.try_read_spacing_and_newlines(reader);

        let mut html_attributes = Vec::new();
        while reader.peek_token_kind() == TokenKind::AsciiWord {
            match self.parse_html_attribute(reader) {
                Ok(attribute) => html_attributes.push(attribute),
                Err(failure) => {
                    return self.backtrack_and_create_error_for_failure(
                        reader,
                        marker,
                        "The HTML element has an invalid attribute: ",
                        failure,
                    );
                }
            }
        }

        reader.assert_accumulated_sequence_is_empty();
        let end_delimiter_marker = reader.create_marker();

        let mut self_closing_tag = false;
        if reader.peek_token_kind() == TokenKind::Slash {
            reader.read_token();
            self_closing_tag = true;
        }
        if reader.peek_token_kind() != TokenKind::GreaterThan {
            let failure = self.create_failure_for_tokens_since(
                reader,
                TSDocMessageId::HtmlTagMissingGreaterThan,
                "Expecting an attribute or \">\" or \"/>\"",
                end_delimiter_marker,
            );
            return self.backtrack_and_create_error_for_failure(
                reader,
                marker,
                "The HTML tag has invalid syntax: ",
                failure,
            );
        }
        reader.read_token();
        let closing_delimiter = reader.extract_accumulated_sequence();

        DocHtmlStartTag::parsed(
            opening_delimiter,
            name,
            spacing_after_name,
            html_attributes,
            self_closing_tag,
            closing_delimiter,
        )
        .into()
    }

    fn parse_html_attribute(
        &mut self,
        reader: &mut TokenReader<'a>,
    ) -> Result<DocHtmlAttribute<'a>, Failure<'a>> {
        reader.assert_accumulated_sequence_is_empty();

        let name = self.parse_html_name(reader, false)?;
        let spacing_after_name = self.try_read_spacing_and_newlines(reader);

        if reader.peek_token_kind() != TokenKind::Equals {
            return Err(self.create_failure_for_token(
                reader,
                TSDocMessageId::HtmlTagMissingEquals,
                "Expecting \"=\" after HTML attribute name",
                None,
            ));
        }
        reader.read_token();
        let equals = reader.extract_accumulated_sequence();
        let spacing_after_equals = self.try_read_spacing_and_newlines(reader);

        self.parse_html_string(reader)?;
        let value = reader.extract_accumulated_sequence();
        let spacing_after_value = self.try_read_spacing_and_newlines(reader);

        Ok(DocHtmlAttribute::parsed(
            name,
            spacing_after_name,
            equals,
            spacing_after_equals,
            value,
            spacing_after_value,
        ))
    }

    /// Reads a single- or double-quoted string on one line. The quotes are
    /// left in the accumulated sequence.
    fn parse_html_string(&mut self, reader: &mut TokenReader<'a>) -> Result<(), Failure<'a>> {
        let marker = reader.create_marker();
        let quote_kind = reader.peek_token_kind();
        if quote_kind != TokenKind::DoubleQuote && quote_kind != TokenKind::SingleQuote {
            return Err(self.create_failure_for_token(
                reader,
                TSDocMessageId::HtmlTagMissingString,
                "Expecting an HTML string starting with a single-quote or double-quote character",
                None,
            ));
        }
        reader.read_token();

        loop {
            let kind = reader.peek_token_kind();
            if kind == quote_kind {
                reader.read_token();
                break;
            }
            if kind == TokenKind::EndOfInput || kind == TokenKind::Newline {
                return Err(self.create_failure_for_token(
                    reader,
                    TSDocMessageId::HtmlStringMissingQuote,
                    "The HTML string is missing its closing quote",
                    Some(marker),
                ));
            }
            reader.read_token();
        }

        // The next attribute cannot start immediately after this one.
        if reader.peek_token_kind() == TokenKind::AsciiWord {
            return Err(self.create_failure_for_token(
                reader,
                TSDocMessageId::TextAfterHtmlString,
                "The next character after a closing quote must be spacing or punctuation",
                None,
            ));
        }
        Ok(())
    }

    pub(super) fn parse_html_end_tag(&mut self, reader: &mut TokenReader<'a>) -> DocNode<'a> {
        reader.assert_accumulated_sequence_is_empty();
        let marker = reader.create_marker();

        if reader.peek_token_kind() != TokenKind::LessThan
            || reader.peek_token_after_kind() != TokenKind::Slash
        {
            return self.backtrack_and_create_error(
                reader,
                marker,
                TSDocMessageId::MissingHtmlEndTag,
                "Expecting an HTML tag starting with \"</\"",
            );
        }
        reader.read_token();
        reader.read_token();
        let opening_delimiter = reader.extract_accumulated_sequence();

        let name = match self.parse_html_name(reader, true) {
            Ok(name) => name,
            Err(failure) => {
                return self.backtrack_and_create_error_for_failure(
                    reader,
                    marker,
                    "Expecting an HTML element name: ",
                    failure,
                );
            }
        };

        let spacing_after_name = self.try_read_spacing_and_newlines(reader);

        if reader.peek_token_kind() != TokenKind::GreaterThan {
            let failure = self.create_failure_for_token(
                reader,
                TSDocMessageId::HtmlTagMissingGreaterThan,
                "Expecting a closing \">\" for the HTML tag",
                None,
            );
            return self.backtrack_and_create_error_for_failure(reader, marker, "", failure);
        }
        reader.read_token();
        let closing_delimiter = reader.extract_accumulated_sequence();

        DocHtmlEndTag::parsed(opening_delimiter, name, spacing_after_name, closing_delimiter).into()
    }

    /// Element and attribute names. Only element names are checked against
    /// the configured set of supported elements.
    fn parse_html_name(
        &mut self,
        reader: &mut TokenReader<'a>,
        is_element: bool,
    ) -> Result<TokenSequence<'a>, Failure<'a>> {
        let marker = reader.create_marker();
        if reader.peek_token_kind() == TokenKind::Spacing {
            return Err(self.create_failure_for_tokens_since(
                reader,
                TSDocMessageId::MalformedHtmlName,
                "A space is not allowed here",
                marker,
            ));
        }

        while matches!(
            reader.peek_token_kind(),
            TokenKind::Hyphen | TokenKind::Period | TokenKind::AsciiWord
        ) {
            reader.read_token();
        }

        let Some(excerpt) = reader.try_extract_accumulated_sequence() else {
            return Err(self.create_failure_for_token(
                reader,
                TSDocMessageId::MalformedHtmlName,
                "Expecting an HTML name",
                None,
            ));
        };

        let html_name = excerpt.to_string();
        if let Some(explanation) = string_checks::explain_if_invalid_html_name(&html_name) {
            return Err(self.create_failure_for_tokens_since(
                reader,
                TSDocMessageId::MalformedHtmlName,
                explanation,
                marker,
            ));
        }

        if is_element
            && self.configuration.validation().report_unsupported_html_elements
            && !self.configuration.is_html_element_supported(&html_name)
        {
            return Err(self.create_failure_for_token(
                reader,
                TSDocMessageId::UnsupportedHtmlElementName,
                format!(
                    "The HTML element name \"{}\" is not defined by your TSDoc configuration",
                    html_name
                ),
                Some(marker),
            ));
        }

        Ok(excerpt)
    }
}
