//! Inline tags: `{@link}`, `{@inheritDoc}`, and everything else written in braces.

use tsdoc_ast::{
    DocInheritDocTag, DocInlineTag, DocLinkTag, DocNode, InlineTagParts, LinkTagExcerpts,
};
use tsdoc_core::string_checks;
use tsdoc_diagnostics::TSDocMessageId;
use tsdoc_scanner::{TokenKind, TokenSequence, Tokenizer};

use super::NodeParser;
use crate::token_reader::TokenReader;

impl<'a, 'c> NodeParser<'a, 'c> {
    pub(super) fn parse_inline_tag(&mut self, reader: &mut TokenReader<'a>) -> DocNode<'a> {
        reader.assert_accumulated_sequence_is_empty();
        let marker = reader.create_marker();

        if reader.peek_token_kind() != TokenKind::LeftCurlyBracket {
            return self.create_error(
                reader,
                TSDocMessageId::MissingTag,
                "Expecting a TSDoc tag starting with \"{\"",
            );
        }
        reader.read_token();
        let opening_delimiter = reader.extract_accumulated_sequence();

        // Errors from here on cover both "{" and "@"; backtracking to just the
        // "{" would let the main loop misread the "@" as a block tag.
        let at_sign_marker = reader.create_marker();

        if reader.peek_token_kind() != TokenKind::AtSign {
            return self.backtrack_and_create_error(
                reader,
                marker,
                TSDocMessageId::MalformedInlineTag,
                "Expecting a TSDoc tag starting with \"{@\"",
            );
        }

        let mut tag_name = reader.read_token().text().to_string();
        while reader.peek_token_kind() == TokenKind::AsciiWord {
            tag_name.push_str(reader.read_token().text());
        }

        if tag_name == "@" {
            let failure = self.create_failure_for_token(
                reader,
                TSDocMessageId::MalformedInlineTag,
                "Expecting a TSDoc inline tag name after the \"{@\" characters",
                None,
            );
            return self.backtrack_and_create_error_range_for_failure(
                reader,
                marker,
                at_sign_marker,
                "",
                failure,
            );
        }

        if string_checks::explain_if_invalid_tsdoc_tag_name(&tag_name).is_some() {
            let failure = self.create_failure_for_tokens_since(
                reader,
                TSDocMessageId::MalformedTagName,
                "A TSDoc tag name must start with a letter and contain only letters and numbers",
                at_sign_marker,
            );
            return self.backtrack_and_create_error_range_for_failure(
                reader,
                marker,
                at_sign_marker,
                "",
                failure,
            );
        }

        let tag_name_excerpt = reader.extract_accumulated_sequence();
        let spacing_after_tag_name = self.try_read_spacing_and_newlines(reader);

        if spacing_after_tag_name.is_none() && reader.peek_token_kind() != TokenKind::RightCurlyBracket
        {
            let bad_character = reader.peek_token().text().chars().next().unwrap_or(' ');
            let failure = self.create_failure_for_token(
                reader,
                TSDocMessageId::CharactersAfterInlineTag,
                format!(
                    "The character \"{}\" cannot appear after the TSDoc tag name; expecting a space",
                    bad_character
                ),
                None,
            );
            return self.backtrack_and_create_error_range_for_failure(
                reader,
                marker,
                at_sign_marker,
                "",
                failure,
            );
        }

        loop {
            match reader.peek_token_kind() {
                TokenKind::EndOfInput => {
                    return self.backtrack_and_create_error_range(
                        reader,
                        marker,
                        at_sign_marker,
                        TSDocMessageId::InlineTagMissingRightBrace,
                        "The TSDoc inline tag name is missing its closing \"}\"",
                    );
                }
                TokenKind::Backslash => {
                    // "\}" keeps a brace inside the tag content.
                    reader.read_token();
                    if !Tokenizer::is_punctuation(reader.peek_token_kind()) {
                        let failure = self.create_failure_for_token(
                            reader,
                            TSDocMessageId::UnnecessaryBackslash,
                            "A backslash can only be used to escape a punctuation character",
                            None,
                        );
                        return self.backtrack_and_create_error_range_for_failure(
                            reader,
                            marker,
                            at_sign_marker,
                            "Error reading inline TSDoc tag: ",
                            failure,
                        );
                    }
                    reader.read_token();
                }
                TokenKind::LeftCurlyBracket => {
                    let failure = self.create_failure_for_token(
                        reader,
                        TSDocMessageId::InlineTagUnescapedBrace,
                        "The \"{\" character must be escaped with a backslash when used inside a TSDoc inline tag",
                        None,
                    );
                    return self.backtrack_and_create_error_range_for_failure(
                        reader,
                        marker,
                        at_sign_marker,
                        "",
                        failure,
                    );
                }
                TokenKind::RightCurlyBracket => break,
                _ => {
                    reader.read_token();
                }
            }
        }

        let tag_content = reader.try_extract_accumulated_sequence();
        let content_start = reader.create_marker();

        reader.read_token();
        let closing_delimiter = reader.extract_accumulated_sequence();

        let parts = InlineTagParts::parsed(
            tag_name.clone(),
            opening_delimiter,
            tag_name_excerpt,
            spacing_after_tag_name,
            closing_delimiter,
        );

        // The content is re-read on its own, so "}" shows up as end of input.
        let content_sequence = tag_content
            .unwrap_or_else(|| TokenSequence::new(reader.tokens(), content_start, content_start));
        let mut embedded_reader = TokenReader::embedded(content_sequence);

        let tag_name_with_upper_case = parts.tag_name_with_upper_case().to_string();
        let node = match tag_name_with_upper_case.as_str() {
            "@INHERITDOC" => self.parse_inherit_doc_tag(
                parts,
                tag_content,
                tag_name_excerpt,
                &mut embedded_reader,
            ),
            "@LINK" => {
                self.parse_link_tag(parts, tag_content, tag_name_excerpt, &mut embedded_reader)
            }
            _ => DocInlineTag::parsed(parts, tag_content).into(),
        };

        let configuration = self.configuration;
        let definition = configuration.try_get_tag_definition(&tag_name);
        self.validate_tag_definition(definition, &tag_name, true, tag_name_excerpt);

        node
    }

    fn parse_inherit_doc_tag(
        &mut self,
        parts: InlineTagParts<'a>,
        tag_content: Option<TokenSequence<'a>>,
        tag_name_location: TokenSequence<'a>,
        reader: &mut TokenReader<'a>,
    ) -> DocNode<'a> {
        let mut declaration_reference = None;

        if reader.peek_token_kind() != TokenKind::EndOfInput {
            match self.parse_declaration_reference(reader, tag_name_location) {
                Some(reference) => declaration_reference = Some(reference),
                None => return DocInlineTag::parsed(parts, tag_content).into(),
            }

            if reader.peek_token_kind() != TokenKind::EndOfInput {
                reader.read_token();
                let location = reader.extract_accumulated_sequence();
                self.log_message(
                    TSDocMessageId::InheritDocTagSyntax,
                    "Unexpected character after declaration reference",
                    location,
                );
                return DocInlineTag::parsed(parts, tag_content).into();
            }
        }

        DocInheritDocTag::parsed(parts, declaration_reference).into()
    }

    /// Falls back to a generic [`DocInlineTag`] when the content is malformed.
    fn parse_link_tag(
        &mut self,
        parts: InlineTagParts<'a>,
        tag_content: Option<TokenSequence<'a>>,
        tag_name_location: TokenSequence<'a>,
        reader: &mut TokenReader<'a>,
    ) -> DocNode<'a> {
        if tag_content.is_none() {
            self.log_message(
                TSDocMessageId::LinkTagEmpty,
                "The @link tag content is missing",
                tag_name_location,
            );
            return DocInlineTag::parsed(parts, tag_content).into();
        }

        let mut excerpts = LinkTagExcerpts::default();
        let mut code_destination = None;

        // Only "scheme://" counts as a URL; anything else is a declaration
        // reference. Schemes are restricted to letters, digits, "+", "-", ".".
        let mut looks_like_url = reader.peek_token_kind() == TokenKind::Slash
            && reader.peek_token_after_kind() == TokenKind::Slash;
        let marker = reader.create_marker();
        let mut done = looks_like_url;
        while !done {
            match reader.peek_token_kind() {
                TokenKind::AsciiWord | TokenKind::Period | TokenKind::Hyphen | TokenKind::Plus => {
                    reader.read_token();
                }
                TokenKind::Colon => {
                    reader.read_token();
                    looks_like_url = reader.peek_token_kind() == TokenKind::Slash
                        && reader.peek_token_after_kind() == TokenKind::Slash;
                    done = true;
                }
                _ => done = true,
            }
        }
        reader.backtrack_to_marker(marker);

        if looks_like_url {
            match self.parse_link_tag_url_destination(reader) {
                Some(url_destination) => excerpts.url_destination = Some(url_destination),
                None => return DocInlineTag::parsed(parts, tag_content).into(),
            }
        } else {
            match self.parse_declaration_reference(reader, tag_name_location) {
                Some(reference) => code_destination = Some(reference),
                None => return DocInlineTag::parsed(parts, tag_content).into(),
            }
        }
        excerpts.spacing_after_destination = self.try_read_spacing_and_newlines(reader);

        match reader.peek_token_kind() {
            TokenKind::Pipe => {
                reader.read_token();
                excerpts.pipe = Some(reader.extract_accumulated_sequence());
                excerpts.spacing_after_pipe = self.try_read_spacing_and_newlines(reader);

                // The embedded reader ends at the "}", so this reads the rest of the tag.
                let mut spacing_after_link_text_marker = None;
                loop {
                    match reader.peek_token_kind() {
                        TokenKind::EndOfInput => break,
                        TokenKind::Pipe | TokenKind::LeftCurlyBracket => {
                            let bad_character = reader.read_token().text();
                            let location = reader.extract_accumulated_sequence();
                            self.log_message(
                                TSDocMessageId::LinkTagUnescapedText,
                                format!(
                                    "The \"{}\" character may not be used in the link text without escaping it",
                                    bad_character
                                ),
                                location,
                            );
                            return DocInlineTag::parsed(parts, tag_content).into();
                        }
                        TokenKind::Spacing | TokenKind::Newline => {
                            reader.read_token();
                        }
                        _ => {
                            spacing_after_link_text_marker = Some(reader.create_marker() + 1);
                            reader.read_token();
                        }
                    }
                }

                if let Some(link_text_and_spacing) = reader.try_extract_accumulated_sequence() {
                    match spacing_after_link_text_marker {
                        None => excerpts.spacing_after_link_text = Some(link_text_and_spacing),
                        Some(split) if split >= link_text_and_spacing.end_index() => {
                            excerpts.link_text = Some(link_text_and_spacing);
                        }
                        Some(split) => {
                            excerpts.link_text = Some(link_text_and_spacing.get_new_sequence(
                                link_text_and_spacing.start_index(),
                                split,
                            ));
                            excerpts.spacing_after_link_text = Some(
                                link_text_and_spacing
                                    .get_new_sequence(split, link_text_and_spacing.end_index()),
                            );
                        }
                    }
                }
            }
            TokenKind::EndOfInput => {}
            _ => {
                reader.read_token();
                let location = reader.extract_accumulated_sequence();
                self.log_message(
                    TSDocMessageId::LinkTagDestinationSyntax,
                    "Unexpected character after link destination",
                    location,
                );
                return DocInlineTag::parsed(parts, tag_content).into();
            }
        }

        DocLinkTag::parsed(parts, code_destination, excerpts).into()
    }

    /// Reads up to the next space, pipe, or end of content. No attempt is
    /// made to parse the URL beyond checking its scheme.
    fn parse_link_tag_url_destination(
        &mut self,
        reader: &mut TokenReader<'a>,
    ) -> Option<TokenSequence<'a>> {
        let mut url_destination = String::new();
        while !matches!(
            reader.peek_token_kind(),
            TokenKind::Spacing
                | TokenKind::Newline
                | TokenKind::EndOfInput
                | TokenKind::Pipe
                | TokenKind::RightCurlyBracket
        ) {
            url_destination.push_str(reader.read_token().text());
        }

        let url_destination_excerpt = reader.try_extract_accumulated_sequence()?;
        if let Some(explanation) = string_checks::explain_if_invalid_link_url(&url_destination) {
            self.log_message(
                TSDocMessageId::LinkTagInvalidUrl,
                explanation,
                url_destination_excerpt,
            );
            return None;
        }
        Some(url_destination_excerpt)
    }
}
