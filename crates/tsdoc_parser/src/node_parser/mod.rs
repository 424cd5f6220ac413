//! Recursive descent over the token list.
//!
//! The main loop dispatches on the next token kind. Plain words and spacing
//! accumulate in the [`TokenReader`] until something structural appears, at
//! which point the run is flushed as a `DocPlainText`. Every sub-parser
//! either returns a node or reports a message and returns `DocErrorText`
//! covering the tokens it could not interpret, so parsing always reaches the
//! end of input.

mod code;
mod html;
mod inline;
mod param;
mod reference;

use tracing::trace;
use tsdoc_ast::{
    has_any_text_content, DocBlock, DocBlockTag, DocComment, DocErrorText, DocEscapedText,
    DocNode, DocNodeRef, DocPlainText, DocSection, DocSoftBreak, EscapeStyle,
};
use tsdoc_config::{TSDocConfiguration, TSDocTagDefinition, TSDocTagSyntaxKind};
use tsdoc_core::{string_checks, TextRange};
use tsdoc_diagnostics::{ParserMessageLog, TSDocMessageId};
use tsdoc_scanner::{Token, TokenKind, TokenSequence, Tokenizer};

use crate::token_reader::TokenReader;

/// A problem found by a sub-parser that has not been turned into a node yet.
#[derive(Debug)]
pub(crate) struct Failure<'a> {
    pub(crate) message_id: TSDocMessageId,
    pub(crate) message: String,
    pub(crate) location: TokenSequence<'a>,
}

/// Which section new content is appended to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum SectionTarget {
    Summary,
    Remarks,
    PrivateRemarks,
    Deprecated,
    Returns,
    Param(usize),
    TypeParam(usize),
    See(usize),
    Custom(usize),
}

pub(crate) struct NodeParser<'a, 'c> {
    configuration: &'c TSDocConfiguration,
    tokens: &'a [Token<'a>],
    comment_range: TextRange<'a>,
    doc_comment: DocComment<'a>,
    log: ParserMessageLog<'a>,
    current_section: SectionTarget,
    /// Nesting of `[...]` symbol references.
    reference_depth: u32,
}

impl<'a, 'c> NodeParser<'a, 'c> {
    pub(crate) fn new(
        configuration: &'c TSDocConfiguration,
        tokens: &'a [Token<'a>],
        comment_range: TextRange<'a>,
        log: ParserMessageLog<'a>,
    ) -> Self {
        Self {
            configuration,
            tokens,
            comment_range,
            doc_comment: DocComment::new(),
            log,
            current_section: SectionTarget::Summary,
            reference_depth: 0,
        }
    }

    /// Parse every token and run the comment-level checks.
    pub(crate) fn parse(mut self) -> (DocComment<'a>, ParserMessageLog<'a>) {
        let mut reader = TokenReader::new(self.tokens);

        loop {
            match reader.peek_token_kind() {
                TokenKind::EndOfInput => break,
                TokenKind::Newline => {
                    self.push_accumulated_plain_text(&mut reader);
                    reader.read_token();
                    let excerpt = reader.extract_accumulated_sequence();
                    self.push_node(DocSoftBreak::parsed(excerpt).into());
                }
                TokenKind::Backslash => {
                    self.push_accumulated_plain_text(&mut reader);
                    let node = self.parse_backslash_escape(&mut reader);
                    self.push_node(node);
                }
                TokenKind::AtSign => {
                    self.push_accumulated_plain_text(&mut reader);
                    self.parse_and_push_block(&mut reader);
                }
                TokenKind::LeftCurlyBracket => {
                    self.push_accumulated_plain_text(&mut reader);
                    let marker = reader.create_marker();
                    match self.parse_inline_tag(&mut reader) {
                        // Applies to the whole comment rather than the current section.
                        DocNode::InheritDocTag(tag) => {
                            let tag_end_marker = reader.create_marker() - 1;
                            if self.doc_comment.inherit_doc_tag.is_none() {
                                self.doc_comment.inherit_doc_tag = Some(tag);
                            } else {
                                let node = self.backtrack_and_create_error_range(
                                    &mut reader,
                                    marker,
                                    tag_end_marker,
                                    TSDocMessageId::ExtraInheritDocTag,
                                    "A doc comment cannot have more than one @inheritDoc tag",
                                );
                                self.push_node(node);
                            }
                        }
                        node => self.push_node(node),
                    }
                }
                TokenKind::RightCurlyBracket => {
                    self.push_accumulated_plain_text(&mut reader);
                    let node = self.create_error(
                        &mut reader,
                        TSDocMessageId::EscapeRightBrace,
                        "The \"}\" character should be escaped using a backslash to avoid confusion with a TSDoc inline tag",
                    );
                    self.push_node(node);
                }
                TokenKind::LessThan => {
                    self.push_accumulated_plain_text(&mut reader);
                    let node = if reader.peek_token_after_kind() == TokenKind::Slash {
                        self.parse_html_end_tag(&mut reader)
                    } else {
                        self.parse_html_start_tag(&mut reader)
                    };
                    self.push_node(node);
                }
                TokenKind::GreaterThan => {
                    self.push_accumulated_plain_text(&mut reader);
                    let node = self.create_error(
                        &mut reader,
                        TSDocMessageId::EscapeGreaterThan,
                        "The \">\" character should be escaped using a backslash to avoid confusion with an HTML tag",
                    );
                    self.push_node(node);
                }
                TokenKind::Backtick => {
                    self.push_accumulated_plain_text(&mut reader);
                    let node = if reader.peek_token_after_kind() == TokenKind::Backtick
                        && reader.peek_token_after_after_kind() == TokenKind::Backtick
                    {
                        self.parse_fenced_code(&mut reader)
                    } else {
                        self.parse_code_span(&mut reader)
                    };
                    self.push_node(node);
                }
                _ => {
                    reader.read_token();
                }
            }
        }
        self.push_accumulated_plain_text(&mut reader);
        self.perform_validation_checks();

        (self.doc_comment, self.log)
    }

    // ========================================================================
    // Section management
    // ========================================================================

    fn current_section_mut(&mut self) -> &mut DocSection<'a> {
        let comment = &mut self.doc_comment;
        let section = match self.current_section {
            SectionTarget::Summary => None,
            SectionTarget::Remarks => comment.remarks_block.as_mut().map(DocBlock::content_mut),
            SectionTarget::PrivateRemarks => {
                comment.private_remarks.as_mut().map(DocBlock::content_mut)
            }
            SectionTarget::Deprecated => {
                comment.deprecated_block.as_mut().map(DocBlock::content_mut)
            }
            SectionTarget::Returns => comment.returns_block.as_mut().map(DocBlock::content_mut),
            SectionTarget::Param(index) => comment
                .params
                .blocks_mut()
                .get_mut(index)
                .map(|block| block.content_mut()),
            SectionTarget::TypeParam(index) => comment
                .type_params
                .blocks_mut()
                .get_mut(index)
                .map(|block| block.content_mut()),
            SectionTarget::See(index) => {
                comment.see_blocks.get_mut(index).map(DocBlock::content_mut)
            }
            SectionTarget::Custom(index) => {
                comment.custom_blocks.get_mut(index).map(DocBlock::content_mut)
            }
        };
        section.unwrap_or(&mut comment.summary_section)
    }

    fn push_node(&mut self, node: DocNode<'a>) {
        let configuration = self.configuration;
        self.current_section_mut()
            .append_node_in_paragraph(configuration.doc_node_manager(), node);
    }

    fn push_accumulated_plain_text(&mut self, reader: &mut TokenReader<'a>) {
        if let Some(excerpt) = reader.try_extract_accumulated_sequence() {
            self.push_node(DocPlainText::parsed(excerpt).into());
        }
    }

    fn add_block_to_doc_comment(&mut self, block: DocBlock<'a>) {
        let tag_name = block.block_tag().tag_name_with_upper_case().to_string();
        let comment = &mut self.doc_comment;
        self.current_section = match tag_name.as_str() {
            "@REMARKS" => {
                comment.remarks_block = Some(block);
                SectionTarget::Remarks
            }
            "@PRIVATEREMARKS" => {
                comment.private_remarks = Some(block);
                SectionTarget::PrivateRemarks
            }
            "@DEPRECATED" => {
                comment.deprecated_block = Some(block);
                SectionTarget::Deprecated
            }
            "@RETURNS" => {
                comment.returns_block = Some(block);
                SectionTarget::Returns
            }
            "@SEE" => {
                comment.append_see_block(block);
                SectionTarget::See(comment.see_blocks.len() - 1)
            }
            _ => {
                comment.append_custom_block(block);
                SectionTarget::Custom(comment.custom_blocks.len() - 1)
            }
        };
    }

    // ========================================================================
    // Block tags
    // ========================================================================

    fn parse_and_push_block(&mut self, reader: &mut TokenReader<'a>) {
        let configuration = self.configuration;
        let block_tag = match self.parse_block_tag(reader) {
            Ok(block_tag) => block_tag,
            Err(error_text) => {
                self.push_node(error_text);
                return;
            }
        };

        let tag_name_with_upper_case = block_tag.tag_name_with_upper_case().to_string();
        if let Some(definition) =
            configuration.try_get_tag_definition_with_upper_case(&tag_name_with_upper_case)
        {
            match definition.syntax_kind() {
                TSDocTagSyntaxKind::Block => {
                    match tag_name_with_upper_case.as_str() {
                        "@PARAM" => {
                            let block = self.parse_param_block(reader, block_tag, "@param");
                            self.doc_comment.params.add(block);
                            self.current_section =
                                SectionTarget::Param(self.doc_comment.params.count() - 1);
                        }
                        "@TYPEPARAM" => {
                            let block = self.parse_param_block(reader, block_tag, "@typeParam");
                            self.doc_comment.type_params.add(block);
                            self.current_section =
                                SectionTarget::TypeParam(self.doc_comment.type_params.count() - 1);
                        }
                        _ => self.add_block_to_doc_comment(DocBlock::new(block_tag)),
                    }
                    return;
                }
                TSDocTagSyntaxKind::Modifier => {
                    // Modifiers carry no content, so the current section is unchanged.
                    self.doc_comment.modifier_tag_set.add_tag(block_tag);
                    return;
                }
                TSDocTagSyntaxKind::Inline => {}
            }
        }

        self.push_node(block_tag.into());
    }

    fn parse_block_tag(
        &mut self,
        reader: &mut TokenReader<'a>,
    ) -> Result<DocBlockTag<'a>, DocNode<'a>> {
        reader.assert_accumulated_sequence_is_empty();
        let marker = reader.create_marker();

        if reader.peek_token_kind() != TokenKind::AtSign {
            return Err(self.create_error(
                reader,
                TSDocMessageId::MissingTag,
                "Expecting a TSDoc tag starting with \"@\"",
            ));
        }

        // A tag must start a word. In "example@example.com" the "@" becomes
        // error text and the rest of the word stays plain text.
        match reader.peek_previous_token_kind() {
            TokenKind::EndOfInput | TokenKind::Spacing | TokenKind::Newline => {}
            _ => {
                return Err(self.create_error(
                    reader,
                    TSDocMessageId::AtSignInWord,
                    "The \"@\" character looks like part of a TSDoc tag; use a backslash to escape it",
                ));
            }
        }

        let mut tag_name = reader.read_token().text().to_string();

        if reader.peek_token_kind() != TokenKind::AsciiWord {
            return Err(self.backtrack_and_create_error(
                reader,
                marker,
                TSDocMessageId::AtSignWithoutTagName,
                "Expecting a TSDoc tag name after \"@\"; if it is not a tag, use a backslash to escape this character",
            ));
        }

        let tag_name_marker = reader.create_marker();
        while reader.peek_token_kind() == TokenKind::AsciiWord {
            tag_name.push_str(reader.read_token().text());
        }

        match reader.peek_token_kind() {
            TokenKind::Spacing | TokenKind::Newline | TokenKind::EndOfInput => {}
            _ => {
                let bad_character = reader.peek_token().text().chars().next().unwrap_or(' ');
                return Err(self.backtrack_and_create_error(
                    reader,
                    marker,
                    TSDocMessageId::CharactersAfterBlockTag,
                    format!(
                        "The token \"{}\" looks like a TSDoc tag but contains an invalid character \"{}\"; if it is not a tag, use a backslash to escape the \"@\"",
                        tag_name, bad_character
                    ),
                ));
            }
        }

        if string_checks::explain_if_invalid_tsdoc_tag_name(&tag_name).is_some() {
            let failure = self.create_failure_for_tokens_since(
                reader,
                TSDocMessageId::MalformedTagName,
                "A TSDoc tag name must start with a letter and contain only letters and numbers",
                tag_name_marker,
            );
            return Err(self.backtrack_and_create_error_for_failure(reader, marker, "", failure));
        }

        let tag_name_excerpt = reader.extract_accumulated_sequence();
        let block_tag = DocBlockTag::parsed(tag_name_excerpt);

        let configuration = self.configuration;
        let definition =
            configuration.try_get_tag_definition_with_upper_case(block_tag.tag_name_with_upper_case());
        self.validate_tag_definition(definition, &tag_name, false, tag_name_excerpt);

        Ok(block_tag)
    }

    /// Reports tags that are undefined, unsupported, or used with the wrong syntax.
    fn validate_tag_definition(
        &mut self,
        definition: Option<&TSDocTagDefinition>,
        tag_name: &str,
        expecting_inline_tag: bool,
        location: TokenSequence<'a>,
    ) {
        let Some(definition) = definition else {
            if !self.configuration.validation().ignore_undefined_tags {
                self.log_message(
                    TSDocMessageId::UndefinedTag,
                    format!("The TSDoc tag \"{}\" is not defined in this configuration", tag_name),
                    location,
                );
            }
            return;
        };

        let is_inline_tag = definition.syntax_kind() == TSDocTagSyntaxKind::Inline;
        if is_inline_tag != expecting_inline_tag {
            if expecting_inline_tag {
                self.log_message(
                    TSDocMessageId::TagShouldNotHaveBraces,
                    format!(
                        "The TSDoc tag \"{}\" is not an inline tag; it must not be enclosed in \"{{ }}\" braces",
                        tag_name
                    ),
                    location,
                );
            } else {
                self.log_message(
                    TSDocMessageId::InlineTagMissingBraces,
                    format!(
                        "The TSDoc tag \"{}\" is an inline tag; it must be enclosed in \"{{ }}\" braces",
                        tag_name
                    ),
                    location,
                );
            }
        } else if self.configuration.validation().report_unsupported_tags
            && !self.configuration.is_tag_supported(definition)
        {
            self.log_message(
                TSDocMessageId::UnsupportedTag,
                format!("The TSDoc tag \"{}\" is not supported by this tool", tag_name),
                location,
            );
        }
    }

    // ========================================================================
    // Escapes
    // ========================================================================

    fn parse_backslash_escape(&mut self, reader: &mut TokenReader<'a>) -> DocNode<'a> {
        reader.assert_accumulated_sequence_is_empty();
        let marker = reader.create_marker();

        reader.read_token();

        if reader.peek_token_kind() == TokenKind::EndOfInput {
            return self.backtrack_and_create_error(
                reader,
                marker,
                TSDocMessageId::UnnecessaryBackslash,
                "A backslash must precede another character that is being escaped",
            );
        }

        let escaped_token = reader.read_token();

        // CommonMark only allows escaping punctuation.
        if !Tokenizer::is_punctuation(escaped_token.kind) {
            return self.backtrack_and_create_error(
                reader,
                marker,
                TSDocMessageId::UnnecessaryBackslash,
                "A backslash can only be used to escape a punctuation character",
            );
        }

        let encoded_text_excerpt = reader.extract_accumulated_sequence();
        DocEscapedText::parsed(
            encoded_text_excerpt,
            EscapeStyle::CommonMarkBackslash,
            escaped_token.text(),
        )
        .into()
    }

    // ========================================================================
    // Comment-level checks
    // ========================================================================

    fn perform_validation_checks(&mut self) {
        let comment = &self.doc_comment;

        let missing_deprecation_message = comment
            .deprecated_block
            .as_ref()
            .filter(|block| !has_any_text_content(DocNodeRef::Block(block), 1))
            .map(|block| self.block_tag_summary(block));
        if let Some((location, tag_name)) = missing_deprecation_message {
            self.log_message(
                TSDocMessageId::MissingDeprecationMessage,
                format!(
                    "The {} block must include a deprecation message, e.g. describing the recommended alternative",
                    tag_name
                ),
                location,
            );
        }

        if self.doc_comment.inherit_doc_tag.is_none() {
            return;
        }

        let remarks = self
            .doc_comment
            .remarks_block
            .as_ref()
            .map(|block| self.block_tag_summary(block));
        if let Some((location, tag_name)) = remarks {
            self.log_message(
                TSDocMessageId::InheritDocIncompatibleTag,
                format!(
                    "A \"{}\" block must not be used, because that content is provided by the @inheritDoc tag",
                    tag_name
                ),
                location,
            );
        }

        if has_any_text_content(DocNodeRef::Section(&self.doc_comment.summary_section), 1) {
            self.log.add_message_for_text_range(
                TSDocMessageId::InheritDocIncompatibleSummary,
                "The summary section must not have any content, because that content is provided by the @inheritDoc tag",
                self.comment_range,
            );
        }
    }

    fn block_tag_summary(&self, block: &DocBlock<'a>) -> (TokenSequence<'a>, String) {
        let tag = block.block_tag();
        (self.block_tag_location(tag), tag.tag_name().to_string())
    }

    fn block_tag_location(&self, tag: &DocBlockTag<'a>) -> TokenSequence<'a> {
        tag.tag_name_excerpt()
            .map(|excerpt| excerpt.content)
            .unwrap_or_else(|| TokenSequence::create_empty(self.tokens))
    }

    // ========================================================================
    // Error helpers
    // ========================================================================

    fn log_message(
        &mut self,
        message_id: TSDocMessageId,
        message: impl Into<String>,
        location: TokenSequence<'a>,
    ) {
        let message = message.into();
        trace!(message_id = %message_id, %message, "parser message");
        self.log.add_message_for_token_sequence(message_id, message, location);
    }

    fn error_text(
        &mut self,
        message_id: TSDocMessageId,
        message: String,
        text: TokenSequence<'a>,
        location: TokenSequence<'a>,
    ) -> DocNode<'a> {
        self.log_message(message_id, message.clone(), location);
        DocErrorText::parsed(text, message_id, message, location).into()
    }

    /// Read one token and report it as error text.
    fn create_error(
        &mut self,
        reader: &mut TokenReader<'a>,
        message_id: TSDocMessageId,
        message: impl Into<String>,
    ) -> DocNode<'a> {
        reader.read_token();
        let sequence = reader.extract_accumulated_sequence();
        self.error_text(message_id, message.into(), sequence, sequence)
    }

    /// Rewind to `marker` and report the single token there as error text.
    fn backtrack_and_create_error(
        &mut self,
        reader: &mut TokenReader<'a>,
        marker: usize,
        message_id: TSDocMessageId,
        message: impl Into<String>,
    ) -> DocNode<'a> {
        reader.backtrack_to_marker(marker);
        self.create_error(reader, message_id, message)
    }

    /// Rewind to `error_start_marker` and report every token through
    /// `error_inclusive_end_marker` as error text.
    fn backtrack_and_create_error_range(
        &mut self,
        reader: &mut TokenReader<'a>,
        error_start_marker: usize,
        error_inclusive_end_marker: usize,
        message_id: TSDocMessageId,
        message: impl Into<String>,
    ) -> DocNode<'a> {
        let sequence = self.read_error_range(reader, error_start_marker, error_inclusive_end_marker);
        self.error_text(message_id, message.into(), sequence, sequence)
    }

    fn backtrack_and_create_error_for_failure(
        &mut self,
        reader: &mut TokenReader<'a>,
        error_start_marker: usize,
        error_message_prefix: &str,
        failure: Failure<'a>,
    ) -> DocNode<'a> {
        reader.backtrack_to_marker(error_start_marker);
        reader.read_token();
        let sequence = reader.extract_accumulated_sequence();
        let message = format!("{}{}", error_message_prefix, failure.message);
        self.error_text(failure.message_id, message, sequence, failure.location)
    }

    fn backtrack_and_create_error_range_for_failure(
        &mut self,
        reader: &mut TokenReader<'a>,
        error_start_marker: usize,
        error_inclusive_end_marker: usize,
        error_message_prefix: &str,
        failure: Failure<'a>,
    ) -> DocNode<'a> {
        let sequence = self.read_error_range(reader, error_start_marker, error_inclusive_end_marker);
        let message = format!("{}{}", error_message_prefix, failure.message);
        self.error_text(failure.message_id, message, sequence, failure.location)
    }

    fn read_error_range(
        &mut self,
        reader: &mut TokenReader<'a>,
        error_start_marker: usize,
        error_inclusive_end_marker: usize,
    ) -> TokenSequence<'a> {
        reader.backtrack_to_marker(error_start_marker);
        while reader.create_marker() < error_inclusive_end_marker {
            reader.read_token();
        }
        if reader.peek_token_kind() != TokenKind::EndOfInput {
            reader.read_token();
        }
        reader.extract_accumulated_sequence()
    }

    /// A failure located at the token at `marker`, or at the next token.
    fn create_failure_for_token(
        &self,
        reader: &TokenReader<'a>,
        message_id: TSDocMessageId,
        message: impl Into<String>,
        marker: Option<usize>,
    ) -> Failure<'a> {
        let marker = marker.unwrap_or_else(|| reader.create_marker());
        Failure {
            message_id,
            message: message.into(),
            location: TokenSequence::new(reader.tokens(), marker, marker + 1),
        }
    }

    /// A failure covering every token read since `start_marker`, or the next
    /// token if nothing was read.
    fn create_failure_for_tokens_since(
        &self,
        reader: &TokenReader<'a>,
        message_id: TSDocMessageId,
        message: impl Into<String>,
        start_marker: usize,
    ) -> Failure<'a> {
        let mut end_marker = reader.create_marker();
        assert!(
            start_marker <= end_marker,
            "Parser assertion failed: The start marker is after the end marker"
        );
        if end_marker == start_marker {
            end_marker += 1;
        }
        Failure {
            message_id,
            message: message.into(),
            location: TokenSequence::new(reader.tokens(), start_marker, end_marker),
        }
    }

    /// Spacing and newlines may both appear between the parts of a tag.
    fn try_read_spacing_and_newlines(
        &self,
        reader: &mut TokenReader<'a>,
    ) -> Option<TokenSequence<'a>> {
        while matches!(
            reader.peek_token_kind(),
            TokenKind::Spacing | TokenKind::Newline
        ) {
            reader.read_token();
        }
        reader.try_extract_accumulated_sequence()
    }
}
