//! Code spans and fenced code blocks.

use tsdoc_ast::{DocCodeSpan, DocFencedCode, DocNode, FencedCodeExcerpts};
use tsdoc_diagnostics::TSDocMessageId;
use tsdoc_scanner::TokenKind;

use super::NodeParser;
use crate::token_reader::TokenReader;

impl<'a, 'c> NodeParser<'a, 'c> {
    pub(super) fn parse_code_span(&mut self, reader: &mut TokenReader<'a>) -> DocNode<'a> {
        reader.assert_accumulated_sequence_is_empty();
        let marker = reader.create_marker();

        assert!(
            reader.peek_token_kind() == TokenKind::Backtick,
            "Parser assertion failed: Expecting a code span starting with a backtick character \"`\""
        );
        reader.read_token();
        let opening_delimiter = reader.extract_accumulated_sequence();

        loop {
            match reader.peek_token_kind() {
                TokenKind::Backtick => {
                    let Some(code) = reader.try_extract_accumulated_sequence() else {
                        return self.backtrack_and_create_error_range(
                            reader,
                            marker,
                            marker + 1,
                            TSDocMessageId::CodeSpanEmpty,
                            "A code span must contain at least one character between the backticks",
                        );
                    };
                    reader.read_token();
                    let closing_delimiter = reader.extract_accumulated_sequence();
                    return DocCodeSpan::parsed(opening_delimiter, code, closing_delimiter).into();
                }
                TokenKind::EndOfInput | TokenKind::Newline => {
                    return self.backtrack_and_create_error(
                        reader,
                        marker,
                        TSDocMessageId::CodeSpanMissingDelimiter,
                        "The code span is missing its closing backtick",
                    );
                }
                _ => {
                    reader.read_token();
                }
            }
        }
    }

    pub(super) fn parse_fenced_code(&mut self, reader: &mut TokenReader<'a>) -> DocNode<'a> {
        reader.assert_accumulated_sequence_is_empty();

        let start_marker = reader.create_marker();
        let end_of_opening_delimiter_marker = start_marker + 2;

        match reader.peek_previous_token_kind() {
            TokenKind::Newline | TokenKind::EndOfInput => {}
            _ => {
                // Cover all three backticks so they are not re-read as a code span.
                return self.backtrack_and_create_error_range(
                    reader,
                    start_marker,
                    end_of_opening_delimiter_marker,
                    TSDocMessageId::CodeFenceOpeningIndent,
                    "The opening backtick for a code fence must appear at the start of the line",
                );
            }
        }

        for _ in 0..3 {
            let token = reader.read_token();
            assert!(
                token.kind == TokenKind::Backtick,
                "Parser assertion failed: Expecting three backticks"
            );
        }
        let opening_fence = reader.extract_accumulated_sequence();

        // The newline belongs to the spacing after the language.
        while reader.peek_token_kind() == TokenKind::Spacing {
            reader.read_token();
        }
        let spacing_after_opening_fence = reader.try_extract_accumulated_sequence();

        // Language specifier through the end of the line. Trailing spacing is
        // split off afterwards.
        let mut start_of_padding_marker = None;
        loop {
            match reader.peek_token_kind() {
                TokenKind::Spacing => {
                    start_of_padding_marker.get_or_insert(reader.create_marker());
                }
                TokenKind::Newline => {
                    start_of_padding_marker.get_or_insert(reader.create_marker());
                    reader.read_token();
                    break;
                }
                TokenKind::Backtick => {
                    let failure = self.create_failure_for_token(
                        reader,
                        TSDocMessageId::CodeFenceSpecifierSyntax,
                        "The language specifier cannot contain backtick characters",
                        None,
                    );
                    return self.backtrack_and_create_error_range_for_failure(
                        reader,
                        start_marker,
                        end_of_opening_delimiter_marker,
                        "Error parsing code fence: ",
                        failure,
                    );
                }
                TokenKind::EndOfInput => {
                    let failure = self.create_failure_for_token(
                        reader,
                        TSDocMessageId::CodeFenceMissingDelimiter,
                        "Missing closing delimiter",
                        None,
                    );
                    return self.backtrack_and_create_error_range_for_failure(
                        reader,
                        start_marker,
                        end_of_opening_delimiter_marker,
                        "Error parsing code fence: ",
                        failure,
                    );
                }
                _ => start_of_padding_marker = None,
            }
            reader.read_token();
        }

        let language_and_padding = reader.extract_accumulated_sequence();
        let padding_start = start_of_padding_marker.unwrap_or(language_and_padding.end_index());
        let language =
            language_and_padding.get_new_sequence(language_and_padding.start_index(), padding_start);
        let spacing_after_language = Some(
            language_and_padding.get_new_sequence(padding_start, language_and_padding.end_index()),
        );

        // Code lines until a line that starts (after optional indentation)
        // with three backticks.
        let mut token_before_delimiter = reader.tokens()[reader.create_marker() - 1];
        let mut at_line_start = true;
        let code_end_marker;
        let closing_fence_start_marker;
        loop {
            if at_line_start {
                let line_start = reader.create_marker();
                while reader.peek_token_kind() == TokenKind::Spacing {
                    token_before_delimiter = reader.read_token();
                }
                if reader.peek_token_kind() == TokenKind::Backtick
                    && reader.peek_token_after_kind() == TokenKind::Backtick
                    && reader.peek_token_after_after_kind() == TokenKind::Backtick
                {
                    code_end_marker = line_start;
                    closing_fence_start_marker = reader.create_marker();
                    reader.read_token();
                    reader.read_token();
                    reader.read_token();
                    break;
                }
                at_line_start = false;
            }

            match reader.peek_token_kind() {
                TokenKind::EndOfInput => {
                    let failure = self.create_failure_for_token(
                        reader,
                        TSDocMessageId::CodeFenceMissingDelimiter,
                        "Missing closing delimiter",
                        None,
                    );
                    return self.backtrack_and_create_error_range_for_failure(
                        reader,
                        start_marker,
                        end_of_opening_delimiter_marker,
                        "Error parsing code fence: ",
                        failure,
                    );
                }
                TokenKind::Newline => {
                    token_before_delimiter = reader.read_token();
                    at_line_start = true;
                }
                _ => {
                    reader.read_token();
                }
            }
        }

        if token_before_delimiter.kind != TokenKind::Newline {
            self.log.add_message_for_text_range(
                TSDocMessageId::CodeFenceClosingIndent,
                "The closing delimiter for a code fence must not be indented",
                token_before_delimiter.range,
            );
        }

        let code_and_delimiter = reader.extract_accumulated_sequence();
        let code = code_and_delimiter.get_new_sequence(code_and_delimiter.start_index(), code_end_marker);
        let spacing_before_closing_fence =
            Some(code_and_delimiter.get_new_sequence(code_end_marker, closing_fence_start_marker));
        let closing_fence = code_and_delimiter
            .get_new_sequence(closing_fence_start_marker, code_and_delimiter.end_index());

        loop {
            match reader.peek_token_kind() {
                TokenKind::Spacing => {
                    reader.read_token();
                }
                TokenKind::Newline => {
                    reader.read_token();
                    break;
                }
                TokenKind::EndOfInput => break,
                _ => {
                    self.log.add_message_for_text_range(
                        TSDocMessageId::CodeFenceClosingSyntax,
                        "Unexpected characters after closing delimiter for code fence",
                        reader.peek_token().range,
                    );
                    break;
                }
            }
        }
        let spacing_after_closing_fence = reader.try_extract_accumulated_sequence();

        DocFencedCode::parsed(FencedCodeExcerpts {
            opening_fence,
            spacing_after_opening_fence,
            language,
            spacing_after_language,
            code,
            spacing_before_closing_fence,
            closing_fence,
            spacing_after_closing_fence,
        })
        .into()
    }
}
