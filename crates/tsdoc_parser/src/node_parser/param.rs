//! `@param` and `@typeParam` blocks.

use tsdoc_ast::{DocBlockTag, DocParamBlock, ParamBlockExcerpts};
use tsdoc_core::string_checks;
use tsdoc_diagnostics::TSDocMessageId;
use tsdoc_scanner::{TokenKind, TokenSequence};

use super::NodeParser;
use crate::token_reader::TokenReader;

/// Dotted names such as `options.verbose` document a property of a parameter.
fn explain_if_invalid_parameter_name(parameter_name: &str) -> Option<String> {
    if parameter_name.is_empty() {
        return Some("The identifier cannot be an empty string".to_string());
    }
    parameter_name
        .split('.')
        .find_map(string_checks::explain_if_invalid_unquoted_identifier)
}

impl<'a, 'c> NodeParser<'a, 'c> {
    /// Parses `name -` after the tag. On failure the reader is rewound so the
    /// text becomes the block's description, and the block gets an empty name.
    pub(super) fn parse_param_block(
        &mut self,
        reader: &mut TokenReader<'a>,
        block_tag: DocBlockTag<'a>,
        tag_name: &str,
    ) -> DocParamBlock<'a> {
        let start_marker = reader.create_marker();
        let tag_location = self.block_tag_location(&block_tag);
        let mut excerpts = ParamBlockExcerpts {
            spacing_before_parameter_name: self.try_read_spacing_and_newlines(reader),
            ..ParamBlockExcerpts::default()
        };

        // JSDoc style "@param {type} name"
        excerpts.unsupported_jsdoc_type_before_parameter_name =
            self.try_parse_unsupported_jsdoc_type(reader, tag_name);
        if excerpts.unsupported_jsdoc_type_before_parameter_name.is_some() {
            excerpts.spacing_after_jsdoc_type_before_parameter_name =
                self.try_read_spacing_and_newlines(reader);
        }

        // JSDoc style optional name "[name]" or "[name=default]"
        if reader.peek_token_kind() == TokenKind::LeftSquareBracket {
            reader.read_token();
            excerpts.unsupported_jsdoc_optional_name_open_bracket =
                Some(reader.extract_accumulated_sequence());
        }

        let mut parameter_name = String::new();
        while matches!(
            reader.peek_token_kind(),
            TokenKind::AsciiWord | TokenKind::Period | TokenKind::DollarSign
        ) {
            parameter_name.push_str(reader.read_token().text());
        }

        if let Some(explanation) = explain_if_invalid_parameter_name(&parameter_name) {
            reader.backtrack_to_marker(start_marker);
            let message = if parameter_name.is_empty() {
                format!("The {} block should be followed by a parameter name", tag_name)
            } else {
                format!(
                    "The {} block should be followed by a valid parameter name: {}",
                    tag_name, explanation
                )
            };
            self.log_message(TSDocMessageId::ParamTagWithInvalidName, message, tag_location);
            return DocParamBlock::new(block_tag, "");
        }

        excerpts.parameter_name = Some(reader.extract_accumulated_sequence());

        if let Some(open_bracket) = excerpts.unsupported_jsdoc_optional_name_open_bracket {
            excerpts.unsupported_jsdoc_optional_name_rest =
                self.try_parse_jsdoc_optional_name_rest(reader);
            let location = match excerpts.unsupported_jsdoc_optional_name_rest {
                Some(rest) => open_bracket.get_new_sequence(open_bracket.start_index(), rest.end_index()),
                None => open_bracket,
            };
            self.log_message(
                TSDocMessageId::ParamTagWithInvalidOptionalName,
                format!(
                    "The {} should not include a JSDoc-style optional name; it must not be enclosed in '[ ]' brackets.",
                    tag_name
                ),
                location,
            );
        }

        excerpts.spacing_after_parameter_name = self.try_read_spacing_and_newlines(reader);

        // JSDoc style "@param name {type}"
        excerpts.unsupported_jsdoc_type_after_parameter_name =
            self.try_parse_unsupported_jsdoc_type(reader, tag_name);
        if excerpts.unsupported_jsdoc_type_after_parameter_name.is_some() {
            excerpts.spacing_after_jsdoc_type_after_parameter_name =
                self.try_read_spacing_and_newlines(reader);
        }

        if reader.peek_token_kind() != TokenKind::Hyphen {
            reader.backtrack_to_marker(start_marker);
            self.log_message(
                TSDocMessageId::ParamTagMissingHyphen,
                format!(
                    "The {} block should be followed by a parameter name and then a hyphen",
                    tag_name
                ),
                tag_location,
            );
            return DocParamBlock::new(block_tag, "");
        }

        reader.read_token();
        excerpts.hyphen = Some(reader.extract_accumulated_sequence());
        excerpts.spacing_after_hyphen = self.try_read_spacing_and_newlines(reader);

        DocParamBlock::parsed(block_tag, parameter_name, excerpts)
    }

    /// Skips a balanced `{...}` and reports it. `{@` starts an inline tag
    /// instead and is left alone.
    fn try_parse_unsupported_jsdoc_type(
        &mut self,
        reader: &mut TokenReader<'a>,
        tag_name: &str,
    ) -> Option<TokenSequence<'a>> {
        reader.assert_accumulated_sequence_is_empty();

        if reader.peek_token_kind() != TokenKind::LeftCurlyBracket
            || reader.peek_token_after_kind() == TokenKind::AtSign
        {
            return None;
        }

        let start_marker = reader.create_marker();
        reader.read_token();

        let mut curly_brace_level = 1;
        while curly_brace_level > 0 {
            match reader.peek_token_kind() {
                TokenKind::LeftCurlyBracket => curly_brace_level += 1,
                TokenKind::RightCurlyBracket => curly_brace_level -= 1,
                TokenKind::Backslash => {
                    // Skip the backslash so the escaped token is read below.
                    reader.read_token();
                    if matches!(
                        reader.peek_token_kind(),
                        TokenKind::Newline | TokenKind::EndOfInput
                    ) {
                        reader.backtrack_to_marker(start_marker);
                        return None;
                    }
                }
                TokenKind::Newline | TokenKind::EndOfInput => {
                    reader.backtrack_to_marker(start_marker);
                    return None;
                }
                _ => {}
            }
            reader.read_token();
        }

        let jsdoc_type = reader.try_extract_accumulated_sequence()?;
        self.log_message(
            TSDocMessageId::ParamTagWithInvalidType,
            format!("The {} block should not include a JSDoc-style '{{type}}'", tag_name),
            jsdoc_type,
        );
        Some(jsdoc_type)
    }

    /// Reads through the `]` of a JSDoc optional name, or nothing if there is none.
    fn try_parse_jsdoc_optional_name_rest(
        &mut self,
        reader: &mut TokenReader<'a>,
    ) -> Option<TokenSequence<'a>> {
        reader.assert_accumulated_sequence_is_empty();
        let marker = reader.create_marker();
        while reader.peek_token_kind() != TokenKind::EndOfInput {
            if reader.peek_token_kind() == TokenKind::RightSquareBracket {
                reader.read_token();
                return Some(reader.extract_accumulated_sequence());
            }
            reader.read_token();
        }
        reader.backtrack_to_marker(marker);
        None
    }
}
