//! Declaration references such as `@scope/pkg/path#Class.(member:static)`.
//!
//! Reference errors are logged but produce no error text; the caller falls
//! back to a generic inline tag.

use tsdoc_ast::{
    DocDeclarationReference, DocMemberIdentifier, DocMemberReference, DocMemberSelector,
    DocMemberSymbol, MemberReferenceExcerpts,
};
use tsdoc_core::string_checks;
use tsdoc_diagnostics::TSDocMessageId;
use tsdoc_scanner::{TokenKind, TokenSequence};

use super::NodeParser;
use crate::token_reader::TokenReader;

/// Symbol references nest through `[...]`; deeper input is rejected.
const MAX_REFERENCE_DEPTH: u32 = 64;

impl<'a, 'c> NodeParser<'a, 'c> {
    /// `location` is where to report a reference that is missing entirely.
    pub(super) fn parse_declaration_reference(
        &mut self,
        reader: &mut TokenReader<'a>,
        location: TokenSequence<'a>,
    ) -> Option<DocDeclarationReference<'a>> {
        reader.assert_accumulated_sequence_is_empty();

        // A package name can contain characters that look like a member
        // reference, so scan ahead for an unquoted "#" first.
        let marker = reader.create_marker();
        let mut has_hash = false;
        // "/" and "@" near the start only make sense in an import path, which
        // usually means the "#" was forgotten.
        let mut looking_for_import_characters = true;
        let mut saw_import_characters = false;
        loop {
            match reader.peek_token_kind() {
                TokenKind::DoubleQuote
                | TokenKind::EndOfInput
                | TokenKind::LeftCurlyBracket
                | TokenKind::LeftParenthesis
                | TokenKind::LeftSquareBracket
                | TokenKind::Newline
                | TokenKind::Pipe
                | TokenKind::RightCurlyBracket
                | TokenKind::RightParenthesis
                | TokenKind::RightSquareBracket
                | TokenKind::SingleQuote
                | TokenKind::Spacing => break,
                TokenKind::PoundSymbol => {
                    has_hash = true;
                    break;
                }
                TokenKind::Slash | TokenKind::AtSign => {
                    if looking_for_import_characters {
                        saw_import_characters = true;
                    }
                    reader.read_token();
                }
                TokenKind::AsciiWord | TokenKind::Period | TokenKind::Hyphen => {
                    reader.read_token();
                }
                _ => {
                    looking_for_import_characters = false;
                    reader.read_token();
                }
            }
        }

        if !has_hash && saw_import_characters {
            let location = reader.extract_accumulated_sequence();
            self.log_message(
                TSDocMessageId::ReferenceMissingHash,
                "The declaration reference appears to contain a package name or import path, but it is missing the \"#\" delimiter",
                location,
            );
            return None;
        }

        reader.backtrack_to_marker(marker);

        let mut package_name = None;
        let mut import_path = None;
        let mut import_hash = None;
        let mut spacing_after_import_hash = None;

        if has_hash {
            // A leading "." or "/" starts a relative import path, not a package name.
            if !matches!(reader.peek_token_kind(), TokenKind::Period | TokenKind::Slash) {
                let scoped_package_name = reader.peek_token_kind() == TokenKind::AtSign;
                let mut finished_scope = false;
                loop {
                    match reader.peek_token_kind() {
                        TokenKind::Slash if scoped_package_name && !finished_scope => {
                            reader.read_token();
                            finished_scope = true;
                        }
                        TokenKind::Slash | TokenKind::PoundSymbol => break,
                        TokenKind::EndOfInput => {
                            panic!("Parser assertion failed: Expecting pound symbol")
                        }
                        _ => {
                            reader.read_token();
                        }
                    }
                }

                if let Some(excerpt) = reader.try_extract_accumulated_sequence() {
                    let text = excerpt.to_string();
                    if let Some(explanation) = string_checks::explain_if_invalid_package_name(&text) {
                        self.log_message(
                            TSDocMessageId::ReferenceMalformedPackageName,
                            explanation,
                            excerpt,
                        );
                        return None;
                    }
                    package_name = Some(excerpt);
                }
            }

            loop {
                match reader.peek_token_kind() {
                    TokenKind::PoundSymbol => break,
                    TokenKind::EndOfInput => {
                        panic!("Parser assertion failed: Expecting pound symbol")
                    }
                    _ => {
                        reader.read_token();
                    }
                }
            }

            if let Some(excerpt) = reader.try_extract_accumulated_sequence() {
                let text = excerpt.to_string();
                if let Some(explanation) =
                    string_checks::explain_if_invalid_import_path(&text, package_name.is_some())
                {
                    self.log_message(
                        TSDocMessageId::ReferenceMalformedImportPath,
                        explanation,
                        excerpt,
                    );
                    return None;
                }
                import_path = Some(excerpt);
            }

            reader.read_token();
            let hash = reader.extract_accumulated_sequence();
            import_hash = Some(hash);
            spacing_after_import_hash = self.try_read_spacing_and_newlines(reader);

            if package_name.is_none() && import_path.is_none() {
                self.log_message(
                    TSDocMessageId::ReferenceHashSyntax,
                    "The hash character must be preceded by a package name or import path",
                    hash,
                );
                return None;
            }
        }

        let mut member_references = Vec::new();
        while matches!(
            reader.peek_token_kind(),
            TokenKind::Period
                | TokenKind::LeftParenthesis
                | TokenKind::AsciiWord
                | TokenKind::Colon
                | TokenKind::LeftSquareBracket
                | TokenKind::DoubleQuote
        ) {
            let expecting_dot = !member_references.is_empty();
            let member_reference = self.parse_member_reference(reader, expecting_dot, location)?;
            member_references.push(member_reference);
        }

        if package_name.is_none() && import_path.is_none() && member_references.is_empty() {
            self.log_message(
                TSDocMessageId::MissingReference,
                "Expecting a declaration reference",
                location,
            );
            return None;
        }

        Some(DocDeclarationReference::parsed(
            package_name,
            import_path,
            import_hash,
            spacing_after_import_hash,
            member_references,
        ))
    }

    fn parse_member_reference(
        &mut self,
        reader: &mut TokenReader<'a>,
        expecting_dot: bool,
        location: TokenSequence<'a>,
    ) -> Option<DocMemberReference<'a>> {
        let mut excerpts = MemberReferenceExcerpts::default();

        if expecting_dot {
            if reader.peek_token_kind() != TokenKind::Period {
                self.log_message(
                    TSDocMessageId::ReferenceMissingDot,
                    "Expecting a period before the next component of a declaration reference",
                    location,
                );
                return None;
            }
            reader.read_token();
            excerpts.dot = Some(reader.extract_accumulated_sequence());
            excerpts.spacing_after_dot = self.try_read_spacing_and_newlines(reader);
        }

        if reader.peek_token_kind() == TokenKind::LeftParenthesis {
            reader.read_token();
            excerpts.left_parenthesis = Some(reader.extract_accumulated_sequence());
            excerpts.spacing_after_left_parenthesis = self.try_read_spacing_and_newlines(reader);
        }

        let mut member_identifier = None;
        let mut member_symbol = None;
        if reader.peek_token_kind() == TokenKind::LeftSquareBracket {
            member_symbol = Some(self.parse_member_symbol(reader)?);
        } else {
            member_identifier = Some(self.parse_member_identifier(reader, location)?);
        }

        excerpts.spacing_after_member = self.try_read_spacing_and_newlines(reader);

        let mut selector = None;
        if reader.peek_token_kind() == TokenKind::Colon {
            reader.read_token();
            let colon = reader.extract_accumulated_sequence();
            excerpts.colon = Some(colon);
            excerpts.spacing_after_colon = self.try_read_spacing_and_newlines(reader);

            // Parentheses around "member:selector" are optional.
            selector = Some(self.parse_member_selector(reader, colon)?);
            excerpts.spacing_after_selector = self.try_read_spacing_and_newlines(reader);
        } else if let Some(left_parenthesis) = excerpts.left_parenthesis {
            self.log_message(
                TSDocMessageId::ReferenceMissingColon,
                "Expecting a colon after the identifier because the expression is in parentheses",
                left_parenthesis,
            );
            return None;
        }

        if let Some(left_parenthesis) = excerpts.left_parenthesis {
            if reader.peek_token_kind() != TokenKind::RightParenthesis {
                self.log_message(
                    TSDocMessageId::ReferenceMissingRightParen,
                    "Expecting a matching right parenthesis",
                    left_parenthesis,
                );
                return None;
            }
            reader.read_token();
            excerpts.right_parenthesis = Some(reader.extract_accumulated_sequence());
            excerpts.spacing_after_right_parenthesis = self.try_read_spacing_and_newlines(reader);
        }

        Some(DocMemberReference::parsed(
            member_identifier,
            member_symbol,
            selector,
            excerpts,
        ))
    }

    fn parse_member_symbol(&mut self, reader: &mut TokenReader<'a>) -> Option<DocMemberSymbol<'a>> {
        assert!(
            reader.peek_token_kind() == TokenKind::LeftSquareBracket,
            "Parser assertion failed: Expecting \"[\""
        );

        reader.read_token();
        let left_bracket = reader.extract_accumulated_sequence();

        if self.reference_depth >= MAX_REFERENCE_DEPTH {
            self.log_message(
                TSDocMessageId::ReferenceSymbolSyntax,
                "The symbol reference is nested too deeply",
                left_bracket,
            );
            return None;
        }

        let spacing_after_left_bracket = self.try_read_spacing_and_newlines(reader);

        self.reference_depth += 1;
        let symbol_reference = self.parse_declaration_reference(reader, left_bracket);
        self.reference_depth -= 1;

        let Some(symbol_reference) = symbol_reference else {
            self.log_message(
                TSDocMessageId::ReferenceSymbolSyntax,
                "Missing declaration reference in symbol reference",
                left_bracket,
            );
            return None;
        };

        if reader.peek_token_kind() != TokenKind::RightSquareBracket {
            self.log_message(
                TSDocMessageId::ReferenceMissingRightBracket,
                "Missing closing square bracket for symbol reference",
                left_bracket,
            );
            return None;
        }
        reader.read_token();
        let right_bracket = reader.extract_accumulated_sequence();

        Some(DocMemberSymbol::parsed(
            left_bracket,
            spacing_after_left_bracket,
            symbol_reference,
            right_bracket,
        ))
    }

    fn parse_member_identifier(
        &mut self,
        reader: &mut TokenReader<'a>,
        location: TokenSequence<'a>,
    ) -> Option<DocMemberIdentifier<'a>> {
        if reader.peek_token_kind() == TokenKind::DoubleQuote {
            reader.read_token();
            let left_quote = reader.extract_accumulated_sequence();

            while reader.peek_token_kind() != TokenKind::DoubleQuote {
                if reader.peek_token_kind() == TokenKind::EndOfInput {
                    self.log_message(
                        TSDocMessageId::ReferenceMissingQuote,
                        "Unexpected end of input inside quoted member identifier",
                        left_quote,
                    );
                    return None;
                }
                reader.read_token();
            }

            let Some(identifier) = reader.try_extract_accumulated_sequence() else {
                self.log_message(
                    TSDocMessageId::ReferenceEmptyIdentifier,
                    "The quoted identifier cannot be empty",
                    left_quote,
                );
                return None;
            };

            reader.read_token();
            let right_quote = reader.extract_accumulated_sequence();
            return Some(DocMemberIdentifier::parsed(
                Some(left_quote),
                identifier,
                Some(right_quote),
            ));
        }

        while matches!(
            reader.peek_token_kind(),
            TokenKind::AsciiWord | TokenKind::DollarSign
        ) {
            reader.read_token();
        }

        let Some(identifier) = reader.try_extract_accumulated_sequence() else {
            self.log_message(
                TSDocMessageId::ReferenceMissingIdentifier,
                "Syntax error in declaration reference: expecting a member identifier",
                location,
            );
            return None;
        };

        let text = identifier.to_string();
        if let Some(explanation) = string_checks::explain_if_invalid_unquoted_member_identifier(&text)
        {
            self.log_message(TSDocMessageId::ReferenceUnquotedIdentifier, explanation, identifier);
            return None;
        }

        Some(DocMemberIdentifier::parsed(None, identifier, None))
    }

    fn parse_member_selector(
        &mut self,
        reader: &mut TokenReader<'a>,
        colon: TokenSequence<'a>,
    ) -> Option<DocMemberSelector<'a>> {
        if reader.peek_token_kind() != TokenKind::AsciiWord {
            self.log_message(
                TSDocMessageId::ReferenceMissingLabel,
                "Expecting a selector label after the colon",
                colon,
            );
            return None;
        }

        reader.read_token();
        let excerpt = reader.extract_accumulated_sequence();
        let selector = DocMemberSelector::parsed(excerpt);

        if let Some(error_message) = selector.error_message() {
            self.log_message(
                TSDocMessageId::ReferenceSelectorSyntax,
                error_message.to_string(),
                excerpt,
            );
            return None;
        }
        Some(selector)
    }
}
