//! The closed vocabulary of parser message identifiers.

use std::fmt;

macro_rules! message_ids {
    ($($(#[$meta:meta])* $variant:ident => $id:literal,)*) => {
        /// Stable identifiers for every message the parser can report.
        ///
        /// The string form (`tsdoc-*`) is what tools use to suppress or
        /// filter individual messages.
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub enum TSDocMessageId {
            $($(#[$meta])* $variant,)*
        }

        impl TSDocMessageId {
            /// Every identifier, in declaration order.
            pub const ALL: &'static [TSDocMessageId] = &[$(TSDocMessageId::$variant,)*];

            /// The `tsdoc-*` string for this identifier.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(TSDocMessageId::$variant => $id,)*
                }
            }

            /// Look up an identifier from its `tsdoc-*` string.
            pub fn from_str_id(id: &str) -> Option<TSDocMessageId> {
                match id {
                    $($id => Some(TSDocMessageId::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

message_ids! {
    // ========================================================================
    // Comment framing
    // ========================================================================
    /// No `/**` comment was found in the input.
    CommentNotFound => "tsdoc-comment-not-found",
    /// The input starts with something other than `/**`.
    CommentMissingOpeningDelimiter => "tsdoc-comment-missing-opening-delimiter",
    /// The input ended before `*/`.
    CommentMissingClosingDelimiter => "tsdoc-comment-missing-closing-delimiter",

    // ========================================================================
    // Structure
    // ========================================================================
    ExtraInheritDocTag => "tsdoc-extra-inheritdoc-tag",
    EscapeRightBrace => "tsdoc-escape-right-brace",
    EscapeGreaterThan => "tsdoc-escape-greater-than",
    MissingDeprecationMessage => "tsdoc-missing-deprecation-message",
    InheritDocIncompatibleTag => "tsdoc-inheritdoc-incompatible-tag",
    InheritDocIncompatibleSummary => "tsdoc-inheritdoc-incompatible-summary",

    // ========================================================================
    // Tag definitions
    // ========================================================================
    InlineTagMissingBraces => "tsdoc-inline-tag-missing-braces",
    TagShouldNotHaveBraces => "tsdoc-tag-should-not-have-braces",
    UnsupportedTag => "tsdoc-unsupported-tag",
    UndefinedTag => "tsdoc-undefined-tag",

    // ========================================================================
    // @param and @typeParam
    // ========================================================================
    ParamTagWithInvalidType => "tsdoc-param-tag-with-invalid-type",
    ParamTagWithInvalidOptionalName => "tsdoc-param-tag-with-invalid-optional-name",
    ParamTagWithInvalidName => "tsdoc-param-tag-with-invalid-name",
    ParamTagMissingHyphen => "tsdoc-param-tag-missing-hyphen",

    // ========================================================================
    // Escapes and tags
    // ========================================================================
    UnnecessaryBackslash => "tsdoc-unnecessary-backslash",
    MissingTag => "tsdoc-missing-tag",
    AtSignInWord => "tsdoc-at-sign-in-word",
    AtSignWithoutTagName => "tsdoc-at-sign-without-tag-name",
    MalformedInlineTag => "tsdoc-malformed-inline-tag",
    CharactersAfterBlockTag => "tsdoc-characters-after-block-tag",
    MalformedTagName => "tsdoc-malformed-tag-name",
    CharactersAfterInlineTag => "tsdoc-characters-after-inline-tag",
    InlineTagMissingRightBrace => "tsdoc-inline-tag-missing-right-brace",
    InlineTagUnescapedBrace => "tsdoc-inline-tag-unescaped-brace",
    InheritDocTagSyntax => "tsdoc-inheritdoc-tag-syntax",

    // ========================================================================
    // {@link}
    // ========================================================================
    LinkTagEmpty => "tsdoc-link-tag-empty",
    LinkTagUnescapedText => "tsdoc-link-tag-unescaped-text",
    LinkTagDestinationSyntax => "tsdoc-link-tag-destination-syntax",
    LinkTagInvalidUrl => "tsdoc-link-tag-invalid-url",

    // ========================================================================
    // Declaration references
    // ========================================================================
    ReferenceMissingHash => "tsdoc-reference-missing-hash",
    ReferenceHashSyntax => "tsdoc-reference-hash-syntax",
    ReferenceMalformedPackageName => "tsdoc-reference-malformed-package-name",
    ReferenceMalformedImportPath => "tsdoc-reference-malformed-import-path",
    MissingReference => "tsdoc-missing-reference",
    ReferenceMissingDot => "tsdoc-reference-missing-dot",
    ReferenceMissingColon => "tsdoc-reference-missing-colon",
    ReferenceMissingRightParen => "tsdoc-reference-missing-right-paren",
    ReferenceSymbolSyntax => "tsdoc-reference-symbol-syntax",
    ReferenceMissingRightBracket => "tsdoc-reference-missing-right-bracket",
    ReferenceMissingQuote => "tsdoc-reference-missing-quote",
    ReferenceEmptyIdentifier => "tsdoc-reference-empty-identifier",
    ReferenceMissingIdentifier => "tsdoc-reference-missing-identifier",
    ReferenceUnquotedIdentifier => "tsdoc-reference-unquoted-identifier",
    ReferenceMissingLabel => "tsdoc-reference-missing-label",
    ReferenceSelectorSyntax => "tsdoc-reference-selector-syntax",

    // ========================================================================
    // HTML
    // ========================================================================
    HtmlTagMissingGreaterThan => "tsdoc-html-tag-missing-greater-than",
    HtmlTagMissingEquals => "tsdoc-html-tag-missing-equals",
    HtmlTagMissingString => "tsdoc-html-tag-missing-string",
    HtmlStringMissingQuote => "tsdoc-html-string-missing-quote",
    TextAfterHtmlString => "tsdoc-text-after-html-string",
    MissingHtmlEndTag => "tsdoc-missing-html-end-tag",
    MalformedHtmlName => "tsdoc-malformed-html-name",
    UnsupportedHtmlElementName => "tsdoc-unsupported-html-element-name",

    // ========================================================================
    // Code
    // ========================================================================
    CodeFenceOpeningIndent => "tsdoc-code-fence-opening-indent",
    CodeFenceSpecifierSyntax => "tsdoc-code-fence-specifier-syntax",
    CodeFenceClosingIndent => "tsdoc-code-fence-closing-indent",
    CodeFenceMissingDelimiter => "tsdoc-code-fence-missing-delimiter",
    CodeFenceClosingSyntax => "tsdoc-code-fence-closing-syntax",
    CodeSpanEmpty => "tsdoc-code-span-empty",
    CodeSpanMissingDelimiter => "tsdoc-code-span-missing-delimiter",
}

impl fmt::Display for TSDocMessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
