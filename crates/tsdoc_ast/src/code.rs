//! Code spans and fenced code blocks.

use tsdoc_scanner::TokenSequence;

use crate::excerpt::{DocExcerpt, ExcerptKind, NodeText};

/// Inline code delimited by single backticks.
#[derive(Debug, Clone)]
pub struct DocCodeSpan<'a> {
    opening_delimiter: Option<DocExcerpt<'a>>,
    code: NodeText<'a>,
    closing_delimiter: Option<DocExcerpt<'a>>,
}

impl<'a> DocCodeSpan<'a> {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            opening_delimiter: None,
            code: NodeText::raw(code),
            closing_delimiter: None,
        }
    }

    pub fn parsed(
        opening_delimiter: TokenSequence<'a>,
        code: TokenSequence<'a>,
        closing_delimiter: TokenSequence<'a>,
    ) -> Self {
        Self {
            opening_delimiter: Some(DocExcerpt::new(
                ExcerptKind::CodeSpanOpeningDelimiter,
                opening_delimiter,
            )),
            code: NodeText::parsed(ExcerptKind::CodeSpanCode, code),
            closing_delimiter: Some(DocExcerpt::new(
                ExcerptKind::CodeSpanClosingDelimiter,
                closing_delimiter,
            )),
        }
    }

    /// The code between the backticks, without the delimiters.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    pub(crate) fn excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.opening_delimiter.as_ref(),
            self.code.excerpt(),
            self.closing_delimiter.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Token sequences captured while parsing a fenced code block.
///
/// Empty spacing sequences are dropped when the node is built.
#[derive(Debug, Clone, Copy)]
pub struct FencedCodeExcerpts<'a> {
    pub opening_fence: TokenSequence<'a>,
    pub spacing_after_opening_fence: Option<TokenSequence<'a>>,
    pub language: TokenSequence<'a>,
    pub spacing_after_language: Option<TokenSequence<'a>>,
    pub code: TokenSequence<'a>,
    pub spacing_before_closing_fence: Option<TokenSequence<'a>>,
    pub closing_fence: TokenSequence<'a>,
    pub spacing_after_closing_fence: Option<TokenSequence<'a>>,
}

/// A CommonMark code fence: three backticks, an optional language, the code,
/// and a closing three backticks on their own line.
#[derive(Debug, Clone)]
pub struct DocFencedCode<'a> {
    opening_fence: Option<DocExcerpt<'a>>,
    spacing_after_opening_fence: Option<DocExcerpt<'a>>,
    language: NodeText<'a>,
    spacing_after_language: Option<DocExcerpt<'a>>,
    code: NodeText<'a>,
    spacing_before_closing_fence: Option<DocExcerpt<'a>>,
    closing_fence: Option<DocExcerpt<'a>>,
    spacing_after_closing_fence: Option<DocExcerpt<'a>>,
}

impl<'a> DocFencedCode<'a> {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            opening_fence: None,
            spacing_after_opening_fence: None,
            language: NodeText::raw(language),
            spacing_after_language: None,
            code: NodeText::raw(code),
            spacing_before_closing_fence: None,
            closing_fence: None,
            spacing_after_closing_fence: None,
        }
    }

    pub fn parsed(excerpts: FencedCodeExcerpts<'a>) -> Self {
        Self {
            opening_fence: Some(DocExcerpt::new(
                ExcerptKind::FencedCodeOpeningFence,
                excerpts.opening_fence,
            )),
            spacing_after_opening_fence: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                excerpts.spacing_after_opening_fence,
            ),
            language: NodeText::parsed(ExcerptKind::FencedCodeLanguage, excerpts.language),
            spacing_after_language: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                excerpts.spacing_after_language,
            ),
            code: NodeText::parsed(ExcerptKind::FencedCodeCode, excerpts.code),
            spacing_before_closing_fence: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                excerpts.spacing_before_closing_fence,
            ),
            closing_fence: Some(DocExcerpt::new(
                ExcerptKind::FencedCodeClosingFence,
                excerpts.closing_fence,
            )),
            spacing_after_closing_fence: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                excerpts.spacing_after_closing_fence,
            ),
        }
    }

    /// The language specifier, e.g. `ts`. Empty when omitted.
    pub fn language(&self) -> &str {
        self.language.as_str()
    }

    /// The code body. Includes the final newline before the closing fence.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    pub(crate) fn excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.opening_fence.as_ref(),
            self.spacing_after_opening_fence.as_ref(),
            self.language.excerpt(),
            self.spacing_after_language.as_ref(),
            self.code.excerpt(),
            self.spacing_before_closing_fence.as_ref(),
            self.closing_fence.as_ref(),
            self.spacing_after_closing_fence.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
