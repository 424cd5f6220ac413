//! Excerpts: the link from a syntax node back to the tokens it was parsed from.

use std::cell::OnceCell;
use std::fmt;

use tsdoc_scanner::TokenSequence;

/// What role an excerpt plays inside its parent node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ExcerptKind {
    Spacing,

    BlockTag,

    CodeSpanOpeningDelimiter,
    CodeSpanCode,
    CodeSpanClosingDelimiter,

    DeclarationReferencePackageName,
    DeclarationReferenceImportPath,
    DeclarationReferenceImportHash,

    /// Unparsed input that was reported with an error.
    ErrorText,
    /// Input the parser accepted but that has no standard meaning,
    /// such as a JSDoc `{type}` in a `@param` block.
    NonstandardText,
    EscapedText,

    FencedCodeOpeningFence,
    FencedCodeLanguage,
    FencedCodeCode,
    FencedCodeClosingFence,

    HtmlAttributeName,
    HtmlAttributeEquals,
    HtmlAttributeValue,

    HtmlEndTagOpeningDelimiter,
    HtmlEndTagName,
    HtmlEndTagClosingDelimiter,

    HtmlStartTagOpeningDelimiter,
    HtmlStartTagName,
    HtmlStartTagClosingDelimiter,

    InlineTagOpeningDelimiter,
    InlineTagTagName,
    InlineTagTagContent,
    InlineTagClosingDelimiter,

    LinkTagUrlDestination,
    LinkTagPipe,
    LinkTagLinkText,

    MemberIdentifierLeftQuote,
    MemberIdentifierIdentifier,
    MemberIdentifierRightQuote,

    MemberReferenceDot,
    MemberReferenceLeftParenthesis,
    MemberReferenceColon,
    MemberReferenceRightParenthesis,

    MemberSelector,

    MemberSymbolLeftBracket,
    MemberSymbolRightBracket,

    ParamBlockParameterName,
    ParamBlockHyphen,

    PlainText,
    SoftBreak,
}

/// A leaf recording exactly which tokens produced part of a parsed node.
///
/// Concatenating the excerpts of a parsed tree in child order reproduces the
/// comment body.
#[derive(Clone, Copy, Debug)]
pub struct DocExcerpt<'a> {
    pub excerpt_kind: ExcerptKind,
    pub content: TokenSequence<'a>,
}

impl<'a> DocExcerpt<'a> {
    pub fn new(excerpt_kind: ExcerptKind, content: TokenSequence<'a>) -> Self {
        Self {
            excerpt_kind,
            content,
        }
    }

    /// `None` when `content` is absent or empty.
    pub fn maybe(excerpt_kind: ExcerptKind, content: Option<TokenSequence<'a>>) -> Option<Self> {
        content
            .filter(|sequence| !sequence.is_empty())
            .map(|sequence| Self::new(excerpt_kind, sequence))
    }

    /// The source text of this excerpt.
    pub fn text(&self) -> String {
        self.content.to_string()
    }
}

#[derive(Clone)]
enum NodeTextSource<'a> {
    Raw(String),
    Parsed(DocExcerpt<'a>),
}

/// A string field of a node.
///
/// Built nodes hold the string directly. Parsed nodes hold the excerpt and
/// materialize the string the first time it is requested.
#[derive(Clone)]
pub struct NodeText<'a> {
    source: NodeTextSource<'a>,
    materialized: OnceCell<String>,
}

impl<'a> NodeText<'a> {
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            source: NodeTextSource::Raw(text.into()),
            materialized: OnceCell::new(),
        }
    }

    pub fn parsed(excerpt_kind: ExcerptKind, content: TokenSequence<'a>) -> Self {
        Self {
            source: NodeTextSource::Parsed(DocExcerpt::new(excerpt_kind, content)),
            materialized: OnceCell::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.source {
            NodeTextSource::Raw(text) => text,
            NodeTextSource::Parsed(excerpt) => {
                self.materialized.get_or_init(|| excerpt.content.to_string())
            }
        }
    }

    /// The backing excerpt, for parsed nodes.
    pub fn excerpt(&self) -> Option<&DocExcerpt<'a>> {
        match &self.source {
            NodeTextSource::Raw(_) => None,
            NodeTextSource::Parsed(excerpt) => Some(excerpt),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for NodeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for NodeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for NodeText<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for NodeText<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
