//! Block tags and inline tags.

use tsdoc_core::string_checks;
use tsdoc_scanner::TokenSequence;

use crate::excerpt::{DocExcerpt, ExcerptKind, NodeText};
use crate::reference::DocDeclarationReference;

fn validate_tag_name(tag_name: &str) {
    if let Some(explanation) = string_checks::explain_if_invalid_tsdoc_tag_name(tag_name) {
        panic!("{}: {:?}", explanation, tag_name);
    }
}

// ============================================================================
// Block tags
// ============================================================================

/// A tag such as `@remarks` that starts a block or acts as a modifier.
#[derive(Debug, Clone)]
pub struct DocBlockTag<'a> {
    tag_name: NodeText<'a>,
    tag_name_with_upper_case: String,
}

impl<'a> DocBlockTag<'a> {
    /// Panics if `tag_name` is not a well-formed tag name.
    pub fn new(tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        validate_tag_name(&tag_name);
        Self {
            tag_name_with_upper_case: tag_name.to_uppercase(),
            tag_name: NodeText::raw(tag_name),
        }
    }

    pub fn parsed(tag_name_excerpt: TokenSequence<'a>) -> Self {
        let tag_name = NodeText::parsed(ExcerptKind::BlockTag, tag_name_excerpt);
        Self {
            tag_name_with_upper_case: tag_name.as_str().to_uppercase(),
            tag_name,
        }
    }

    /// The tag name including the `@`, e.g. `@remarks`.
    pub fn tag_name(&self) -> &str {
        self.tag_name.as_str()
    }

    /// Tag names are case-insensitive; compare on this form.
    pub fn tag_name_with_upper_case(&self) -> &str {
        &self.tag_name_with_upper_case
    }

    pub fn tag_name_excerpt(&self) -> Option<&DocExcerpt<'a>> {
        self.tag_name.excerpt()
    }
}

// ============================================================================
// Inline tags
// ============================================================================

/// The parts every inline tag shares: `{`, the tag name, spacing, and `}`.
#[derive(Debug, Clone)]
pub struct InlineTagParts<'a> {
    tag_name: String,
    tag_name_with_upper_case: String,
    opening_delimiter: Option<DocExcerpt<'a>>,
    tag_name_excerpt: Option<DocExcerpt<'a>>,
    spacing_after_tag_name: Option<DocExcerpt<'a>>,
    closing_delimiter: Option<DocExcerpt<'a>>,
}

impl<'a> InlineTagParts<'a> {
    /// Panics if `tag_name` is not a well-formed tag name.
    pub fn new(tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        validate_tag_name(&tag_name);
        Self {
            tag_name_with_upper_case: tag_name.to_uppercase(),
            tag_name,
            opening_delimiter: None,
            tag_name_excerpt: None,
            spacing_after_tag_name: None,
            closing_delimiter: None,
        }
    }

    pub fn parsed(
        tag_name: impl Into<String>,
        opening_delimiter: TokenSequence<'a>,
        tag_name_excerpt: TokenSequence<'a>,
        spacing_after_tag_name: Option<TokenSequence<'a>>,
        closing_delimiter: TokenSequence<'a>,
    ) -> Self {
        let tag_name = tag_name.into();
        Self {
            tag_name_with_upper_case: tag_name.to_uppercase(),
            tag_name,
            opening_delimiter: Some(DocExcerpt::new(
                ExcerptKind::InlineTagOpeningDelimiter,
                opening_delimiter,
            )),
            tag_name_excerpt: Some(DocExcerpt::new(
                ExcerptKind::InlineTagTagName,
                tag_name_excerpt,
            )),
            spacing_after_tag_name: DocExcerpt::maybe(ExcerptKind::Spacing, spacing_after_tag_name),
            closing_delimiter: Some(DocExcerpt::new(
                ExcerptKind::InlineTagClosingDelimiter,
                closing_delimiter,
            )),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn tag_name_with_upper_case(&self) -> &str {
        &self.tag_name_with_upper_case
    }

    pub(crate) fn leading_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.opening_delimiter.as_ref(),
            self.tag_name_excerpt.as_ref(),
            self.spacing_after_tag_name.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub(crate) fn closing_delimiter(&self) -> Option<&DocExcerpt<'a>> {
        self.closing_delimiter.as_ref()
    }
}

/// An inline tag with no special syntax, e.g. `{@label MY_LABEL}`.
#[derive(Debug, Clone)]
pub struct DocInlineTag<'a> {
    parts: InlineTagParts<'a>,
    tag_content: Option<NodeText<'a>>,
}

impl<'a> DocInlineTag<'a> {
    pub fn new(tag_name: impl Into<String>, tag_content: impl Into<String>) -> Self {
        Self {
            parts: InlineTagParts::new(tag_name),
            tag_content: Some(NodeText::raw(tag_content)),
        }
    }

    pub fn parsed(parts: InlineTagParts<'a>, tag_content: Option<TokenSequence<'a>>) -> Self {
        Self {
            parts,
            tag_content: tag_content
                .filter(|s| !s.is_empty())
                .map(|s| NodeText::parsed(ExcerptKind::InlineTagTagContent, s)),
        }
    }

    pub fn parts(&self) -> &InlineTagParts<'a> {
        &self.parts
    }

    pub fn tag_name(&self) -> &str {
        self.parts.tag_name()
    }

    pub fn tag_name_with_upper_case(&self) -> &str {
        self.parts.tag_name_with_upper_case()
    }

    /// Everything between the tag name spacing and the closing `}`.
    pub fn tag_content(&self) -> &str {
        self.tag_content.as_ref().map_or("", NodeText::as_str)
    }

    pub(crate) fn excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        let mut excerpts = self.parts.leading_excerpts();
        excerpts.extend(self.tag_content.as_ref().and_then(NodeText::excerpt));
        excerpts.extend(self.parts.closing_delimiter());
        excerpts
    }
}

/// Token sequences captured while parsing the body of a `{@link}` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTagExcerpts<'a> {
    pub url_destination: Option<TokenSequence<'a>>,
    pub spacing_after_destination: Option<TokenSequence<'a>>,
    pub pipe: Option<TokenSequence<'a>>,
    pub spacing_after_pipe: Option<TokenSequence<'a>>,
    pub link_text: Option<TokenSequence<'a>>,
    pub spacing_after_link_text: Option<TokenSequence<'a>>,
}

/// `{@link destination | text}`, where the destination is either a
/// declaration reference or a URL.
#[derive(Debug, Clone)]
pub struct DocLinkTag<'a> {
    parts: InlineTagParts<'a>,
    code_destination: Option<DocDeclarationReference<'a>>,
    url_destination: Option<NodeText<'a>>,
    spacing_after_destination: Option<DocExcerpt<'a>>,
    pipe: Option<DocExcerpt<'a>>,
    spacing_after_pipe: Option<DocExcerpt<'a>>,
    link_text: Option<NodeText<'a>>,
    spacing_after_link_text: Option<DocExcerpt<'a>>,
}

impl<'a> DocLinkTag<'a> {
    /// Panics if both destinations are given.
    pub fn new(
        code_destination: Option<DocDeclarationReference<'a>>,
        url_destination: Option<String>,
        link_text: Option<String>,
    ) -> Self {
        assert!(
            code_destination.is_none() || url_destination.is_none(),
            "Either the codeDestination or the urlDestination may be specified, but not both"
        );
        Self {
            parts: InlineTagParts::new("@link"),
            code_destination,
            url_destination: url_destination.map(NodeText::raw),
            spacing_after_destination: None,
            pipe: None,
            spacing_after_pipe: None,
            link_text: link_text.map(NodeText::raw),
            spacing_after_link_text: None,
        }
    }

    pub fn parsed(
        parts: InlineTagParts<'a>,
        code_destination: Option<DocDeclarationReference<'a>>,
        excerpts: LinkTagExcerpts<'a>,
    ) -> Self {
        Self {
            parts,
            code_destination,
            url_destination: excerpts
                .url_destination
                .map(|s| NodeText::parsed(ExcerptKind::LinkTagUrlDestination, s)),
            spacing_after_destination: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                excerpts.spacing_after_destination,
            ),
            pipe: DocExcerpt::maybe(ExcerptKind::LinkTagPipe, excerpts.pipe),
            spacing_after_pipe: DocExcerpt::maybe(ExcerptKind::Spacing, excerpts.spacing_after_pipe),
            link_text: excerpts
                .link_text
                .map(|s| NodeText::parsed(ExcerptKind::LinkTagLinkText, s)),
            spacing_after_link_text: DocExcerpt::maybe(
                ExcerptKind::Spacing,
                excerpts.spacing_after_link_text,
            ),
        }
    }

    pub fn parts(&self) -> &InlineTagParts<'a> {
        &self.parts
    }

    pub fn tag_name(&self) -> &str {
        self.parts.tag_name()
    }

    pub fn code_destination(&self) -> Option<&DocDeclarationReference<'a>> {
        self.code_destination.as_ref()
    }

    pub fn url_destination(&self) -> Option<&str> {
        self.url_destination.as_ref().map(NodeText::as_str)
    }

    /// The text after `|`, if a pipe was present.
    pub fn link_text(&self) -> Option<&str> {
        self.link_text.as_ref().map(NodeText::as_str)
    }

    pub(crate) fn leading_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        self.parts.leading_excerpts()
    }

    pub(crate) fn url_excerpt(&self) -> Option<&DocExcerpt<'a>> {
        self.url_destination.as_ref().and_then(NodeText::excerpt)
    }

    pub(crate) fn trailing_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.spacing_after_destination.as_ref(),
            self.pipe.as_ref(),
            self.spacing_after_pipe.as_ref(),
            self.link_text.as_ref().and_then(NodeText::excerpt),
            self.spacing_after_link_text.as_ref(),
            self.parts.closing_delimiter(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// `{@inheritDoc}` with an optional declaration reference.
#[derive(Debug, Clone)]
pub struct DocInheritDocTag<'a> {
    parts: InlineTagParts<'a>,
    declaration_reference: Option<DocDeclarationReference<'a>>,
}

impl<'a> DocInheritDocTag<'a> {
    pub fn new(declaration_reference: Option<DocDeclarationReference<'a>>) -> Self {
        Self {
            parts: InlineTagParts::new("@inheritDoc"),
            declaration_reference,
        }
    }

    /// Panics if `parts` is not named `@inheritDoc`.
    pub fn parsed(
        parts: InlineTagParts<'a>,
        declaration_reference: Option<DocDeclarationReference<'a>>,
    ) -> Self {
        assert_eq!(
            parts.tag_name_with_upper_case(),
            "@INHERITDOC",
            "DocInheritDocTag requires the tag name to be \"{{@inheritDoc}}\""
        );
        Self {
            parts,
            declaration_reference,
        }
    }

    pub fn parts(&self) -> &InlineTagParts<'a> {
        &self.parts
    }

    pub fn tag_name(&self) -> &str {
        self.parts.tag_name()
    }

    pub fn declaration_reference(&self) -> Option<&DocDeclarationReference<'a>> {
        self.declaration_reference.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_upper_case() {
        let tag = DocBlockTag::new("@typeParam");
        assert_eq!(tag.tag_name(), "@typeParam");
        assert_eq!(tag.tag_name_with_upper_case(), "@TYPEPARAM");
    }

    #[test]
    #[should_panic]
    fn test_block_tag_rejects_bad_name() {
        DocBlockTag::new("remarks");
    }

    #[test]
    fn test_built_link_tag() {
        let link = DocLinkTag::new(None, Some("https://example.com".into()), Some("docs".into()));
        assert_eq!(link.url_destination(), Some("https://example.com"));
        assert_eq!(link.link_text(), Some("docs"));
        assert!(link.code_destination().is_none());
    }

    #[test]
    fn test_inline_tag_content_defaults_empty() {
        let tag = DocInlineTag::parsed(InlineTagParts::new("@label"), None);
        assert_eq!(tag.tag_content(), "");
    }
}
