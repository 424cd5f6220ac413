//! HTML tags embedded in doc comments.

use tsdoc_scanner::TokenSequence;

use crate::excerpt::{DocExcerpt, ExcerptKind, NodeText};

fn spacing<'a>(sequence: Option<TokenSequence<'a>>) -> Option<NodeText<'a>> {
    sequence
        .filter(|s| !s.is_empty())
        .map(|s| NodeText::parsed(ExcerptKind::Spacing, s))
}

fn raw_spacing<'a>(text: Option<String>) -> Option<NodeText<'a>> {
    text.map(NodeText::raw)
}

/// `name="value"` inside an HTML start tag.
#[derive(Debug, Clone)]
pub struct DocHtmlAttribute<'a> {
    name: NodeText<'a>,
    spacing_after_name: Option<NodeText<'a>>,
    equals: Option<DocExcerpt<'a>>,
    spacing_after_equals: Option<NodeText<'a>>,
    value: NodeText<'a>,
    spacing_after_value: Option<NodeText<'a>>,
}

impl<'a> DocHtmlAttribute<'a> {
    /// `value` must include its quotes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: NodeText::raw(name),
            spacing_after_name: None,
            equals: None,
            spacing_after_equals: None,
            value: NodeText::raw(value),
            spacing_after_value: None,
        }
    }

    /// Builder variant with explicit whitespace around `=` and after the value.
    pub fn with_spacing(
        name: impl Into<String>,
        spacing_after_name: Option<String>,
        spacing_after_equals: Option<String>,
        value: impl Into<String>,
        spacing_after_value: Option<String>,
    ) -> Self {
        Self {
            name: NodeText::raw(name),
            spacing_after_name: raw_spacing(spacing_after_name),
            equals: None,
            spacing_after_equals: raw_spacing(spacing_after_equals),
            value: NodeText::raw(value),
            spacing_after_value: raw_spacing(spacing_after_value),
        }
    }

    pub fn parsed(
        name: TokenSequence<'a>,
        spacing_after_name: Option<TokenSequence<'a>>,
        equals: TokenSequence<'a>,
        spacing_after_equals: Option<TokenSequence<'a>>,
        value: TokenSequence<'a>,
        spacing_after_value: Option<TokenSequence<'a>>,
    ) -> Self {
        Self {
            name: NodeText::parsed(ExcerptKind::HtmlAttributeName, name),
            spacing_after_name: spacing(spacing_after_name),
            equals: Some(DocExcerpt::new(ExcerptKind::HtmlAttributeEquals, equals)),
            spacing_after_equals: spacing(spacing_after_equals),
            value: NodeText::parsed(ExcerptKind::HtmlAttributeValue, value),
            spacing_after_value: spacing(spacing_after_value),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The value including its quotation marks.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn spacing_after_name(&self) -> Option<&str> {
        self.spacing_after_name.as_ref().map(NodeText::as_str)
    }

    pub fn spacing_after_equals(&self) -> Option<&str> {
        self.spacing_after_equals.as_ref().map(NodeText::as_str)
    }

    pub fn spacing_after_value(&self) -> Option<&str> {
        self.spacing_after_value.as_ref().map(NodeText::as_str)
    }

    pub(crate) fn excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.name.excerpt(),
            self.spacing_after_name.as_ref().and_then(NodeText::excerpt),
            self.equals.as_ref(),
            self.spacing_after_equals.as_ref().and_then(NodeText::excerpt),
            self.value.excerpt(),
            self.spacing_after_value.as_ref().and_then(NodeText::excerpt),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// `<name attr="value">` or `<name />`.
#[derive(Debug, Clone)]
pub struct DocHtmlStartTag<'a> {
    opening_delimiter: Option<DocExcerpt<'a>>,
    name: NodeText<'a>,
    spacing_after_name: Option<NodeText<'a>>,
    html_attributes: Vec<DocHtmlAttribute<'a>>,
    self_closing_tag: bool,
    closing_delimiter: Option<DocExcerpt<'a>>,
}

impl<'a> DocHtmlStartTag<'a> {
    pub fn new(
        name: impl Into<String>,
        spacing_after_name: Option<String>,
        html_attributes: Vec<DocHtmlAttribute<'a>>,
        self_closing_tag: bool,
    ) -> Self {
        Self {
            opening_delimiter: None,
            name: NodeText::raw(name),
            spacing_after_name: raw_spacing(spacing_after_name),
            html_attributes,
            self_closing_tag,
            closing_delimiter: None,
        }
    }

    pub fn parsed(
        opening_delimiter: TokenSequence<'a>,
        name: TokenSequence<'a>,
        spacing_after_name: Option<TokenSequence<'a>>,
        html_attributes: Vec<DocHtmlAttribute<'a>>,
        self_closing_tag: bool,
        closing_delimiter: TokenSequence<'a>,
    ) -> Self {
        Self {
            opening_delimiter: Some(DocExcerpt::new(
                ExcerptKind::HtmlStartTagOpeningDelimiter,
                opening_delimiter,
            )),
            name: NodeText::parsed(ExcerptKind::HtmlStartTagName, name),
            spacing_after_name: spacing(spacing_after_name),
            html_attributes,
            self_closing_tag,
            closing_delimiter: Some(DocExcerpt::new(
                ExcerptKind::HtmlStartTagClosingDelimiter,
                closing_delimiter,
            )),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn spacing_after_name(&self) -> Option<&str> {
        self.spacing_after_name.as_ref().map(NodeText::as_str)
    }

    pub fn html_attributes(&self) -> &[DocHtmlAttribute<'a>] {
        &self.html_attributes
    }

    /// True for `<br/>` style tags.
    pub fn self_closing_tag(&self) -> bool {
        self.self_closing_tag
    }

    pub(crate) fn leading_excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.opening_delimiter.as_ref(),
            self.name.excerpt(),
            self.spacing_after_name.as_ref().and_then(NodeText::excerpt),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub(crate) fn closing_delimiter(&self) -> Option<&DocExcerpt<'a>> {
        self.closing_delimiter.as_ref()
    }
}

/// `</name>`.
#[derive(Debug, Clone)]
pub struct DocHtmlEndTag<'a> {
    opening_delimiter: Option<DocExcerpt<'a>>,
    name: NodeText<'a>,
    spacing_after_name: Option<NodeText<'a>>,
    closing_delimiter: Option<DocExcerpt<'a>>,
}

impl<'a> DocHtmlEndTag<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            opening_delimiter: None,
            name: NodeText::raw(name),
            spacing_after_name: None,
            closing_delimiter: None,
        }
    }

    pub fn parsed(
        opening_delimiter: TokenSequence<'a>,
        name: TokenSequence<'a>,
        spacing_after_name: Option<TokenSequence<'a>>,
        closing_delimiter: TokenSequence<'a>,
    ) -> Self {
        Self {
            opening_delimiter: Some(DocExcerpt::new(
                ExcerptKind::HtmlEndTagOpeningDelimiter,
                opening_delimiter,
            )),
            name: NodeText::parsed(ExcerptKind::HtmlEndTagName, name),
            spacing_after_name: spacing(spacing_after_name),
            closing_delimiter: Some(DocExcerpt::new(
                ExcerptKind::HtmlEndTagClosingDelimiter,
                closing_delimiter,
            )),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        [
            self.opening_delimiter.as_ref(),
            self.name.excerpt(),
            self.spacing_after_name.as_ref().and_then(NodeText::excerpt),
            self.closing_delimiter.as_ref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
