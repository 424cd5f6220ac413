//! Block nodes: a block tag followed by a content section.

use rustc_hash::FxHashMap;
use tsdoc_scanner::TokenSequence;

use crate::container::DocSection;
use crate::excerpt::{DocExcerpt, ExcerptKind};
use crate::inline::DocBlockTag;

/// A section introduced by a block tag, e.g. `@remarks`.
#[derive(Debug, Clone)]
pub struct DocBlock<'a> {
    block_tag: DocBlockTag<'a>,
    content: DocSection<'a>,
}

impl<'a> DocBlock<'a> {
    pub fn new(block_tag: DocBlockTag<'a>) -> Self {
        Self {
            block_tag,
            content: DocSection::new(),
        }
    }

    pub fn block_tag(&self) -> &DocBlockTag<'a> {
        &self.block_tag
    }

    pub fn content(&self) -> &DocSection<'a> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DocSection<'a> {
        &mut self.content
    }
}

/// Tokens captured between a `@param` tag and its description.
///
/// The JSDoc `{type}` and `[name]` forms are recorded as nonstandard text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamBlockExcerpts<'a> {
    pub spacing_before_parameter_name: Option<TokenSequence<'a>>,
    pub unsupported_jsdoc_type_before_parameter_name: Option<TokenSequence<'a>>,
    pub spacing_after_jsdoc_type_before_parameter_name: Option<TokenSequence<'a>>,
    pub unsupported_jsdoc_optional_name_open_bracket: Option<TokenSequence<'a>>,
    pub parameter_name: Option<TokenSequence<'a>>,
    pub unsupported_jsdoc_optional_name_rest: Option<TokenSequence<'a>>,
    pub spacing_after_parameter_name: Option<TokenSequence<'a>>,
    pub unsupported_jsdoc_type_after_parameter_name: Option<TokenSequence<'a>>,
    pub spacing_after_jsdoc_type_after_parameter_name: Option<TokenSequence<'a>>,
    pub hyphen: Option<TokenSequence<'a>>,
    pub spacing_after_hyphen: Option<TokenSequence<'a>>,
}

/// A `@param` or `@typeParam` block.
#[derive(Debug, Clone)]
pub struct DocParamBlock<'a> {
    block_tag: DocBlockTag<'a>,
    content: DocSection<'a>,
    parameter_name: String,
    excerpts: Vec<DocExcerpt<'a>>,
}

impl<'a> DocParamBlock<'a> {
    pub fn new(block_tag: DocBlockTag<'a>, parameter_name: impl Into<String>) -> Self {
        Self {
            block_tag,
            content: DocSection::new(),
            parameter_name: parameter_name.into(),
            excerpts: Vec::new(),
        }
    }

    pub fn parsed(
        block_tag: DocBlockTag<'a>,
        parameter_name: impl Into<String>,
        parts: ParamBlockExcerpts<'a>,
    ) -> Self {
        let ordered = [
            (ExcerptKind::Spacing, parts.spacing_before_parameter_name),
            (
                ExcerptKind::NonstandardText,
                parts.unsupported_jsdoc_type_before_parameter_name,
            ),
            (
                ExcerptKind::Spacing,
                parts.spacing_after_jsdoc_type_before_parameter_name,
            ),
            (
                ExcerptKind::NonstandardText,
                parts.unsupported_jsdoc_optional_name_open_bracket,
            ),
            (ExcerptKind::ParamBlockParameterName, parts.parameter_name),
            (
                ExcerptKind::NonstandardText,
                parts.unsupported_jsdoc_optional_name_rest,
            ),
            (ExcerptKind::Spacing, parts.spacing_after_parameter_name),
            (
                ExcerptKind::NonstandardText,
                parts.unsupported_jsdoc_type_after_parameter_name,
            ),
            (
                ExcerptKind::Spacing,
                parts.spacing_after_jsdoc_type_after_parameter_name,
            ),
            (ExcerptKind::ParamBlockHyphen, parts.hyphen),
            (ExcerptKind::Spacing, parts.spacing_after_hyphen),
        ];
        Self {
            block_tag,
            content: DocSection::new(),
            parameter_name: parameter_name.into(),
            excerpts: ordered
                .into_iter()
                .filter_map(|(kind, sequence)| DocExcerpt::maybe(kind, sequence))
                .collect(),
        }
    }

    pub fn block_tag(&self) -> &DocBlockTag<'a> {
        &self.block_tag
    }

    pub fn content(&self) -> &DocSection<'a> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut DocSection<'a> {
        &mut self.content
    }

    /// The parameter name. Empty when the tag was malformed.
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub(crate) fn excerpts(&self) -> Vec<&DocExcerpt<'a>> {
        self.excerpts.iter().collect()
    }
}

/// The `@param` or `@typeParam` blocks of a comment, in source order.
#[derive(Debug, Clone, Default)]
pub struct DocParamCollection<'a> {
    blocks: Vec<DocParamBlock<'a>>,
    blocks_by_name: FxHashMap<String, usize>,
}

impl<'a> DocParamCollection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `block`. Lookup by name returns the first block with that name.
    pub fn add(&mut self, block: DocParamBlock<'a>) {
        self.blocks_by_name
            .entry(block.parameter_name().to_string())
            .or_insert(self.blocks.len());
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[DocParamBlock<'a>] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [DocParamBlock<'a>] {
        &mut self.blocks
    }

    pub fn last_mut(&mut self) -> Option<&mut DocParamBlock<'a>> {
        self.blocks.last_mut()
    }

    pub fn count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn try_get_block_by_name(&self, parameter_name: &str) -> Option<&DocParamBlock<'a>> {
        self.blocks_by_name
            .get(parameter_name)
            .map(|&index| &self.blocks[index])
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.blocks_by_name.clear();
    }
}
