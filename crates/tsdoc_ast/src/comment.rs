//! The root of the tree and the set of modifier tags.

use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashSet;

use crate::block::{DocBlock, DocParamCollection};
use crate::container::DocSection;
use crate::inline::{DocBlockTag, DocInheritDocTag};

// ============================================================================
// Modifier tags
// ============================================================================

/// Modifier tags such as `@public` that were present on a comment.
///
/// Tag names compare case-insensitively; a tag is only recorded once.
#[derive(Debug, Clone, Default)]
pub struct ModifierTagSet<'a> {
    nodes: Vec<DocBlockTag<'a>>,
    names_with_upper_case: FxHashSet<String>,
}

impl<'a> ModifierTagSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tags in the order they were added.
    pub fn nodes(&self) -> &[DocBlockTag<'a>] {
        &self.nodes
    }

    /// `tag_name` includes the `@`, e.g. `@beta`.
    pub fn has_tag_name(&self, tag_name: &str) -> bool {
        self.names_with_upper_case.contains(&tag_name.to_uppercase())
    }

    pub fn has_tag(&self, tag: &DocBlockTag<'_>) -> bool {
        self.names_with_upper_case
            .contains(tag.tag_name_with_upper_case())
    }

    pub fn try_get_tag(&self, tag_name: &str) -> Option<&DocBlockTag<'a>> {
        let upper = tag_name.to_uppercase();
        self.nodes
            .iter()
            .find(|tag| tag.tag_name_with_upper_case() == upper)
    }

    /// Returns false if a tag with the same name was already present.
    pub fn add_tag(&mut self, tag: DocBlockTag<'a>) -> bool {
        if !self
            .names_with_upper_case
            .insert(tag.tag_name_with_upper_case().to_string())
        {
            return false;
        }
        self.nodes.push(tag);
        true
    }
}

/// A [`ModifierTagSet`] with accessors for the standard modifiers.
#[derive(Debug, Clone, Default)]
pub struct StandardModifierTagSet<'a> {
    tags: ModifierTagSet<'a>,
}

macro_rules! standard_modifier {
    ($($method:ident => $name:literal),* $(,)?) => {
        $(
            pub fn $method(&self) -> bool {
                self.tags.has_tag_name($name)
            }
        )*
    };
}

impl<'a> StandardModifierTagSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    standard_modifier! {
        is_alpha => "@alpha",
        is_beta => "@beta",
        is_event_property => "@eventProperty",
        is_experimental => "@experimental",
        is_internal => "@internal",
        is_override => "@override",
        is_package_documentation => "@packageDocumentation",
        is_public => "@public",
        is_readonly => "@readonly",
        is_sealed => "@sealed",
        is_virtual => "@virtual",
    }
}

impl<'a> Deref for StandardModifierTagSet<'a> {
    type Target = ModifierTagSet<'a>;

    fn deref(&self) -> &Self::Target {
        &self.tags
    }
}

impl DerefMut for StandardModifierTagSet<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tags
    }
}

// ============================================================================
// DocComment
// ============================================================================

/// A parsed or built doc comment.
#[derive(Debug, Clone, Default)]
pub struct DocComment<'a> {
    /// Content before the first block tag.
    pub summary_section: DocSection<'a>,
    pub remarks_block: Option<DocBlock<'a>>,
    pub private_remarks: Option<DocBlock<'a>>,
    pub deprecated_block: Option<DocBlock<'a>>,
    pub params: DocParamCollection<'a>,
    pub type_params: DocParamCollection<'a>,
    pub returns_block: Option<DocBlock<'a>>,
    pub inherit_doc_tag: Option<DocInheritDocTag<'a>>,
    pub modifier_tag_set: StandardModifierTagSet<'a>,
    /// `@see` blocks, in source order.
    pub see_blocks: Vec<DocBlock<'a>>,
    /// Blocks whose tags have no dedicated slot, in source order.
    pub custom_blocks: Vec<DocBlock<'a>>,
}

impl<'a> DocComment<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_see_block(&mut self, block: DocBlock<'a>) {
        self.see_blocks.push(block);
    }

    pub fn append_custom_block(&mut self, block: DocBlock<'a>) {
        self.custom_blocks.push(block);
    }

    /// Every content section in the comment.
    pub fn sections_mut(&mut self) -> Vec<&mut DocSection<'a>> {
        let mut sections = vec![&mut self.summary_section];
        for block in [
            &mut self.remarks_block,
            &mut self.private_remarks,
            &mut self.deprecated_block,
            &mut self.returns_block,
        ]
        .into_iter()
        .flatten()
        {
            sections.push(block.content_mut());
        }
        sections.extend(self.params.blocks_mut().iter_mut().map(|b| b.content_mut()));
        sections.extend(
            self.type_params
                .blocks_mut()
                .iter_mut()
                .map(|b| b.content_mut()),
        );
        sections.extend(self.see_blocks.iter_mut().map(DocBlock::content_mut));
        sections.extend(self.custom_blocks.iter_mut().map(DocBlock::content_mut));
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_tags_are_case_insensitive() {
        let mut set = StandardModifierTagSet::new();
        assert!(set.add_tag(DocBlockTag::new("@Beta")));
        assert!(!set.add_tag(DocBlockTag::new("@beta")));
        assert!(set.is_beta());
        assert!(!set.is_alpha());
        assert!(set.has_tag_name("@BETA"));
        assert_eq!(set.nodes().len(), 1);
        assert_eq!(set.try_get_tag("@beta").map(|t| t.tag_name()), Some("@Beta"));
    }

    #[test]
    fn test_sections_mut_visits_every_block() {
        let mut comment = DocComment::new();
        comment.remarks_block = Some(DocBlock::new(DocBlockTag::new("@remarks")));
        comment.append_see_block(DocBlock::new(DocBlockTag::new("@see")));
        comment.append_custom_block(DocBlock::new(DocBlockTag::new("@example")));
        assert_eq!(comment.sections_mut().len(), 4);
    }
}
