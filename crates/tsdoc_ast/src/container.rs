//! Sections and paragraphs: the two node kinds that hold ordered content.

use crate::kind::DocNodeKind;
use crate::manager::DocNodeManager;
use crate::node::DocNode;

fn assert_allowed(manager: &DocNodeManager, parent: DocNodeKind, child: DocNodeKind) {
    assert!(
        manager.is_allowed_child(parent, child),
        "The DocNode kind {} cannot be added as a child of {}",
        child,
        parent
    );
}

/// A run of inline content. Paragraphs are split at blank lines after parsing.
#[derive(Debug, Clone, Default)]
pub struct DocParagraph<'a> {
    nodes: Vec<DocNode<'a>>,
}

impl<'a> DocParagraph<'a> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn nodes(&self) -> &[DocNode<'a>] {
        &self.nodes
    }

    /// Panics if `manager` does not permit `node` inside a paragraph.
    pub fn append_node(&mut self, manager: &DocNodeManager, node: DocNode<'a>) {
        assert_allowed(manager, DocNodeKind::Paragraph, node.kind());
        self.nodes.push(node);
    }

    pub fn append_nodes(
        &mut self,
        manager: &DocNodeManager,
        nodes: impl IntoIterator<Item = DocNode<'a>>,
    ) {
        for node in nodes {
            self.append_node(manager, node);
        }
    }

    /// Remove and return every child.
    pub fn take_nodes(&mut self) -> Vec<DocNode<'a>> {
        std::mem::take(&mut self.nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Block-level content: paragraphs, fenced code, and HTML tags.
#[derive(Debug, Clone, Default)]
pub struct DocSection<'a> {
    nodes: Vec<DocNode<'a>>,
}

impl<'a> DocSection<'a> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn nodes(&self) -> &[DocNode<'a>] {
        &self.nodes
    }

    /// Panics if `manager` does not permit `node` inside a section.
    pub fn append_node(&mut self, manager: &DocNodeManager, node: DocNode<'a>) {
        assert_allowed(manager, DocNodeKind::Section, node.kind());
        self.nodes.push(node);
    }

    pub fn append_nodes(
        &mut self,
        manager: &DocNodeManager,
        nodes: impl IntoIterator<Item = DocNode<'a>>,
    ) {
        for node in nodes {
            self.append_node(manager, node);
        }
    }

    /// Append `node` to the trailing paragraph when paragraphs accept it,
    /// starting a new paragraph if the section does not end with one.
    /// Anything else is appended to the section itself.
    pub fn append_node_in_paragraph(&mut self, manager: &DocNodeManager, node: DocNode<'a>) {
        if !manager.is_allowed_child(DocNodeKind::Paragraph, node.kind()) {
            self.append_node(manager, node);
            return;
        }

        if !matches!(self.nodes.last(), Some(DocNode::Paragraph(_))) {
            self.append_node(manager, DocNode::Paragraph(DocParagraph::new()));
        }
        if let Some(DocNode::Paragraph(paragraph)) = self.nodes.last_mut() {
            paragraph.append_node(manager, node);
        }
    }

    /// Remove and return every child.
    pub fn take_nodes(&mut self) -> Vec<DocNode<'a>> {
        std::mem::take(&mut self.nodes)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DocFencedCode;
    use crate::text::{DocPlainText, DocSoftBreak};

    #[test]
    fn test_append_node_in_paragraph() {
        let manager = DocNodeManager::builtin();
        let mut section = DocSection::new();
        section.append_node_in_paragraph(manager, DocPlainText::new("a").into());
        section.append_node_in_paragraph(manager, DocSoftBreak::new().into());
        section.append_node_in_paragraph(manager, DocFencedCode::new("ts", "x\n").into());
        section.append_node_in_paragraph(manager, DocPlainText::new("b").into());

        let kinds: Vec<_> = section.nodes().iter().map(DocNode::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DocNodeKind::Paragraph,
                DocNodeKind::FencedCode,
                DocNodeKind::Paragraph
            ]
        );
        match &section.nodes()[0] {
            DocNode::Paragraph(p) => assert_eq!(p.nodes().len(), 2),
            other => panic!("expected paragraph, got {:?}", other.kind()),
        }
    }

    #[test]
    #[should_panic(expected = "cannot be added as a child of Section")]
    fn test_section_rejects_inline_content() {
        let mut section = DocSection::new();
        section.append_node(DocNodeManager::builtin(), DocPlainText::new("x").into());
    }
}
