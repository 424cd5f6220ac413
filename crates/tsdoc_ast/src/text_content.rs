//! Detecting whether a subtree has any visible text.

use crate::node::DocNodeRef;
use crate::visitor::{walk, DocVisitor};

struct TextContentCounter {
    required: usize,
    found: usize,
}

impl TextContentCounter {
    fn count(&mut self, text: &str) {
        self.found += text.chars().filter(|c| !c.is_whitespace()).count();
    }

    fn satisfied(&self) -> bool {
        self.found >= self.required
    }
}

impl<'n, 'a> DocVisitor<'n, 'a> for TextContentCounter {
    fn visit(&mut self, node: DocNodeRef<'n, 'a>) {
        if self.satisfied() {
            return;
        }
        match node {
            DocNodeRef::PlainText(text) => self.count(text.text()),
            DocNodeRef::CodeSpan(code_span) => self.count(code_span.code()),
            DocNodeRef::FencedCode(fenced) => self.count(fenced.code()),
            DocNodeRef::LinkTag(link) => {
                if let Some(link_text) = link.link_text() {
                    self.count(link_text);
                }
            }
            DocNodeRef::Excerpt(_) => {}
            _ => walk(self, node),
        }
    }
}

/// Whether `node` contains at least `required_characters` non-whitespace
/// characters of plain text, code, or link text.
///
/// Tags, HTML, and escapes do not count.
pub fn has_any_text_content(node: DocNodeRef<'_, '_>, required_characters: usize) -> bool {
    let mut counter = TextContentCounter {
        required: required_characters.max(1),
        found: 0,
    };
    counter.visit(node);
    counter.satisfied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DocCodeSpan;
    use crate::container::DocSection;
    use crate::inline::DocLinkTag;
    use crate::manager::DocNodeManager;
    use crate::text::{DocPlainText, DocSoftBreak};

    #[test]
    fn test_whitespace_is_not_content() {
        let manager = DocNodeManager::builtin();
        let mut section = DocSection::new();
        section.append_node_in_paragraph(manager, DocPlainText::new("   ").into());
        section.append_node_in_paragraph(manager, DocSoftBreak::new().into());
        assert!(!has_any_text_content(DocNodeRef::Section(&section), 1));

        section.append_node_in_paragraph(manager, DocCodeSpan::new("x").into());
        assert!(has_any_text_content(DocNodeRef::Section(&section), 1));
        assert!(!has_any_text_content(DocNodeRef::Section(&section), 2));
    }

    #[test]
    fn test_link_text_counts() {
        let manager = DocNodeManager::builtin();
        let mut section = DocSection::new();
        let link = DocLinkTag::new(None, Some("https://a.b".into()), None);
        section.append_node_in_paragraph(manager, link.into());
        assert!(!has_any_text_content(DocNodeRef::Section(&section), 1));

        let link = DocLinkTag::new(None, Some("https://a.b".into()), Some("ab".into()));
        section.append_node_in_paragraph(manager, link.into());
        assert!(has_any_text_content(DocNodeRef::Section(&section), 2));
    }
}
