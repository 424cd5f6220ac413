//! Splits paragraphs at blank lines.
//!
//! The node parser appends everything in a section to one paragraph. This
//! pass breaks it wherever a line containing only whitespace is followed by a
//! line with content. Blank lines stay attached to the paragraph they follow.

use tsdoc_ast::{DocComment, DocNode, DocNodeManager, DocParagraph, DocSection};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum SplitterState {
    /// Skipping blank lines before the first content.
    Start,
    /// Inside content, waiting for a blank line.
    AwaitingTrailer,
    /// Reading blank lines after content.
    ReadingTrailer,
}

pub struct ParagraphSplitter;

impl ParagraphSplitter {
    /// Split the paragraphs of every section in `comment`.
    pub fn split_paragraphs(comment: &mut DocComment<'_>, manager: &DocNodeManager) {
        for section in comment.sections_mut() {
            Self::split_paragraphs_for_section(section, manager);
        }
    }

    pub fn split_paragraphs_for_section(section: &mut DocSection<'_>, manager: &DocNodeManager) {
        let mut output_nodes = Vec::new();
        for node in section.take_nodes() {
            match node {
                DocNode::Paragraph(paragraph) => {
                    Self::split_paragraph(paragraph, &mut output_nodes, manager)
                }
                other => output_nodes.push(other),
            }
        }
        section.append_nodes(manager, output_nodes);
    }

    fn split_paragraph<'a>(
        mut old_paragraph: DocParagraph<'a>,
        output_nodes: &mut Vec<DocNode<'a>>,
        manager: &DocNodeManager,
    ) {
        let mut paragraphs = vec![DocParagraph::new()];
        let mut state = SplitterState::Start;
        let mut nodes = old_paragraph.take_nodes().into_iter().peekable();

        while nodes.peek().is_some() {
            // One line, including its trailing soft break.
            let mut line = Vec::new();
            let mut is_blank_line = true;
            for node in nodes.by_ref() {
                let is_soft_break = matches!(node, DocNode::SoftBreak(_));
                if !is_soft_break && is_blank_line && !Self::is_whitespace(&node) {
                    is_blank_line = false;
                }
                line.push(node);
                if is_soft_break {
                    break;
                }
            }

            match state {
                SplitterState::Start => {
                    if !is_blank_line {
                        state = SplitterState::AwaitingTrailer;
                    }
                }
                SplitterState::AwaitingTrailer => {
                    if is_blank_line {
                        state = SplitterState::ReadingTrailer;
                    }
                }
                SplitterState::ReadingTrailer => {
                    if !is_blank_line {
                        paragraphs.push(DocParagraph::new());
                        state = SplitterState::AwaitingTrailer;
                    }
                }
            }

            if let Some(current) = paragraphs.last_mut() {
                current.append_nodes(manager, line);
            }
        }

        output_nodes.extend(paragraphs.into_iter().map(DocNode::Paragraph));
    }

    fn is_whitespace(node: &DocNode<'_>) -> bool {
        match node {
            DocNode::PlainText(text) => text.text().trim().is_empty(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsdoc_ast::{DocPlainText, DocSoftBreak};

    fn paragraph_texts(section: &DocSection<'_>) -> Vec<String> {
        section
            .nodes()
            .iter()
            .map(|node| match node {
                DocNode::Paragraph(paragraph) => paragraph
                    .nodes()
                    .iter()
                    .map(|n| match n {
                        DocNode::PlainText(t) => t.text().to_string(),
                        DocNode::SoftBreak(_) => "|".to_string(),
                        _ => "?".to_string(),
                    })
                    .collect::<String>(),
                _ => "<other>".to_string(),
            })
            .collect()
    }

    fn section_from_lines<'a>(lines: &[&str], manager: &DocNodeManager) -> DocSection<'a> {
        let mut section = DocSection::new();
        for line in lines {
            if !line.is_empty() {
                section.append_node_in_paragraph(manager, DocPlainText::new(*line).into());
            }
            section.append_node_in_paragraph(manager, DocSoftBreak::new().into());
        }
        section
    }

    #[test]
    fn test_splits_at_blank_line() {
        let manager = DocNodeManager::builtin();
        let mut section = section_from_lines(&["one", "", "two"], manager);
        ParagraphSplitter::split_paragraphs_for_section(&mut section, manager);
        assert_eq!(paragraph_texts(&section), vec!["one||", "two|"]);
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        let manager = DocNodeManager::builtin();
        let mut section = section_from_lines(&["one", "   ", "two"], manager);
        ParagraphSplitter::split_paragraphs_for_section(&mut section, manager);
        assert_eq!(section.nodes().len(), 2);
    }

    #[test]
    fn test_leading_blank_lines_stay_in_first_paragraph() {
        let manager = DocNodeManager::builtin();
        let mut section = section_from_lines(&["", "", "one", "two"], manager);
        ParagraphSplitter::split_paragraphs_for_section(&mut section, manager);
        assert_eq!(paragraph_texts(&section), vec!["||one|two|"]);
    }

    #[test]
    fn test_multiple_blank_lines_make_one_break() {
        let manager = DocNodeManager::builtin();
        let mut section = section_from_lines(&["one", "", "", "two", "", "three"], manager);
        ParagraphSplitter::split_paragraphs_for_section(&mut section, manager);
        assert_eq!(paragraph_texts(&section), vec!["one|||", "two||", "three|"]);
    }
}
