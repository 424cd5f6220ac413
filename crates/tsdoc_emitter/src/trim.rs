use tsdoc_ast::{DocNode, DocNodeManager, DocParagraph, DocPlainText, DocSoftBreak};

/// Normalize the whitespace of a paragraph.
///
/// Runs of whitespace collapse to a single space and adjacent plain text is
/// merged. Leading and trailing whitespace and soft breaks are removed.
/// Interior soft breaks survive as a single [`DocSoftBreak`] with the spaces
/// around them dropped.
pub fn trim_spaces_in_paragraph<'a>(paragraph: &DocParagraph<'a>) -> DocParagraph<'a> {
    let mut transformed: Vec<DocNode<'a>> = Vec::new();
    let mut accumulated_text = String::new();

    // Whether the next nonblank node should be preceded by a space
    let mut pending_space = false;
    let mut pending_break = false;
    // Leading whitespace is always trimmed; set once real content is seen
    let mut finished_skipping_leading_spaces = false;

    for node in paragraph.nodes() {
        match node {
            DocNode::PlainText(plain_text) => {
                let text = plain_text.text();
                let started_with_space = text.starts_with(char::is_whitespace);
                let ended_with_space = text.ends_with(char::is_whitespace);
                let collapsed_text = text.split_whitespace().collect::<Vec<_>>().join(" ");

                if started_with_space && finished_skipping_leading_spaces {
                    pending_space = true;
                }
                if !collapsed_text.is_empty() {
                    if pending_break {
                        flush_text(&mut accumulated_text, &mut transformed);
                        transformed.push(DocNode::SoftBreak(DocSoftBreak::new()));
                        pending_break = false;
                        pending_space = false;
                    }
                    if pending_space {
                        accumulated_text.push(' ');
                        pending_space = false;
                    }
                    accumulated_text.push_str(&collapsed_text);
                    finished_skipping_leading_spaces = true;
                }
                if ended_with_space && finished_skipping_leading_spaces {
                    pending_space = true;
                }
            }
            DocNode::SoftBreak(_) => {
                if finished_skipping_leading_spaces {
                    pending_break = true;
                }
            }
            _ => {
                if pending_break {
                    flush_text(&mut accumulated_text, &mut transformed);
                    transformed.push(DocNode::SoftBreak(DocSoftBreak::new()));
                    pending_break = false;
                    pending_space = false;
                }
                if pending_space {
                    accumulated_text.push(' ');
                    pending_space = false;
                }
                flush_text(&mut accumulated_text, &mut transformed);
                transformed.push(node.clone());
                finished_skipping_leading_spaces = true;
            }
        }
    }
    flush_text(&mut accumulated_text, &mut transformed);

    let mut result = DocParagraph::new();
    result.append_nodes(DocNodeManager::builtin(), transformed);
    result
}

fn flush_text<'a>(accumulated_text: &mut String, transformed: &mut Vec<DocNode<'a>>) {
    if !accumulated_text.is_empty() {
        let text = std::mem::take(accumulated_text);
        transformed.push(DocNode::PlainText(DocPlainText::new(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsdoc_ast::DocCodeSpan;

    fn paragraph(nodes: Vec<DocNode<'static>>) -> DocParagraph<'static> {
        let mut paragraph = DocParagraph::new();
        paragraph.append_nodes(DocNodeManager::builtin(), nodes);
        paragraph
    }

    fn text(value: &str) -> DocNode<'static> {
        DocNode::PlainText(DocPlainText::new(value))
    }

    fn soft_break() -> DocNode<'static> {
        DocNode::SoftBreak(DocSoftBreak::new())
    }

    fn describe(paragraph: &DocParagraph<'_>) -> Vec<String> {
        paragraph
            .nodes()
            .iter()
            .map(|node| match node {
                DocNode::PlainText(t) => format!("text:{}", t.text()),
                DocNode::SoftBreak(_) => "break".to_string(),
                DocNode::CodeSpan(c) => format!("code:{}", c.code()),
                other => format!("{}", other.kind()),
            })
            .collect()
    }

    #[test]
    fn test_collapses_and_merges_text() {
        let input = paragraph(vec![text("  Hello   "), text("  big "), text("world  ")]);
        assert_eq!(describe(&trim_spaces_in_paragraph(&input)), vec!["text:Hello big world"]);
    }

    #[test]
    fn test_keeps_interior_breaks_only() {
        let input = paragraph(vec![
            soft_break(),
            text("one "),
            soft_break(),
            text("  two"),
            soft_break(),
            text("   "),
            soft_break(),
        ]);
        assert_eq!(
            describe(&trim_spaces_in_paragraph(&input)),
            vec!["text:one", "break", "text:two"]
        );
    }

    #[test]
    fn test_space_before_and_after_other_nodes() {
        let input = paragraph(vec![
            text("call "),
            DocNode::CodeSpan(DocCodeSpan::new("f()")),
            text(" now"),
        ]);
        assert_eq!(
            describe(&trim_spaces_in_paragraph(&input)),
            vec!["text:call ", "code:f()", "text: now"]
        );
    }

    #[test]
    fn test_blank_paragraph_becomes_empty() {
        let input = paragraph(vec![text("   "), soft_break(), text(" ")]);
        assert!(trim_spaces_in_paragraph(&input).is_empty());
    }
}
