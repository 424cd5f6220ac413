use tsdoc_ast::DocNodeRef;

/// Append an indented outline of `node` and its descendants to `out`.
pub fn write_tree(out: &mut String, node: DocNodeRef<'_, '_>, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str("- ");
    out.push_str(node.kind().as_str());
    if let DocNodeRef::Excerpt(excerpt) = node {
        out.push_str(&format!(" {:?} {:?}", excerpt.excerpt_kind, excerpt.text()));
    }
    out.push('\n');

    for child in node.child_nodes() {
        write_tree(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use pretty_assertions::assert_eq;
    use tsdoc_config::TSDocConfiguration;
    use tsdoc_parser::TSDocParser;

    #[test]
    fn test_outline_lists_kinds_by_depth() {
        let arena = Bump::new();
        let configuration = TSDocConfiguration::new();
        let context = TSDocParser::new(&configuration).parse_string(&arena, "/** Hi */");

        let mut out = String::new();
        write_tree(&mut out, DocNodeRef::Comment(&context.doc_comment), 0);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "- Comment");
        assert_eq!(lines[1], "  - Section");
        assert_eq!(lines[2], "    - Paragraph");
        assert!(lines.iter().any(|line| line.starts_with("      - PlainText")));
    }
}
