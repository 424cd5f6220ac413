use tsdoc_ast::{DocComment, DocDeclarationReference, DocNode, DocNodeRef, DocParagraph};

use crate::trim::trim_spaces_in_paragraph;

const EOL: &str = "\n";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LineState {
    Closed,
    StartOfLine,
    MiddleOfLine,
}

/// Renders doc comment trees as normalized text.
///
/// Content is written one line at a time. With comment framing on, the first
/// write opens `/**`, each line starts with ` * `, and the end closes ` */`.
pub struct TSDocEmitter {
    output: String,
    emit_comment_framing: bool,
    line_state: LineState,
    previous_line_had_content: bool,
    /// The next paragraph continues the current line, e.g. after `@returns`.
    hanging_paragraph: bool,
}

impl Default for TSDocEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl TSDocEmitter {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
            emit_comment_framing: true,
            line_state: LineState::Closed,
            previous_line_had_content: false,
            hanging_paragraph: false,
        }
    }

    /// Render a complete `/** ... */` comment. An empty comment renders as
    /// an empty string.
    pub fn render_comment(&mut self, comment: &DocComment<'_>) -> String {
        self.emit_comment_framing = true;
        self.render_complete_object(DocNodeRef::Comment(comment))
    }

    /// Render an HTML start or end tag without comment framing.
    ///
    /// Panics if `tag` is not an HTML tag.
    pub fn render_html_tag(&mut self, tag: &DocNode<'_>) -> String {
        assert!(
            matches!(tag, DocNode::HtmlStartTag(_) | DocNode::HtmlEndTag(_)),
            "render_html_tag expects an HTML tag, got {}",
            tag.kind()
        );
        self.emit_comment_framing = false;
        self.render_complete_object(tag.as_node_ref())
    }

    /// Render a declaration reference without comment framing.
    pub fn render_declaration_reference(
        &mut self,
        declaration_reference: &DocDeclarationReference<'_>,
    ) -> String {
        self.emit_comment_framing = false;
        self.render_complete_object(DocNodeRef::DeclarationReference(declaration_reference))
    }

    fn render_complete_object(&mut self, node: DocNodeRef<'_, '_>) -> String {
        self.output.clear();
        self.line_state = LineState::Closed;
        self.previous_line_had_content = false;
        self.hanging_paragraph = false;

        self.render_node(node);
        self.write_end();
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    fn render_node(&mut self, node: DocNodeRef<'_, '_>) {
        match node {
            DocNodeRef::Comment(comment) => self.render_comment_body(comment),
            DocNodeRef::Section(section) => self.render_nodes(section.nodes()),
            DocNodeRef::Paragraph(paragraph) => self.render_paragraph(paragraph),
            DocNodeRef::Block(block) => {
                self.ensure_line_skipped();
                self.render_node(DocNodeRef::BlockTag(block.block_tag()));
                if block.block_tag().tag_name_with_upper_case() == "@RETURNS" {
                    self.write_content(" ");
                    self.hanging_paragraph = true;
                }
                self.render_node(DocNodeRef::Section(block.content()));
            }
            DocNodeRef::ParamCollection(collection) => {
                for block in collection.blocks() {
                    self.render_node(DocNodeRef::ParamBlock(block));
                }
            }
            DocNodeRef::ParamBlock(block) => {
                self.ensure_line_skipped();
                self.render_node(DocNodeRef::BlockTag(block.block_tag()));
                self.write_content(" ");
                self.write_content(block.parameter_name());
                self.write_content(" - ");
                self.hanging_paragraph = true;
                self.render_node(DocNodeRef::Section(block.content()));
                self.hanging_paragraph = false;
            }
            DocNodeRef::BlockTag(tag) => {
                if self.line_state == LineState::MiddleOfLine {
                    self.write_content(" ");
                }
                self.write_content(tag.tag_name());
            }
            DocNodeRef::CodeSpan(code_span) => {
                self.write_content("`");
                self.write_content(code_span.code());
                self.write_content("`");
            }
            DocNodeRef::FencedCode(fenced_code) => {
                self.ensure_at_start_of_line();
                self.write_content("```");
                self.write_content(fenced_code.language());
                self.write_newline();
                self.write_content(fenced_code.code());
                self.write_content("```");
                self.write_newline();
                self.write_newline();
            }
            DocNodeRef::PlainText(plain_text) => self.write_content(plain_text.text()),
            DocNodeRef::EscapedText(escaped_text) => {
                self.write_content(escaped_text.encoded_text())
            }
            DocNodeRef::ErrorText(error_text) => self.write_content(error_text.text()),
            DocNodeRef::SoftBreak(_) => self.write_newline(),
            DocNodeRef::HtmlStartTag(tag) => {
                self.write_content("<");
                self.write_content(tag.name());
                let spacing_after_name = tag.spacing_after_name().unwrap_or_default();
                self.write_content(spacing_after_name);
                let mut needs_space = spacing_after_name.is_empty();
                for attribute in tag.html_attributes() {
                    if needs_space {
                        self.write_content(" ");
                    }
                    self.render_node(DocNodeRef::HtmlAttribute(attribute));
                    needs_space = attribute.spacing_after_value().unwrap_or_default().is_empty();
                }
                self.write_content(if tag.self_closing_tag() { "/>" } else { ">" });
            }
            DocNodeRef::HtmlEndTag(tag) => {
                self.write_content("</");
                self.write_content(tag.name());
                self.write_content(">");
            }
            DocNodeRef::HtmlAttribute(attribute) => {
                self.write_content(attribute.name());
                self.write_content(attribute.spacing_after_name().unwrap_or_default());
                self.write_content("=");
                self.write_content(attribute.spacing_after_equals().unwrap_or_default());
                self.write_content(attribute.value());
                self.write_content(attribute.spacing_after_value().unwrap_or_default());
            }
            DocNodeRef::InlineTag(tag) => {
                self.write_content("{");
                self.write_content(tag.tag_name());
                if !tag.tag_content().is_empty() {
                    self.write_content(" ");
                    self.write_content(tag.tag_content());
                }
                self.write_content("}");
            }
            DocNodeRef::LinkTag(tag) => {
                self.write_content("{");
                self.write_content(tag.tag_name());
                if let Some(url) = tag.url_destination() {
                    self.write_content(" ");
                    self.write_content(url);
                } else if let Some(reference) = tag.code_destination() {
                    self.write_content(" ");
                    self.render_node(DocNodeRef::DeclarationReference(reference));
                }
                if let Some(link_text) = tag.link_text() {
                    self.write_content(" | ");
                    self.write_content(link_text);
                }
                self.write_content("}");
            }
            DocNodeRef::InheritDocTag(tag) => {
                self.write_content("{");
                self.write_content(tag.tag_name());
                if let Some(reference) = tag.declaration_reference() {
                    self.write_content(" ");
                    self.render_node(DocNodeRef::DeclarationReference(reference));
                }
                self.write_content("}");
            }
            DocNodeRef::DeclarationReference(reference) => {
                let package_name = reference.package_name();
                let import_path = reference.import_path();
                self.write_content(package_name.unwrap_or_default());
                self.write_content(import_path.unwrap_or_default());
                if package_name.is_some() || import_path.is_some() {
                    self.write_content("#");
                }
                for member_reference in reference.member_references() {
                    self.render_node(DocNodeRef::MemberReference(member_reference));
                }
            }
            DocNodeRef::MemberReference(member_reference) => {
                if member_reference.has_dot() {
                    self.write_content(".");
                }
                let selector = member_reference.selector();
                if selector.is_some() {
                    self.write_content("(");
                }
                if let Some(symbol) = member_reference.member_symbol() {
                    self.render_node(DocNodeRef::MemberSymbol(symbol));
                } else if let Some(identifier) = member_reference.member_identifier() {
                    self.render_node(DocNodeRef::MemberIdentifier(identifier));
                }
                if let Some(selector) = selector {
                    self.write_content(":");
                    self.render_node(DocNodeRef::MemberSelector(selector));
                    self.write_content(")");
                }
            }
            DocNodeRef::MemberIdentifier(identifier) => {
                if identifier.has_quotes() {
                    self.write_content("\"");
                    self.write_content(identifier.identifier());
                    self.write_content("\"");
                } else {
                    self.write_content(identifier.identifier());
                }
            }
            DocNodeRef::MemberSymbol(symbol) => {
                self.write_content("[");
                self.render_node(DocNodeRef::DeclarationReference(symbol.symbol_reference()));
                self.write_content("]");
            }
            DocNodeRef::MemberSelector(selector) => self.write_content(selector.selector()),
            DocNodeRef::Excerpt(_) => {}
        }
    }

    fn render_comment_body(&mut self, comment: &DocComment<'_>) {
        self.render_node(DocNodeRef::Section(&comment.summary_section));
        for block in [
            &comment.remarks_block,
            &comment.private_remarks,
            &comment.deprecated_block,
        ]
        .into_iter()
        .flatten()
        {
            self.render_node(DocNodeRef::Block(block));
        }
        self.render_node(DocNodeRef::ParamCollection(&comment.params));
        self.render_node(DocNodeRef::ParamCollection(&comment.type_params));
        if let Some(block) = &comment.returns_block {
            self.render_node(DocNodeRef::Block(block));
        }
        for block in comment.custom_blocks.iter().chain(&comment.see_blocks) {
            self.render_node(DocNodeRef::Block(block));
        }
        if let Some(tag) = &comment.inherit_doc_tag {
            self.render_node(DocNodeRef::InheritDocTag(tag));
        }

        let modifier_tags = comment.modifier_tag_set.nodes();
        if !modifier_tags.is_empty() {
            self.ensure_line_skipped();
            for tag in modifier_tags {
                self.render_node(DocNodeRef::BlockTag(tag));
            }
        }
    }

    fn render_paragraph(&mut self, paragraph: &DocParagraph<'_>) {
        let trimmed = trim_spaces_in_paragraph(paragraph);
        if trimmed.is_empty() {
            return;
        }
        if self.hanging_paragraph {
            self.hanging_paragraph = false;
        } else {
            self.ensure_line_skipped();
        }
        self.render_nodes(trimmed.nodes());
        self.write_newline();
    }

    fn render_nodes(&mut self, nodes: &[DocNode<'_>]) {
        for node in nodes {
            self.render_node(node.as_node_ref());
        }
    }

    // ========================================================================
    // Line state
    // ========================================================================

    fn ensure_at_start_of_line(&mut self) {
        if self.line_state == LineState::MiddleOfLine {
            self.write_newline();
        }
    }

    fn ensure_line_skipped(&mut self) {
        self.ensure_at_start_of_line();
        if self.previous_line_had_content {
            self.write_newline();
        }
    }

    fn open_if_closed(&mut self) {
        if self.line_state == LineState::Closed {
            if self.emit_comment_framing {
                self.output.push_str("/**");
                self.output.push_str(EOL);
                self.output.push_str(" *");
            }
            self.line_state = LineState::StartOfLine;
        }
    }

    fn write_content(&mut self, content: &str) {
        if content.is_empty() {
            return;
        }
        if content.contains('\n') {
            for (index, line) in content.split('\n').enumerate() {
                if index > 0 {
                    self.write_newline();
                }
                self.write_content(line.strip_suffix('\r').unwrap_or(line));
            }
            return;
        }

        self.open_if_closed();
        if self.line_state == LineState::StartOfLine && self.emit_comment_framing {
            self.output.push(' ');
        }
        self.output.push_str(content);
        self.line_state = LineState::MiddleOfLine;
        self.previous_line_had_content = true;
    }

    fn write_newline(&mut self) {
        self.open_if_closed();
        self.previous_line_had_content = self.line_state == LineState::MiddleOfLine;
        self.output.push_str(EOL);
        if self.emit_comment_framing {
            self.output.push_str(" *");
        }
        self.line_state = LineState::StartOfLine;
        self.hanging_paragraph = false;
    }

    fn write_end(&mut self) {
        if self.line_state == LineState::MiddleOfLine && self.emit_comment_framing {
            self.write_newline();
        }
        if self.line_state != LineState::Closed {
            if self.emit_comment_framing {
                self.output.push('/');
                self.output.push_str(EOL);
            }
            self.line_state = LineState::Closed;
        }
    }
}
