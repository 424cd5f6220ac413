//! Parser integration tests.
//!
//! Each test parses a complete `/** ... */` comment and inspects the tree
//! and the message log.

use bumpalo::Bump;
use pretty_assertions::assert_eq;
use tsdoc_ast::{
    walk, DocComment, DocLinkTag, DocNode, DocNodeKind, DocNodeRef, DocParagraph, DocSection,
    DocVisitor, SelectorKind,
};
use tsdoc_config::TSDocConfiguration;
use tsdoc_diagnostics::TSDocMessageId;
use tsdoc_parser::{ParserContext, TSDocParser};

/// Helper: parse `text` with the standard configuration.
fn parse<'a>(arena: &'a Bump, text: &'a str) -> ParserContext<'a> {
    let configuration = TSDocConfiguration::new();
    TSDocParser::new(&configuration).parse_string(arena, text)
}

/// Helper: the ids of every logged message, in order.
fn message_ids(context: &ParserContext<'_>) -> Vec<&'static str> {
    context
        .log
        .messages()
        .iter()
        .map(|message| message.message_id.as_str())
        .collect()
}

/// Helper: the source text covered by the first message with `id`.
fn message_excerpt<'a>(context: &ParserContext<'a>, id: TSDocMessageId) -> Option<&'a str> {
    context
        .log
        .messages()
        .iter()
        .find(|message| message.message_id == id)
        .map(|message| message.text_range.as_str())
}

/// Helper: the readable text of a paragraph, with whitespace collapsed.
fn paragraph_text(paragraph: &DocParagraph<'_>) -> String {
    let mut text = String::new();
    for child in paragraph.nodes() {
        match child {
            DocNode::PlainText(plain) => text.push_str(plain.text()),
            DocNode::SoftBreak(_) => text.push(' '),
            DocNode::EscapedText(escaped) => text.push_str(escaped.decoded_text()),
            DocNode::CodeSpan(code_span) => text.push_str(code_span.code()),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Helper: the text of every paragraph in a section, joined by spaces.
fn section_text(section: &DocSection<'_>) -> String {
    section
        .nodes()
        .iter()
        .filter_map(|node| match node {
            DocNode::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

struct NodeCollector<'n, 'a> {
    nodes: Vec<DocNodeRef<'n, 'a>>,
}

impl<'n, 'a> DocVisitor<'n, 'a> for NodeCollector<'n, 'a> {
    fn visit(&mut self, node: DocNodeRef<'n, 'a>) {
        self.nodes.push(node);
        walk(self, node);
    }
}

/// Helper: every node in the tree, depth first.
fn all_nodes<'n, 'a>(comment: &'n DocComment<'a>) -> Vec<DocNodeRef<'n, 'a>> {
    let mut collector = NodeCollector { nodes: Vec::new() };
    collector.visit(DocNodeRef::Comment(comment));
    collector.nodes
}

fn count_kind(comment: &DocComment<'_>, kind: DocNodeKind) -> usize {
    all_nodes(comment)
        .iter()
        .filter(|node| node.kind() == kind)
        .count()
}

/// Helper: concatenated text of every excerpt, in tree order.
fn excerpt_text(comment: &DocComment<'_>) -> String {
    all_nodes(comment)
        .iter()
        .filter_map(|node| match node {
            DocNodeRef::Excerpt(excerpt) => Some(excerpt.text()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Comment framing
// ============================================================================

#[test]
fn test_empty_comment() {
    let arena = Bump::new();
    let text = "/***/";
    let context = parse(&arena, text);
    assert_eq!(context.comment_range.as_str(), text);
    assert!(context.lines.is_empty());
    assert!(context.doc_comment.summary_section.nodes().is_empty());
    assert!(context.log.is_empty());
}

#[test]
fn test_comment_not_found() {
    let arena = Bump::new();
    let context = parse(&arena, "   ");
    assert_eq!(message_ids(&context), vec!["tsdoc-comment-not-found"]);
    assert!(context.comment_range.is_empty());
}

#[test]
fn test_comment_missing_opening_delimiter() {
    let arena = Bump::new();
    let context = parse(&arena, "/* plain */");
    assert_eq!(
        message_ids(&context),
        vec!["tsdoc-comment-missing-opening-delimiter"]
    );
}

#[test]
fn test_comment_missing_closing_delimiter() {
    let arena = Bump::new();
    let context = parse(&arena, "/** never closed");
    assert_eq!(
        message_ids(&context),
        vec!["tsdoc-comment-missing-closing-delimiter"]
    );
}

#[test]
fn test_single_line_comment() {
    let arena = Bump::new();
    let context = parse(&arena, "/** Hello world */");
    assert!(context.log.is_empty());
    assert_eq!(section_text(&context.doc_comment.summary_section), "Hello world");
}

// ============================================================================
// Blocks and modifiers
// ============================================================================

#[test]
fn test_summary_param_returns_and_modifier() {
    let arena = Bump::new();
    let context = parse(
        &arena,
        "/**\n * Summary text.\n * @param foo - the foo value\n * @returns nothing\n * @public\n */",
    );
    let comment = &context.doc_comment;

    assert_eq!(message_ids(&context), Vec::<&str>::new());
    assert_eq!(comment.summary_section.nodes().len(), 1);
    assert_eq!(section_text(&comment.summary_section), "Summary text.");

    let foo = comment
        .params
        .try_get_block_by_name("foo")
        .expect("foo should be documented");
    assert_eq!(foo.parameter_name(), "foo");
    assert_eq!(section_text(foo.content()), "the foo value");

    let returns = comment.returns_block.as_ref().expect("missing @returns");
    assert_eq!(section_text(returns.content()), "nothing");
    assert!(comment.modifier_tag_set.is_public());
    assert!(!comment.modifier_tag_set.is_beta());
}

#[test]
fn test_remarks_and_custom_blocks() {
    let arena = Bump::new();
    let context = parse(
        &arena,
        "/**\n * Summary.\n * @remarks\n * More detail.\n * @example\n * One\n * @example\n * Two\n * @see Other\n */",
    );
    let comment = &context.doc_comment;
    assert!(context.log.is_empty(), "{:?}", context.log.messages());

    let remarks = comment.remarks_block.as_ref().expect("missing @remarks");
    assert_eq!(section_text(remarks.content()), "More detail.");

    let examples: Vec<_> = comment
        .custom_blocks
        .iter()
        .map(|block| section_text(block.content()))
        .collect();
    assert_eq!(examples, vec!["One".to_string(), "Two".to_string()]);
    assert_eq!(comment.custom_blocks[0].block_tag().tag_name(), "@example");

    assert_eq!(comment.see_blocks.len(), 1);
    assert_eq!(section_text(comment.see_blocks[0].content()), "Other");
}

#[test]
fn test_modifier_tags_are_recorded_once() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * @internal\n * Text\n * @internal\n */");
    let modifiers = &context.doc_comment.modifier_tag_set;
    assert!(modifiers.is_internal());
    assert_eq!(modifiers.nodes().len(), 1);
}

#[test]
fn test_modifier_keeps_current_section() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * @remarks First\n * @beta\n * second\n */");
    let remarks = context.doc_comment.remarks_block.as_ref().expect("missing @remarks");
    assert_eq!(section_text(remarks.content()), "First second");
    assert!(context.doc_comment.modifier_tag_set.is_beta());
}

#[test]
fn test_undefined_tag_stays_in_content() {
    let arena = Bump::new();
    let context = parse(&arena, "/** Text @whatever more */");
    assert_eq!(message_ids(&context), vec!["tsdoc-undefined-tag"]);
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::BlockTag), 1);
    assert!(context.doc_comment.custom_blocks.is_empty());
}

#[test]
fn test_undefined_tag_can_be_ignored() {
    let arena = Bump::new();
    let mut configuration = TSDocConfiguration::new();
    configuration.validation_mut().ignore_undefined_tags = true;
    let context = TSDocParser::new(&configuration).parse_string(&arena, "/** Text @whatever */");
    assert!(context.log.is_empty());
}

#[test]
fn test_unsupported_tag_is_reported() {
    let arena = Bump::new();
    let mut configuration = TSDocConfiguration::new();
    let beta = configuration
        .try_get_tag_definition("@beta")
        .cloned()
        .expect("standard tag");
    configuration
        .set_support_for_tag(&beta, false)
        .expect("defined tag");

    let context = TSDocParser::new(&configuration).parse_string(&arena, "/** Text @beta */");
    assert_eq!(message_ids(&context), vec!["tsdoc-unsupported-tag"]);
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::UnsupportedTag),
        Some("@beta")
    );
    assert!(context.doc_comment.modifier_tag_set.has_tag_name("@beta"));
}

#[test]
fn test_inline_tag_used_as_block() {
    let arena = Bump::new();
    let context = parse(&arena, "/** @link Foo */");
    assert_eq!(message_ids(&context), vec!["tsdoc-inline-tag-missing-braces"]);
}

#[test]
fn test_block_tag_syntax_errors() {
    let arena = Bump::new();
    let context = parse(&arena, "/** user@example.com */");
    assert_eq!(message_ids(&context), vec!["tsdoc-at-sign-in-word"]);

    let context = parse(&arena, "/** @ alone */");
    assert_eq!(message_ids(&context), vec!["tsdoc-at-sign-without-tag-name"]);

    let context = parse(&arena, "/** @foo! */");
    assert_eq!(message_ids(&context), vec!["tsdoc-characters-after-block-tag"]);

    let context = parse(&arena, "/** @2fast */");
    assert_eq!(message_ids(&context), vec!["tsdoc-malformed-tag-name"]);
}

#[test]
fn test_deprecated_requires_message() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * @deprecated\n */");
    assert_eq!(message_ids(&context), vec!["tsdoc-missing-deprecation-message"]);

    let context = parse(&arena, "/**\n * @deprecated Use bar instead.\n */");
    assert!(context.log.is_empty());
}

// ============================================================================
// Param blocks
// ============================================================================

#[test]
fn test_param_lookup_returns_first_block() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * @param x - first\n * @param x - second\n */");
    let params = &context.doc_comment.params;
    assert_eq!(params.count(), 2);
    let x = params.try_get_block_by_name("x").expect("x should be documented");
    assert_eq!(section_text(x.content()), "first");
}

#[test]
fn test_param_missing_hyphen() {
    let arena = Bump::new();
    let context = parse(&arena, "/** @param x the value */");
    assert_eq!(message_ids(&context), vec!["tsdoc-param-tag-missing-hyphen"]);
    let block = &context.doc_comment.params.blocks()[0];
    assert_eq!(block.parameter_name(), "");
    assert_eq!(section_text(block.content()), "x the value");
}

#[test]
fn test_param_invalid_name() {
    let arena = Bump::new();
    let context = parse(&arena, "/** @param - nothing */");
    assert_eq!(message_ids(&context), vec!["tsdoc-param-tag-with-invalid-name"]);
}

#[test]
fn test_param_dotted_name() {
    let arena = Bump::new();
    let context = parse(&arena, "/** @param options.verbose - print more */");
    assert!(context.log.is_empty());
    assert!(context
        .doc_comment
        .params
        .try_get_block_by_name("options.verbose")
        .is_some());
}

#[test]
fn test_param_jsdoc_type_and_optional_name() {
    let arena = Bump::new();
    let context = parse(&arena, "/** @param {string} name - the name */");
    assert_eq!(message_ids(&context), vec!["tsdoc-param-tag-with-invalid-type"]);
    let block = &context.doc_comment.params.blocks()[0];
    assert_eq!(block.parameter_name(), "name");
    assert_eq!(section_text(block.content()), "the name");

    let context = parse(&arena, "/** @param [name] - the name */");
    assert_eq!(
        message_ids(&context),
        vec!["tsdoc-param-tag-with-invalid-optional-name"]
    );
    assert_eq!(context.doc_comment.params.blocks()[0].parameter_name(), "name");
}

#[test]
fn test_type_param_block() {
    let arena = Bump::new();
    let context = parse(&arena, "/** @typeParam T - the item type */");
    assert!(context.log.is_empty());
    let t = context
        .doc_comment
        .type_params
        .try_get_block_by_name("T")
        .expect("T should be documented");
    assert_eq!(section_text(t.content()), "the item type");
}

// ============================================================================
// Inline tags
// ============================================================================

fn first_link<'n, 'a>(comment: &'n DocComment<'a>) -> Option<&'n DocLinkTag<'a>> {
    all_nodes(comment).into_iter().find_map(|node| match node {
        DocNodeRef::LinkTag(link) => Some(link),
        _ => None,
    })
}

#[test]
fn test_link_to_url() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link https://example.com | Example} */");
    assert!(context.log.is_empty());
    let link = first_link(&context.doc_comment).expect("missing link");
    assert_eq!(link.url_destination(), Some("https://example.com"));
    assert_eq!(link.link_text(), Some("Example"));
    assert!(link.code_destination().is_none());
}

#[test]
fn test_link_to_member_with_selector() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link MyClass.myMethod:instance} */");
    assert!(context.log.is_empty(), "{:?}", context.log.messages());
    let link = first_link(&context.doc_comment).expect("missing link");
    assert!(link.url_destination().is_none());

    let reference = link.code_destination().expect("missing code destination");
    let members = reference.member_references();
    assert_eq!(members.len(), 2);
    assert_eq!(
        members[0].member_identifier().map(|i| i.identifier()),
        Some("MyClass")
    );
    assert!(members[1].has_dot());
    assert_eq!(
        members[1].member_identifier().map(|i| i.identifier()),
        Some("myMethod")
    );
    let selector = members[1].selector().expect("missing selector");
    assert_eq!(selector.selector(), "instance");
    assert_eq!(selector.selector_kind(), SelectorKind::System);
}

#[test]
fn test_link_with_package_and_import_path() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link @scope/my-package/lib/index#Widget.(render:static)} */");
    assert!(context.log.is_empty(), "{:?}", context.log.messages());
    let reference = first_link(&context.doc_comment)
        .and_then(|link| link.code_destination())
        .expect("missing code destination");
    assert_eq!(reference.package_name(), Some("@scope/my-package"));
    assert_eq!(reference.import_path(), Some("/lib/index"));
    assert_eq!(reference.member_references().len(), 2);
}

#[test]
fn test_link_missing_hash() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link my-package/lib} */");
    assert_eq!(message_ids(&context), vec!["tsdoc-reference-missing-hash"]);
    assert!(first_link(&context.doc_comment).is_none());
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::InlineTag), 1);
}

#[test]
fn test_link_invalid_url() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link http://} */");
    assert_eq!(message_ids(&context), vec!["tsdoc-link-tag-invalid-url"]);
}

#[test]
fn test_link_empty() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link} */");
    assert_eq!(message_ids(&context), vec!["tsdoc-link-tag-empty"]);
}

#[test]
fn test_unclosed_link_reports_one_error() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link foo */");
    assert_eq!(
        context
            .log
            .count_of(TSDocMessageId::InlineTagMissingRightBrace),
        1
    );
    assert_eq!(context.log.len(), 1);
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::LinkTag), 0);
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::ErrorText), 1);
}

#[test]
fn test_malformed_inline_tags() {
    let arena = Bump::new();
    // The rest of a malformed tag is re-read as ordinary content.
    let context = parse(&arena, "/** {@} */");
    assert_eq!(
        message_ids(&context),
        vec!["tsdoc-malformed-inline-tag", "tsdoc-escape-right-brace"]
    );

    let context = parse(&arena, "/** {@link{ x} */");
    assert_eq!(
        message_ids(&context)[0],
        "tsdoc-characters-after-inline-tag"
    );

    let context = parse(&arena, "/** {@link a { b} */");
    assert!(context.log.has_message(TSDocMessageId::InlineTagUnescapedBrace));
}

#[test]
fn test_block_tag_in_braces() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@remarks text} */");
    assert_eq!(message_ids(&context), vec!["tsdoc-tag-should-not-have-braces"]);
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::InlineTag), 1);
}

#[test]
fn test_inherit_doc() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@inheritDoc Base.method} */");
    assert!(context.log.is_empty(), "{:?}", context.log.messages());
    let tag = context
        .doc_comment
        .inherit_doc_tag
        .as_ref()
        .expect("missing inheritDoc");
    let reference = tag.declaration_reference().expect("missing reference");
    assert_eq!(reference.member_references().len(), 2);
}

#[test]
fn test_only_one_inherit_doc() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@inheritDoc Foo} {@inheritDoc Bar} */");
    assert_eq!(context.log.count_of(TSDocMessageId::ExtraInheritDocTag), 1);

    let tag = context
        .doc_comment
        .inherit_doc_tag
        .as_ref()
        .expect("missing inheritDoc");
    let first_member = tag
        .declaration_reference()
        .and_then(|reference| reference.member_references().first())
        .and_then(|member| member.member_identifier())
        .map(|identifier| identifier.identifier().to_string());
    assert_eq!(first_member.as_deref(), Some("Foo"));
}

#[test]
fn test_inherit_doc_conflicts() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * Summary.\n * {@inheritDoc Foo}\n */");
    assert!(context
        .log
        .has_message(TSDocMessageId::InheritDocIncompatibleSummary));

    let context = parse(&arena, "/**\n * {@inheritDoc Foo}\n * @remarks Extra\n */");
    assert_eq!(message_ids(&context), vec!["tsdoc-inheritdoc-incompatible-tag"]);
}

#[test]
fn test_custom_inline_tag() {
    let arena = Bump::new();
    let context = parse(&arena, "/** See {@label WITH_NUMBERS} */");
    assert!(context.log.is_empty());
    let tag = all_nodes(&context.doc_comment)
        .into_iter()
        .find_map(|node| match node {
            DocNodeRef::InlineTag(tag) => Some(tag),
            _ => None,
        })
        .expect("missing inline tag");
    assert_eq!(tag.tag_name(), "@label");
    assert_eq!(tag.tag_content(), "WITH_NUMBERS");
}

#[test]
fn test_inherit_doc_trailing_text() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@inheritDoc Foo !} */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::InheritDocTagSyntax),
        Some("!")
    );
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::InheritDocTag), 0);
}

#[test]
fn test_link_text_with_unescaped_pipe() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link Foo | a | b} */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::LinkTagUnescapedText),
        Some("a |")
    );
    assert!(first_link(&context.doc_comment).is_none());
}

#[test]
fn test_link_destination_followed_by_text() {
    let arena = Bump::new();
    let context = parse(&arena, "/** {@link Foo !} */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::LinkTagDestinationSyntax),
        Some("!")
    );
    assert!(first_link(&context.doc_comment).is_none());
}

// ============================================================================
// Escapes and stray punctuation
// ============================================================================

#[test]
fn test_escaped_at_sign() {
    let arena = Bump::new();
    let context = parse(&arena, "/** \\@foo */");
    assert!(context.log.is_empty());
    let escaped: Vec<_> = all_nodes(&context.doc_comment)
        .into_iter()
        .filter_map(|node| match node {
            DocNodeRef::EscapedText(escaped) => Some(escaped.decoded_text().to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(escaped, vec!["@".to_string()]);
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::BlockTag), 0);
    assert_eq!(section_text(&context.doc_comment.summary_section), "@foo");
}

#[test]
fn test_unnecessary_backslash() {
    let arena = Bump::new();
    let context = parse(&arena, "/** \\a */");
    assert_eq!(message_ids(&context), vec!["tsdoc-unnecessary-backslash"]);
}

#[test]
fn test_unescaped_braces_and_angle_brackets() {
    let arena = Bump::new();
    let context = parse(&arena, "/** a } b > c */");
    assert_eq!(
        message_ids(&context),
        vec!["tsdoc-escape-right-brace", "tsdoc-escape-greater-than"]
    );
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::ErrorText), 2);
}

#[test]
fn test_at_sign_in_word() {
    let arena = Bump::new();
    let context = parse(&arena, "/** Mail example@example.com */");
    assert_eq!(message_ids(&context), vec!["tsdoc-at-sign-in-word"]);
    assert_eq!(message_excerpt(&context, TSDocMessageId::AtSignInWord), Some("@"));

    let error_texts: Vec<_> = all_nodes(&context.doc_comment)
        .into_iter()
        .filter_map(|node| match node {
            DocNodeRef::ErrorText(error) => Some(error.text()),
            _ => None,
        })
        .collect();
    assert_eq!(error_texts, vec!["@"]);
    assert_eq!(
        section_text(&context.doc_comment.summary_section),
        "Mail exampleexample.com"
    );
}

// ============================================================================
// Code
// ============================================================================

#[test]
fn test_code_span() {
    let arena = Bump::new();
    let context = parse(&arena, "/** Call `run()` now */");
    assert!(context.log.is_empty());
    assert_eq!(section_text(&context.doc_comment.summary_section), "Call run() now");
}

#[test]
fn test_code_span_errors() {
    let arena = Bump::new();
    let context = parse(&arena, "/** `` x */");
    assert_eq!(message_ids(&context), vec!["tsdoc-code-span-empty"]);

    let context = parse(&arena, "/** `open */");
    assert_eq!(message_ids(&context), vec!["tsdoc-code-span-missing-delimiter"]);
}

fn fenced_code<'n, 'a>(comment: &'n DocComment<'a>) -> Vec<(String, String)> {
    all_nodes(comment)
        .into_iter()
        .filter_map(|node| match node {
            DocNodeRef::FencedCode(code) => {
                Some((code.language().to_string(), code.code().to_string()))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn test_fenced_code() {
    let arena = Bump::new();
    let context = parse(
        &arena,
        "/**\n * Example:\n * ```ts\n * const x = 1;\n * ```\n * After.\n */",
    );
    assert!(context.log.is_empty(), "{:?}", context.log.messages());
    assert_eq!(
        fenced_code(&context.doc_comment),
        vec![("ts".to_string(), "const x = 1;\n".to_string())]
    );
    let kinds: Vec<_> = context
        .doc_comment
        .summary_section
        .nodes()
        .iter()
        .map(DocNode::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            DocNodeKind::Paragraph,
            DocNodeKind::FencedCode,
            DocNodeKind::Paragraph
        ]
    );
}

#[test]
fn test_fenced_code_with_empty_body() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * ```\n * ```\n */");
    assert!(context.log.is_empty(), "{:?}", context.log.messages());
    assert_eq!(
        fenced_code(&context.doc_comment),
        vec![(String::new(), String::new())]
    );
}

#[test]
fn test_fenced_code_errors() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * ```ts\n * never closed\n */");
    assert_eq!(message_ids(&context), vec!["tsdoc-code-fence-missing-delimiter"]);

    let context = parse(&arena, "/**\n * text ```ts\n */");
    assert_eq!(message_ids(&context), vec!["tsdoc-code-fence-opening-indent"]);

    let context = parse(&arena, "/**\n * ```\n * x\n *  ```\n */");
    assert_eq!(message_ids(&context), vec!["tsdoc-code-fence-closing-indent"]);
}

#[test]
fn test_fenced_code_delimiter_syntax() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * ```t`s\n * x\n * ```\n */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::CodeFenceSpecifierSyntax),
        Some("`")
    );

    let context = parse(&arena, "/**\n * ```\n * x\n * ``` y\n */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::CodeFenceClosingSyntax),
        Some("y")
    );
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::FencedCode), 1);
}

// ============================================================================
// HTML
// ============================================================================

#[test]
fn test_html_tags() {
    let arena = Bump::new();
    let context = parse(&arena, "/** Some <b class=\"big\">bold</b> text<br/> */");
    assert!(context.log.is_empty(), "{:?}", context.log.messages());

    let nodes = all_nodes(&context.doc_comment);
    let start_tags: Vec<_> = nodes
        .iter()
        .filter_map(|node| match node {
            DocNodeRef::HtmlStartTag(tag) => Some(tag),
            _ => None,
        })
        .collect();
    assert_eq!(start_tags.len(), 2);
    assert_eq!(start_tags[0].name(), "b");
    assert_eq!(start_tags[0].html_attributes()[0].name(), "class");
    assert_eq!(start_tags[0].html_attributes()[0].value(), "\"big\"");
    assert!(!start_tags[0].self_closing_tag());
    assert_eq!(start_tags[1].name(), "br");
    assert!(start_tags[1].self_closing_tag());
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::HtmlEndTag), 1);
}

#[test]
fn test_html_errors() {
    let arena = Bump::new();
    // Only the "<" becomes error text; the ">" is then reported on its own.
    let context = parse(&arena, "/** <b x> */");
    assert_eq!(
        message_ids(&context),
        vec!["tsdoc-html-tag-missing-equals", "tsdoc-escape-greater-than"]
    );

    let context = parse(&arena, "/** <b x=y> */");
    assert_eq!(
        message_ids(&context),
        vec!["tsdoc-html-tag-missing-string", "tsdoc-escape-greater-than"]
    );

    let context = parse(&arena, "/** <b */");
    assert_eq!(message_ids(&context), vec!["tsdoc-html-tag-missing-greater-than"]);
}

#[test]
fn test_html_string_and_name_errors() {
    let arena = Bump::new();
    let context = parse(&arena, "/** <b x=\"y> */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::HtmlStringMissingQuote),
        Some("\"")
    );

    let context = parse(&arena, "/** <b x=\"y\"z> */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::TextAfterHtmlString),
        Some("z")
    );

    let context = parse(&arena, "/** <1b> */");
    assert_eq!(
        message_excerpt(&context, TSDocMessageId::MalformedHtmlName),
        Some("1b")
    );
    assert_eq!(count_kind(&context.doc_comment, DocNodeKind::HtmlStartTag), 0);
}

#[test]
fn test_unsupported_html_element() {
    let arena = Bump::new();
    let mut configuration = TSDocConfiguration::new();
    configuration
        .set_supported_html_elements(["b"])
        .expect("valid element names");
    let parser = TSDocParser::new(&configuration);

    let context = parser.parse_string(&arena, "/** <b>ok</b> */");
    assert!(context.log.is_empty());

    let context = parser.parse_string(&arena, "/** <script>bad</script> */");
    assert_eq!(
        context
            .log
            .count_of(TSDocMessageId::UnsupportedHtmlElementName),
        2
    );
}

// ============================================================================
// Paragraphs and excerpts
// ============================================================================

#[test]
fn test_blank_line_splits_paragraphs() {
    let arena = Bump::new();
    let context = parse(&arena, "/**\n * First line\n * still first.\n *\n * Second.\n */");
    let paragraphs: Vec<_> = context
        .doc_comment
        .summary_section
        .nodes()
        .iter()
        .map(|node| match node {
            DocNode::Paragraph(paragraph) => paragraph_text(paragraph),
            other => panic!("unexpected {:?}", other.kind()),
        })
        .collect();
    assert_eq!(
        paragraphs,
        vec!["First line still first.".to_string(), "Second.".to_string()]
    );
}

#[test]
fn test_excerpts_reproduce_comment_body() {
    let arena = Bump::new();
    let context = parse(
        &arena,
        "/**\n * Hello `code` and {@link Foo.bar | text} \\@x <b class=\"c\">y</b> }\n * {@link https://example.com}\n */",
    );
    let expected: String = context.tokens.iter().map(|token| token.text()).collect();
    assert_eq!(excerpt_text(&context.doc_comment), expected);
}

#[test]
fn test_message_locations_point_into_source() {
    let arena = Bump::new();
    let text = "/**\n * Text @whatever\n */";
    let context = parse(&arena, text);
    let message = &context.log.messages()[0];
    assert_eq!(message.text_range.as_str(), "@whatever");
    assert_eq!(message.text_range.location().line, 2);
}

#[test]
fn test_parse_range_inside_larger_buffer() {
    let arena = Bump::new();
    let source = "const a = 1;\n/** Docs here */\nfunction f() {}\n";
    let start = source.find("/**").expect("comment start") as u32;
    let end = (source.find("*/").expect("comment end") + 2) as u32;
    let range = tsdoc_core::TextRange::from_string_range(source, start, end);

    let configuration = TSDocConfiguration::new();
    let context = TSDocParser::new(&configuration).parse_range(&arena, range);
    assert!(context.log.is_empty());
    assert_eq!(context.comment_range.pos(), start);
    assert_eq!(section_text(&context.doc_comment.summary_section), "Docs here");
}
