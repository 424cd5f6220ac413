//! The owned content node enum and the borrowed view over every node type.

use crate::block::{DocBlock, DocParamBlock, DocParamCollection};
use crate::code::{DocCodeSpan, DocFencedCode};
use crate::comment::DocComment;
use crate::container::{DocParagraph, DocSection};
use crate::excerpt::DocExcerpt;
use crate::html::{DocHtmlAttribute, DocHtmlEndTag, DocHtmlStartTag};
use crate::inline::{DocBlockTag, DocInheritDocTag, DocInlineTag, DocLinkTag};
use crate::kind::DocNodeKind;
use crate::reference::{
    DocDeclarationReference, DocMemberIdentifier, DocMemberReference, DocMemberSelector,
    DocMemberSymbol,
};
use crate::text::{DocErrorText, DocEscapedText, DocPlainText, DocSoftBreak};

// ============================================================================
// DocNode
// ============================================================================

/// A node that can be a child of a [`DocSection`] or [`DocParagraph`].
#[derive(Debug, Clone)]
pub enum DocNode<'a> {
    Paragraph(DocParagraph<'a>),
    FencedCode(DocFencedCode<'a>),
    HtmlStartTag(DocHtmlStartTag<'a>),
    HtmlEndTag(DocHtmlEndTag<'a>),
    BlockTag(DocBlockTag<'a>),
    CodeSpan(DocCodeSpan<'a>),
    ErrorText(DocErrorText<'a>),
    EscapedText(DocEscapedText<'a>),
    InlineTag(DocInlineTag<'a>),
    LinkTag(DocLinkTag<'a>),
    InheritDocTag(DocInheritDocTag<'a>),
    PlainText(DocPlainText<'a>),
    SoftBreak(DocSoftBreak<'a>),
}

impl<'a> DocNode<'a> {
    pub fn kind(&self) -> DocNodeKind {
        match self {
            DocNode::Paragraph(_) => DocNodeKind::Paragraph,
            DocNode::FencedCode(_) => DocNodeKind::FencedCode,
            DocNode::HtmlStartTag(_) => DocNodeKind::HtmlStartTag,
            DocNode::HtmlEndTag(_) => DocNodeKind::HtmlEndTag,
            DocNode::BlockTag(_) => DocNodeKind::BlockTag,
            DocNode::CodeSpan(_) => DocNodeKind::CodeSpan,
            DocNode::ErrorText(_) => DocNodeKind::ErrorText,
            DocNode::EscapedText(_) => DocNodeKind::EscapedText,
            DocNode::InlineTag(_) => DocNodeKind::InlineTag,
            DocNode::LinkTag(_) => DocNodeKind::LinkTag,
            DocNode::InheritDocTag(_) => DocNodeKind::InheritDocTag,
            DocNode::PlainText(_) => DocNodeKind::PlainText,
            DocNode::SoftBreak(_) => DocNodeKind::SoftBreak,
        }
    }

    pub fn as_node_ref(&self) -> DocNodeRef<'_, 'a> {
        match self {
            DocNode::Paragraph(n) => DocNodeRef::Paragraph(n),
            DocNode::FencedCode(n) => DocNodeRef::FencedCode(n),
            DocNode::HtmlStartTag(n) => DocNodeRef::HtmlStartTag(n),
            DocNode::HtmlEndTag(n) => DocNodeRef::HtmlEndTag(n),
            DocNode::BlockTag(n) => DocNodeRef::BlockTag(n),
            DocNode::CodeSpan(n) => DocNodeRef::CodeSpan(n),
            DocNode::ErrorText(n) => DocNodeRef::ErrorText(n),
            DocNode::EscapedText(n) => DocNodeRef::EscapedText(n),
            DocNode::InlineTag(n) => DocNodeRef::InlineTag(n),
            DocNode::LinkTag(n) => DocNodeRef::LinkTag(n),
            DocNode::InheritDocTag(n) => DocNodeRef::InheritDocTag(n),
            DocNode::PlainText(n) => DocNodeRef::PlainText(n),
            DocNode::SoftBreak(n) => DocNodeRef::SoftBreak(n),
        }
    }
}

macro_rules! impl_from_node {
    ($($variant:ident($ty:ident)),* $(,)?) => {
        $(
            impl<'a> From<$ty<'a>> for DocNode<'a> {
                fn from(node: $ty<'a>) -> Self {
                    DocNode::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    Paragraph(DocParagraph),
    FencedCode(DocFencedCode),
    HtmlStartTag(DocHtmlStartTag),
    HtmlEndTag(DocHtmlEndTag),
    BlockTag(DocBlockTag),
    CodeSpan(DocCodeSpan),
    ErrorText(DocErrorText),
    EscapedText(DocEscapedText),
    InlineTag(DocInlineTag),
    LinkTag(DocLinkTag),
    InheritDocTag(DocInheritDocTag),
    PlainText(DocPlainText),
    SoftBreak(DocSoftBreak),
}

// ============================================================================
// DocNodeRef
// ============================================================================

/// A borrowed reference to any node in the tree.
///
/// `'n` is the borrow of the tree, `'a` the lifetime of the parsed input.
#[derive(Debug, Clone, Copy)]
pub enum DocNodeRef<'n, 'a> {
    Block(&'n DocBlock<'a>),
    BlockTag(&'n DocBlockTag<'a>),
    CodeSpan(&'n DocCodeSpan<'a>),
    Comment(&'n DocComment<'a>),
    DeclarationReference(&'n DocDeclarationReference<'a>),
    ErrorText(&'n DocErrorText<'a>),
    EscapedText(&'n DocEscapedText<'a>),
    Excerpt(&'n DocExcerpt<'a>),
    FencedCode(&'n DocFencedCode<'a>),
    HtmlAttribute(&'n DocHtmlAttribute<'a>),
    HtmlEndTag(&'n DocHtmlEndTag<'a>),
    HtmlStartTag(&'n DocHtmlStartTag<'a>),
    InheritDocTag(&'n DocInheritDocTag<'a>),
    InlineTag(&'n DocInlineTag<'a>),
    LinkTag(&'n DocLinkTag<'a>),
    MemberIdentifier(&'n DocMemberIdentifier<'a>),
    MemberReference(&'n DocMemberReference<'a>),
    MemberSelector(&'n DocMemberSelector<'a>),
    MemberSymbol(&'n DocMemberSymbol<'a>),
    Paragraph(&'n DocParagraph<'a>),
    ParamBlock(&'n DocParamBlock<'a>),
    ParamCollection(&'n DocParamCollection<'a>),
    PlainText(&'n DocPlainText<'a>),
    Section(&'n DocSection<'a>),
    SoftBreak(&'n DocSoftBreak<'a>),
}

fn excerpts<'n, 'a>(items: Vec<&'n DocExcerpt<'a>>) -> impl Iterator<Item = DocNodeRef<'n, 'a>> {
    items.into_iter().map(DocNodeRef::Excerpt)
}

impl<'n, 'a> DocNodeRef<'n, 'a> {
    pub fn kind(&self) -> DocNodeKind {
        match self {
            DocNodeRef::Block(_) => DocNodeKind::Block,
            DocNodeRef::BlockTag(_) => DocNodeKind::BlockTag,
            DocNodeRef::CodeSpan(_) => DocNodeKind::CodeSpan,
            DocNodeRef::Comment(_) => DocNodeKind::Comment,
            DocNodeRef::DeclarationReference(_) => DocNodeKind::DeclarationReference,
            DocNodeRef::ErrorText(_) => DocNodeKind::ErrorText,
            DocNodeRef::EscapedText(_) => DocNodeKind::EscapedText,
            DocNodeRef::Excerpt(_) => DocNodeKind::Excerpt,
            DocNodeRef::FencedCode(_) => DocNodeKind::FencedCode,
            DocNodeRef::HtmlAttribute(_) => DocNodeKind::HtmlAttribute,
            DocNodeRef::HtmlEndTag(_) => DocNodeKind::HtmlEndTag,
            DocNodeRef::HtmlStartTag(_) => DocNodeKind::HtmlStartTag,
            DocNodeRef::InheritDocTag(_) => DocNodeKind::InheritDocTag,
            DocNodeRef::InlineTag(_) => DocNodeKind::InlineTag,
            DocNodeRef::LinkTag(_) => DocNodeKind::LinkTag,
            DocNodeRef::MemberIdentifier(_) => DocNodeKind::MemberIdentifier,
            DocNodeRef::MemberReference(_) => DocNodeKind::MemberReference,
            DocNodeRef::MemberSelector(_) => DocNodeKind::MemberSelector,
            DocNodeRef::MemberSymbol(_) => DocNodeKind::MemberSymbol,
            DocNodeRef::Paragraph(_) => DocNodeKind::Paragraph,
            DocNodeRef::ParamBlock(_) => DocNodeKind::ParamBlock,
            DocNodeRef::ParamCollection(_) => DocNodeKind::ParamCollection,
            DocNodeRef::PlainText(_) => DocNodeKind::PlainText,
            DocNodeRef::Section(_) => DocNodeKind::Section,
            DocNodeRef::SoftBreak(_) => DocNodeKind::SoftBreak,
        }
    }

    /// The children of this node in source order, with absent parts omitted.
    ///
    /// For a parsed tree, concatenating the text of every [`DocExcerpt`]
    /// reached by a depth-first walk reproduces the comment body.
    pub fn child_nodes(&self) -> Vec<DocNodeRef<'n, 'a>> {
        let mut children = Vec::new();
        match *self {
            DocNodeRef::Block(block) => {
                children.push(DocNodeRef::BlockTag(block.block_tag()));
                children.push(DocNodeRef::Section(block.content()));
            }
            DocNodeRef::BlockTag(tag) => {
                children.extend(tag.tag_name_excerpt().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::CodeSpan(code_span) => children.extend(excerpts(code_span.excerpts())),
            DocNodeRef::Comment(comment) => {
                children.push(DocNodeRef::Section(&comment.summary_section));
                children.extend(comment.remarks_block.as_ref().map(DocNodeRef::Block));
                children.extend(comment.private_remarks.as_ref().map(DocNodeRef::Block));
                children.extend(comment.deprecated_block.as_ref().map(DocNodeRef::Block));
                children.push(DocNodeRef::ParamCollection(&comment.params));
                children.push(DocNodeRef::ParamCollection(&comment.type_params));
                children.extend(comment.returns_block.as_ref().map(DocNodeRef::Block));
                children.extend(comment.custom_blocks.iter().map(DocNodeRef::Block));
                children.extend(comment.see_blocks.iter().map(DocNodeRef::Block));
                children.extend(comment.inherit_doc_tag.as_ref().map(DocNodeRef::InheritDocTag));
                children.extend(comment.modifier_tag_set.nodes().iter().map(DocNodeRef::BlockTag));
            }
            DocNodeRef::DeclarationReference(reference) => {
                children.extend(excerpts(reference.leading_excerpts()));
                children.extend(
                    reference
                        .member_references()
                        .iter()
                        .map(DocNodeRef::MemberReference),
                );
            }
            DocNodeRef::ErrorText(error_text) => {
                children.extend(error_text.text_excerpt().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::EscapedText(escaped) => {
                children.extend(escaped.encoded_text_excerpt().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::Excerpt(_) => {}
            DocNodeRef::FencedCode(fenced) => children.extend(excerpts(fenced.excerpts())),
            DocNodeRef::HtmlAttribute(attribute) => children.extend(excerpts(attribute.excerpts())),
            DocNodeRef::HtmlEndTag(end_tag) => children.extend(excerpts(end_tag.excerpts())),
            DocNodeRef::HtmlStartTag(start_tag) => {
                children.extend(excerpts(start_tag.leading_excerpts()));
                children.extend(
                    start_tag
                        .html_attributes()
                        .iter()
                        .map(DocNodeRef::HtmlAttribute),
                );
                children.extend(start_tag.closing_delimiter().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::InheritDocTag(tag) => {
                children.extend(excerpts(tag.parts().leading_excerpts()));
                children.extend(
                    tag.declaration_reference()
                        .map(DocNodeRef::DeclarationReference),
                );
                children.extend(tag.parts().closing_delimiter().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::InlineTag(tag) => children.extend(excerpts(tag.excerpts())),
            DocNodeRef::LinkTag(link) => {
                children.extend(excerpts(link.leading_excerpts()));
                children.extend(
                    link.code_destination()
                        .map(DocNodeRef::DeclarationReference),
                );
                children.extend(link.url_excerpt().map(DocNodeRef::Excerpt));
                children.extend(excerpts(link.trailing_excerpts()));
            }
            DocNodeRef::MemberIdentifier(identifier) => {
                children.extend(excerpts(identifier.excerpts()))
            }
            DocNodeRef::MemberReference(member) => {
                children.extend(excerpts(member.leading_excerpts()));
                children.extend(member.member_identifier().map(DocNodeRef::MemberIdentifier));
                children.extend(member.member_symbol().map(DocNodeRef::MemberSymbol));
                children.extend(excerpts(member.middle_excerpts()));
                children.extend(member.selector().map(DocNodeRef::MemberSelector));
                children.extend(excerpts(member.trailing_excerpts()));
            }
            DocNodeRef::MemberSelector(selector) => {
                children.extend(selector.excerpt().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::MemberSymbol(symbol) => {
                children.extend(excerpts(symbol.leading_excerpts()));
                children.push(DocNodeRef::DeclarationReference(symbol.symbol_reference()));
                children.extend(symbol.right_bracket().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::Paragraph(paragraph) => {
                children.extend(paragraph.nodes().iter().map(DocNode::as_node_ref));
            }
            DocNodeRef::ParamBlock(block) => {
                children.push(DocNodeRef::BlockTag(block.block_tag()));
                children.extend(excerpts(block.excerpts()));
                children.push(DocNodeRef::Section(block.content()));
            }
            DocNodeRef::ParamCollection(collection) => {
                children.extend(collection.blocks().iter().map(DocNodeRef::ParamBlock));
            }
            DocNodeRef::PlainText(text) => {
                children.extend(text.text_excerpt().map(DocNodeRef::Excerpt));
            }
            DocNodeRef::Section(section) => {
                children.extend(section.nodes().iter().map(DocNode::as_node_ref));
            }
            DocNodeRef::SoftBreak(soft_break) => {
                children.extend(soft_break.soft_break_excerpt().map(DocNodeRef::Excerpt));
            }
        }
        children
    }
}
