//! Node kind tags.

use std::fmt;

/// The kind of every node that can appear in a doc comment tree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum DocNodeKind {
    Block,
    BlockTag,
    Excerpt,
    FencedCode,
    CodeSpan,
    Comment,
    DeclarationReference,
    ErrorText,
    EscapedText,
    HtmlAttribute,
    HtmlEndTag,
    HtmlStartTag,
    InheritDocTag,
    InlineTag,
    LinkTag,
    MemberIdentifier,
    MemberReference,
    MemberSelector,
    MemberSymbol,
    Paragraph,
    ParamBlock,
    ParamCollection,
    PlainText,
    Section,
    SoftBreak,
}

impl DocNodeKind {
    /// Every node kind, in declaration order.
    pub const ALL: &'static [DocNodeKind] = &[
        DocNodeKind::Block,
        DocNodeKind::BlockTag,
        DocNodeKind::Excerpt,
        DocNodeKind::FencedCode,
        DocNodeKind::CodeSpan,
        DocNodeKind::Comment,
        DocNodeKind::DeclarationReference,
        DocNodeKind::ErrorText,
        DocNodeKind::EscapedText,
        DocNodeKind::HtmlAttribute,
        DocNodeKind::HtmlEndTag,
        DocNodeKind::HtmlStartTag,
        DocNodeKind::InheritDocTag,
        DocNodeKind::InlineTag,
        DocNodeKind::LinkTag,
        DocNodeKind::MemberIdentifier,
        DocNodeKind::MemberReference,
        DocNodeKind::MemberSelector,
        DocNodeKind::MemberSymbol,
        DocNodeKind::Paragraph,
        DocNodeKind::ParamBlock,
        DocNodeKind::ParamCollection,
        DocNodeKind::PlainText,
        DocNodeKind::Section,
        DocNodeKind::SoftBreak,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocNodeKind::Block => "Block",
            DocNodeKind::BlockTag => "BlockTag",
            DocNodeKind::Excerpt => "Excerpt",
            DocNodeKind::FencedCode => "FencedCode",
            DocNodeKind::CodeSpan => "CodeSpan",
            DocNodeKind::Comment => "Comment",
            DocNodeKind::DeclarationReference => "DeclarationReference",
            DocNodeKind::ErrorText => "ErrorText",
            DocNodeKind::EscapedText => "EscapedText",
            DocNodeKind::HtmlAttribute => "HtmlAttribute",
            DocNodeKind::HtmlEndTag => "HtmlEndTag",
            DocNodeKind::HtmlStartTag => "HtmlStartTag",
            DocNodeKind::InheritDocTag => "InheritDocTag",
            DocNodeKind::InlineTag => "InlineTag",
            DocNodeKind::LinkTag => "LinkTag",
            DocNodeKind::MemberIdentifier => "MemberIdentifier",
            DocNodeKind::MemberReference => "MemberReference",
            DocNodeKind::MemberSelector => "MemberSelector",
            DocNodeKind::MemberSymbol => "MemberSymbol",
            DocNodeKind::Paragraph => "Paragraph",
            DocNodeKind::ParamBlock => "ParamBlock",
            DocNodeKind::ParamCollection => "ParamCollection",
            DocNodeKind::PlainText => "PlainText",
            DocNodeKind::Section => "Section",
            DocNodeKind::SoftBreak => "SoftBreak",
        }
    }
}

impl fmt::Display for DocNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
