//! tsdoc_ast: Syntax tree definitions for parsed doc comments.
//!
//! The tree is rooted at [`DocComment`]. Content lives in [`DocSection`]s
//! whose children are [`DocNode`] values; every other structural node is a
//! plain struct field. [`DocNodeRef`] gives a uniform borrowed view over all
//! of them for generic walks.
//!
//! Nodes built by the parser keep [`DocExcerpt`]s pointing back into the
//! token list. Nodes built by hand carry their values directly.

pub mod block;
pub mod code;
pub mod comment;
pub mod container;
pub mod excerpt;
pub mod html;
pub mod inline;
pub mod kind;
pub mod manager;
pub mod node;
pub mod reference;
pub mod text;
pub mod text_content;
pub mod visitor;

// Re-export key types
pub use block::{DocBlock, DocParamBlock, DocParamCollection, ParamBlockExcerpts};
pub use code::{DocCodeSpan, DocFencedCode, FencedCodeExcerpts};
pub use comment::{DocComment, ModifierTagSet, StandardModifierTagSet};
pub use container::{DocParagraph, DocSection};
pub use excerpt::{DocExcerpt, ExcerptKind, NodeText};
pub use html::{DocHtmlAttribute, DocHtmlEndTag, DocHtmlStartTag};
pub use inline::{
    DocBlockTag, DocInheritDocTag, DocInlineTag, DocLinkTag, InlineTagParts, LinkTagExcerpts,
};
pub use kind::DocNodeKind;
pub use manager::{DocNodeDefinition, DocNodeManager, DocNodeManagerError, TSDOC_PACKAGE_NAME};
pub use node::{DocNode, DocNodeRef};
pub use reference::{
    DocDeclarationReference, DocMemberIdentifier, DocMemberReference, DocMemberSelector,
    DocMemberSymbol, MemberReferenceExcerpts, SelectorKind,
};
pub use text::{DocErrorText, DocEscapedText, DocPlainText, DocSoftBreak, EscapeStyle};
pub use text_content::has_any_text_content;
pub use visitor::{walk, DocVisitor};
