//! tsdoc_emitter: Doc comment tree to text output.
//!
//! Renders a [`tsdoc_ast::DocComment`] back into a normalized `/** ... */`
//! comment. Whitespace inside paragraphs is collapsed, so parsing the output
//! again yields the same tree shape.

mod emitter;
mod trim;

pub use emitter::TSDocEmitter;
pub use trim::trim_spaces_in_paragraph;
