//! tsdoc_scanner: Tokenizer for the contents of a TSDoc comment.
//!
//! The tokenizer runs over the per-line ranges produced by comment
//! extraction and yields a flat token list with:
//! - one token per significant punctuation character
//! - merged runs of spacing, ASCII words, and other characters
//! - a synthetic newline after every line and one trailing end-of-input
//!
//! [`TokenSequence`] is the excerpt unit that syntax nodes hold onto.

mod char_codes;
mod token;
mod token_sequence;
mod tokenizer;

pub use token::{Token, TokenKind};
pub use token_sequence::TokenSequence;
pub use tokenizer::Tokenizer;
