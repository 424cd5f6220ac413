//! tsdoc_parser: Parser for TSDoc doc comments.
//!
//! Finds the `/** ... */` comment in the input, tokenizes its lines, and
//! builds a [`DocComment`](tsdoc_ast::DocComment) tree. Malformed input never
//! aborts a parse: problems are reported in the message log and the offending
//! text is kept in the tree as error text.

mod line_extractor;
mod node_parser;
mod paragraph_splitter;
mod parser;
mod parser_context;
mod token_reader;

pub use line_extractor::{ExtractedComment, LineExtractor};
pub use paragraph_splitter::ParagraphSplitter;
pub use parser::TSDocParser;
pub use parser_context::ParserContext;
pub use token_reader::TokenReader;
