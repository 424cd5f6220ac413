//! Entry point that runs every parsing stage over one comment.

use bumpalo::Bump;
use tracing::{debug, debug_span, trace};
use tsdoc_config::TSDocConfiguration;
use tsdoc_core::TextRange;
use tsdoc_scanner::{Token, Tokenizer};

use crate::line_extractor::LineExtractor;
use crate::node_parser::NodeParser;
use crate::paragraph_splitter::ParagraphSplitter;
use crate::parser_context::ParserContext;

/// Parses doc comments against a configuration.
///
/// The parser holds no per-parse state, so one instance can be shared by
/// any number of threads. Tokens are allocated in the caller's arena and
/// every node in the result borrows from it.
///
/// ```
/// use bumpalo::Bump;
/// use tsdoc_config::TSDocConfiguration;
/// use tsdoc_parser::TSDocParser;
///
/// let configuration = TSDocConfiguration::new();
/// let parser = TSDocParser::new(&configuration);
/// let arena = Bump::new();
/// let context = parser.parse_string(&arena, "/** Hello */");
/// assert!(context.log.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TSDocParser<'c> {
    configuration: &'c TSDocConfiguration,
}

impl<'c> TSDocParser<'c> {
    pub fn new(configuration: &'c TSDocConfiguration) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &'c TSDocConfiguration {
        self.configuration
    }

    /// Parse `text`, which must contain a single `/** ... */` comment
    /// optionally surrounded by whitespace.
    pub fn parse_string<'a>(&self, arena: &'a Bump, text: &'a str) -> ParserContext<'a> {
        self.parse_range(arena, TextRange::from_string(text))
    }

    /// Parse the comment inside `range`. Positions in the result are
    /// offsets into the full buffer behind `range`.
    pub fn parse_range<'a>(&self, arena: &'a Bump, range: TextRange<'a>) -> ParserContext<'a> {
        let _span = debug_span!("parse", pos = range.pos(), len = range.len()).entered();

        let mut context = ParserContext::new(range);

        let Some(extracted) = LineExtractor::extract(range, &mut context.log) else {
            debug!(messages = context.log.len(), "no doc comment found");
            return context;
        };

        context.comment_range = extracted.comment_range;
        context.lines = extracted.lines;

        let tokens: &'a [Token<'a>] = arena.alloc_slice_copy(&Tokenizer::read_tokens(&context.lines));
        context.tokens = tokens;
        trace!(lines = context.lines.len(), tokens = tokens.len(), "tokenized comment");

        let log = std::mem::take(&mut context.log);
        let node_parser = NodeParser::new(self.configuration, tokens, context.comment_range, log);
        let (mut doc_comment, log) = node_parser.parse();

        ParagraphSplitter::split_paragraphs(&mut doc_comment, self.configuration.doc_node_manager());

        context.doc_comment = doc_comment;
        context.log = log;
        debug!(messages = context.log.len(), "parsed doc comment");
        context
    }
}
