use tsdoc_ast::DocComment;
use tsdoc_core::TextRange;
use tsdoc_diagnostics::ParserMessageLog;
use tsdoc_scanner::Token;

/// Everything produced by one parse.
///
/// Token sequences inside `doc_comment` and `log` point into `tokens`, which
/// lives in the caller's arena for `'a`.
#[derive(Debug, Clone)]
pub struct ParserContext<'a> {
    /// The range that was handed to the parser.
    pub source_range: TextRange<'a>,
    /// From `/**` through `*/`, or empty if no comment was found.
    pub comment_range: TextRange<'a>,
    /// Comment lines with the framing removed.
    pub lines: Vec<TextRange<'a>>,
    pub tokens: &'a [Token<'a>],
    pub doc_comment: DocComment<'a>,
    pub log: ParserMessageLog<'a>,
}

impl<'a> ParserContext<'a> {
    pub fn new(source_range: TextRange<'a>) -> Self {
        Self {
            source_range,
            comment_range: TextRange::empty(),
            lines: Vec::new(),
            tokens: &[],
            doc_comment: DocComment::new(),
            log: ParserMessageLog::new(),
        }
    }
}
