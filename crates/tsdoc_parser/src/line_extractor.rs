//! Finds the comment framing and strips the leading `*` from each line.

use tsdoc_core::{TextPos, TextRange};
use tsdoc_diagnostics::{ParserMessageLog, TSDocMessageId};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum State {
    /// Looking for the `/` of `/**`.
    BeginComment1,
    /// Expecting the `**` of `/**`.
    BeginComment2,
    /// Collecting text on the line that contains `/**`.
    CollectingFirstLine,
    CollectingLine,
    /// Skipping indentation and the `*` at the start of a line.
    AdvancingLine,
    Done,
}

/// The result of a successful extraction.
#[derive(Debug, Clone)]
pub struct ExtractedComment<'a> {
    /// From `/**` through `*/` inclusive.
    pub comment_range: TextRange<'a>,
    /// The content of each line with framing removed. Blank lines are empty ranges.
    pub lines: Vec<TextRange<'a>>,
}

pub struct LineExtractor;

impl LineExtractor {
    /// Returns `None` and logs a message if `range` does not hold a complete
    /// doc comment.
    pub fn extract<'a>(
        range: TextRange<'a>,
        log: &mut ParserMessageLog<'a>,
    ) -> Option<ExtractedComment<'a>> {
        let buffer = range.buffer();
        let bytes = buffer.as_bytes();
        let end = range.end() as usize;
        let byte_at = |index: usize| if index < end { bytes[index] } else { 0 };

        let mut comment_range_start = 0usize;
        let mut comment_range_end = 0usize;
        let mut collecting_line_start = 0usize;
        let mut collecting_line_end = 0usize;
        let mut next_index = range.pos() as usize;
        let mut state = State::BeginComment1;
        let mut lines = Vec::new();
        let new_range = |pos: usize, end: usize| range.get_new_range(pos as TextPos, end as TextPos);

        while state != State::Done {
            if next_index >= end {
                match state {
                    State::BeginComment1 | State::BeginComment2 => {
                        log.add_message_for_text_range(
                            TSDocMessageId::CommentNotFound,
                            "Expecting a \"/**\" comment",
                            range,
                        );
                    }
                    _ => {
                        log.add_message_for_text_range(
                            TSDocMessageId::CommentMissingClosingDelimiter,
                            "Unexpected end of input",
                            range,
                        );
                    }
                }
                return None;
            }

            let current_index = next_index;
            let current = buffer[current_index..end].chars().next().unwrap_or('\0');
            next_index += current.len_utf8();

            match state {
                State::BeginComment1 => {
                    if current == '/' {
                        comment_range_start = current_index;
                        state = State::BeginComment2;
                    } else if !current.is_whitespace() {
                        log.add_message_for_text_range(
                            TSDocMessageId::CommentMissingOpeningDelimiter,
                            "Expecting a leading \"/**\"",
                            new_range(current_index, next_index),
                        );
                        return None;
                    }
                }
                State::BeginComment2 => {
                    if current == '*' && byte_at(next_index) == b'*' {
                        next_index += 1;
                        collecting_line_start = next_index;
                        collecting_line_end = next_index;
                        state = State::CollectingFirstLine;
                    } else {
                        log.add_message_for_text_range(
                            TSDocMessageId::CommentMissingOpeningDelimiter,
                            "Expecting a leading \"/**\"",
                            new_range(comment_range_start, next_index),
                        );
                        return None;
                    }
                }
                State::CollectingFirstLine | State::CollectingLine => {
                    if current == '\n' {
                        // A blank first line is dropped; other blank lines are kept.
                        if state != State::CollectingFirstLine
                            || collecting_line_end > collecting_line_start
                        {
                            lines.push(new_range(collecting_line_start, collecting_line_end));
                        }
                        collecting_line_start = next_index;
                        collecting_line_end = next_index;
                        state = State::AdvancingLine;
                    } else if current == '*' && byte_at(next_index) == b'/' {
                        if collecting_line_end > collecting_line_start {
                            lines.push(new_range(collecting_line_start, collecting_line_end));
                        }
                        next_index += 1;
                        comment_range_end = next_index;
                        state = State::Done;
                    } else if !current.is_whitespace() {
                        collecting_line_end = next_index;
                    }
                }
                State::AdvancingLine => {
                    if current == '*' {
                        if byte_at(next_index) == b'/' {
                            next_index += 1;
                            comment_range_end = next_index;
                            state = State::Done;
                        } else {
                            if byte_at(next_index) == b' ' {
                                next_index += 1;
                            }
                            collecting_line_start = next_index;
                            collecting_line_end = next_index;
                            state = State::CollectingLine;
                        }
                    } else if current == '\n' {
                        lines.push(new_range(current_index, current_index));
                        collecting_line_start = next_index;
                    } else if !current.is_whitespace() {
                        collecting_line_start = current_index;
                        collecting_line_end = next_index;
                        state = State::CollectingLine;
                    }
                }
                State::Done => {}
            }
        }

        Some(ExtractedComment {
            comment_range: new_range(comment_range_start, comment_range_end),
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> (Option<Vec<String>>, Vec<TSDocMessageId>) {
        let mut log = ParserMessageLog::new();
        let result = LineExtractor::extract(TextRange::from_string(text), &mut log);
        let lines = result.map(|r| r.lines.iter().map(|l| l.to_string()).collect());
        let ids = log.messages().iter().map(|m| m.message_id).collect();
        (lines, ids)
    }

    #[test]
    fn test_multi_line_comment() {
        let (lines, ids) = extract("/**\n * Hello\n *\n *   indented  \n */");
        assert_eq!(
            lines.unwrap(),
            vec!["Hello".to_string(), String::new(), "  indented".to_string()]
        );
        assert!(ids.is_empty());
    }

    #[test]
    fn test_single_line_comment() {
        let (lines, _) = extract("  /** Hello world */");
        assert_eq!(lines.unwrap(), vec![" Hello world".to_string()]);
    }

    #[test]
    fn test_empty_comment() {
        let text = "/***/";
        let mut log = ParserMessageLog::new();
        let result = LineExtractor::extract(TextRange::from_string(text), &mut log).unwrap();
        assert!(result.lines.is_empty());
        assert_eq!(result.comment_range.as_str(), text);
    }

    #[test]
    fn test_line_without_star() {
        let (lines, _) = extract("/**\n   no star here\n */");
        assert_eq!(lines.unwrap(), vec!["no star here".to_string()]);
    }

    #[test]
    fn test_comment_not_found() {
        let (lines, ids) = extract("   ");
        assert!(lines.is_none());
        assert_eq!(ids, vec![TSDocMessageId::CommentNotFound]);
    }

    #[test]
    fn test_missing_opening_delimiter() {
        let (_, ids) = extract("// not a doc comment");
        assert_eq!(ids, vec![TSDocMessageId::CommentMissingOpeningDelimiter]);

        let (_, ids) = extract("x /** */");
        assert_eq!(ids, vec![TSDocMessageId::CommentMissingOpeningDelimiter]);
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let (_, ids) = extract("/** never closed");
        assert_eq!(ids, vec![TSDocMessageId::CommentMissingClosingDelimiter]);

        let (_, ids) = extract("/**/");
        assert_eq!(ids, vec![TSDocMessageId::CommentMissingClosingDelimiter]);
    }

    #[test]
    fn test_non_ascii_content() {
        let (lines, _) = extract("/** héllo wörld */");
        assert_eq!(lines.unwrap(), vec![" héllo wörld".to_string()]);
    }
}
