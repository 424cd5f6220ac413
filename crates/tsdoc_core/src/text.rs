//! Text range types for source location tracking.
//!
//! A [`TextRange`] is a cheap, copyable view into a borrowed source buffer.
//! Tokens, excerpts, and diagnostics all carry ranges that point back into
//! the text the caller handed to the parser.

use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// An immutable `[pos, end)` window over a shared source buffer.
///
/// Invariant: `pos <= end <= buffer.len()`, and both offsets fall on UTF-8
/// character boundaries.
#[derive(Copy, Clone)]
pub struct TextRange<'a> {
    buffer: &'a str,
    pos: TextPos,
    end: TextPos,
}

impl TextRange<'static> {
    /// The empty range over the empty buffer.
    #[inline]
    pub fn empty() -> Self {
        TextRange {
            buffer: "",
            pos: 0,
            end: 0,
        }
    }
}

impl<'a> TextRange<'a> {
    /// Create a range spanning an entire buffer.
    #[inline]
    pub fn from_string(buffer: &'a str) -> Self {
        Self::from_string_range(buffer, 0, buffer.len() as TextPos)
    }

    /// Create a range over a subset of a buffer.
    pub fn from_string_range(buffer: &'a str, pos: TextPos, end: TextPos) -> Self {
        let range = TextRange { buffer, pos, end };
        range.validate_bounds(pos, end);
        range
    }

    /// Derive a sibling range that shares this range's buffer.
    #[inline]
    pub fn get_new_range(&self, pos: TextPos, end: TextPos) -> TextRange<'a> {
        self.validate_bounds(pos, end);
        TextRange {
            buffer: self.buffer,
            pos,
            end,
        }
    }

    /// The full source buffer this range points into.
    #[inline]
    pub fn buffer(&self) -> &'a str {
        self.buffer
    }

    /// The byte offset where this range starts (inclusive).
    #[inline]
    pub fn pos(&self) -> TextPos {
        self.pos
    }

    /// The byte offset where this range ends (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.end
    }

    /// The length of this range in bytes.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    /// Whether this range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }

    /// The text covered by this range.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        &self.buffer[self.to_range()]
    }

    /// The 1-based line and column of the start of this range.
    pub fn location(&self) -> LineAndColumn {
        LineMap::new(self.buffer).line_and_column_of(self.pos)
    }

    /// Whether two ranges view the same buffer allocation.
    #[inline]
    pub fn shares_buffer(&self, other: &TextRange<'_>) -> bool {
        std::ptr::eq(self.buffer.as_ptr(), other.buffer.as_ptr())
            && self.buffer.len() == other.buffer.len()
    }

    fn validate_bounds(&self, pos: TextPos, end: TextPos) {
        assert!(pos <= end, "TextRange: pos {} is after end {}", pos, end);
        assert!(
            end as usize <= self.buffer.len(),
            "TextRange: end {} exceeds buffer length {}",
            end,
            self.buffer.len()
        );
        assert!(
            self.buffer.is_char_boundary(pos as usize) && self.buffer.is_char_boundary(end as usize),
            "TextRange: {}..{} does not fall on character boundaries",
            pos,
            end
        );
    }
}

impl PartialEq for TextRange<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.shares_buffer(other) && self.pos == other.pos && self.end == other.end
    }
}

impl Eq for TextRange<'_> {}

impl fmt::Debug for TextRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

impl fmt::Display for TextRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line and column information derived from source text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for LineAndColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line, self.column)
    }
}

/// A map from byte offsets to line numbers, built from source text.
/// This is used to convert byte offsets to line/column positions for diagnostics.
#[derive(Debug, Clone)]
pub struct LineMap<'a> {
    text: &'a str,
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl<'a> LineMap<'a> {
    /// Build a line map from source text.
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { text, line_starts }
    }

    /// Get the line number (0-based) for a byte offset.
    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    /// Get the 1-based line and column for a byte offset.
    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize] as usize;
        let end = (pos as usize).min(self.text.len());
        let column = self.text[line_start..end].chars().count() as u32;
        LineAndColumn {
            line: line + 1,
            column: column + 1,
        }
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_range_slices_buffer() {
        let range = TextRange::from_string("hello world");
        let word = range.get_new_range(6, 11);
        assert_eq!(word.as_str(), "world");
        assert_eq!(word.len(), 5);
        assert!(!word.is_empty());
        assert_eq!(word.to_string(), "world");
    }

    #[test]
    fn test_text_range_equality_requires_same_buffer() {
        let text = String::from("abcabc");
        let other = String::from("abcabc");
        let a = TextRange::from_string_range(&text, 0, 3);
        let b = TextRange::from_string_range(&text, 0, 3);
        let c = TextRange::from_string_range(&other, 0, 3);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_range() {
        let empty = TextRange::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    #[should_panic]
    fn test_range_past_end_panics() {
        TextRange::from_string_range("abc", 1, 4);
    }

    #[test]
    #[should_panic]
    fn test_range_inside_character_panics() {
        TextRange::from_string_range("é", 0, 1);
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0); // newline char
        assert_eq!(map.line_of(6), 1); // start of line2
        assert_eq!(map.line_of(12), 2);

        let lc = map.line_and_column_of(8);
        assert_eq!(lc, LineAndColumn::new(2, 3));
    }

    #[test]
    fn test_location_counts_characters() {
        let text = "/**\n * é@x */";
        let range = TextRange::from_string(text);
        let at = text.find('@').unwrap() as TextPos;
        assert_eq!(range.get_new_range(at, at + 1).location(), LineAndColumn::new(2, 5));
    }
}
