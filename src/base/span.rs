//! Offset conversion between UTF-8 bytes, chars and line/column pairs.
//!
//! The CST works in byte offsets; everything reported to callers is in
//! chars, which is what editors and the analyzer API count in.

pub use text_size::{TextRange, TextSize};

use super::position::{Position, Span};

/// Zero-based line and column, column counted in chars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Precomputed line starts and char boundaries of a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of every line
    line_starts: Vec<TextSize>,
    /// Byte offset of every char boundary, plus the end of text; empty for
    /// ASCII-only text where bytes and chars coincide
    char_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(i, _)| TextSize::new(i as u32 + 1)),
        );

        let char_starts = if text.is_ascii() {
            Vec::new()
        } else {
            text.char_indices()
                .map(|(i, _)| TextSize::new(i as u32))
                .chain(std::iter::once(TextSize::of(text)))
                .collect()
        };

        Self {
            line_starts,
            char_starts,
            len: TextSize::of(text),
        }
    }

    /// Length of the text in bytes
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    /// Number of chars in the text
    pub fn len_chars(&self) -> usize {
        self.char_offset(self.len)
    }

    /// Char index of a byte offset. Offsets inside a multi-byte char map to
    /// that char.
    pub fn char_offset(&self, offset: TextSize) -> usize {
        let offset = offset.min(self.len);
        if self.char_starts.is_empty() {
            return u32::from(offset) as usize;
        }
        match self.char_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Byte offset of a char index, `None` past the end of the text
    pub fn byte_offset(&self, char_offset: usize) -> Option<TextSize> {
        if self.char_starts.is_empty() {
            let offset = u32::try_from(char_offset).ok().map(TextSize::new)?;
            return (offset <= self.len).then_some(offset);
        }
        self.char_starts.get(char_offset).copied()
    }

    /// Char range of a byte range
    pub fn char_range(&self, range: TextRange) -> std::ops::Range<usize> {
        self.char_offset(range.start())..self.char_offset(range.end())
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let col = self.char_offset(offset) - self.char_offset(line_start);
        LineCol {
            line: line as u32,
            col: col as u32,
        }
    }

    /// Line/column span of a byte range
    pub fn span(&self, range: TextRange) -> Span {
        let start = self.line_col(range.start());
        let end = self.line_col(range.end());
        Span::new(
            Position::new(start.line as usize, start.col as usize),
            Position::new(end.line as usize, end.col as usize),
        )
    }
}
