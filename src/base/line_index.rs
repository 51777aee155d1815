//! Line/column conversion, used only at the diagnostics/hover boundary where
//! a caller wants human-facing positions instead of byte offsets. The
//! mapping algebra itself (§4.C) is defined entirely in byte offsets and
//! never needs this.

use text_size::TextSize;

/// A 0-indexed line/column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets in one source text to line/column positions.
///
/// Built once per text (views are re-indexed on every change; see
/// `spec.md` §4.E, `Fresh -> Stale` on text change).
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line, including line 0.
    newlines: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut newlines = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                newlines.push(TextSize::new(i as u32 + 1));
            }
        }
        Self {
            newlines,
            len: TextSize::new(text.len() as u32),
        }
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = match self.newlines.binary_search(&offset) {
            Ok(l) => l,
            Err(l) => l - 1,
        };
        let col = offset - self.newlines[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    pub fn offset(&self, pos: LineCol) -> TextSize {
        let line_start = self
            .newlines
            .get(pos.line as usize)
            .copied()
            .unwrap_or(self.len);
        (line_start + TextSize::new(pos.col)).min(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_offsets_across_lines() {
        let index = LineIndex::new("abc\ndef\nghi");
        assert_eq!(
            index.line_col(TextSize::new(0)),
            LineCol { line: 0, col: 0 }
        );
        assert_eq!(
            index.line_col(TextSize::new(4)),
            LineCol { line: 1, col: 0 }
        );
        assert_eq!(
            index.line_col(TextSize::new(9)),
            LineCol { line: 2, col: 1 }
        );
        assert_eq!(index.offset(LineCol { line: 1, col: 2 }), TextSize::new(6));
    }
}
