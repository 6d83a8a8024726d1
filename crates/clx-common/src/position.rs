//! Line/column positions.
//!
//! The AST and diagnostics carry byte offsets; reporters convert them to
//! 0-indexed line and character positions through a `LineMap`.

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Position {
    pub line: u32,
    /// 0-indexed column, counted in chars
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Line map for offset -> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// line_starts[0] is always 0
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];

        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push((i + 1) as u32);
            } else if ch == '\r' {
                let next_idx = i + 1;
                // \r\n: the \n creates the line start
                if source.as_bytes().get(next_idx) != Some(&b'\n') {
                    line_starts.push(next_idx as u32);
                }
            }
        }

        LineMap { line_starts }
    }

    /// Convert a byte offset to a Position (line, character).
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");

        Position {
            line: line as u32,
            character: slice.chars().count() as u32,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 0-indexed line without its terminator.
    pub fn line_text<'a>(&self, line: usize, source: &'a str) -> Option<&'a str> {
        let start = *self.line_starts.get(line)? as usize;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|&s| s as usize)
            .unwrap_or(source.len());
        source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }
}
