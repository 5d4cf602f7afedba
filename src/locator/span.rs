// Mon Jan 19 2026 - Alex

use serde::Serialize;
use std::fmt;

/// Textual extent of one struct definition. Line numbers are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    pub start_line: usize,
    pub body_open_line: usize,
    pub body_close_line: usize,
    pub end_line: usize,
    pub text: String,
}

impl SourceSpan {
    pub fn body_contains(&self, line: usize) -> bool {
        self.body_open_line <= line && line <= self.body_close_line
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lines {}-{} (body {}-{})",
            self.start_line, self.end_line, self.body_open_line, self.body_close_line
        )
    }
}
