// Mon Jan 19 2026 - Alex

pub mod scanner;
pub mod span;

pub use scanner::{Brace, BraceHit, BraceScanner};
pub use span::SourceSpan;

use once_cell::sync::Lazy;
use regex::Regex;

static STRUCT_INTRODUCER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:typedef\s+)?struct\b").expect("struct introducer pattern"));

/// Finds struct definitions in raw source text.
///
/// This is a brace scanner, not a parser. Every line that starts with `struct`
/// or `typedef struct` opens a candidate whose body runs from the first live
/// `{` to its matching `}`. The candidate ends on the first line at or after
/// the closing brace that contains a `;`. Scanning continues after that line,
/// so nested structs end up inside their parent's span.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructLocator;

impl StructLocator {
    pub fn new() -> Self {
        Self
    }

    /// Returns the struct whose brace body contains `cursor_line`.
    pub fn locate(&self, source: &str, cursor_line: usize) -> Option<SourceSpan> {
        let lines: Vec<&str> = source.lines().collect();
        if cursor_line >= lines.len() {
            log::debug!("Cursor line {} is outside {} lines", cursor_line, lines.len());
            return None;
        }

        let found = self
            .scan(&lines)
            .into_iter()
            .find(|span| span.body_contains(cursor_line));

        match &found {
            Some(span) => log::debug!("Cursor line {} is inside struct at {}", cursor_line, span),
            None => log::debug!("No struct body contains line {}", cursor_line),
        }
        found
    }

    /// Returns every top-level struct span in source order.
    pub fn candidates(&self, source: &str) -> Vec<SourceSpan> {
        let lines: Vec<&str> = source.lines().collect();
        self.scan(&lines)
    }

    fn scan(&self, lines: &[&str]) -> Vec<SourceSpan> {
        let mut spans = Vec::new();
        let mut line = 0;

        while line < lines.len() {
            let trimmed = lines[line].trim();
            if trimmed.is_empty() || trimmed.starts_with("//") || !STRUCT_INTRODUCER.is_match(trimmed) {
                line += 1;
                continue;
            }

            match self.scan_candidate(lines, line) {
                Some(span) => {
                    log::trace!("Struct candidate at {}", span);
                    line = span.end_line + 1;
                    spans.push(span);
                }
                None => {
                    log::trace!("Discarding unterminated struct starting at line {}", line);
                    line += 1;
                }
            }
        }

        spans
    }

    fn scan_candidate(&self, lines: &[&str], start_line: usize) -> Option<SourceSpan> {
        let mut scanner = BraceScanner::new(lines, start_line);
        let open = scanner.find_open()?;
        let close = scanner.find_matching_close()?;

        let end_line = (close.line..lines.len())
            .find(|&idx| lines[idx].contains(';'))
            .unwrap_or(close.line);

        Some(SourceSpan {
            start_line,
            body_open_line: open.line,
            body_close_line: close.line,
            end_line,
            text: lines[start_line..=end_line].join("\n"),
        })
    }
}
