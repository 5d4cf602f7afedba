// Mon Jan 19 2026 - Alex

/// Brace kinds reported by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brace {
    Open,
    Close,
}

/// Position of a brace found by [`BraceScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceHit {
    pub line: usize,
    pub column: usize,
    pub brace: Brace,
}

/// Walks source lines looking for braces that are not commented out or escaped.
///
/// The scanner is a small state machine. Block comment state survives line
/// boundaries, while line comments and the escape flag only live until the end
/// of the current line. A backslash escapes whatever byte follows it, with no
/// notion of string or char literals, so a brace inside `"{"` is still reported.
pub struct BraceScanner<'a> {
    lines: &'a [&'a str],
    line: usize,
    column: usize,
    in_block_comment: bool,
}

impl<'a> BraceScanner<'a> {
    pub fn new(lines: &'a [&'a str], line: usize) -> Self {
        Self {
            lines,
            line,
            column: 0,
            in_block_comment: false,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn in_block_comment(&self) -> bool {
        self.in_block_comment
    }

    /// Returns the next live brace, or `None` once the text is exhausted.
    ///
    /// Scanning resumes right after the previously returned brace.
    pub fn next_brace(&mut self) -> Option<BraceHit> {
        while self.line < self.lines.len() {
            let bytes = self.lines[self.line].as_bytes();
            let mut escaped = false;
            let mut i = self.column;

            while i < bytes.len() {
                let byte = bytes[i];
                let next = bytes.get(i + 1).copied();

                if escaped {
                    escaped = false;
                    i += 1;
                    continue;
                }
                if byte == b'\\' {
                    escaped = true;
                    i += 1;
                    continue;
                }

                if self.in_block_comment {
                    if byte == b'*' && next == Some(b'/') {
                        self.in_block_comment = false;
                        i += 2;
                    } else {
                        i += 1;
                    }
                    continue;
                }

                match (byte, next) {
                    (b'/', Some(b'/')) => break,
                    (b'/', Some(b'*')) => {
                        self.in_block_comment = true;
                        i += 2;
                    }
                    (b'{', _) | (b'}', _) => {
                        let brace = if byte == b'{' { Brace::Open } else { Brace::Close };
                        let hit = BraceHit {
                            line: self.line,
                            column: i,
                            brace,
                        };
                        self.column = i + 1;
                        return Some(hit);
                    }
                    _ => i += 1,
                }
            }

            self.line += 1;
            self.column = 0;
        }

        None
    }

    /// Consumes braces until the first opening one.
    pub fn find_open(&mut self) -> Option<BraceHit> {
        while let Some(hit) = self.next_brace() {
            if hit.brace == Brace::Open {
                return Some(hit);
            }
        }
        None
    }

    /// Consumes braces until the depth, seeded at one, drops back to zero.
    pub fn find_matching_close(&mut self) -> Option<BraceHit> {
        let mut depth = 1usize;
        while let Some(hit) = self.next_brace() {
            match hit.brace {
                Brace::Open => depth += 1,
                Brace::Close => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(hit);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn braces(text: &str) -> Vec<(usize, Brace)> {
        let lines: Vec<&str> = text.lines().collect();
        let mut scanner = BraceScanner::new(&lines, 0);
        let mut found = Vec::new();
        while let Some(hit) = scanner.next_brace() {
            found.push((hit.line, hit.brace));
        }
        found
    }

    #[test]
    fn test_plain_braces() {
        assert_eq!(
            braces("{\n  {}\n}"),
            vec![(0, Brace::Open), (1, Brace::Open), (1, Brace::Close), (2, Brace::Close)]
        );
    }

    #[test]
    fn test_line_comment_hides_rest_of_line() {
        assert_eq!(braces("a // {\n}"), vec![(1, Brace::Close)]);
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(braces("/* {\n } */ {"), vec![(1, Brace::Open)]);
    }

    #[test]
    fn test_escaped_brace_is_skipped() {
        assert_eq!(braces("\\{ {"), vec![(0, Brace::Open)]);
    }

    #[test]
    fn test_escape_does_not_cross_lines() {
        assert_eq!(braces("x \\\n{"), vec![(1, Brace::Open)]);
    }

    #[test]
    fn test_string_literal_is_not_protected() {
        assert_eq!(braces("\"{\""), vec![(0, Brace::Open)]);
    }

    #[test]
    fn test_unterminated_block_comment_swallows_rest() {
        let lines = vec!["/* open", "{ }", "}"];
        let mut scanner = BraceScanner::new(&lines, 0);
        assert!(scanner.next_brace().is_none());
        assert!(scanner.in_block_comment());
    }

    #[test]
    fn test_matching_close_tracks_depth() {
        let lines = vec!["struct A {", "  struct B { int x; } b;", "};"];
        let mut scanner = BraceScanner::new(&lines, 0);
        let open = scanner.find_open().unwrap();
        assert_eq!(open.line, 0);
        let close = scanner.find_matching_close().unwrap();
        assert_eq!(close.line, 2);
        assert_eq!(close.column, 0);
    }
}
