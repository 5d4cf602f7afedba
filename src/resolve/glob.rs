// Thu Jan 22 2026 - Alex

use crate::resolve::ResolveError;
use regex::Regex;
use std::path::Path;

/// Path glob used to drop definition candidates.
///
/// `**` matches anything, `*` matches anything but `/`, every other character
/// is literal. The whole path must match.
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    source: String,
    regex: Regex,
}

impl ExcludePattern {
    pub fn new(pattern: &str) -> Result<Self, ResolveError> {
        let normalized = normalize_separators(pattern);
        let regex = Regex::new(&glob_to_regex(&normalized)).map_err(|e| ResolveError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.regex.is_match(&normalize_separators(&path.to_string_lossy()))
    }
}

fn normalize_separators(text: &str) -> String {
    if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.to_string()
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut regex = String::with_capacity(glob.len() * 2 + 2);
    regex.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            if chars.peek() == Some(&'*') {
                chars.next();
                regex.push_str(".*");
            } else {
                regex.push_str("[^/]*");
            }
        } else {
            regex.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
        }
    }

    regex.push('$');
    regex
}

#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<ExcludePattern>,
}

impl PathFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ResolveError> {
        let patterns = patterns
            .iter()
            .map(|p| ExcludePattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_star_stays_in_segment() {
        let pattern = ExcludePattern::new("/work/*/types.h").unwrap();
        assert!(pattern.matches(Path::new("/work/backup/types.h")));
        assert!(!pattern.matches(Path::new("/work/a/b/types.h")));
    }

    #[test]
    fn test_double_star_crosses_segments() {
        let pattern = ExcludePattern::new("**/build/**").unwrap();
        assert!(pattern.matches(Path::new("/home/me/proj/build/gen/types.h")));
        assert!(!pattern.matches(Path::new("/home/me/proj/src/types.h")));
    }

    #[test]
    fn test_literal_characters() {
        let pattern = ExcludePattern::new("**/*.bak.h").unwrap();
        assert!(pattern.matches(Path::new("/a/types.bak.h")));
        assert!(!pattern.matches(Path::new("/a/typesXbakXh")));

        let pattern = ExcludePattern::new("/a/(old)+?/x.h").unwrap();
        assert!(pattern.matches(Path::new("/a/(old)+?/x.h")));
    }

    #[test]
    fn test_whole_path_must_match() {
        let pattern = ExcludePattern::new("*.h").unwrap();
        assert!(pattern.matches(Path::new("types.h")));
        assert!(!pattern.matches(Path::new("/src/types.h")));
    }

    #[test]
    fn test_filter() {
        let filter = PathFilter::from_patterns(&["**/backup/**", "**/*.orig"]).unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_excluded(Path::new("/p/backup/t.h")));
        assert!(filter.is_excluded(Path::new("/p/t.h.orig")));
        assert!(!filter.is_excluded(Path::new("/p/src/t.h")));
        assert!(!PathFilter::new().is_excluded(Path::new("/p/backup/t.h")));
    }
}
