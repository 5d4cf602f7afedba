// Sat Jan 24 2026 - Alex

use colored::Colorize;

/// Deepest cause chain printed under an error.
const MAX_CAUSES: usize = 10;

pub struct ErrorDisplay {
    show_cause_chain: bool,
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            show_cause_chain: true,
            color_enabled: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn without_causes(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    pub fn format(&self, error: &anyhow::Error) -> String {
        let header = if self.color_enabled {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        let mut output = format!("{} {}\n", header, error);

        if self.show_cause_chain {
            for (depth, cause) in error.chain().skip(1).enumerate() {
                if depth == MAX_CAUSES {
                    output.push_str("  ... (cause chain truncated)\n");
                    break;
                }
                let arrow = if self.color_enabled {
                    "->".yellow().to_string()
                } else {
                    "->".to_string()
                };
                output.push_str(&format!("  {} Caused by: {}\n", arrow, cause));
            }
        }

        output
    }

    pub fn print(&self, error: &anyhow::Error) {
        eprint!("{}", self.format(error));
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cause_chain() {
        let err = Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
            .context("Failed to read types.h")
            .unwrap_err();
        let text = ErrorDisplay::new().without_colors().format(&err);
        assert_eq!(text, "Error: Failed to read types.h\n  -> Caused by: no such file\n");

        let short = ErrorDisplay::new().without_colors().without_causes().format(&err);
        assert_eq!(short, "Error: Failed to read types.h\n");
    }
}
