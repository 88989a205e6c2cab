//! Diff generation with color-coded output

use std::fmt::Write;
use std::path::Path;

use similar::{ChangeTag, TextDiff};

/// Diff generator for previewing changes to existing output files
pub struct DiffGenerator;

impl Default for DiffGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffGenerator {
    /// Create a new diff generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generate a color-coded unified diff from `existing` to `converted`
    #[must_use]
    pub fn generate_from_content(converted: &str, existing: &str, path: &Path) -> String {
        const DIFF_CONTEXT_LINES: usize = 3;

        let diff = TextDiff::from_lines(existing, converted);
        let mut output = String::new();

        writeln!(output, "\x1b[1m--- {} (existing)\x1b[0m", path.display())
            .expect("Writing to String should never fail");
        writeln!(output, "\x1b[1m+++ {} (converted)\x1b[0m", path.display())
            .expect("Writing to String should never fail");

        for (idx, group) in diff.grouped_ops(DIFF_CONTEXT_LINES).iter().enumerate() {
            if idx > 0 {
                output.push_str("...\n");
            }

            for op in group {
                for change in diff.iter_changes(op) {
                    let (sign, color) = match change.tag() {
                        ChangeTag::Delete => ("-", "\x1b[31m"),
                        ChangeTag::Insert => ("+", "\x1b[32m"),
                        ChangeTag::Equal => (" ", "\x1b[0m"),
                    };

                    let newline = if change.value().ends_with('\n') {
                        ""
                    } else {
                        "\n"
                    };

                    write!(output, "{color}{sign}{}{newline}\x1b[0m", change.value())
                        .expect("Writing to String should never fail");
                }
            }
        }

        output
    }

    /// Generate a line-by-line diff without colors
    #[must_use]
    pub fn generate_plain(converted: &str, existing: &str) -> String {
        let diff = TextDiff::from_lines(existing, converted);
        let mut output = String::new();

        for change in diff.iter_all_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            write!(output, "{sign}{}", change.value())
                .expect("Writing to String should never fail");
            if !change.value().ends_with('\n') {
                output.push('\n');
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_diff() {
        let diff = DiffGenerator::generate_plain("a\nc\n", "a\nb\n");

        assert!(diff.contains(" a\n"));
        assert!(diff.contains("-b\n"));
        assert!(diff.contains("+c\n"));
    }

    #[test]
    fn test_plain_diff_without_trailing_newline() {
        let diff = DiffGenerator::generate_plain("new", "old");
        assert_eq!(diff, "-old\n+new\n");
    }

    #[test]
    fn test_colored_diff_has_headers_and_colors() {
        let diff = DiffGenerator::generate_from_content("x\ny\n", "x\nz\n", Path::new("out/a.cson"));

        assert!(diff.contains("--- out/a.cson (existing)"));
        assert!(diff.contains("+++ out/a.cson (converted)"));
        assert!(diff.contains("\x1b[31m-z"));
        assert!(diff.contains("\x1b[32m+y"));
    }

    #[test]
    fn test_identical_content_has_no_changes() {
        let diff = DiffGenerator::generate_from_content("same\n", "same\n", Path::new("a"));
        assert!(!diff.contains("\x1b[31m-"));
        assert!(!diff.contains("\x1b[32m+"));
    }
}
