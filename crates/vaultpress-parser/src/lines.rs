//! Per-line text fixes applied after link rewriting.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// A LaTeX `\\` at the end of a line, with optional trailing whitespace.
static LATEX_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\\\s*$").expect("static pattern"));

/// Double a trailing LaTeX line break so it survives Markdown escaping.
///
/// ```
/// use vaultpress_parser::fix_latex_line_break;
///
/// assert_eq!(fix_latex_line_break(r"a = b \\  "), r"a = b \\\\");
/// assert_eq!(fix_latex_line_break("plain"), "plain");
/// ```
pub fn fix_latex_line_break(line: &str) -> Cow<'_, str> {
    LATEX_LINE_BREAK.replace(line, r"\\\\")
}

/// Split file content into lines without their terminators.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_trailing_break_is_doubled() {
        assert_eq!(fix_latex_line_break(r"x \\ y"), r"x \\ y");
        assert_eq!(fix_latex_line_break(r"x \\"), r"x \\\\");
        assert_eq!(fix_latex_line_break("x \\\\\t"), r"x \\\\");
    }

    #[test]
    fn test_single_backslash_untouched() {
        assert_eq!(fix_latex_line_break(r"path\"), r"path\");
    }

    #[test]
    fn test_split_lines_handles_crlf() {
        assert_eq!(split_lines("a\r\nb\n"), vec!["a".to_string(), "b".to_string()]);
        assert!(split_lines("").is_empty());
    }
}
