//! String-literal and comment stripping ahead of import matching
//!
//! This is a pattern-based approximation of a lexer. Removed text never
//! takes line breaks with it, so line numbers in the output match the input.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TRIPLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)""".*?"""|'''.*?'''"#).expect("valid regex"));

static SINGLE_LINE_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:\\.|[^"\\\n])*"|'(?:\\.|[^'\\\n])*'"#).expect("valid regex")
});

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[^\\])#.*$").expect("valid regex"));

/// Remove string literals and line comments from `source`.
///
/// Applied in order: triple-quoted literals (multi-line, non-greedy),
/// single-line quoted literals honoring backslash escapes, then everything
/// from an unescaped `#` to end of line. A quote with no terminator on its
/// line is left untouched.
pub fn sanitize(source: &str) -> String {
    let text = TRIPLE_QUOTED.replace_all(source, |caps: &Captures| {
        "\n".repeat(caps[0].matches('\n').count())
    });
    let text = SINGLE_LINE_STRING.replace_all(&text, "");
    LINE_COMMENT.replace_all(&text, "${1}").into_owned()
}
