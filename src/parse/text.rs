//! Text cleaning for human-readable fields.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").unwrap_or_else(|e| panic!("Invalid whitespace pattern: {e}"))
});

/// Collapses whitespace runs (newlines and tabs included) to one space and trims.
///
/// Returns `None` for missing input and for input that is only whitespace.
pub fn clean_text(text: Option<&str>) -> Option<String> {
    let collapsed = WHITESPACE_RUN.replace_all(text?, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
