//! Normalizer — lowercase, punctuation to spaces, whitespace collapsed.

use regex::Regex;
use std::sync::LazyLock;

static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize optional text. `None` and `""` both yield `""`.
pub fn normalize(text: Option<&str>) -> String {
    normalize_str(text.unwrap_or(""))
}

/// Normalize text for comparison.
///
/// Idempotent: `normalize_str(&normalize_str(s)) == normalize_str(s)`.
pub fn normalize_str(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lowered = text.to_lowercase();
    let spaced = RE_NON_WORD.replace_all(&lowered, " ");
    RE_WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// Normalized key over the first `prefix_len` characters of a body.
pub fn content_key(body: &str, prefix_len: usize) -> String {
    let end = body
        .char_indices()
        .nth(prefix_len)
        .map(|(idx, _)| idx)
        .unwrap_or(body.len());
    normalize_str(&body[..end])
}
