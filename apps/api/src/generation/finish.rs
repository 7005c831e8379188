//! Text finishing — deterministic cleanup of composited review text.
//!
//! Idempotent by construction: running `finish` on already-finished text
//! returns it unchanged.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.!?])").expect("punctuation regex"));

/// Cleans up a composited review, in order: collapse whitespace runs, strip
/// whitespace before terminal punctuation, capitalize sentence starts, and
/// guarantee the text ends in `.`, `!`, or `?`.
pub fn finish(text: &str) -> String {
    let text = WHITESPACE_RUNS.replace_all(text.trim(), " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");

    let mut result = text
        .split(". ")
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(". ");

    if !result.ends_with(['.', '!', '?']) {
        result.push('!');
    }

    result.trim().to_string()
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
