use regex::Regex;
use std::sync::LazyLock;

use crate::parsing::vocab::NOISE_SUBSTRINGS;

/// MTEXT formatting escape: `\` + code letter, then its argument up to the
/// closing `;`. A run without `;` ends at the next escape or line break.
static MARKUP_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\[PHWSTLOUACF][^;\\\r\n]*;?").expect("hardcoded markup regex is valid")
});

/// Normalize a raw drawing text label.
///
/// Steps:
/// 1. Strip markup escapes (repeated until nothing matches)
/// 2. Replace each line break (`\r\n`, `\r`, `\n`) with one space
/// 3. Trim
///
/// Returns an empty string when nothing is left, which callers treat as
/// "discard".
pub fn normalize_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let mut s = raw.to_string();
    while MARKUP_ESCAPE.is_match(&s) {
        s = MARKUP_ESCAPE.replace_all(&s, "").into_owned();
    }

    s.replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}

/// Check if a normalized token is frame or legend boilerplate rather than
/// wire data.
pub fn is_noise(token: &str) -> bool {
    let upper = token.to_ascii_uppercase();
    upper.starts_with("PIN")
        || upper.ends_with(':')
        || NOISE_SUBSTRINGS.iter().any(|n| upper.contains(n))
}
