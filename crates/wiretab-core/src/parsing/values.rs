use rust_decimal::Decimal;
use std::str::FromStr;

/// Canonical numeric spelling of a size-like token: decimal comma becomes a
/// dot and all spaces are dropped ("0, 5" -> "0.5").
pub fn normalize_decimal(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}

/// Parse a decimal value, accepting decimal commas and stray spaces.
///
/// Returns None for anything that is not a plain number; callers treat that
/// as "not this field" rather than an error.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal(s);
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Parse a whole number exactly as written (no comma or space repair).
pub fn parse_integer(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Check if a token is only digits, optionally with one decimal separator.
pub fn is_purely_numeric(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty()
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && s.chars().filter(|c| *c == '.' || *c == ',').count() <= 1
}
