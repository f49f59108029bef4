use std::collections::HashSet;
use std::sync::LazyLock;

/// Single and two-letter wire color abbreviations (uppercase).
static COLOR_CODES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "R", "B", "Y", "L", "W", "G", "V", "O", "P", "S", "T", "BR", "GR", "PI", "LB", "VI", "GY",
    ]
    .into_iter()
    .collect()
});

/// Wire insulation/construction codes, longest first so "0.5CAVS" is never
/// read as an AVS wire.
static WIRE_TYPE_SUFFIXES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut suffixes = vec![
        "AVSS", "AVS", "FLRY", "T1", "T2", "T3", "T4", "GPT", "CAVS",
    ];
    suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    suffixes
});

/// Drawing-frame and BOM-legend boilerplate (uppercase substrings).
pub(crate) static NOISE_SUBSTRINGS: &[&str] = &[
    "SEAL",
    "CLIP",
    "AMP",
    "TYCO",
    "TE CONNECTIVITY",
    "YAZAKI",
    "SUMITOMO",
    "MOLEX",
    "DELPHI",
    "APTIV",
    "HIROSE",
    "DEUTSCH",
    "JST",
    "NOTE",
    "SPECIFICATION",
    "ASSEMBLY",
    "DESCRIPTION",
];

/// Check if a token is exactly a known color abbreviation (case-insensitive).
pub fn is_color_code(token: &str) -> bool {
    COLOR_CODES.contains(token.trim().to_ascii_uppercase().as_str())
}

/// Longest wire-type code the token ends with, returned with the token's
/// remaining prefix (untrimmed).
pub fn split_wire_type_suffix(token: &str) -> Option<(&str, &'static str)> {
    let upper = token.to_ascii_uppercase();
    WIRE_TYPE_SUFFIXES.iter().find_map(|suffix| {
        upper
            .ends_with(suffix)
            .then(|| (&token[..token.len() - suffix.len()], *suffix))
    })
}

/// Check if a token ends with any wire-type code.
pub fn has_wire_type_suffix(token: &str) -> bool {
    split_wire_type_suffix(token).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_codes_case_folded() {
        assert!(is_color_code("R"));
        assert!(is_color_code("br"));
        assert!(is_color_code("Gy"));
        assert!(!is_color_code("RB"));
        assert!(!is_color_code(""));
    }

    #[test]
    fn test_suffixes_longest_first() {
        let lens: Vec<usize> = WIRE_TYPE_SUFFIXES.iter().map(|s| s.len()).collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_cavs_not_read_as_avs() {
        assert_eq!(split_wire_type_suffix("0.5CAVS"), Some(("0.5", "CAVS")));
        assert_eq!(split_wire_type_suffix("1.5AVS"), Some(("1.5", "AVS")));
        assert_eq!(split_wire_type_suffix("0.35AVSS"), Some(("0.35", "AVSS")));
    }

    #[test]
    fn test_suffix_case_insensitive_keeps_original_prefix() {
        assert_eq!(split_wire_type_suffix("2,0 flry"), Some(("2,0 ", "FLRY")));
        assert_eq!(split_wire_type_suffix("W101"), None);
    }
}
