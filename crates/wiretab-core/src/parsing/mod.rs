pub mod normalize;
pub mod values;
pub mod vocab;

use crate::drawing::Drawing;
use crate::model::TextToken;
use normalize::{is_noise, normalize_text};

/// Turn every text entity of a drawing into a normalized token.
///
/// Labels that normalize to nothing and boilerplate labels are dropped here,
/// before any grouping happens.
pub fn tokenize(drawing: &Drawing) -> Vec<TextToken> {
    let mut tokens = Vec::new();
    let mut discarded = 0usize;

    for (raw, x, y) in drawing.texts() {
        let value = normalize_text(raw);
        if value.is_empty() || is_noise(&value) {
            discarded += 1;
            continue;
        }
        tokens.push(TextToken { value, x, y });
    }

    tracing::debug!(kept = tokens.len(), discarded, "tokenized drawing text");
    tokens
}
