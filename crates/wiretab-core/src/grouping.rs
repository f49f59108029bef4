//! Spatial row grouping.
//!
//! Drawing text has no notion of table rows, only insertion points. Tokens
//! whose baselines sit within a tolerance of a row's running average y are
//! treated as one printed row. Comparing against the average rather than the
//! first member lets a row absorb small baseline jitter.

use std::cmp::Ordering;

use crate::model::{TextToken, TokenRow};

/// Default vertical tolerance, in drawing units.
pub const DEFAULT_ROW_TOLERANCE: f64 = 5.0;

struct OpenGroup {
    tokens: Vec<TextToken>,
    y_sum: f64,
}

impl OpenGroup {
    fn mean_y(&self) -> f64 {
        self.y_sum / self.tokens.len() as f64
    }

    fn push(&mut self, token: TextToken) {
        self.y_sum += token.y;
        self.tokens.push(token);
    }
}

/// Partition tokens into rows.
///
/// Tokens are visited top-to-bottom, left-to-right. Each joins the first
/// group (in creation order) whose running mean y is within `tolerance`,
/// otherwise it opens a new group. Rows come back in creation order, each
/// sorted by x.
pub fn group_rows(mut tokens: Vec<TextToken>, tolerance: f64) -> Vec<TokenRow> {
    tokens.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });

    let mut groups: Vec<OpenGroup> = Vec::new();

    for token in tokens {
        match groups
            .iter_mut()
            .find(|g| (g.mean_y() - token.y).abs() <= tolerance)
        {
            Some(group) => group.push(token),
            None => groups.push(OpenGroup {
                y_sum: token.y,
                tokens: vec![token],
            }),
        }
    }

    groups
        .into_iter()
        .map(|group| {
            let mut tokens = group.tokens;
            tokens.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
            TokenRow { tokens }
        })
        .collect()
}
