use serde::{Deserialize, Serialize};

use crate::model::{OutputField, TextToken};

/// Classification pass that committed a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Color codes and size+type compounds.
    AbsoluteIdentifier,
    /// Cut lengths and bare sizes, by numeric range.
    BareNumber,
    /// Wire codes and connector names, by shape.
    CodeOrConnector,
}

/// One committed field value and the token it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub stage: Stage,
    pub field: OutputField,
    /// Token text as it appeared in the row.
    pub token: String,
    /// Value written to the field (a wire-type token yields two assignments).
    pub value: String,
    pub x: f64,
}

/// Per-row field state: one slot per field, written at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlots {
    slots: [Option<String>; OutputField::ALL.len()],
}

impl FieldSlots {
    fn index(field: OutputField) -> usize {
        field as usize
    }

    pub fn get(&self, field: OutputField) -> Option<&str> {
        self.slots[Self::index(field)].as_deref()
    }

    pub fn is_filled(&self, field: OutputField) -> bool {
        self.slots[Self::index(field)].is_some()
    }

    /// Fill an empty slot. A filled slot is never overwritten; returns false.
    pub fn fill(&mut self, field: OutputField, value: impl Into<String>) -> bool {
        let slot = &mut self.slots[Self::index(field)];
        if slot.is_some() {
            return false;
        }
        *slot = Some(value.into());
        true
    }

    /// Filled slots in field order.
    pub fn iter(&self) -> impl Iterator<Item = (OutputField, &str)> {
        OutputField::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(f, v)| v.as_deref().map(|v| (f, v)))
    }
}

/// Result of classifying one row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowClassification {
    pub fields: FieldSlots,
    pub assignments: Vec<Assignment>,
    /// Tokens no stage accepted.
    pub unassigned: Vec<TextToken>,
}
