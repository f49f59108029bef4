use serde::{Deserialize, Serialize};

use crate::classify::calibration::Calibration;
use crate::model::OutputField;

/// Source directive that numbers rows instead of reading a value.
pub const AUTO_INDEX: &str = "auto_index";

/// Directives a column's `source` may carry.
pub const KNOWN_SOURCES: &[&str] = &[AUTO_INDEX];

fn default_record_type() -> String {
    "Wires".to_string()
}

/// Target table layout: which columns exist, in which order, and where
/// each one gets its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Names the worksheet / output file the table is written to.
    #[serde(default = "default_record_type")]
    pub record_type: String,
    pub columns: Vec<MappingColumn>,
    #[serde(default)]
    pub calibration: Calibration,
}

/// One output column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingColumn {
    pub column: String,
    /// Block attribute tag copied into this column on the structured path.
    #[serde(default, alias = "attr", skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Special source directive, e.g. "auto_index".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Explicit heuristic field; otherwise resolved from the column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<OutputField>,
}

impl MappingColumn {
    pub fn is_usable(&self) -> bool {
        !self.column.trim().is_empty()
    }

    pub fn is_auto_index(&self) -> bool {
        self.source
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(AUTO_INDEX))
    }

    /// Non-empty attribute tag, trimmed.
    pub fn attribute_tag(&self) -> Option<&str> {
        self.attribute
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Field this column receives on the heuristic path.
    ///
    /// Explicit `field` wins, then `auto_index`, then the column name and
    /// finally the attribute tag are matched against field aliases.
    pub fn resolved_field(&self) -> Option<OutputField> {
        if self.field.is_some() {
            return self.field;
        }
        if self.is_auto_index() {
            return Some(OutputField::Index);
        }
        OutputField::from_str_loose(&self.column)
            .or_else(|| self.attribute_tag().and_then(OutputField::from_str_loose))
    }
}
