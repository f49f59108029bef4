use crate::classify::outcome::{Assignment, RowClassification};
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// No block instance carried attributes; text heuristics were used.
    StructuredDataMissing,
    /// The heuristic path found no text rows at all.
    NoRowsExtracted,
    /// A row had tokens left over after every stage.
    UnassignedTokens,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceWarning {
    pub code: WarningCode,
    pub message: String,
    pub severity: TraceSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl TraceWarning {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        let severity = match code {
            WarningCode::StructuredDataMissing | WarningCode::NoRowsExtracted => {
                TraceSeverity::Important
            }
            WarningCode::UnassignedTokens => TraceSeverity::Info,
        };
        TraceWarning {
            code,
            message: message.into(),
            severity,
            row: None,
        }
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

/// How one heuristic row was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowTrace {
    /// 1-based row number, matching the index column.
    pub row: usize,
    pub mean_y: f64,
    pub assignments: Vec<Assignment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassigned: Vec<String>,
}

impl RowTrace {
    pub fn from_classification(row: usize, mean_y: f64, result: &RowClassification) -> Self {
        RowTrace {
            row,
            mean_y,
            assignments: result.assignments.clone(),
            unassigned: result.unassigned.iter().map(|t| t.value.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<RowTrace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl TraceBundle {
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
