pub mod fallback;
pub mod structured;

use serde::{Deserialize, Serialize};

use crate::model::OutputTable;
use crate::trace::{TraceBundle, TraceWarning};

/// Which path produced the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPath {
    /// Block attributes copied by tag.
    Structured,
    /// Loose text classified by heuristics.
    Fallback,
}

/// Result of extracting one drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub table: OutputTable,
    pub path: ExtractionPath,
    /// Drawing-level warnings. Per-row warnings live only in `trace`.
    pub warnings: Vec<TraceWarning>,
    pub trace: TraceBundle,
}
