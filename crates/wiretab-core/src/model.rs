use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One drawing-space text label after markup stripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToken {
    pub value: String,
    pub x: f64,
    pub y: f64,
}

impl TextToken {
    pub fn new(value: impl Into<String>, x: f64, y: f64) -> Self {
        TextToken {
            value: value.into(),
            x,
            y,
        }
    }
}

/// Tokens sharing an approximate baseline, ordered left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenRow {
    pub tokens: Vec<TextToken>,
}

impl TokenRow {
    /// Average y of the row's tokens, or 0 for an empty row.
    pub fn mean_y(&self) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        self.tokens.iter().map(|t| t.y).sum::<f64>() / self.tokens.len() as f64
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Semantic slot a classified token can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputField {
    Color,
    WireType,
    WireSize,
    CutLength,
    WireCode,
    ConnectorStart,
    ConnectorEnd,
    Index,
}

impl OutputField {
    pub const ALL: [OutputField; 8] = [
        OutputField::Color,
        OutputField::WireType,
        OutputField::WireSize,
        OutputField::CutLength,
        OutputField::WireCode,
        OutputField::ConnectorStart,
        OutputField::ConnectorEnd,
        OutputField::Index,
    ];

    /// Snake-case key used in mapping files.
    pub fn key(self) -> &'static str {
        match self {
            OutputField::Color => "color",
            OutputField::WireType => "wire_type",
            OutputField::WireSize => "wire_size",
            OutputField::CutLength => "cut_length",
            OutputField::WireCode => "wire_code",
            OutputField::ConnectorStart => "connector_start",
            OutputField::ConnectorEnd => "connector_end",
            OutputField::Index => "index",
        }
    }

    /// Column-name spellings recognized for this field, already folded
    /// (lowercase, alphanumerics only).
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            OutputField::Color => &["color", "colour", "wirecolor", "wirecolour", "clr"],
            OutputField::WireType => &["type", "wiretype", "cabletype", "insulation"],
            OutputField::WireSize => &[
                "size",
                "wiresize",
                "csa",
                "section",
                "crosssection",
                "mm2",
            ],
            OutputField::CutLength => &["length", "cutlength", "cutlen", "len", "lengthmm"],
            OutputField::WireCode => &[
                "code",
                "wirecode",
                "wireno",
                "wireid",
                "wirenumber",
                "circuit",
                "circuitno",
            ],
            OutputField::ConnectorStart => &[
                "from",
                "start",
                "connectorstart",
                "fromconnector",
                "startconnector",
                "connectora",
            ],
            OutputField::ConnectorEnd => &[
                "to",
                "end",
                "connectorend",
                "toconnector",
                "endconnector",
                "connectorb",
            ],
            OutputField::Index => &["no", "index", "seq", "sequence", "item", "nr"],
        }
    }

    /// Resolve a column name or attribute tag to a field by alias.
    pub fn from_str_loose(s: &str) -> Option<OutputField> {
        let folded = fold_name(s);
        if folded.is_empty() {
            return None;
        }
        OutputField::ALL
            .into_iter()
            .find(|f| f.key().replace('_', "") == folded || f.aliases().contains(&folded.as_str()))
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lowercase and drop everything but ASCII alphanumerics: "Wire Color" -> "wirecolor".
pub fn fold_name(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One output record: every declared column maps to a value, empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRow {
    values: BTreeMap<String, String>,
}

impl TableRow {
    fn with_columns(columns: &[String]) -> Self {
        TableRow {
            values: columns.iter().map(|c| (c.clone(), String::new())).collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    /// Set a declared column. Returns false (and changes nothing) for
    /// columns the table does not declare.
    pub fn set(&mut self, column: &str, value: impl Into<String>) -> bool {
        match self.values.get_mut(column) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }
}

/// Ordered columns and ordered rows handed to an exporter unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTable {
    pub record_type: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl OutputTable {
    /// Build an empty table; duplicate column names keep their first position.
    pub fn new<I, S>(record_type: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if !deduped.contains(&column) {
                deduped.push(column);
            }
        }
        OutputTable {
            record_type: record_type.into(),
            columns: deduped,
            rows: Vec::new(),
        }
    }

    /// Append a blank row (all columns empty) and return it for filling.
    pub fn push_row(&mut self) -> &mut TableRow {
        self.rows.push(TableRow::with_columns(&self.columns));
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Rows as value vectors in column order.
    pub fn records(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| row.get(c).unwrap_or(""))
                    .collect()
            })
            .collect()
    }
}
