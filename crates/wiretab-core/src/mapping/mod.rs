pub mod builtin;
pub mod schema;
pub mod xlsx;

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::WiretabError;
use crate::model::OutputField;
use schema::{MappingColumn, MappingDef, KNOWN_SOURCES};

/// Load a mapping from a JSON or XLSX file (chosen by extension).
pub fn load_mapping(path: &Path) -> Result<MappingDef, WiretabError> {
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    if is_xlsx {
        let bytes = std::fs::read(path).map_err(|e| WiretabError::MappingLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mapping")
            .to_string();
        let mapping = xlsx::parse_mapping_xlsx(&bytes, &name).map_err(|e| match e {
            WiretabError::MappingInvalid(_) => e,
            other => WiretabError::MappingLoad {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;
        validate_mapping(&mapping)?;
        return Ok(mapping);
    }

    let content = std::fs::read_to_string(path).map_err(|e| WiretabError::MappingLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_mapping(&content, path)
}

/// Parse a mapping from a JSON string.
pub fn parse_mapping(json: &str, source: &Path) -> Result<MappingDef, WiretabError> {
    let mapping: MappingDef = serde_json::from_str(json).map_err(|e| WiretabError::MappingLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_mapping(&mapping)?;
    Ok(mapping)
}

/// Parse a mapping from a JSON string (no file path context).
pub fn parse_mapping_str(json: &str) -> Result<MappingDef, WiretabError> {
    let mapping: MappingDef = serde_json::from_str(json).map_err(WiretabError::Json)?;
    validate_mapping(&mapping)?;
    Ok(mapping)
}

/// Validate that a mapping can drive an extraction.
pub fn validate_mapping(mapping: &MappingDef) -> Result<(), WiretabError> {
    if mapping.usable_columns().next().is_none() {
        return Err(WiretabError::MappingInvalid(
            "mapping has no usable columns (every column name is empty)".into(),
        ));
    }

    if mapping.record_type.trim().is_empty() {
        return Err(WiretabError::MappingInvalid(
            "record_type must not be empty".into(),
        ));
    }

    let mut explicit = BTreeSet::new();
    for col in mapping.usable_columns() {
        if let Some(source) = col.source.as_deref().map(str::trim) {
            if !source.is_empty()
                && !KNOWN_SOURCES.iter().any(|k| k.eq_ignore_ascii_case(source))
            {
                return Err(WiretabError::MappingInvalid(format!(
                    "column '{}' has unknown source '{}' (expected one of: {})",
                    col.column,
                    source,
                    KNOWN_SOURCES.join(", ")
                )));
            }
        }

        if let Some(field) = col.field {
            if !explicit.insert(field) {
                return Err(WiretabError::MappingInvalid(format!(
                    "field '{}' is bound to more than one column",
                    field
                )));
            }
        }
    }

    mapping.calibration.validate()
}

impl MappingDef {
    /// Columns with a non-blank name, in declaration order.
    pub fn usable_columns(&self) -> impl Iterator<Item = &MappingColumn> {
        self.columns.iter().filter(|c| c.is_usable())
    }

    /// Output column names, trimmed, in order (duplicates kept; the table
    /// drops them).
    pub fn column_names(&self) -> Vec<String> {
        self.usable_columns()
            .map(|c| c.column.trim().to_string())
            .collect()
    }

    /// Heuristic field bound to each column that has one.
    pub fn field_columns(&self) -> Vec<(OutputField, String)> {
        self.usable_columns()
            .filter_map(|c| c.resolved_field().map(|f| (f, c.column.trim().to_string())))
            .collect()
    }

    /// Fields the classifier may fill (the index is set by the assembler).
    pub fn declared_fields(&self) -> BTreeSet<OutputField> {
        self.field_columns()
            .into_iter()
            .map(|(f, _)| f)
            .filter(|f| *f != OutputField::Index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_mapping() {
        let json = r#"{
            "name": "Test",
            "columns": [
                { "column": "No.", "source": "auto_index" },
                { "column": "Color", "attribute": "COLOR" },
                { "column": "Length", "attr": "LEN" }
            ]
        }"#;
        let m = parse_mapping_str(json).unwrap();
        assert_eq!(m.record_type, "Wires");
        assert_eq!(m.column_names(), vec!["No.", "Color", "Length"]);
        assert_eq!(m.columns[2].attribute_tag(), Some("LEN"));
        assert!(m.columns[0].is_auto_index());
    }

    #[test]
    fn test_no_usable_columns_rejected() {
        let json = r#"{ "name": "Bad", "columns": [ { "column": "  " } ] }"#;
        assert!(matches!(
            parse_mapping_str(json),
            Err(WiretabError::MappingInvalid(_))
        ));

        let json = r#"{ "name": "Bad", "columns": [] }"#;
        assert!(parse_mapping_str(json).is_err());
    }

    #[test]
    fn test_blank_columns_skipped() {
        let json = r#"{ "name": "T", "columns": [ { "column": "" }, { "column": "Color" } ] }"#;
        let m = parse_mapping_str(json).unwrap();
        assert_eq!(m.column_names(), vec!["Color"]);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let json = r#"{ "name": "Bad", "columns": [ { "column": "No", "source": "row_number" } ] }"#;
        assert!(parse_mapping_str(json).is_err());
    }

    #[test]
    fn test_duplicate_explicit_field_rejected() {
        let json = r#"{ "name": "Bad", "columns": [
            { "column": "A", "field": "color" },
            { "column": "B", "field": "color" }
        ] }"#;
        assert!(parse_mapping_str(json).is_err());
    }

    #[test]
    fn test_invalid_calibration_rejected() {
        let json = r#"{ "name": "Bad", "columns": [ { "column": "Size" } ],
            "calibration": { "wire_size_min": "6", "wire_size_max": "1" } }"#;
        assert!(parse_mapping_str(json).is_err());
    }

    #[test]
    fn test_field_resolution() {
        let json = r#"{ "name": "T", "columns": [
            { "column": "No.", "source": "auto_index" },
            { "column": "Wire Colour" },
            { "column": "Sect.", "attribute": "SIZE" },
            { "column": "Remarks" },
            { "column": "Begin", "field": "connector_start" }
        ] }"#;
        let m = parse_mapping_str(json).unwrap();
        let fields = m.field_columns();
        assert_eq!(
            fields,
            vec![
                (OutputField::Index, "No.".to_string()),
                (OutputField::Color, "Wire Colour".to_string()),
                (OutputField::WireSize, "Sect.".to_string()),
                (OutputField::ConnectorStart, "Begin".to_string()),
            ]
        );
        let declared = m.declared_fields();
        assert!(!declared.contains(&OutputField::Index));
        assert_eq!(declared.len(), 3);
    }

    #[test]
    fn test_load_mapping_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        std::fs::write(
            &path,
            r#"{ "name": "File", "record_type": "Harness A", "columns": [ { "column": "Code" } ] }"#,
        )
        .unwrap();
        let m = load_mapping(&path).unwrap();
        assert_eq!(m.record_type, "Harness A");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_mapping(Path::new("/nonexistent/mapping.json")).unwrap_err();
        assert!(matches!(err, WiretabError::MappingLoad { .. }));
    }
}
