use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::error::WiretabError;
use crate::model::OutputTable;

/// Resolve where a table is written: a directory gets `<record_type>.csv`,
/// anything else is used as the file path.
pub fn csv_path_for(target: &Path, table: &OutputTable) -> PathBuf {
    if target.is_dir() {
        target.join(csv_file_name(&table.record_type))
    } else {
        target.to_path_buf()
    }
}

fn csv_file_name(record_type: &str) -> String {
    let stem: String = record_type
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    if stem.is_empty() {
        "table.csv".to_string()
    } else {
        format!("{stem}.csv")
    }
}

/// Write the table as CSV (header row, then one record per row). Returns
/// the path actually written.
pub fn write_csv(target: &Path, table: &OutputTable) -> Result<PathBuf, WiretabError> {
    let path = csv_path_for(target, table);
    let mut writer = WriterBuilder::new().from_path(&path).map_err(|e| {
        WiretabError::Export(format!("cannot create {}: {e}", path.display()))
    })?;
    writer.write_record(&table.columns)?;
    for record in table.records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = table.rows.len(), "wrote csv");
    Ok(path)
}

pub fn write_csv_to_string(table: &OutputTable) -> Result<String, WiretabError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::<u8>::new());
    writer.write_record(&table.columns)?;
    for record in table.records() {
        writer.write_record(&record)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|error| WiretabError::Io(error.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|error| WiretabError::Export(format!("invalid utf-8 csv output: {error}")))
}

/// Pretty JSON: `{record_type, columns, rows}` with rows keyed by column.
pub fn write_json(table: &OutputTable) -> Result<String, WiretabError> {
    Ok(serde_json::to_string_pretty(table)?)
}
