use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};

use crate::error::WiretabError;
use crate::model::{fold_name, OutputField};

use super::schema::{MappingColumn, MappingDef};

/// Preferred sheet name; the first sheet is used when it is absent.
pub const MAPPING_SHEET: &str = "Mapping";

const COLUMN_HEADERS: &[&str] = &["column", "columnname", "header", "name"];
const ATTRIBUTE_HEADERS: &[&str] = &["attribute", "attr", "tag", "attributetag"];
const SOURCE_HEADERS: &[&str] = &["source"];
const FIELD_HEADERS: &[&str] = &["field"];

/// Parse a mapping workbook: one row per output column under a header row.
pub fn parse_mapping_xlsx(bytes: &[u8], name: &str) -> Result<MappingDef, WiretabError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| WiretabError::MappingInvalid(format!("failed to open xlsx: {e}")))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .iter()
        .find(|s| s.eq_ignore_ascii_case(MAPPING_SHEET))
        .or_else(|| sheet_names.first())
        .cloned()
        .ok_or_else(|| WiretabError::MappingInvalid("workbook has no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| WiretabError::MappingInvalid(format!("sheet '{sheet_name}': {e}")))?;

    mapping_from_range(&range, name)
}

#[derive(Debug, Default)]
struct HeaderLayout {
    column: usize,
    attribute: Option<usize>,
    source: Option<usize>,
    field: Option<usize>,
}

fn header_layout(row: &[Data]) -> Option<HeaderLayout> {
    let find = |names: &[&str]| {
        row.iter().position(|cell| {
            cell_as_string(cell).is_some_and(|s| names.contains(&fold_name(&s).as_str()))
        })
    };
    Some(HeaderLayout {
        column: find(COLUMN_HEADERS)?,
        attribute: find(ATTRIBUTE_HEADERS),
        source: find(SOURCE_HEADERS),
        field: find(FIELD_HEADERS),
    })
}

/// Build a mapping from a sheet range. Rows above the header are ignored;
/// rows with a blank column name are kept and later skipped as unusable.
pub fn mapping_from_range(range: &Range<Data>, name: &str) -> Result<MappingDef, WiretabError> {
    let mut rows = range.rows();
    let layout = rows
        .by_ref()
        .find_map(header_layout)
        .ok_or_else(|| {
            WiretabError::MappingInvalid("no header row with a 'column' heading found".into())
        })?;

    let cell = |row: &[Data], idx: Option<usize>| -> Option<String> {
        idx.and_then(|i| row.get(i)).and_then(cell_as_string)
    };

    let mut columns = Vec::new();
    for row in rows {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        let field = match cell(row, layout.field) {
            Some(raw) => Some(OutputField::from_str_loose(&raw).ok_or_else(|| {
                WiretabError::MappingInvalid(format!("unknown field '{raw}' in mapping sheet"))
            })?),
            None => None,
        };

        columns.push(MappingColumn {
            column: cell(row, Some(layout.column)).unwrap_or_default(),
            attribute: cell(row, layout.attribute),
            source: cell(row, layout.source),
            field,
        });
    }

    Ok(MappingDef {
        name: name.to_string(),
        description: None,
        record_type: "Wires".to_string(),
        columns,
        calibration: Default::default(),
    })
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Empty => None,
        other => Some(format!("{other}")),
    }
}
