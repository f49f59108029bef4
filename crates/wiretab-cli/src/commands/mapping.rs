use std::path::Path;

use wiretab_core::error::WiretabError;
use wiretab_core::mapping::builtin;
use wiretab_core::mapping::schema::{MappingDef, AUTO_INDEX};
use wiretab_core::model::OutputField;

pub fn list() -> Result<(), WiretabError> {
    println!("Available predefined mappings:\n");
    for name in builtin::PRESETS {
        let m = builtin::load_preset(name)?;
        println!(
            "  {:<14} {} [{} columns -> {}]",
            name,
            m.name,
            m.usable_columns().count(),
            m.record_type
        );
        if let Some(ref desc) = m.description {
            println!("                 {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), WiretabError> {
    let m = builtin::load_preset(preset)?;

    println!("{}\n", m.name);
    if let Some(ref desc) = m.description {
        println!("{}\n", desc);
    }
    println!("Rows are written to the '{}' table.\n", m.record_type);

    print_columns(&m);

    let c = &m.calibration;
    println!();
    println!("When the drawing has no block attributes, text labels are grouped");
    println!(
        "into rows within {} drawing units and classified using:",
        c.row_tolerance
    );
    println!(
        "  cut length  integers {}..={}",
        c.cut_length_min, c.cut_length_max
    );
    println!(
        "  wire size   decimals {}..={}, at most {} characters",
        c.wire_size_min, c.wire_size_max, c.wire_size_max_chars
    );
    Ok(())
}

fn print_columns(m: &MappingDef) {
    let width = m
        .usable_columns()
        .map(|c| c.column.trim().len())
        .max()
        .unwrap_or(10);

    println!("  {:<width$}  {:<12}  {}", "Column", "Attribute", "Text field");
    for col in m.usable_columns() {
        let attribute = if col.is_auto_index() {
            format!("({AUTO_INDEX})")
        } else {
            col.attribute_tag().unwrap_or("-").to_string()
        };
        let field = col
            .resolved_field()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "(left empty)".into());
        println!(
            "  {:<width$}  {:<12}  {}",
            col.column.trim(),
            attribute,
            field
        );
    }
}

pub fn schema() -> Result<(), WiretabError> {
    println!("Mapping file format (JSON):\n");
    println!("  name          Display name");
    println!("  description   Optional description");
    println!("  record_type   Output table name, also the CSV file stem (default \"Wires\")");
    println!("  columns       Ordered list of output columns:");
    println!("    column      Column header (blank columns are skipped)");
    println!("    attribute   Block attribute tag copied on the structured path");
    println!("    source      \"{AUTO_INDEX}\" to number rows from 1");
    println!("    field       Text field to fill on the heuristic path; defaults to");
    println!("                a match on the column name, then the attribute tag");
    println!("  calibration   Optional overrides: cut_length_min, cut_length_max,");
    println!("                wire_size_min, wire_size_max, wire_size_max_chars,");
    println!("                row_tolerance");
    println!();
    let fields: Vec<&str> = OutputField::ALL.iter().map(|f| f.key()).collect();
    println!("Fields: {}", fields.join(", "));
    println!();
    println!("XLSX mappings use a sheet named 'Mapping' (or the first sheet) with a");
    println!("header row containing column, attribute, source and field.");
    println!();
    println!("Example:\n");
    println!(
        r#"{{
  "name": "Harness A",
  "record_type": "Wires",
  "columns": [
    {{ "column": "No.", "source": "auto_index" }},
    {{ "column": "Colour", "attribute": "COL" }},
    {{ "column": "Sect.", "attribute": "CSA", "field": "wire_size" }},
    {{ "column": "Length", "attribute": "LEN" }}
  ],
  "calibration": {{ "cut_length_max": 4000 }}
}}"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), WiretabError> {
    let m = wiretab_core::mapping::load_mapping(file)?;
    println!(
        "Valid mapping: {} ({} columns -> {})",
        m.name,
        m.usable_columns().count(),
        m.record_type
    );
    let unbound: Vec<&str> = m
        .usable_columns()
        .filter(|c| c.resolved_field().is_none() && c.attribute_tag().is_none())
        .map(|c| c.column.trim())
        .collect();
    if !unbound.is_empty() {
        println!(
            "  note: column(s) without attribute or field stay empty: {}",
            unbound.join(", ")
        );
    }
    Ok(())
}
