use std::path::PathBuf;

use wiretab_core::grouping::{group_rows, DEFAULT_ROW_TOLERANCE};
use wiretab_core::parsing::tokenize;

pub fn run(
    input_file: PathBuf,
    tolerance: Option<f64>,
) -> Result<(), wiretab_core::error::WiretabError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_ROW_TOLERANCE);
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(wiretab_core::error::WiretabError::MappingInvalid(format!(
            "tolerance must be a positive number, got {tolerance}"
        )));
    }

    let drawing = super::load_drawing(&input_file)?;
    let rows = group_rows(tokenize(&drawing), tolerance);

    if rows.is_empty() {
        println!("No text tokens found.");
        return Ok(());
    }

    for (i, row) in rows.iter().enumerate() {
        let values: Vec<&str> = row.tokens.iter().map(|t| t.value.as_str()).collect();
        println!("{:>4}  y={:<10.2} {}", i + 1, row.mean_y(), values.join(" | "));
    }
    eprintln!("{} row(s)", rows.len());
    Ok(())
}
