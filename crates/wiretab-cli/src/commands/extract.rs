use std::path::PathBuf;

use wiretab_core::error::WiretabError;
use wiretab_core::export;
use wiretab_core::extraction::Extraction;
use wiretab_core::mapping::builtin;
use wiretab_core::mapping::schema::MappingDef;

use crate::output;

pub struct ExtractArgs {
    pub input_file: PathBuf,
    pub mapping_files: Vec<PathBuf>,
    pub presets: Vec<String>,
    pub output_format: String,
    pub out: Option<PathBuf>,
    pub tolerance: Option<f64>,
    pub verbose: bool,
}

pub fn run(args: ExtractArgs) -> Result<(), WiretabError> {
    let mut mappings: Vec<MappingDef> = Vec::new();

    // Default to the full wire list when nothing was asked for.
    let effective_presets = if args.presets.is_empty() && args.mapping_files.is_empty() {
        vec!["wire-list".to_string()]
    } else {
        args.presets
    };

    for preset in &effective_presets {
        mappings.push(builtin::load_preset(preset)?);
    }
    for path in &args.mapping_files {
        mappings.push(wiretab_core::mapping::load_mapping(path)?);
    }

    if let Some(tolerance) = args.tolerance {
        for mapping in &mut mappings {
            mapping.calibration.row_tolerance = tolerance;
        }
    }

    let drawing = super::load_drawing(&args.input_file)?;

    let mut results: Vec<(&MappingDef, Extraction)> = Vec::new();
    for mapping in &mappings {
        let extraction = wiretab_core::extract_table(&drawing, mapping)?;
        results.push((mapping, extraction));
    }

    match args.output_format.as_str() {
        "json" => {
            let extractions: Vec<&Extraction> = results.iter().map(|(_, e)| e).collect();
            match &args.out {
                Some(path) => {
                    let json = serde_json::to_string_pretty(&extractions)?;
                    std::fs::write(path, json)?;
                    eprintln!(
                        "Extracted {} table(s), written to {}",
                        extractions.len(),
                        path.display()
                    );
                }
                None => output::json::print(&extractions)?,
            }
        }
        "csv" => {
            if args.out.is_none() {
                for (i, (_, extraction)) in results.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print!("{}", export::write_csv_to_string(&extraction.table)?);
                }
            }
        }
        "table" => {
            for (mapping, extraction) in &results {
                output::table::print(mapping, extraction, args.verbose);
            }
        }
        other => {
            return Err(WiretabError::Export(format!(
                "unknown output format '{other}' (expected table, json or csv)"
            )))
        }
    }

    // Table and csv formats save CSV when --out is given.
    if args.output_format != "json" {
        if let Some(target) = &args.out {
            if results.len() > 1 && !target.is_dir() {
                return Err(WiretabError::Export(format!(
                    "{} tables extracted; --out must be a directory",
                    results.len()
                )));
            }
            for (_, extraction) in &results {
                let path = export::write_csv(target, &extraction.table)?;
                eprintln!(
                    "{} row(s) written to {}",
                    extraction.table.rows.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
