pub mod classify;
pub mod drawing;
pub mod error;
pub mod export;
pub mod extraction;
pub mod grouping;
pub mod mapping;
pub mod model;
pub mod parsing;
pub mod trace;

use std::path::Path;

use drawing::{Drawing, DrawingLoader};
use error::WiretabError;
use extraction::{fallback, structured, Extraction, ExtractionPath};
use mapping::schema::MappingDef;
use trace::{TraceBundle, TraceWarning, WarningCode};

/// Main API entry point: turn a parsed drawing into a wire table.
///
/// Block attributes are used when present. Otherwise the loose text labels
/// are grouped into rows and classified field by field.
pub fn extract_table(drawing: &Drawing, mapping: &MappingDef) -> Result<Extraction, WiretabError> {
    mapping::validate_mapping(mapping)?;

    if let Some(table) = structured::extract_structured(drawing, mapping) {
        tracing::info!(rows = table.rows.len(), "extracted from block attributes");
        return Ok(Extraction {
            table,
            path: ExtractionPath::Structured,
            warnings: Vec::new(),
            trace: TraceBundle::default(),
        });
    }

    tracing::info!("falling back to text heuristics");
    let (table, mut trace) = fallback::assemble_rows(drawing, mapping);

    let mut warnings = vec![TraceWarning::new(
        WarningCode::StructuredDataMissing,
        "no block attributes found; columns were inferred from text labels",
    )];
    if table.rows.is_empty() {
        tracing::warn!("no rows extracted from drawing text");
        warnings.push(TraceWarning::new(
            WarningCode::NoRowsExtracted,
            "drawing contains no usable text labels",
        ));
    }
    let row_warnings = std::mem::take(&mut trace.warnings);
    trace.warnings = warnings.iter().cloned().chain(row_warnings).collect();

    Ok(Extraction {
        table,
        path: ExtractionPath::Fallback,
        warnings,
        trace,
    })
}

/// Load a drawing file through `loader`, then extract it.
pub fn extract_file(
    path: &Path,
    loader: &dyn DrawingLoader,
    mapping: &MappingDef,
) -> Result<Extraction, WiretabError> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string);
    let drawing = loader.load(&bytes, name)?;
    extract_table(&drawing, mapping)
}
