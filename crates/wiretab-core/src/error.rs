use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WiretabError {
    #[error("drawing could not be loaded: {0}")]
    Drawing(String),

    #[error("unsupported drawing format: {0}. Currently only DXF drawings are supported.")]
    DrawingUnsupported(String),

    #[error("failed to load mapping from {path}: {reason}")]
    MappingLoad { path: PathBuf, reason: String },

    #[error("invalid mapping: {0}")]
    MappingInvalid(String),

    #[error("failed to write output: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
