pub mod extract;
pub mod mapping;
pub mod tokens;

use std::path::Path;

use wiretab_core::drawing::dxf::DxfLoader;
use wiretab_core::drawing::{Drawing, DrawingLoader};
use wiretab_core::error::WiretabError;

/// Load a drawing by extension: DXF through the loader, or a drawing model
/// saved as JSON.
pub fn load_drawing(path: &Path) -> Result<Drawing, WiretabError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let bytes = std::fs::read(path)?;
        return Ok(serde_json::from_slice(&bytes)?);
    }

    if !DxfLoader::accepts(path) {
        return Err(WiretabError::DrawingUnsupported(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string);
    DxfLoader::new().load(&bytes, name)
}
