use crate::error::WiretabError;
use crate::mapping::schema::MappingDef;
use crate::mapping::validate_mapping;

const WIRE_LIST_JSON: &str = include_str!("../../../../mappings/wire-list.json");
const WIRE_LIST_MIN_JSON: &str = include_str!("../../../../mappings/wire-list-min.json");

/// Available predefined mappings.
pub const PRESETS: &[&str] = &["wire-list", "wire-list-min"];

/// Load a predefined mapping by name.
pub fn load_preset(name: &str) -> Result<MappingDef, WiretabError> {
    let json = match name {
        "wire-list" => WIRE_LIST_JSON,
        "wire-list-min" => WIRE_LIST_MIN_JSON,
        _ => {
            return Err(WiretabError::MappingInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let mapping: MappingDef = serde_json::from_str(json)?;
    validate_mapping(&mapping)?;
    Ok(mapping)
}
