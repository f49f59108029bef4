use wiretab_core::error::WiretabError;
use wiretab_core::extraction::Extraction;

pub fn print(extractions: &[&Extraction]) -> Result<(), WiretabError> {
    let json = serde_json::to_string_pretty(extractions)?;
    println!("{json}");
    Ok(())
}
