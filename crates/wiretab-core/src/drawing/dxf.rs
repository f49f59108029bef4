//! DXF backend built on the `dxf` crate.
//!
//! Keeps `INSERT` entities (with their attribute lists), `TEXT` and `MTEXT`.
//! MTEXT markup is passed through untouched; stripping it is the
//! normalizer's job.

use std::io::Cursor;

use dxf::entities::EntityType;
use dxf::Drawing as DxfDrawing;

use crate::drawing::{Attribute, Drawing, DrawingLoader, Entity};
use crate::error::WiretabError;

/// Drawing loader for AutoCAD DXF files (R12 through 2018).
#[derive(Debug, Clone, Copy, Default)]
pub struct DxfLoader;

impl DxfLoader {
    pub fn new() -> Self {
        DxfLoader
    }

    /// Check whether a file name looks like a DXF drawing.
    pub fn accepts(path: &std::path::Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("dxf"))
            .unwrap_or(false)
    }
}

impl DrawingLoader for DxfLoader {
    fn load(&self, bytes: &[u8], name: Option<String>) -> Result<Drawing, WiretabError> {
        let dxf = DxfDrawing::load(&mut Cursor::new(bytes))
            .map_err(|e| WiretabError::Drawing(e.to_string()))?;

        let entities = convert_entities(&dxf);
        tracing::debug!(
            backend = self.backend_name(),
            entities = entities.len(),
            "loaded drawing"
        );

        Ok(Drawing { name, entities })
    }

    fn backend_name(&self) -> &str {
        "dxf"
    }
}

fn convert_entities(dxf: &DxfDrawing) -> Vec<Entity> {
    let mut out = Vec::new();

    for entity in dxf.entities() {
        match entity.specific {
            EntityType::Insert(ref insert) => {
                let attributes = insert
                    .attributes()
                    .map(|a| Attribute::new(a.attribute_tag.clone(), a.value.clone()))
                    .collect();
                out.push(Entity::BlockInstance {
                    name: insert.name.clone(),
                    x: insert.location.x,
                    y: insert.location.y,
                    attributes,
                });
            }
            EntityType::Text(ref text) => {
                out.push(Entity::Text {
                    value: text.value.clone(),
                    x: text.location.x,
                    y: text.location.y,
                });
            }
            EntityType::MText(ref mtext) => {
                // Long MTEXT values arrive as 250-char chunks before the final part.
                let mut value = mtext.extended_text.concat();
                value.push_str(&mtext.text);
                out.push(Entity::MText {
                    value,
                    x: mtext.insertion_point.x,
                    y: mtext.insertion_point.y,
                });
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_DXF: &str = r"0
SECTION
2
HEADER
9
$ACADVER
1
AC1015
0
ENDSEC
0
SECTION
2
ENTITIES
0
LINE
8
0
10
0.0
20
0.0
30
0.0
11
10.0
21
10.0
31
0.0
0
TEXT
8
0
10
12.5
20
40.0
30
0.0
40
2.5
1
0.5AVSS
0
MTEXT
8
0
10
30.0
20
41.0
30
0.0
40
2.5
1
CN1\PCN2
0
ENDSEC
0
EOF
";

    #[test]
    fn test_load_text_entities() {
        let drawing = DxfLoader::new()
            .load(TEXT_DXF.as_bytes(), Some("harness".into()))
            .unwrap();
        assert_eq!(drawing.name.as_deref(), Some("harness"));
        // LINE is dropped
        assert_eq!(drawing.entities.len(), 2);

        let texts: Vec<_> = drawing.texts().collect();
        assert_eq!(texts[0], ("0.5AVSS", 12.5, 40.0));
        assert_eq!(texts[1].0, "CN1\\PCN2");
        assert_eq!(drawing.block_instances().count(), 0);
    }

    #[test]
    fn test_invalid_dxf_is_error() {
        let err = DxfLoader::new().load(b"not a drawing", None);
        assert!(err.is_err());
    }

    #[test]
    fn test_accepts_extension() {
        assert!(DxfLoader::accepts(std::path::Path::new("a/b/harness.DXF")));
        assert!(!DxfLoader::accepts(std::path::Path::new("harness.dwg")));
    }
}
