pub mod dxf;

use crate::error::WiretabError;
use serde::{Deserialize, Serialize};

/// A tagged key/value pair attached to a block instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub tag: String,
    pub value: String,
}

impl Attribute {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// The drawing entities the extractor cares about. Everything else a CAD
/// file contains (lines, arcs, dimensions) is dropped by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    BlockInstance {
        name: String,
        x: f64,
        y: f64,
        attributes: Vec<Attribute>,
    },
    Text {
        value: String,
        x: f64,
        y: f64,
    },
    MText {
        value: String,
        x: f64,
        y: f64,
    },
}

impl Entity {
    /// Raw text value and insertion point, for plain and multi-line text.
    pub fn text(&self) -> Option<(&str, f64, f64)> {
        match self {
            Entity::Text { value, x, y } | Entity::MText { value, x, y } => {
                Some((value.as_str(), *x, *y))
            }
            Entity::BlockInstance { .. } => None,
        }
    }
}

/// A parsed drawing document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Drawing name (usually the file stem).
    pub name: Option<String>,
    pub entities: Vec<Entity>,
}

impl Drawing {
    pub fn block_instances(&self) -> impl Iterator<Item = (&str, &[Attribute])> {
        self.entities.iter().filter_map(|e| match e {
            Entity::BlockInstance {
                name, attributes, ..
            } => Some((name.as_str(), attributes.as_slice())),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.entities.iter().filter_map(Entity::text)
    }
}

/// Trait for drawing file backends.
pub trait DrawingLoader: Send + Sync {
    /// Parse drawing bytes into the entity model.
    fn load(&self, bytes: &[u8], name: Option<String>) -> Result<Drawing, WiretabError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
