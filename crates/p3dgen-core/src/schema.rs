//! Chunk schema model and loading.
//!
//! A schema is a JSON object mapping chunk type names to objects of
//! field name → directive:
//!
//! ```json
//! {
//!     "Mesh": {
//!         "!log": true,
//!         "name": "string",
//!         "version": "u32",
//!         "primGroups": "children PrimitiveGroup"
//!     }
//! }
//! ```
//!
//! Key order is significant and is preserved end to end. The reserved
//! `!log` key takes a boolean and enables diagnostic output in the
//! generated parser. Field values that are not strings are ignored.

use crate::error::{GenError, GenResult};
use serde_json::{Map, Value};
use std::path::Path;

/// Reserved field key that toggles diagnostic logging.
pub const LOG_FLAG: &str = "!log";

/// An ordered set of chunk definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub chunks: Vec<ChunkDef>,
}

/// One chunk type and its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDef {
    /// Chunk type name; also the generated class name.
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,

    /// Emit the unexpected-child log and the end-of-stream check.
    pub diagnostic_logging: bool,
}

/// A field name and its raw directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub directive: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, directive: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directive: directive.into(),
        }
    }
}

impl ChunkDef {
    /// Create an empty chunk definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            diagnostic_logging: false,
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<String>, directive: impl Into<String>) -> Self {
        self.fields.push(FieldDef::new(name, directive));
        self
    }

    /// Set the diagnostic logging flag.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.diagnostic_logging = enabled;
        self
    }

    fn from_json(name: &str, value: &Value) -> Self {
        let mut chunk = ChunkDef::new(name);

        // Anything other than an object describes a chunk with no fields.
        let Some(properties) = value.as_object() else {
            return chunk;
        };

        for (key, value) in properties {
            if key == LOG_FLAG {
                if let Some(enabled) = value.as_bool() {
                    chunk.diagnostic_logging = enabled;
                }
                continue;
            }

            if let Some(directive) = value.as_str() {
                chunk.fields.push(FieldDef::new(key.as_str(), directive));
            }
        }

        chunk
    }
}

impl Schema {
    /// Load a schema from a file.
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;

        Self::from_str(&content)
    }

    /// Parse a schema from JSON text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> GenResult<Self> {
        let root: Value = serde_json::from_str(content)?;

        let Value::Object(chunks) = root else {
            return Err(GenError::Schema(
                "top level must be an object of chunk definitions".to_string(),
            ));
        };

        Ok(Self::from_map(&chunks))
    }

    fn from_map(chunks: &Map<String, Value>) -> Self {
        Self {
            chunks: chunks
                .iter()
                .map(|(name, value)| ChunkDef::from_json(name, value))
                .collect(),
        }
    }

    /// Look up a chunk definition by name.
    pub fn chunk(&self, name: &str) -> Option<&ChunkDef> {
        self.chunks.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl FromIterator<ChunkDef> for Schema {
    fn from_iter<I: IntoIterator<Item = ChunkDef>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}
