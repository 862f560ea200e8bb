//! Generator configuration types

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output layout and fixed text of the generated artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// C++ namespace wrapping every generated class
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// File name of the declaration artifact, inside the output directory
    #[serde(default = "default_header_file")]
    pub header_file: String,

    /// File name of the implementation artifact, inside the output directory
    #[serde(default = "default_source_file")]
    pub source_file: String,

    /// Path of the documentation artifact
    ///
    /// Relative paths resolve against the working directory, not the
    /// output directory.
    #[serde(default = "default_docs_path")]
    pub docs_path: PathBuf,

    /// Copyright banner written at the top of both code artifacts
    #[serde(default)]
    pub copyright: String,

    /// System includes of the declaration artifact
    #[serde(default = "default_header_includes")]
    pub header_includes: Vec<String>,

    /// System includes of the implementation artifact
    #[serde(default = "default_source_includes")]
    pub source_includes: Vec<String>,
}

fn default_namespace() -> String {
    "Donut::P3D".to_string()
}

fn default_header_file() -> String {
    "P3D.generated.h".to_string()
}

fn default_source_file() -> String {
    "P3D.generated.cpp".to_string()
}

fn default_docs_path() -> PathBuf {
    PathBuf::from("Chunks.md")
}

fn default_header_includes() -> Vec<String> {
    [
        "P3D/P3DChunk.h",
        "glm/vec2.hpp",
        "glm/vec3.hpp",
        "glm/vec4.hpp",
        "glm/gtc/quaternion.hpp",
        "glm/mat4x4.hpp",
        "string",
        "memory",
        "vector",
        "map",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_source_includes() -> Vec<String> {
    ["Core/MemoryStream.h", "fmt/format.h", "cassert", "iostream"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            header_file: default_header_file(),
            source_file: default_source_file(),
            docs_path: default_docs_path(),
            copyright: String::new(),
            header_includes: default_header_includes(),
            source_includes: default_source_includes(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the copyright banner
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }

    /// Set the documentation path
    pub fn with_docs_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.docs_path = path.into();
        self
    }

    /// Check that the configuration can produce valid artifacts
    pub fn validate(&self) -> GenResult<()> {
        if self.namespace.trim().is_empty() {
            return Err(GenError::Config("namespace cannot be empty".to_string()));
        }

        for (key, name) in [
            ("header_file", &self.header_file),
            ("source_file", &self.source_file),
        ] {
            if name.trim().is_empty() {
                return Err(GenError::Config(format!("{key} cannot be empty")));
            }
            if name.contains(['/', '\\']) {
                return Err(GenError::Config(format!(
                    "{key} must be a file name, got '{name}'"
                )));
            }
        }

        if self.header_file == self.source_file {
            return Err(GenError::Config(
                "header_file and source_file must differ".to_string(),
            ));
        }

        if self.docs_path.as_os_str().is_empty() {
            return Err(GenError::Config("docs_path cannot be empty".to_string()));
        }

        Ok(())
    }
}
