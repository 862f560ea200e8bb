//! Error types for the parser generator

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generator operations
///
/// Only conditions that stop a run are represented here. Malformed
/// directives, unregistered chunk names and dispatch collisions are
/// tolerated by the compiler and never surface as errors.
#[derive(Error, Debug)]
pub enum GenError {
    /// The schema file does not exist
    #[error("input schema not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The output directory does not exist
    #[error("output directory not found: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    /// The schema text is not valid JSON
    #[error("schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),

    /// The schema parsed but does not have the expected top-level shape
    #[error("invalid schema: {0}")]
    Schema(String),

    /// Generator configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading inputs or writing artifacts
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Process exit code for this error
    ///
    /// Every failure the generator surfaces maps to `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            GenError::InputNotFound(_)
            | GenError::OutputDirNotFound(_)
            | GenError::SchemaParse(_)
            | GenError::Schema(_)
            | GenError::Config(_)
            | GenError::Io { .. } => 1,
        }
    }

    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}
