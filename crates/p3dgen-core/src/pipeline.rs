//! One generation run, from schema file to artifacts on disk.

use crate::config::GeneratorConfig;
use crate::emit;
use crate::error::{GenError, GenResult};
use crate::generator::{self, Generated};
use crate::output::{self, WriteOutcome};
use crate::registry::ChunkRegistry;
use crate::schema::Schema;
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub chunks: usize,
    pub plans: usize,
    pub header_path: PathBuf,
    pub header: WriteOutcome,
    pub source_path: PathBuf,
    pub source: WriteOutcome,
    pub docs_path: PathBuf,
}

impl RunReport {
    /// Whether any code artifact was rewritten.
    pub fn code_changed(&self) -> bool {
        self.header == WriteOutcome::Written || self.source == WriteOutcome::Written
    }
}

/// Load a schema file and compile it without writing anything.
pub fn compile_file(input: &Path, registry: &ChunkRegistry) -> GenResult<Generated> {
    if !input.is_file() {
        return Err(GenError::InputNotFound(input.to_path_buf()));
    }

    let schema = Schema::from_file(input)?;
    info!(input = %input.display(), chunks = schema.len(), "schema loaded");

    Ok(generator::generate(&schema, registry))
}

/// Generate all artifacts for `input` into `output_dir`.
///
/// Every artifact is rendered before the first write, so a failure
/// before that point leaves the output directory untouched.
pub fn run(
    input: &Path,
    output_dir: &Path,
    config: &GeneratorConfig,
    registry: &ChunkRegistry,
) -> GenResult<RunReport> {
    if !input.is_file() {
        return Err(GenError::InputNotFound(input.to_path_buf()));
    }
    if !output_dir.is_dir() {
        return Err(GenError::OutputDirNotFound(output_dir.to_path_buf()));
    }
    config.validate()?;

    let generated = compile_file(input, registry)?;
    let rendered = emit::render_all(&generated, config, registry);

    let header_path = output_dir.join(&config.header_file);
    let source_path = output_dir.join(&config.source_file);

    let header = output::write_if_changed(&header_path, rendered.header.as_bytes())?;
    let source = output::write_if_changed(&source_path, rendered.source.as_bytes())?;
    output::write_always(&config.docs_path, rendered.docs.as_bytes())?;

    let report = RunReport {
        chunks: generated.chunks.len(),
        plans: generated.plan_count(),
        header_path,
        header,
        source_path,
        source,
        docs_path: config.docs_path.clone(),
    };

    info!(
        chunks = report.chunks,
        plans = report.plans,
        code_changed = report.code_changed(),
        "generation complete"
    );

    Ok(report)
}

#[cfg(test)]
#[path = "pipeline/pipeline_tests.rs"]
mod pipeline_tests;
