//! `p3dgen generate` command

use anyhow::{Context, Result};
use p3dgen_core::{ChunkRegistry, GenError, GeneratorConfig, WriteOutcome};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command-line inputs of a generation run.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub copyright: Option<String>,
    pub docs: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Load a generator configuration file
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| GenError::io(path, e))
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    info!(path = %path.display(), "loaded configuration");

    Ok(config)
}

/// Parse a generator configuration from TOML text
pub fn parse_config(content: &str) -> Result<GeneratorConfig> {
    toml::from_str(content).map_err(|e| GenError::Config(e.to_string()).into())
}

/// Resolve the effective configuration; flags win over the file.
pub fn resolve_config(options: &Options) -> Result<GeneratorConfig> {
    let mut config = match &options.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(copyright) = &options.copyright {
        config.copyright = copyright.clone();
    }
    if let Some(docs) = &options.docs {
        config.docs_path = docs.clone();
    }

    debug!(
        namespace = %config.namespace,
        header = %config.header_file,
        source = %config.source_file,
        docs = %config.docs_path.display(),
        "resolved configuration"
    );

    Ok(config)
}

/// Run the generate command
pub fn run(options: &Options) -> Result<()> {
    let config = resolve_config(options)?;

    let report = p3dgen_core::run(
        &options.input,
        &options.output,
        &config,
        ChunkRegistry::builtin(),
    )
    .with_context(|| format!("Failed to generate from {}", options.input.display()))?;

    println!(
        "Generated {} chunk types ({} fields)",
        report.chunks, report.plans
    );
    for (path, outcome) in [
        (&report.header_path, report.header),
        (&report.source_path, report.source),
    ] {
        let status = match outcome {
            WriteOutcome::Written => "written",
            WriteOutcome::Unchanged => "unchanged",
        };
        println!("  {} ({status})", path.display());
    }
    println!("  {} (written)", report.docs_path.display());

    Ok(())
}
