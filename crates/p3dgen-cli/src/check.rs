//! `p3dgen check` command

use anyhow::{Context, Result};
use p3dgen_core::{CheckReport, ChunkRegistry};
use std::path::Path;

/// Compile a schema and print what it would generate
pub fn run(input: &Path) -> Result<()> {
    println!("Checking schema: {}", input.display());

    let registry = ChunkRegistry::builtin();
    let generated = p3dgen_core::compile_file(input, registry)
        .with_context(|| format!("Failed to compile {}", input.display()))?;
    let report = CheckReport::new(&generated, registry);

    print!("{report}");

    if report.is_clean() {
        println!("\nSchema is clean!");
    } else {
        println!(
            "\nSchema compiled with {} skipped and {} shadowed fields",
            report.skipped.len(),
            report.shadowed.len()
        );
    }

    Ok(())
}
