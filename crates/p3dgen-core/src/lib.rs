//! p3dgen-core - Schema-to-parser compiler for the P3D chunk format
//!
//! This crate turns a JSON description of P3D chunk types into C++ parser
//! classes and a Markdown chunk reference:
//! - [`Schema`] loads the ordered chunk definitions
//! - [`directive::compile`] turns each field directive into a [`FieldPlan`]
//! - [`generate`] builds sequential reads and child dispatch per chunk
//! - [`emit`] renders the header, source and documentation artifacts
//! - [`pipeline::run`] ties it together and writes only what changed

pub mod config;
pub mod directive;
pub mod emit;
pub mod error;
pub mod generator;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod schema;
pub mod types;

pub use config::GeneratorConfig;
pub use directive::{BufferSize, FieldPlan, PlanKind};
pub use error::{GenError, GenResult};
pub use generator::{ChunkArtifact, DispatchTable, Generated, generate};
pub use output::WriteOutcome;
pub use pipeline::{RunReport, compile_file, run};
pub use registry::ChunkRegistry;
pub use report::CheckReport;
pub use schema::{ChunkDef, FieldDef, Schema};
pub use types::NativeType;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CheckReport, ChunkDef, ChunkRegistry, GenError, GenResult, Generated, GeneratorConfig,
        RunReport, Schema, WriteOutcome,
    };
}
