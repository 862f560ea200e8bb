//! p3dgen CLI - P3D chunk parser generator
//!
//! Commands:
//! - `p3dgen generate` - Generate C++ parsers and chunk documentation
//! - `p3dgen check` - Compile a schema and report what it produces

use clap::{Parser, Subcommand};
use p3dgen_core::GenError;
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod generate;
mod logging;

#[derive(Parser)]
#[command(name = "p3dgen")]
#[command(author, version, about = "Parser generator for P3D chunk files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C++ parser classes and chunk documentation
    Generate {
        /// Path to the chunk schema (JSON)
        #[arg(short, long, visible_alias = "p3din")]
        input: PathBuf,

        /// Directory receiving the generated header and source
        #[arg(short, long, visible_alias = "p3dout")]
        output: PathBuf,

        /// Copyright banner for the generated code
        #[arg(short, long)]
        copyright: Option<String>,

        /// Path of the generated chunk documentation (default: Chunks.md)
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Path to a p3dgen.toml configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compile a schema without writing anything
    Check {
        /// Path to the chunk schema (JSON)
        #[arg(short, long, visible_alias = "p3din")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<GenError>()
                .map_or(1, GenError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            input,
            output,
            copyright,
            docs,
            config,
        } => {
            let options = generate::Options {
                input,
                output,
                copyright,
                docs,
                config,
            };
            generate::run(&options)?;
        }
        Commands::Check { input } => {
            check::run(&input)?;
        }
    }

    Ok(())
}
