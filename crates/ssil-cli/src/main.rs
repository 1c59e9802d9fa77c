use anyhow::Result;
use clap::{Parser, Subcommand};
use ssil_core::SsilError;
use std::process::ExitCode;

mod commands;

use commands::run::EngineArgs;

#[derive(Parser)]
#[command(name = "ssil")]
#[command(about = "Per-step instability engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a trace CSV and write the per-step table + .sha256 sidecar
    Run(EngineArgs),

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (defaults -> site -> experiment...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Silent if .env.local is absent.
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.cmd {
        Commands::Run(args) => commands::run::run(args),
        Commands::ConfigHash { paths } => commands::config_hash(&paths),
    }
}

/// Engine errors carry their own exit code; anything else is a generic failure.
fn exit_code_for(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<SsilError>()
        .map(SsilError::exit_code)
        .unwrap_or(1)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
