//! Replay verification capsule.
//!
//! stdout carries exactly one line: `SSIL_CAPSULE_RESULT: PASS|FAIL`.
//! Diagnostics go to stderr. Exit: 0 pass, 1 fail, 2 bad arguments, 3 missing file.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use ssil_capsule::{
    run_capsule, CapsuleLayout, CapsuleMode, CaseSet, EngineRunner, InProcessRunner, ProcessRunner,
    RESULT_PREFIX,
};
use ssil_core::SsilError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ssil-capsule")]
#[command(about = "Two-replay byte-identity check against a pinned fingerprint", long_about = None)]
struct Cli {
    /// Checkout containing traces/ and VERIFY_SSIL_CAPSULE/
    #[arg(long, alias = "repo_root", default_value = ".")]
    repo_root: PathBuf,

    /// Reference case to replay
    #[arg(long, value_enum, default_value_t = CaseArg::Recover)]
    case: CaseArg,

    /// Write EXPECTED_SHA256.txt instead of verifying against it
    #[arg(long, alias = "pin_fingerprint", default_value_t = false)]
    pin_fingerprint: bool,

    /// Engine binary (default: `ssil` next to this executable)
    #[arg(long, conflicts_with = "in_process")]
    engine: Option<PathBuf>,

    /// Run both replays inside this process instead of spawning the engine
    #[arg(long, default_value_t = false)]
    in_process: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CaseArg {
    Recover,
}

impl From<CaseArg> for CaseSet {
    fn from(c: CaseArg) -> Self {
        match c {
            CaseArg::Recover => CaseSet::Recover,
        }
    }
}

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return finish(Err(SsilError::BadArguments(e.kind().to_string())));
        }
    };

    finish(execute(&cli))
}

fn execute(cli: &Cli) -> Result<(), SsilError> {
    let mode = if cli.pin_fingerprint {
        CapsuleMode::Pin
    } else {
        CapsuleMode::Verify
    };
    let layout = CapsuleLayout::new(&cli.repo_root, cli.case.into());

    let runner: Box<dyn EngineRunner> = if cli.in_process {
        Box::new(InProcessRunner)
    } else {
        match &cli.engine {
            Some(p) => Box::new(ProcessRunner::new(p)),
            None => Box::new(ProcessRunner::sibling_of_current_exe()?),
        }
    };

    run_capsule(&layout, mode, runner.as_ref()).map(|_| ())
}

fn finish(result: Result<(), SsilError>) -> ExitCode {
    match result {
        Ok(()) => {
            println!("{RESULT_PREFIX} PASS");
            ExitCode::SUCCESS
        }
        Err(e) => {
            match &e {
                SsilError::MissingFile(p) => eprintln!("MISSING: {}", p.display()),
                SsilError::BadArguments(_) => {}
                other => eprintln!("FAIL: {other}"),
            }
            println!("{RESULT_PREFIX} FAIL");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
