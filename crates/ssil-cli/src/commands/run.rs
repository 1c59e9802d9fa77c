//! `ssil run`

use anyhow::Result;
use clap::Args;
use ssil_config::{resolve_params, ParamOverrides, UnusedKeyPolicy};
use ssil_core::SsilError;
use ssil_runtime::{run_engine, RunRequest, DEFAULT_OUT};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct EngineArgs {
    /// Input trace CSV (columns a,s; optional t)
    #[arg(long = "in")]
    pub input: PathBuf,

    /// Output table path; `<out>.sha256` is written next to it
    #[arg(long = "out", default_value = DEFAULT_OUT)]
    pub output: PathBuf,

    /// YAML config layers in merge order (keys under `engine:`)
    #[arg(long = "config")]
    pub config_paths: Vec<PathBuf>,

    /// Fail instead of warn on unknown config keys
    #[arg(long, default_value_t = false)]
    pub strict_config: bool,

    /// Trailing window length (values below 1 become 1)
    #[arg(long = "H", allow_negative_numbers = true)]
    pub h: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub delta_max: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub s_max: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub beta: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub gamma: Option<f64>,

    #[arg(long = "wA", allow_negative_numbers = true)]
    pub w_a: Option<f64>,

    #[arg(long = "wB", allow_negative_numbers = true)]
    pub w_b: Option<f64>,

    #[arg(long = "wS", allow_negative_numbers = true)]
    pub w_s: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub eta: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub rho: Option<f64>,
}

impl EngineArgs {
    fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            h: self.h,
            delta_max: self.delta_max,
            s_max: self.s_max,
            rho: self.rho,
            beta: self.beta,
            gamma: self.gamma,
            eta: self.eta,
            w_a: self.w_a,
            w_b: self.w_b,
            w_s: self.w_s,
        }
    }
}

pub fn run(args: EngineArgs) -> Result<()> {
    for p in &args.config_paths {
        if !p.is_file() {
            return Err(SsilError::MissingFile(p.clone()).into());
        }
    }

    let policy = if args.strict_config {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let resolved = resolve_params(&args.config_paths, &args.overrides(), policy)
        .map_err(|e| SsilError::BadArguments(format!("{e:#}")))?;

    if let Some(report) = resolved.unused.as_ref().filter(|r| !r.is_clean()) {
        warn!(
            unused_leaf_keys = report.unused_leaf_pointers.len(),
            "CONFIG_UNUSED_KEYS"
        );
        for p in report.unused_leaf_pointers.iter().take(50) {
            warn!(unused = %p, "unused config key");
        }
    }
    if let Some(hash) = &resolved.config_hash {
        info!(config_hash = %hash, layers = args.config_paths.len(), "config loaded");
    }

    let req = RunRequest::new(&args.input, &args.output, resolved.params);
    let outcome = run_engine(&req)?;

    println!(
        "ssil_out={} sha256={} rows={}",
        outcome.artifact.path.display(),
        outcome.artifact.sha256,
        outcome.rows
    );
    Ok(())
}
