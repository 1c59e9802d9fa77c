//! ssil-runtime
//!
//! One engine run, end to end:
//!
//! TRACE FILE -> TraceReader -> evaluate -> render (in memory) -> write table + sidecar
//!
//! Nothing touches the output path until the whole table has rendered, so a
//! failed run leaves neither `ssil_out.csv` nor its sidecar behind.

use std::path::{Path, PathBuf};

use ssil_artifacts::{render_table, write_artifact, WrittenArtifact};
use ssil_core::{evaluate, EngineParams, RiskLevel, SsilError};
use ssil_trace::load_trace_file;
use tracing::{debug, info};

/// Default output file name.
pub const DEFAULT_OUT: &str = "ssil_out.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub artifact: WrittenArtifact,
    pub rows: usize,
    /// Ratchet level at the last step.
    pub final_risk: RiskLevel,
}

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: EngineParams,
}

impl RunRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, params: EngineParams) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            params,
        }
    }
}

pub fn run_engine(req: &RunRequest) -> Result<RunOutcome, SsilError> {
    run_engine_paths(&req.input, &req.output, &req.params)
}

pub fn run_engine_paths(input: &Path, output: &Path, params: &EngineParams) -> Result<RunOutcome, SsilError> {
    params.validate()?;

    let trace = load_trace_file(input)?;
    debug!(input = %input.display(), records = trace.len(), "trace loaded");

    let records = evaluate(params, &trace)?;
    let table = render_table(&records)?;

    let artifact = write_artifact(output, &table)?;
    let final_risk = records
        .last()
        .map(|r| r.risk)
        .unwrap_or(RiskLevel::R0);

    info!(
        out = %artifact.path.display(),
        sha256 = %artifact.sha256,
        rows = records.len(),
        final_risk = final_risk.as_str(),
        "ssil run complete"
    );

    Ok(RunOutcome {
        artifact,
        rows: records.len(),
        final_risk,
    })
}
