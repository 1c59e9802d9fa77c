use std::fs;
use std::path::PathBuf;

use ssil_artifacts::sha256_file;
use ssil_config::LockedProfile;
use ssil_core::SsilError;
use tracing::{info, warn};

use crate::fingerprint::{find_expected_hash, fingerprint_record};
use crate::layout::{ensure_clean_dir, CapsuleLayout, Replay};
use crate::runner::EngineRunner;

/// Prefix of the single line the capsule prints to stdout.
pub const RESULT_PREFIX: &str = "SSIL_CAPSULE_RESULT:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapsuleMode {
    /// Compare both replays against the pinned fingerprint.
    Verify,
    /// Write the fingerprint from replay A (after A = B).
    Pin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapsuleReport {
    pub mode: CapsuleMode,
    pub sha256: String,
    pub bytes_len: u64,
    pub expected_path: PathBuf,
}

pub fn run_capsule(
    layout: &CapsuleLayout,
    mode: CapsuleMode,
    runner: &dyn EngineRunner,
) -> Result<CapsuleReport, SsilError> {
    runner.preflight()?;
    let trace = layout.trace_path();
    if !trace.exists() {
        return Err(SsilError::MissingFile(trace));
    }

    ensure_clean_dir(&layout.out_root())?;
    ensure_clean_dir(&layout.replay_dir(Replay::A))?;
    ensure_clean_dir(&layout.replay_dir(Replay::B))?;

    let profile = &LockedProfile::CAPSULE_V1;
    let out_a = layout.replay_csv(Replay::A);
    let out_b = layout.replay_csv(Replay::B);

    info!(runner = runner.name(), case = layout.case.as_str(), "replay A");
    runner.run(&trace, &out_a, profile)?;
    info!(runner = runner.name(), case = layout.case.as_str(), "replay B");
    runner.run(&trace, &out_b, profile)?;

    let len_a = file_len(&out_a)?;
    let len_b = file_len(&out_b)?;
    if len_a != len_b {
        return Err(SsilError::VerificationMismatch(format!(
            "replay sizes differ: A={len_a} B={len_b}"
        )));
    }

    let h_a = sha256_file(&out_a)?;
    let h_b = sha256_file(&out_b)?;
    if h_a != h_b {
        return Err(SsilError::VerificationMismatch(format!(
            "replay hashes differ: A={h_a} B={h_b}"
        )));
    }

    let expected_path = layout.expected_path();
    match mode {
        CapsuleMode::Pin => {
            fs::write(&expected_path, fingerprint_record(layout.case.as_str(), &h_a)).map_err(|e| {
                SsilError::failure(format!("write '{}': {e}", expected_path.display()))
            })?;
            info!(sha256 = %h_a, path = %expected_path.display(), "fingerprint pinned");
        }
        CapsuleMode::Verify => {
            if !expected_path.exists() {
                return Err(SsilError::MissingFile(expected_path));
            }
            let raw = fs::read(&expected_path).map_err(|e| {
                SsilError::failure(format!("read '{}': {e}", expected_path.display()))
            })?;
            let expected = find_expected_hash(&String::from_utf8_lossy(&raw)).ok_or_else(|| {
                SsilError::VerificationMismatch(format!(
                    "no 64-hex fingerprint in {}",
                    expected_path.display()
                ))
            })?;
            if h_a != expected || h_b != expected {
                warn!(expected = %expected, got = %h_a, "fingerprint mismatch");
                return Err(SsilError::VerificationMismatch(format!(
                    "expected {expected}, replays produced {h_a}"
                )));
            }
            info!(sha256 = %h_a, "fingerprint verified");
        }
    }

    Ok(CapsuleReport {
        mode,
        sha256: h_a,
        bytes_len: len_a,
        expected_path,
    })
}

fn file_len(p: &std::path::Path) -> Result<u64, SsilError> {
    fs::metadata(p)
        .map(|m| m.len())
        .map_err(|e| SsilError::failure(format!("stat '{}': {e}", p.display())))
}
