//! Shared fixtures for scenario tests: synthetic traces and throwaway
//! repo-shaped workspaces.

use anyhow::{Context, Result};
use ssil_core::TraceRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// The `recover` reference trace shipped under `traces/`.
pub const RECOVER_TRACE_CSV: &str = include_str!("../../../traces/trace_recover.csv");

/// `n` rows at the centre with no stress, t = 1..=n.
pub fn flat_trace(n: usize) -> Vec<TraceRecord> {
    (1..=n).map(|t| TraceRecord::new(t as i64, 0.0, 0.0)).collect()
}

/// Steady outward drift: `a` grows by `step` per row, stress by `step * 8`.
pub fn escalating_trace(n: usize, step: f64) -> Vec<TraceRecord> {
    (1..=n)
        .map(|k| {
            let k_f = k as f64;
            TraceRecord::new(k as i64, step * k_f, step * 8.0 * k_f)
        })
        .collect()
}

/// Calm lead-in, outward escalation to `peak`, then geometric decay back
/// toward the centre with stress fading out.
pub fn recovering_trace(calm: usize, rise: usize, decay: usize, peak: f64) -> Vec<TraceRecord> {
    let mut out = Vec::with_capacity(calm + rise + decay);
    let mut t = 1i64;
    for _ in 0..calm {
        out.push(TraceRecord::new(t, 0.0, 0.5));
        t += 1;
    }
    for k in 1..=rise {
        let frac = k as f64 / rise.max(1) as f64;
        out.push(TraceRecord::new(t, peak * frac, 8.0 * frac));
        t += 1;
    }
    let mut a = peak;
    let mut s = 8.0;
    for _ in 0..decay {
        a *= 0.8;
        s *= 0.7;
        out.push(TraceRecord::new(t, a, s));
        t += 1;
    }
    out
}

/// Render records as a `t,a,s` CSV document.
pub fn trace_to_csv(records: &[TraceRecord]) -> Result<String> {
    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(["t", "a", "s"])?;
    for r in records {
        w.write_record([r.t.to_string(), r.a.to_string(), r.s.to_string()])?;
    }
    let bytes = w.into_inner().context("flush trace csv")?;
    String::from_utf8(bytes).context("trace csv is not utf-8")
}

/// A temporary directory laid out like a checkout: `traces/` plus whatever
/// a scenario writes into it. Removed on drop.
pub struct TempRepo {
    dir: tempfile::TempDir,
}

impl TempRepo {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp repo")?;
        fs::create_dir_all(dir.path().join("traces")).context("create traces dir")?;
        Ok(Self { dir })
    }

    /// A repo already holding the `recover` reference trace.
    pub fn with_recover_trace() -> Result<Self> {
        let repo = Self::new()?;
        repo.write_trace_csv("recover", RECOVER_TRACE_CSV)?;
        Ok(repo)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `traces/trace_<case>.csv`.
    pub fn write_trace_csv(&self, case: &str, body: &str) -> Result<PathBuf> {
        let p = self.path(&format!("traces/trace_{case}.csv"));
        fs::write(&p, body).with_context(|| format!("write {}", p.display()))?;
        Ok(p)
    }

    /// Write any file relative to the root, creating parents.
    pub fn write_file(&self, rel: &str, body: &[u8]) -> Result<PathBuf> {
        let p = self.path(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&p, body).with_context(|| format!("write {}", p.display()))?;
        Ok(p)
    }
}
