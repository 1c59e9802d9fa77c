use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ssil_core::SsilError;

pub const CAPSULE_DIR: &str = "VERIFY_SSIL_CAPSULE";
pub const EXPECTED_FILE: &str = "EXPECTED_SHA256.txt";
pub const OUT_FILE: &str = "ssil_out.csv";

/// Reference cases the capsule knows how to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSet {
    Recover,
}

impl CaseSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseSet::Recover => "recover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replay {
    A,
    B,
}

impl Replay {
    fn dir_name(&self) -> &'static str {
        match self {
            Replay::A => "REPLAY_A",
            Replay::B => "REPLAY_B",
        }
    }
}

/// Paths under a repo root.
#[derive(Debug, Clone)]
pub struct CapsuleLayout {
    pub repo_root: PathBuf,
    pub case: CaseSet,
}

impl CapsuleLayout {
    /// The root is made absolute when it exists; a missing root surfaces later
    /// as a missing trace.
    pub fn new(repo_root: impl Into<PathBuf>, case: CaseSet) -> Self {
        let root = repo_root.into();
        let repo_root = fs::canonicalize(&root).unwrap_or(root);
        Self { repo_root, case }
    }

    pub fn trace_path(&self) -> PathBuf {
        self.repo_root
            .join("traces")
            .join(format!("trace_{}.csv", self.case.as_str()))
    }

    pub fn capsule_dir(&self) -> PathBuf {
        self.repo_root.join(CAPSULE_DIR)
    }

    pub fn out_root(&self) -> PathBuf {
        self.capsule_dir().join("OUT")
    }

    pub fn replay_dir(&self, r: Replay) -> PathBuf {
        self.out_root().join(r.dir_name())
    }

    pub fn replay_csv(&self, r: Replay) -> PathBuf {
        self.replay_dir(r).join(OUT_FILE)
    }

    pub fn expected_path(&self) -> PathBuf {
        self.capsule_dir().join(EXPECTED_FILE)
    }
}

/// Remove `p` if present, then create it (and parents) empty.
pub fn ensure_clean_dir(p: &Path) -> Result<(), SsilError> {
    match fs::remove_dir_all(p) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(SsilError::failure(format!("remove '{}': {e}", p.display())));
        }
    }
    fs::create_dir_all(p).map_err(|e| SsilError::failure(format!("create '{}': {e}", p.display())))
}
