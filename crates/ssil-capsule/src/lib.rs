//! ssil-capsule
//!
//! Replay verification: run the engine twice on a reference trace with a
//! locked parameter profile, into two freshly cleaned directories, and
//! require byte identity between the runs and against a pinned fingerprint.
//!
//! # Protocol
//! 1. Require the trace (and, for the process runner, the engine binary).
//! 2. Clean `OUT/`, `OUT/REPLAY_A/`, `OUT/REPLAY_B/`.
//! 3. Run A, run B.
//! 4. Sizes equal, then SHA-256 equal.
//! 5. Pin: write `EXPECTED_SHA256.txt`. Verify: both hashes equal the pinned one.
//!
//! Any failure is an error; the caller maps it to an exit code and prints
//! the single result line.

mod fingerprint;
mod layout;
mod protocol;
mod runner;

pub use fingerprint::{find_expected_hash, fingerprint_record};
pub use layout::{ensure_clean_dir, CapsuleLayout, CaseSet, Replay};
pub use protocol::{run_capsule, CapsuleMode, CapsuleReport, RESULT_PREFIX};
pub use runner::{EngineRunner, InProcessRunner, ProcessRunner, ENGINE_BIN};
