//! ssil-core
//!
//! Per-step instability engine.
//!
//! Pipeline: TRACE -> STEP UPDATE (causal pass) -> WINDOW PREDICATES -> CLASSIFIER
//!
//! - Explicitly threaded recurrence state (`EngineState`), never global
//! - Trailing-window predicates over the completed per-step arrays
//! - Monotone risk ratchet `R0 < E0 < I1 < I2 < C` for the life of a run
//! - Admission: CONTINUE iff the ratchet is still at R0
//!
//! Pure deterministic logic. No IO, no wall-clock, no logging.

mod classify;
mod engine;
mod error;
mod step;
mod types;
mod window;

pub use classify::{admission_for, classify_raw, RiskRatchet};
pub use engine::{evaluate, evaluate_steps};
pub use error::SsilError;
pub use step::{clamp, sgn, step};
pub use types::*;
pub use window::{edge_zero, recovery, window_bounds};
