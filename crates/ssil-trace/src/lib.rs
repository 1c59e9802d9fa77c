//! ssil-trace
//!
//! TraceReader: CSV -> ordered `TraceRecord`s.
//!
//! Column contract (header required, order-independent, extra columns ignored):
//!
//! | Column | Required | Notes                                        |
//! |--------|----------|----------------------------------------------|
//! | `a`    | yes      | activity, any finite real (clamped later)    |
//! | `s`    | yes      | stress, any finite real (floored later)      |
//! | `t`    | no       | signed integer; empty/absent => row position |
//!
//! Records are stably sorted by `t`: ties keep input order.

mod loader;

pub use loader::{load_trace_file, parse_trace_csv, MIN_RECORDS};
