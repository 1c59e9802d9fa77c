//! ssil-artifacts
//!
//! OutputSerializer: the single artifact a run produces.
//!
//! - `fixedpoint`: q6 rendering (6 fractional digits, half away from zero,
//!   applied to the shortest decimal representation of the binary value)
//! - `table`: CSV table rendering, CRLF rows, fixed column order
//! - `digest`: SHA-256 of the exact output bytes + `<file>.sha256` sidecar
//!
//! Rendering is done fully in memory; files are only written once every row
//! has formatted successfully.

mod digest;
pub mod fixedpoint;
mod table;

pub use digest::{sha256_file, sha256_hex, sidecar_path, write_artifact, WrittenArtifact};
pub use fixedpoint::{format_q6, SignStyle};
pub use table::{render_table, HEADER};
