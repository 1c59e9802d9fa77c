use std::path::PathBuf;

/// Error taxonomy shared by the engine and the verification capsule.
///
/// Every variant is fatal: the run aborts and nothing is written. The
/// process boundary maps each variant to an exit code via [`SsilError::exit_code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsilError {
    /// Missing header / required column, or a cell that failed to parse.
    InvalidInput(String),
    /// Fewer than two records after loading.
    InsufficientData { rows: usize },
    /// A required artifact (engine, trace, fingerprint record) is absent.
    MissingFile(PathBuf),
    /// Byte length or content hash disagreement between runs or against the pin.
    VerificationMismatch(String),
    /// Invocation usage error (bad flag, non-finite parameter).
    BadArguments(String),
    /// IO or subprocess failure with no more specific classification.
    Failure(String),
}

impl SsilError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            SsilError::InvalidInput(_) => "INVALID_INPUT",
            SsilError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            SsilError::MissingFile(_) => "MISSING_FILE",
            SsilError::VerificationMismatch(_) => "VERIFICATION_MISMATCH",
            SsilError::BadArguments(_) => "BAD_ARGUMENTS",
            SsilError::Failure(_) => "FAILURE",
        }
    }

    /// Process exit code: 1 generic failure, 2 bad arguments, 3 missing file.
    pub fn exit_code(&self) -> u8 {
        match self {
            SsilError::BadArguments(_) => 2,
            SsilError::MissingFile(_) => 3,
            SsilError::InvalidInput(_)
            | SsilError::InsufficientData { .. }
            | SsilError::VerificationMismatch(_)
            | SsilError::Failure(_) => 1,
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        SsilError::InvalidInput(msg.into())
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        SsilError::Failure(msg.into())
    }
}

impl std::fmt::Display for SsilError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SsilError::InvalidInput(msg) => write!(f, "INVALID_INPUT: {msg}"),
            SsilError::InsufficientData { rows } => write!(
                f,
                "INSUFFICIENT_DATA: need at least 2 rows to compute da(t), got {rows}"
            ),
            SsilError::MissingFile(p) => write!(f, "MISSING_FILE: {}", p.display()),
            SsilError::VerificationMismatch(msg) => write!(f, "VERIFICATION_MISMATCH: {msg}"),
            SsilError::BadArguments(msg) => write!(f, "BAD_ARGUMENTS: {msg}"),
            SsilError::Failure(msg) => write!(f, "FAILURE: {msg}"),
        }
    }
}

impl std::error::Error for SsilError {}

impl From<std::io::Error> for SsilError {
    fn from(e: std::io::Error) -> Self {
        SsilError::Failure(format!("io error: {e}"))
    }
}
