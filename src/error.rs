use thiserror::Error;

/// Errors at the fallible edges of the crate: I/O, configuration and
/// string parsing. Curve editing itself never fails; out of range indices
/// are reported through `Option`/`bool` return values instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown continuity class '{0}', expected one of c0, c1, c2, g0, g1")]
    UnknownContinuity(String),
}

impl Error {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
