// src/error.rs
use thiserror::Error;

/// Failure taxonomy for a pipeline run.
///
/// `Auth` and `Transport` abort the run with no retry; `Io` aborts the run it
/// occurs in. `Data` is recoverable when it concerns a single record (the
/// normalizer logs it and skips the record) and fatal when it concerns a
/// whole file the renderer cannot parse.
#[derive(Debug, Error)]
pub enum Error {
    /// Credential rejected by the platform; carries the platform's own
    /// error message verbatim.
    #[error("credential rejected: {0}")]
    Auth(String),

    /// Network or API call failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Malformed data in a record or file.
    #[error("bad data: {0}")]
    Data(String),

    /// Local file read/write failure.
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Data(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
