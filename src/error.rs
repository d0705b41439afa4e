use thiserror::Error;

/// Errors from the layers around the simulation (config and storage).
///
/// The simulation itself is total and never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
