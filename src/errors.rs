use thiserror::Error;

/// Error type covering the fallible edges of the crate: persistence and
/// statement import. Derived computations never fail.
#[derive(Debug, Error)]
pub enum GigFinError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Storage error: {0}")]
    Storage(String),
}
