use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Session lifecycle errors
    #[error("Invalid session transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    // Transport errors
    #[error("Unexpected HTTP status: {status}")]
    UnexpectedHttpStatus { status: u16 },

    #[error("Response body exceeds {limit} bytes (got {actual})")]
    ResponseTooLarge { limit: usize, actual: usize },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    // Display errors
    #[error("Invalid display line {line} (maximum: {max})")]
    InvalidLine { line: usize, max: usize },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
