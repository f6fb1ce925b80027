//! Error types shared across the crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatswpError {
    /// The image provider could not produce a reference
    #[error("Image provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A picture could not be downloaded or decoded
    #[error("Image preload failed: {0}")]
    PreloadFailed(String),

    /// An operation was invoked while its preconditions did not hold
    #[error("Invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatswpError>;
