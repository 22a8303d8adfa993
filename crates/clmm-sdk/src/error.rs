//! SDK error types

use clmm_core::{ClmmError, ErrorCategory};
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    #[error(transparent)]
    Core(#[from] ClmmError),

    #[error("Tick {0} not found")]
    TickNotFound(i32),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Helper to build a decode error for one field
    pub fn decode(field: &str, reason: impl std::fmt::Display) -> Self {
        SdkError::Decode(format!("{}: {}", field, reason))
    }

    /// Classify this error; configuration and IO failures have no math category
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            SdkError::Core(err) => Some(err.category()),
            SdkError::TickNotFound(_) | SdkError::DataUnavailable(_) | SdkError::Decode(_) => {
                Some(ErrorCategory::DataUnavailable)
            }
            SdkError::Config(_) | SdkError::Io(_) => None,
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for SdkError {
    fn from(err: toml::de::Error) -> Self {
        SdkError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SdkError {
    fn from(err: toml::ser::Error) -> Self {
        SdkError::Config(err.to_string())
    }
}
