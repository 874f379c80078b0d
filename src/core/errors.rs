use std::result::Result as StdResult;

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::services::ServiceError;

/// Unified error type for the tracker, its services and storage.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl From<ServiceError> for TrackerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) => TrackerError::Validation(message),
            ServiceError::NotFound(message) => TrackerError::NotFound(message),
        }
    }
}

impl From<ConfigError> for TrackerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => TrackerError::Storage(io.to_string()),
            other => TrackerError::Config(other.to_string()),
        }
    }
}
