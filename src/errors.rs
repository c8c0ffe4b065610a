use thiserror::Error;

use crate::domain::Step;

/// Failure of a single call against the storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

#[derive(Debug, Error)]
pub enum ProvisionerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{step} failed: {source}")]
    Provider {
        step: Step,
        #[source]
        source: ProviderError,
    },

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProvisionerError>;
