//! Error types for the alerting-model crate.

use thiserror::Error;

/// Errors raised when a domain object fails structural validation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The alert rule violates a structural invariant.
    #[error("invalid alert rule: {reason}")]
    InvalidRule {
        /// The reason the rule is invalid.
        reason: String,
    },

    /// The notification settings violate a structural invariant.
    #[error("invalid notification settings: {reason}")]
    InvalidNotificationSettings {
        /// The reason the settings are invalid.
        reason: String,
    },

    /// A query payload could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
