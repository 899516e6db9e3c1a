//! Error types for the alerting-fixtures crate.

use alerting_model::ModelError;
use thiserror::Error;

/// Errors surfaced by fixture configuration and checked builders.
///
/// Plain generation never fails; only the configuration layer and the
/// builders that verify their own output return these.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The generator configuration could not be loaded.
    #[error("invalid fixture configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// A built payload does not have the expected shape.
    #[error("unexpected payload for {ref_id}: {reason}")]
    UnexpectedPayload {
        /// Ref id of the offending query step.
        ref_id: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A generated entity failed domain validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_config() {
        let err = FixtureError::InvalidConfig {
            reason: "seed is not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid fixture configuration: seed is not a number"
        );
    }

    #[test]
    fn error_display_unexpected_payload() {
        let err = FixtureError::UnexpectedPayload {
            ref_id: "C".to_string(),
            reason: "not a hysteresis expression".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected payload for C: not a hysteresis expression"
        );
    }

    #[test]
    fn error_from_model_is_transparent() {
        let err: FixtureError = ModelError::InvalidRule {
            reason: "org id must be positive, got 0".to_string(),
        }
        .into();
        assert!(matches!(err, FixtureError::Model(_)));
        assert_eq!(
            err.to_string(),
            "invalid alert rule: org id must be positive, got 0"
        );
    }
}
