//! Query steps of an alert rule.
//!
//! An [`AlertQuery`] is one step in a rule's data pipeline: either a query
//! against a datasource or a server-side expression (reduce, threshold,
//! classic condition) that consumes the output of earlier steps.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// UID of the virtual datasource that evaluates server-side expressions.
pub const EXPR_DATASOURCE_UID: &str = "__expr__";

/// Type of the virtual datasource that evaluates server-side expressions.
pub const EXPR_DATASOURCE_TYPE: &str = "__expr__";

/// Datasource type of Prometheus queries.
pub const PROMETHEUS_DATASOURCE_TYPE: &str = "prometheus";

/// Datasource type of Loki queries.
pub const LOKI_DATASOURCE_TYPE: &str = "loki";

/// Time range of a query, expressed as offsets back from the evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelativeTimeRange {
    /// Start of the range (the larger offset).
    pub from: Duration,
    /// End of the range.
    pub to: Duration,
}

impl RelativeTimeRange {
    /// Creates a new relative time range.
    #[must_use]
    pub const fn new(from: Duration, to: Duration) -> Self {
        Self { from, to }
    }

    /// Returns true if the range starts before it ends.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.from > self.to
    }
}

/// A single query step of an alert rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertQuery {
    /// Reference identifier other steps and the rule condition use.
    pub ref_id: String,
    /// Datasource-specific query type tag.
    pub query_type: String,
    /// Time range the query covers.
    pub relative_time_range: RelativeTimeRange,
    /// UID of the datasource that runs the query.
    pub datasource_uid: String,
    /// Opaque datasource-specific payload.
    pub model: Value,
}

impl AlertQuery {
    /// Returns true if this step is a server-side expression.
    #[must_use]
    pub fn is_expression(&self) -> bool {
        self.datasource_uid == EXPR_DATASOURCE_UID
    }

    /// Returns the `type` field of the payload, if any.
    #[must_use]
    pub fn expression_type(&self) -> Option<&str> {
        self.model.get("type").and_then(Value::as_str)
    }

    /// Returns true if this step is a threshold expression with a recovery
    /// (unload) evaluator on its first condition.
    #[must_use]
    pub fn is_hysteresis_expression(&self) -> bool {
        if !self.is_expression() || self.expression_type() != Some("threshold") {
            return false;
        }
        self.model
            .get("conditions")
            .and_then(Value::as_array)
            .and_then(|conditions| conditions.first())
            .and_then(|condition| condition.get("unloadEvaluator"))
            .is_some_and(|unload| !unload.is_null())
    }

    /// Decodes the payload into a typed model.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Serialization` if the payload does not match `T`.
    pub fn decode_model<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.model.clone())?)
    }
}
