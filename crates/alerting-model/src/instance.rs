//! Persisted state of individual alert instances.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an alert instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceStateType {
    /// The condition holds and the alert is firing.
    #[serde(rename = "Alerting")]
    Firing,
    /// The condition does not hold.
    #[default]
    Normal,
    /// The condition holds but the `for` duration has not elapsed.
    Pending,
    /// The queries returned no data.
    NoData,
    /// Evaluation failed.
    Error,
}

impl InstanceStateType {
    /// All variants, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Firing,
        Self::Normal,
        Self::Pending,
        Self::NoData,
        Self::Error,
    ];

    /// Returns the state as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firing => "Alerting",
            Self::Normal => "Normal",
            Self::Pending => "Pending",
            Self::NoData => "NoData",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for InstanceStateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Composite key of an alert instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertInstanceKey {
    /// Organization of the owning rule.
    pub rule_org_id: i64,
    /// UID of the owning rule.
    pub rule_uid: String,
    /// Hash of the instance label set.
    pub labels_hash: String,
}

/// The stored state of one alert instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertInstance {
    /// Composite key.
    #[serde(flatten)]
    pub key: AlertInstanceKey,
    /// Instance labels.
    pub labels: Option<HashMap<String, String>>,
    /// Current lifecycle state.
    pub current_state: InstanceStateType,
    /// Why the instance is in its current state.
    pub current_reason: String,
    /// When the current state began.
    pub current_state_since: DateTime<Utc>,
    /// When the current state is expected to end.
    pub current_state_end: DateTime<Utc>,
    /// Time of the last evaluation.
    pub last_eval_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firing_is_stored_as_alerting() {
        assert_eq!(InstanceStateType::Firing.as_str(), "Alerting");
        assert_eq!(
            serde_json::to_string(&InstanceStateType::Firing).unwrap(),
            "\"Alerting\""
        );
    }

    #[test]
    fn states_serialize_as_display() {
        for state in InstanceStateType::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }

    #[test]
    fn key_is_flattened() {
        let now = Utc::now();
        let instance = AlertInstance {
            key: AlertInstanceKey {
                rule_org_id: 1,
                rule_uid: "rule-1".to_string(),
                labels_hash: "abc".to_string(),
            },
            labels: None,
            current_state: InstanceStateType::Pending,
            current_reason: String::new(),
            current_state_since: now,
            current_state_end: now,
            last_eval_time: now,
        };

        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(value["rule_uid"], "rule-1");
        assert_eq!(value["labels_hash"], "abc");
    }
}
