//! Alert rules and the keys that identify them.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::notification::NotificationSettings;
use crate::query::AlertQuery;

/// State an alert takes when its queries return no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoDataState {
    /// Treat missing data as a firing alert.
    Alerting,
    /// Report a dedicated no-data state.
    #[default]
    NoData,
    /// Treat missing data as normal.
    #[serde(rename = "OK")]
    Ok,
}

impl NoDataState {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::Alerting, Self::NoData, Self::Ok];

    /// Returns the state as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alerting => "Alerting",
            Self::NoData => "NoData",
            Self::Ok => "OK",
        }
    }
}

impl std::fmt::Display for NoDataState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State an alert takes when evaluation of its queries fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionErrorState {
    /// Treat the failure as a firing alert.
    #[default]
    Alerting,
    /// Report a dedicated error state.
    Error,
    /// Treat the failure as normal.
    #[serde(rename = "OK")]
    Ok,
}

impl ExecutionErrorState {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::Alerting, Self::Error, Self::Ok];

    /// Returns the state as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alerting => "Alerting",
            Self::Error => "Error",
            Self::Ok => "OK",
        }
    }
}

impl std::fmt::Display for ExecutionErrorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies a single rule within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertRuleKey {
    /// Owning organization.
    pub org_id: i64,
    /// Rule UID.
    pub uid: String,
}

impl std::fmt::Display for AlertRuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "org_id={}, uid={}", self.org_id, self.uid)
    }
}

/// Identifies an evaluation group of rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertRuleGroupKey {
    /// Owning organization.
    pub org_id: i64,
    /// UID of the folder holding the group.
    pub namespace_uid: String,
    /// Group name.
    pub rule_group: String,
}

impl std::fmt::Display for AlertRuleGroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{org_id: {}, namespace_uid: {}, group: {}}}",
            self.org_id, self.namespace_uid, self.rule_group
        )
    }
}

/// An alert rule definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    /// Storage identifier, assigned on insert (zero when not yet stored).
    pub id: i64,
    /// Owning organization. Never zero for a valid rule.
    pub org_id: i64,
    /// Human-readable title, unique within a folder.
    pub title: String,
    /// Ref id of the query step whose result decides firing.
    pub condition: String,
    /// Ordered query steps.
    pub data: Vec<AlertQuery>,
    /// Last modification time.
    pub updated: DateTime<Utc>,
    /// Evaluation interval in seconds.
    pub interval_seconds: i64,
    /// Optimistic concurrency version.
    pub version: i64,
    /// Globally unique identifier.
    pub uid: String,
    /// UID of the folder holding the rule.
    pub namespace_uid: String,
    /// Linked dashboard, if any.
    pub dashboard_uid: Option<String>,
    /// Linked panel on the dashboard, if any.
    pub panel_id: Option<i64>,
    /// Evaluation group name.
    pub rule_group: String,
    /// Position of the rule within its group.
    pub rule_group_index: i64,
    /// Behaviour when queries return no data.
    pub no_data_state: NoDataState,
    /// Behaviour when evaluation fails.
    pub exec_err_state: ExecutionErrorState,
    /// How long the condition must hold before the alert fires.
    #[serde(rename = "for")]
    pub for_duration: Duration,
    /// Annotations copied onto alerts.
    pub annotations: Option<HashMap<String, String>>,
    /// Labels copied onto alerts.
    pub labels: Option<HashMap<String, String>>,
    /// Simplified routing settings.
    pub notification_settings: Vec<NotificationSettings>,
}

impl AlertRule {
    /// Maximum allowed length for rule titles.
    pub const MAX_TITLE_LENGTH: usize = 190;

    /// Returns the key identifying this rule.
    #[must_use]
    pub fn key(&self) -> AlertRuleKey {
        AlertRuleKey {
            org_id: self.org_id,
            uid: self.uid.clone(),
        }
    }

    /// Returns the key of the group this rule belongs to.
    #[must_use]
    pub fn group_key(&self) -> AlertRuleGroupKey {
        AlertRuleGroupKey {
            org_id: self.org_id,
            namespace_uid: self.namespace_uid.clone(),
            rule_group: self.rule_group.clone(),
        }
    }

    /// Returns the evaluation interval as a [`Duration`].
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.unsigned_abs())
    }

    /// Checks the structural invariants storage and the scheduler rely on.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidRule` if:
    /// - The org id is not positive
    /// - The title or UID is empty, or the title is too long
    /// - The interval is shorter than one second
    /// - There are no queries, or the condition names none of them
    ///
    /// Returns `ModelError::InvalidNotificationSettings` if any routing
    /// settings are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.org_id < 1 {
            return Err(invalid(format!(
                "org id must be positive, got {}",
                self.org_id
            )));
        }

        if self.title.is_empty() {
            return Err(invalid("title cannot be empty".to_string()));
        }

        if self.title.len() > Self::MAX_TITLE_LENGTH {
            return Err(invalid(format!(
                "title exceeds maximum length of {} characters",
                Self::MAX_TITLE_LENGTH
            )));
        }

        if self.uid.is_empty() {
            return Err(invalid("uid cannot be empty".to_string()));
        }

        if self.interval_seconds < 1 {
            return Err(invalid(format!(
                "interval must be at least 1 second, got {}",
                self.interval_seconds
            )));
        }

        if self.data.is_empty() {
            return Err(invalid("rule has no queries".to_string()));
        }

        if !self.data.iter().any(|q| q.ref_id == self.condition) {
            return Err(invalid(format!(
                "condition '{}' does not reference any query",
                self.condition
            )));
        }

        for settings in &self.notification_settings {
            settings.validate()?;
        }

        Ok(())
    }
}

fn invalid(reason: String) -> ModelError {
    ModelError::InvalidRule { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RelativeTimeRange;
    use serde_json::json;

    fn query(ref_id: &str) -> AlertQuery {
        AlertQuery {
            ref_id: ref_id.to_string(),
            query_type: String::new(),
            relative_time_range: RelativeTimeRange::new(Duration::from_secs(600), Duration::ZERO),
            datasource_uid: "prom".to_string(),
            model: json!({"expr": "up"}),
        }
    }

    fn rule() -> AlertRule {
        AlertRule {
            id: 1,
            org_id: 1,
            title: "HighCPU".to_string(),
            condition: "A".to_string(),
            data: vec![query("A")],
            updated: Utc::now(),
            interval_seconds: 60,
            version: 1,
            uid: "rule-1".to_string(),
            namespace_uid: "folder-1".to_string(),
            dashboard_uid: None,
            panel_id: None,
            rule_group: "group-1".to_string(),
            rule_group_index: 0,
            no_data_state: NoDataState::NoData,
            exec_err_state: ExecutionErrorState::Alerting,
            for_duration: Duration::from_secs(300),
            annotations: None,
            labels: None,
            notification_settings: Vec::new(),
        }
    }

    fn assert_invalid(rule: &AlertRule, expected: &str) {
        match rule.validate() {
            Err(ModelError::InvalidRule { reason }) => {
                assert!(reason.contains(expected), "{reason}");
            }
            other => panic!("expected InvalidRule error, got {other:?}"),
        }
    }

    mod state_tests {
        use super::*;

        #[test]
        fn no_data_state_serializes_as_display() {
            for state in NoDataState::ALL {
                let json = serde_json::to_string(&state).unwrap();
                assert_eq!(json, format!("\"{state}\""));
            }
        }

        #[test]
        fn exec_err_state_serializes_as_display() {
            for state in ExecutionErrorState::ALL {
                let json = serde_json::to_string(&state).unwrap();
                assert_eq!(json, format!("\"{state}\""));
            }
        }

        #[test]
        fn ok_variants_use_upper_case() {
            assert_eq!(NoDataState::Ok.as_str(), "OK");
            assert_eq!(ExecutionErrorState::Ok.as_str(), "OK");
        }
    }

    mod key_tests {
        use super::*;

        #[test]
        fn rule_key() {
            let key = rule().key();
            assert_eq!(key.org_id, 1);
            assert_eq!(key.uid, "rule-1");
            assert_eq!(key.to_string(), "org_id=1, uid=rule-1");
        }

        #[test]
        fn group_key() {
            let key = rule().group_key();
            assert_eq!(key.namespace_uid, "folder-1");
            assert_eq!(key.rule_group, "group-1");
        }

        #[test]
        fn interval_as_duration() {
            assert_eq!(rule().interval(), Duration::from_secs(60));
        }
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn valid_rule_passes() {
            assert!(rule().validate().is_ok());
        }

        #[test]
        fn zero_org_id_fails() {
            let mut r = rule();
            r.org_id = 0;
            assert_invalid(&r, "org id");
        }

        #[test]
        fn empty_title_fails() {
            let mut r = rule();
            r.title.clear();
            assert_invalid(&r, "title");
        }

        #[test]
        fn long_title_fails() {
            let mut r = rule();
            r.title = "t".repeat(AlertRule::MAX_TITLE_LENGTH + 1);
            assert_invalid(&r, "maximum length");
        }

        #[test]
        fn empty_uid_fails() {
            let mut r = rule();
            r.uid.clear();
            assert_invalid(&r, "uid");
        }

        #[test]
        fn zero_interval_fails() {
            let mut r = rule();
            r.interval_seconds = 0;
            assert_invalid(&r, "interval");
        }

        #[test]
        fn no_queries_fails() {
            let mut r = rule();
            r.data.clear();
            assert_invalid(&r, "no queries");
        }

        #[test]
        fn dangling_condition_fails() {
            let mut r = rule();
            r.condition = "Z".to_string();
            assert_invalid(&r, "'Z'");
        }

        #[test]
        fn invalid_notification_settings_fail() {
            let mut r = rule();
            r.notification_settings = vec![NotificationSettings::default()];
            assert!(matches!(
                r.validate(),
                Err(ModelError::InvalidNotificationSettings { .. })
            ));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_non_positive_org_rejected(org in i64::MIN..1) {
                let mut r = rule();
                r.org_id = org;
                prop_assert!(r.validate().is_err());
            }

            #[test]
            fn prop_positive_org_and_interval_accepted(
                org in 1i64..i64::MAX,
                interval in 1i64..86_400,
            ) {
                let mut r = rule();
                r.org_id = org;
                r.interval_seconds = interval;
                prop_assert!(r.validate().is_ok());
            }
        }
    }

    #[test]
    fn rule_serializes_for_field() {
        let value = serde_json::to_value(rule()).unwrap();
        assert!(value.get("for").is_some());
        assert!(value.get("for_duration").is_none());
    }
}
