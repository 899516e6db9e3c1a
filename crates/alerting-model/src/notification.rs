//! Per-rule notification routing settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Label carrying the rule title on every alert.
pub const ALERT_NAME_LABEL: &str = "alertname";

/// Label carrying the title of the folder a rule lives in.
pub const FOLDER_TITLE_LABEL: &str = "grafana_folder";

/// Special `group_by` value that disables grouping entirely.
pub const GROUP_BY_ALL: &str = "...";

/// Simplified routing that sends a rule's alerts straight to one receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Name of the contact point receiving notifications.
    pub receiver: String,
    /// Labels used to group alerts into one notification.
    pub group_by: Vec<String>,
    /// How long to wait before sending the first notification of a group.
    pub group_wait: Option<Duration>,
    /// How long to wait before notifying about new alerts in a group.
    pub group_interval: Option<Duration>,
    /// How long to wait before repeating a notification.
    pub repeat_interval: Option<Duration>,
    /// Names of mute timings applied to this route.
    pub mute_time_intervals: Vec<String>,
}

impl NotificationSettings {
    /// Creates settings that route to `receiver` with everything else unset.
    #[must_use]
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            ..Self::default()
        }
    }

    /// Checks the structural invariants of the settings.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidNotificationSettings` if:
    /// - The receiver is empty
    /// - `group_by` is set but misses the alert name or folder label
    /// - The group or repeat interval is zero
    pub fn validate(&self) -> Result<()> {
        if self.receiver.is_empty() {
            return Err(ModelError::InvalidNotificationSettings {
                reason: "receiver cannot be empty".to_string(),
            });
        }

        if !self.group_by.is_empty() && !self.group_by.iter().any(|l| l == GROUP_BY_ALL) {
            for required in [ALERT_NAME_LABEL, FOLDER_TITLE_LABEL] {
                if !self.group_by.iter().any(|l| l == required) {
                    return Err(ModelError::InvalidNotificationSettings {
                        reason: format!("group_by must contain '{required}'"),
                    });
                }
            }
        }

        for (name, value) in [
            ("group_interval", self.group_interval),
            ("repeat_interval", self.repeat_interval),
        ] {
            if value.is_some_and(|d| d.is_zero()) {
                return Err(ModelError::InvalidNotificationSettings {
                    reason: format!("{name} must be greater than zero"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn valid() -> NotificationSettings {
        NotificationSettings {
            receiver: "ops".to_string(),
            group_by: vec![
                ALERT_NAME_LABEL.to_string(),
                FOLDER_TITLE_LABEL.to_string(),
            ],
            group_wait: Some(Duration::from_secs(30)),
            group_interval: Some(Duration::from_secs(300)),
            repeat_interval: Some(Duration::from_secs(3600)),
            mute_time_intervals: vec!["weekends".to_string()],
        }
    }

    #[test]
    fn new_sets_only_receiver() {
        let ns = NotificationSettings::new("ops");
        assert_eq!(ns.receiver, "ops");
        assert!(ns.group_by.is_empty());
        assert!(ns.group_wait.is_none());
        assert!(ns.validate().is_ok());
    }

    #[test]
    fn valid_settings_pass() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn group_by_all_skips_label_check() {
        let mut ns = valid();
        ns.group_by = vec![GROUP_BY_ALL.to_string()];
        assert!(ns.validate().is_ok());
    }

    #[test_case(|ns: &mut NotificationSettings| ns.receiver.clear(), "receiver" ; "empty receiver")]
    #[test_case(|ns: &mut NotificationSettings| ns.group_by = vec!["team".to_string()], "alertname" ; "missing alertname")]
    #[test_case(|ns: &mut NotificationSettings| ns.group_by.retain(|l| l != FOLDER_TITLE_LABEL), "grafana_folder" ; "missing folder")]
    #[test_case(|ns: &mut NotificationSettings| ns.group_interval = Some(Duration::ZERO), "group_interval" ; "zero group interval")]
    #[test_case(|ns: &mut NotificationSettings| ns.repeat_interval = Some(Duration::ZERO), "repeat_interval" ; "zero repeat interval")]
    fn invalid_settings_fail(breaks: fn(&mut NotificationSettings), expected: &str) {
        let mut ns = valid();
        breaks(&mut ns);
        match ns.validate() {
            Err(ModelError::InvalidNotificationSettings { reason }) => {
                assert!(reason.contains(expected), "{reason}");
            }
            other => panic!("expected InvalidNotificationSettings, got {other:?}"),
        }
    }
}
