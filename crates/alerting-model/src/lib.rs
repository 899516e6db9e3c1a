//! Domain types of the alerting subsystem.
//!
//! `alerting-model` defines the plain data aggregates the rule scheduler,
//! state manager and notifier exchange, together with the structural
//! validation they rely on.
//!
//! # Types
//!
//! - **Rules**: [`AlertRule`] with its [`AlertRuleKey`] and [`AlertRuleGroupKey`]
//! - **Queries**: [`AlertQuery`] steps with a [`RelativeTimeRange`]
//! - **Instances**: [`AlertInstance`] keyed by [`AlertInstanceKey`]
//! - **Routing**: [`NotificationSettings`]
//!
//! # Example
//!
//! ```rust
//! use alerting_model::{NotificationSettings, ALERT_NAME_LABEL, FOLDER_TITLE_LABEL};
//! use std::time::Duration;
//!
//! let mut settings = NotificationSettings::new("ops-team");
//! settings.group_by = vec![ALERT_NAME_LABEL.to_string(), FOLDER_TITLE_LABEL.to_string()];
//! settings.repeat_interval = Some(Duration::from_secs(4 * 3600));
//!
//! assert!(settings.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod instance;
pub mod notification;
pub mod query;
pub mod rule;
pub mod uid;

pub use error::{ModelError, Result};
pub use instance::{AlertInstance, AlertInstanceKey, InstanceStateType};
pub use notification::{
    ALERT_NAME_LABEL, FOLDER_TITLE_LABEL, GROUP_BY_ALL, NotificationSettings,
};
pub use query::{
    AlertQuery, EXPR_DATASOURCE_TYPE, EXPR_DATASOURCE_UID, LOKI_DATASOURCE_TYPE,
    PROMETHEUS_DATASOURCE_TYPE, RelativeTimeRange,
};
pub use rule::{AlertRule, AlertRuleGroupKey, AlertRuleKey, ExecutionErrorState, NoDataState};
pub use uid::{SHORT_UID_LENGTH, short_uid};
