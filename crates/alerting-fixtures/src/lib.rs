//! Randomized test fixtures for the alerting domain.
//!
//! `alerting-fixtures` builds plausible random alert rules, alert instances,
//! notification settings and query steps, so tests can exercise alerting
//! code without hand-written boilerplate. Mutators pin the fields a test
//! cares about and leave everything else random.
//!
//! # Features
//!
//! - **Generators**: [`AlertRuleGenerator`], [`alert_instance_gen`] and
//!   [`notification_settings_gen`] produce structurally valid entities
//! - **Mutators**: literal, unique, exclusion and derived overrides applied in order
//! - **Bulk helpers**: batches with or without key uniqueness
//! - **Deep copies**: [`copy_rule`] and [`copy_notification_settings`]
//! - **Expressions**: typed builders for reduce, threshold, hysteresis,
//!   classic condition, Prometheus and Loki steps
//!
//! # Example
//!
//! ```rust
//! use alerting_fixtures::{
//!     create_reduce_expression, generate_unique_alert_rules, rule_mutators, alert_rule_gen,
//! };
//!
//! let factory = alert_rule_gen([
//!     rule_mutators::with_org_id(1),
//!     rule_mutators::with_label("team", "platform"),
//! ]);
//!
//! let (by_uid, rules) = generate_unique_alert_rules(5, factory);
//! assert_eq!(rules.len(), 5);
//! assert_eq!(by_uid.len(), 5);
//!
//! let reduce = create_reduce_expression("B", "A", "mean");
//! assert_eq!(reduce.expression_type(), Some("reduce"));
//! ```
//!
//! # Reproducing a run
//!
//! Every generator logs its seed at debug level. Set
//! `ALERTING_FIXTURES_SEED` and build the generator from
//! [`GeneratorConfig::from_env`] to replay it:
//!
//! ```rust
//! use alerting_fixtures::{AlertRuleGenerator, GeneratorConfig};
//!
//! let config = GeneratorConfig::from_env()?;
//! let generator = AlertRuleGenerator::with_config(config);
//! let _rule = generator.generate();
//! # Ok::<(), alerting_fixtures::FixtureError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bulk;
pub mod config;
pub mod copy;
pub mod error;
pub mod expressions;
pub mod instance;
pub mod mutator;
pub mod notification;
pub mod random;
pub mod rule;
pub mod rule_mutators;
pub mod seen;

// Re-export main entry points at crate root
pub use bulk::{
    generate_alert_rules, generate_alert_rules_small_non_empty, generate_group_key,
    generate_many, generate_rule_key, generate_unique, generate_unique_alert_rules,
};
pub use config::{GeneratorConfig, SEED_ENV_VAR};
pub use copy::{copy_rule, copy_rule_with};
pub use error::{FixtureError, Result};
pub use expressions::{
    create_classic_condition_expression, create_hysteresis_expression, create_loki_query,
    create_prometheus_query, create_reduce_expression, create_threshold_expression,
};
pub use instance::alert_instance_gen;
pub use mutator::{Mutator, apply_all, mutator};
pub use notification::{copy_notification_settings, notification_settings_gen};
pub use random::{FixtureRng, generate_alert_labels, generate_alert_query};
pub use rule::{AlertRuleGenerator, RuleMutator, alert_rule_gen, rule_mutator};
pub use seen::SeenSet;
