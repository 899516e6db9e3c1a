//! Random alert rule generation.
//!
//! [`AlertRuleGenerator`] produces structurally valid rules with every field
//! drawn at random. Mutators from [`crate::rule_mutators`] pin individual
//! fields:
//!
//! ```rust
//! use alerting_fixtures::{rule_mutators, AlertRuleGenerator, GeneratorConfig};
//!
//! let generator = AlertRuleGenerator::with_config(GeneratorConfig::new("docs").with_seed(1))
//!     .with([rule_mutators::with_org_id(7), rule_mutators::with_label("team", "sre")]);
//!
//! let rule = generator.generate();
//! assert_eq!(rule.org_id, 7);
//! assert!(rule.validate().is_ok());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use alerting_model::{AlertRule, ExecutionErrorState, NoDataState};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::random::FixtureRng;
use crate::rule_mutators;

/// Overrides fields of a generated rule. Receives the generator for access
/// to its random source and prefix.
pub type RuleMutator = Arc<dyn Fn(&AlertRuleGenerator, &mut AlertRule) + Send + Sync>;

/// Wraps a closure as a [`RuleMutator`].
pub fn rule_mutator(
    f: impl Fn(&AlertRuleGenerator, &mut AlertRule) + Send + Sync + 'static,
) -> RuleMutator {
    Arc::new(f)
}

/// Factory of random alert rules.
///
/// Cloning or extending a generator with [`with`](Self::with) shares its
/// random source; the mutator lists stay independent.
#[derive(Clone)]
pub struct AlertRuleGenerator {
    rng: Arc<FixtureRng>,
    prefix: String,
    mutators: Vec<RuleMutator>,
}

impl fmt::Debug for AlertRuleGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertRuleGenerator")
            .field("seed", &self.rng.seed())
            .field("prefix", &self.prefix)
            .field("mutators", &self.mutators.len())
            .finish()
    }
}

impl AlertRuleGenerator {
    /// Creates a clock-seeded generator whose rules have unique UIDs and titles.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_config(GeneratorConfig::new(prefix))
    }

    /// Creates a generator from `config`. Rules have unique UIDs and titles.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        let seed = config.resolve_seed();
        debug!(seed, prefix = %config.prefix, "created alert rule generator");

        let base = Self {
            rng: Arc::new(FixtureRng::seeded(seed)),
            prefix: config.prefix,
            mutators: Vec::new(),
        };
        base.with([
            rule_mutators::with_unique_uid(),
            rule_mutators::with_unique_title(),
        ])
    }

    /// Returns a generator that runs this generator's mutators followed by `mutators`.
    #[must_use]
    pub fn with(&self, mutators: impl IntoIterator<Item = RuleMutator>) -> Self {
        let mut all = self.mutators.clone();
        all.extend(mutators);
        Self {
            rng: Arc::clone(&self.rng),
            prefix: self.prefix.clone(),
            mutators: all,
        }
    }

    /// Returns the shared random source.
    #[must_use]
    pub fn rng(&self) -> &FixtureRng {
        &self.rng
    }

    /// Returns the seed of the shared random source.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Returns the prefix of generated names.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generates a random title with this generator's prefix.
    #[must_use]
    pub fn random_title(&self) -> String {
        format!("{}-title-{}", self.prefix, self.rng.short_uid())
    }

    /// Generates one rule and applies the mutators in order.
    #[must_use]
    pub fn generate(&self) -> AlertRule {
        let rng = &self.rng;

        let interval = (rng.int_n(6) + 1) * 10;
        let for_duration = seconds(interval * rng.int_n(6));

        let annotations = rng.coin().then(|| {
            let count = rng.int_n(5) as usize;
            rng.labels(count, &format!("{}-ann-", self.prefix))
        });
        let labels = rng.coin().then(|| {
            let count = rng.int_n(5) as usize;
            rng.labels(count, &format!("{}-lbl-", self.prefix))
        });

        let (dashboard_uid, panel_id) = if rng.coin() {
            (Some(rng.short_uid()), Some(rng.int_n(1500)))
        } else {
            (None, None)
        };

        let notification_settings = if rng.coin() {
            vec![crate::notification::generate_with(rng)]
        } else {
            Vec::new()
        };

        let query = rng.alert_query();

        let mut rule = AlertRule {
            id: 0,
            // Validation rejects org 0.
            org_id: rng.int_n(1500) + 1,
            title: self.random_title(),
            condition: query.ref_id.clone(),
            data: vec![query],
            updated: chrono::Utc::now() - chrono::Duration::nanoseconds(rng.int_n(100) + 1),
            interval_seconds: rng.int_n(60) + 1,
            version: rng.int_n(1500),
            uid: rng.short_uid(),
            namespace_uid: rng.short_uid(),
            dashboard_uid,
            panel_id,
            rule_group: format!("{}-group-{}", self.prefix, rng.short_uid()),
            rule_group_index: rng.int_n(1500),
            no_data_state: rng.pick(&NoDataState::ALL),
            exec_err_state: rng.pick(&ExecutionErrorState::ALL),
            for_duration,
            annotations,
            labels,
            notification_settings,
        };

        for m in &self.mutators {
            m(self, &mut rule);
        }
        rule
    }

    /// Generates one rule and checks it against domain validation.
    ///
    /// Useful when custom mutators may break structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Model` if the mutated rule is invalid.
    pub fn generate_validated(&self) -> Result<AlertRule> {
        let rule = self.generate();
        rule.validate()?;
        Ok(rule)
    }

    /// Generates `count` rules.
    #[must_use]
    pub fn generate_many(&self, count: usize) -> Vec<AlertRule> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// Returns a factory of random rules from a `"test"`-prefixed generator
/// extended with `mutators`.
pub fn alert_rule_gen(
    mutators: impl IntoIterator<Item = RuleMutator>,
) -> impl Fn() -> AlertRule + Send + Sync {
    let generator = AlertRuleGenerator::new(crate::config::DEFAULT_PREFIX).with(mutators);
    move || generator.generate()
}

pub(crate) fn seconds(secs: i64) -> Duration {
    Duration::from_secs(secs.unsigned_abs())
}
