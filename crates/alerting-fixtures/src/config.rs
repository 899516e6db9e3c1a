//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, Result};

/// Environment variable that pins the seed of generators built from
/// [`GeneratorConfig::from_env`].
pub const SEED_ENV_VAR: &str = "ALERTING_FIXTURES_SEED";

/// Prefix used when none is given.
pub const DEFAULT_PREFIX: &str = "test";

/// Configuration for a seeded fixture generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Namespace prepended to generated titles, groups, labels and annotations.
    pub prefix: String,
    /// Seed of the random source. Drawn from the clock when unset.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with the given prefix and a clock seed.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            seed: None,
        }
    }

    /// Pins the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads the default configuration, taking the seed from
    /// [`SEED_ENV_VAR`] when it is set.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::InvalidConfig` if the variable is set but is
    /// not an unsigned integer.
    pub fn from_env() -> Result<Self> {
        Self::default().seed_from_env()
    }

    /// Overrides the seed from [`SEED_ENV_VAR`] when it is set.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::InvalidConfig` if the variable is set but is
    /// not an unsigned integer.
    pub fn seed_from_env(self) -> Result<Self> {
        match std::env::var(SEED_ENV_VAR) {
            Ok(raw) => Ok(self.with_seed(parse_seed(&raw)?)),
            Err(std::env::VarError::NotPresent) => Ok(self),
            Err(std::env::VarError::NotUnicode(_)) => Err(FixtureError::InvalidConfig {
                reason: format!("{SEED_ENV_VAR} is not valid unicode"),
            }),
        }
    }

    /// Returns the configured seed, or one derived from the current time.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

/// Parses a seed value as written in [`SEED_ENV_VAR`].
///
/// # Errors
///
/// Returns `FixtureError::InvalidConfig` if `raw` is not an unsigned integer.
pub fn parse_seed(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|e| FixtureError::InvalidConfig {
            reason: format!("{SEED_ENV_VAR}='{raw}': {e}"),
        })
}

fn clock_seed() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default() as u64
}
