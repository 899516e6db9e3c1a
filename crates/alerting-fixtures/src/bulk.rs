//! Batch generation with optional key uniqueness.

use std::collections::HashMap;
use std::hash::Hash;

use alerting_model::{AlertRule, AlertRuleGroupKey, AlertRuleKey, short_uid};
use tracing::debug;

use crate::random::random_in;

/// Calls `f` `count` times and returns the results in call order.
pub fn generate_many<T>(count: usize, mut f: impl FnMut() -> T) -> Vec<T> {
    (0..count).map(|_| f()).collect()
}

/// Calls `f` until it has produced `count` entities with distinct `key`s.
///
/// Entities whose key was already accepted are dropped. Returns the accepted
/// entities both by key and in acceptance order. Never terminates if `f`
/// cannot produce `count` distinct keys.
pub fn generate_unique<T, K>(
    count: usize,
    mut f: impl FnMut() -> T,
    key: impl Fn(&T) -> K,
) -> (HashMap<K, T>, Vec<T>)
where
    T: Clone,
    K: Eq + Hash,
{
    let mut by_key = HashMap::with_capacity(count);
    let mut ordered = Vec::with_capacity(count);
    let mut discarded = 0usize;

    while ordered.len() < count {
        let item = f();
        let k = key(&item);
        if by_key.contains_key(&k) {
            discarded += 1;
            continue;
        }
        by_key.insert(k, item.clone());
        ordered.push(item);
    }

    debug!(count, discarded, "generated unique batch");
    (by_key, ordered)
}

/// Generates `count` rules with `f`. UIDs may repeat.
pub fn generate_alert_rules(count: usize, f: impl FnMut() -> AlertRule) -> Vec<AlertRule> {
    generate_many(count, f)
}

/// Generates 1 to 4 rules with `f`.
pub fn generate_alert_rules_small_non_empty(f: impl FnMut() -> AlertRule) -> Vec<AlertRule> {
    let count = random_in(1..5) as usize;
    generate_alert_rules(count, f)
}

/// Generates `count` rules with distinct UIDs, keyed by UID.
pub fn generate_unique_alert_rules(
    count: usize,
    f: impl FnMut() -> AlertRule,
) -> (HashMap<String, AlertRule>, Vec<AlertRule>) {
    generate_unique(count, f, |rule| rule.uid.clone())
}

/// Returns a key for a random rule UID in `org_id`.
#[must_use]
pub fn generate_rule_key(org_id: i64) -> AlertRuleKey {
    AlertRuleKey {
        org_id,
        uid: short_uid(),
    }
}

/// Returns a key for a random group in a random folder of `org_id`.
#[must_use]
pub fn generate_group_key(org_id: i64) -> AlertRuleGroupKey {
    AlertRuleGroupKey {
        org_id,
        namespace_uid: short_uid(),
        rule_group: short_uid(),
    }
}
