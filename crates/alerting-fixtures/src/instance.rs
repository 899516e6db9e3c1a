//! Random alert instances and their mutators.

use std::collections::HashMap;

use alerting_model::{AlertInstance, AlertInstanceKey, InstanceStateType, short_uid};
use chrono::{Duration, Utc};
use rand::Rng;

use crate::mutator::{Mutator, apply_all, mutator};
use crate::random::generate_alert_labels;

/// Generates one random alert instance and applies `mutators` in order.
#[must_use]
pub fn alert_instance_gen(mutators: &[Mutator<AlertInstance>]) -> AlertInstance {
    let mut rng = rand::thread_rng();

    let labels = rng
        .gen_bool(0.5)
        .then(|| generate_alert_labels(rng.gen_range(0..5), "lbl-"));
    let state = InstanceStateType::ALL[rng.gen_range(0..InstanceStateType::ALL.len())];

    let now = Utc::now();
    let since = now - Duration::nanoseconds(rng.gen_range(1..=100));

    let mut instance = AlertInstance {
        key: AlertInstanceKey {
            rule_org_id: rng.gen_range(1..=1500),
            rule_uid: short_uid(),
            labels_hash: short_uid(),
        },
        labels,
        current_state: state,
        current_reason: format!("TEST-REASON-{}", short_uid()),
        current_state_since: since,
        current_state_end: since + Duration::nanoseconds(rng.gen_range(200..300)),
        last_eval_time: now - Duration::nanoseconds(rng.gen_range(50..150)),
    };

    apply_all(&mut instance, mutators);
    instance
}

/// Sets the lifecycle state.
pub fn with_state(state: InstanceStateType) -> Mutator<AlertInstance> {
    mutator(move |i: &mut AlertInstance| i.current_state = state)
}

/// Sets the organization of the owning rule.
pub fn with_org_id(org_id: i64) -> Mutator<AlertInstance> {
    mutator(move |i: &mut AlertInstance| i.key.rule_org_id = org_id)
}

/// Sets the UID of the owning rule.
pub fn with_rule_uid(rule_uid: impl Into<String>) -> Mutator<AlertInstance> {
    let rule_uid = rule_uid.into();
    mutator(move |i: &mut AlertInstance| i.key.rule_uid.clone_from(&rule_uid))
}

/// Replaces the labels.
pub fn with_labels(labels: HashMap<String, String>) -> Mutator<AlertInstance> {
    mutator(move |i: &mut AlertInstance| i.labels = Some(labels.clone()))
}

/// Sets the state reason.
pub fn with_reason(reason: impl Into<String>) -> Mutator<AlertInstance> {
    let reason = reason.into();
    mutator(move |i: &mut AlertInstance| i.current_reason.clone_from(&reason))
}
