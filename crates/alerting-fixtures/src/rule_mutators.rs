//! Mutators for generated alert rules.
//!
//! Four kinds of mutator live here:
//! - literal overrides (`with_title`, `with_org_id`, ...)
//! - uniqueness mutators (`with_unique_*`), each owning a [`SeenSet`]
//! - exclusion mutators (`with_namespace_uid_not_in`)
//! - derived values (`with_for_n_times`, `with_interval_matching`)
//!
//! Uniqueness and exclusion mutators redraw until they find an acceptable
//! value and never give up.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use alerting_model::{
    AlertQuery, AlertRuleGroupKey, ExecutionErrorState, NoDataState, NotificationSettings,
};
use tracing::trace;

use crate::rule::{RuleMutator, rule_mutator, seconds};
use crate::seen::SeenSet;

/// Replaces the labels with `count` random labels prefixed by `prefix`,
/// drawn from the generator's random source.
pub fn with_not_empty_labels(count: usize, prefix: impl Into<String>) -> RuleMutator {
    let prefix = prefix.into();
    rule_mutator(move |g, rule| {
        rule.labels = Some(g.rng().labels(count, &prefix));
    })
}

/// Gives every rule a storage id not used by an earlier rule.
///
/// The generated id (0) is kept if free and collisions redraw from
/// `1..=1500`, so one mutator covers at most 1501 rules. Past that it
/// loops forever.
pub fn with_unique_id() -> RuleMutator {
    let seen = SeenSet::new();
    rule_mutator(move |g, rule| {
        rule.id = seen.claim(rule.id, || g.rng().int_n(1500) + 1);
    })
}

/// Sets the position within the group.
pub fn with_group_index(index: i64) -> RuleMutator {
    rule_mutator(move |_, rule| rule.rule_group_index = index)
}

/// Gives every rule a group index not used by an earlier rule.
pub fn with_unique_group_index() -> RuleMutator {
    let seen = SeenSet::new();
    rule_mutator(move |g, rule| {
        rule.rule_group_index = seen.claim(rule.rule_group_index, || g.rng().int63());
    })
}

/// Numbers rules 1, 2, 3, ... in generation order.
pub fn with_sequential_group_index() -> RuleMutator {
    let next = AtomicI64::new(1);
    rule_mutator(move |_, rule| {
        rule.rule_group_index = next.fetch_add(1, Ordering::SeqCst);
    })
}

/// Sets the organization.
pub fn with_org_id(org_id: i64) -> RuleMutator {
    rule_mutator(move |_, rule| rule.org_id = org_id)
}

/// Gives every rule an organization not used by an earlier rule.
pub fn with_unique_org_id() -> RuleMutator {
    let seen = SeenSet::new();
    rule_mutator(move |g, rule| {
        rule.org_id = seen.claim(rule.org_id, || g.rng().range(1..i64::MAX));
    })
}

/// Redraws the folder UID while it is one of `exclude`.
pub fn with_namespace_uid_not_in<I, S>(exclude: I) -> RuleMutator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let exclude: Vec<String> = exclude.into_iter().map(Into::into).collect();
    rule_mutator(move |g, rule| {
        while exclude.contains(&rule.namespace_uid) {
            trace!(namespace_uid = %rule.namespace_uid, "redrawing excluded namespace");
            rule.namespace_uid = g.rng().uuid().to_string();
        }
    })
}

/// Places the rule in the folder with UID `namespace_uid`.
pub fn with_namespace_uid(namespace_uid: impl Into<String>) -> RuleMutator {
    let namespace_uid = namespace_uid.into();
    rule_mutator(move |_, rule| rule.namespace_uid.clone_from(&namespace_uid))
}

/// Sets the evaluation interval, truncated to whole seconds.
pub fn with_interval(interval: Duration) -> RuleMutator {
    let secs = interval.as_secs() as i64;
    rule_mutator(move |_, rule| rule.interval_seconds = secs)
}

/// Sets the interval to a random multiple (1-10) of `base` and `for` to a
/// random multiple (0-8) of the interval plus one second.
pub fn with_interval_matching(base: Duration) -> RuleMutator {
    let base_secs = base.as_secs() as i64;
    rule_mutator(move |g, rule| {
        rule.interval_seconds = base_secs * (g.rng().int_n(10) + 1);
        rule.for_duration = seconds(rule.interval_seconds * g.rng().int_n(9) + 1);
    })
}

/// Sets the interval to a random value in `[min, max)` seconds. `max` must exceed `min`.
pub fn with_interval_between(min: i64, max: i64) -> RuleMutator {
    rule_mutator(move |g, rule| rule.interval_seconds = g.rng().range(min..max))
}

/// Sets the title.
pub fn with_title(title: impl Into<String>) -> RuleMutator {
    let title = title.into();
    rule_mutator(move |_, rule| rule.title.clone_from(&title))
}

/// Sets the `for` duration.
pub fn with_for(duration: Duration) -> RuleMutator {
    rule_mutator(move |_, rule| rule.for_duration = duration)
}

/// Sets `for` to `times` evaluation intervals.
pub fn with_for_n_times(times: i64) -> RuleMutator {
    rule_mutator(move |_, rule| rule.for_duration = seconds(rule.interval_seconds * times))
}

/// Sets the no-data behaviour.
pub fn with_no_data_exec_as(state: NoDataState) -> RuleMutator {
    rule_mutator(move |_, rule| rule.no_data_state = state)
}

/// Sets the execution-error behaviour.
pub fn with_error_exec_as(state: ExecutionErrorState) -> RuleMutator {
    rule_mutator(move |_, rule| rule.exec_err_state = state)
}

/// Replaces the annotations.
pub fn with_annotations(annotations: HashMap<String, String>) -> RuleMutator {
    rule_mutator(move |_, rule| rule.annotations = Some(annotations.clone()))
}

/// Sets one annotation, keeping the others.
pub fn with_annotation(key: impl Into<String>, value: impl Into<String>) -> RuleMutator {
    let (key, value) = (key.into(), value.into());
    rule_mutator(move |_, rule| {
        rule.annotations
            .get_or_insert_with(HashMap::new)
            .insert(key.clone(), value.clone());
    })
}

/// Replaces the labels.
pub fn with_labels(labels: HashMap<String, String>) -> RuleMutator {
    rule_mutator(move |_, rule| rule.labels = Some(labels.clone()))
}

/// Sets one label, keeping the others.
pub fn with_label(key: impl Into<String>, value: impl Into<String>) -> RuleMutator {
    let (key, value) = (key.into(), value.into());
    rule_mutator(move |_, rule| {
        rule.labels
            .get_or_insert_with(HashMap::new)
            .insert(key.clone(), value.clone());
    })
}

/// Sets the dashboard and panel link.
pub fn with_dashboard_and_panel(
    dashboard_uid: Option<String>,
    panel_id: Option<i64>,
) -> RuleMutator {
    rule_mutator(move |_, rule| {
        rule.dashboard_uid.clone_from(&dashboard_uid);
        rule.panel_id = panel_id;
    })
}

/// Gives every rule a UID not used by an earlier rule.
pub fn with_unique_uid() -> RuleMutator {
    let seen = SeenSet::new();
    rule_mutator(move |g, rule| {
        let candidate = std::mem::take(&mut rule.uid);
        rule.uid = seen.claim(candidate, || g.rng().short_uid());
    })
}

/// Gives every rule a title not used by an earlier rule.
pub fn with_unique_title() -> RuleMutator {
    let seen = SeenSet::new();
    rule_mutator(move |g, rule| {
        let candidate = std::mem::take(&mut rule.title);
        rule.title = seen.claim(candidate, || g.random_title());
    })
}

/// Replaces the query steps. The condition moves to the first step.
pub fn with_query(queries: Vec<AlertQuery>) -> RuleMutator {
    rule_mutator(move |_, rule| {
        rule.data.clone_from(&queries);
        if let Some(first) = queries.first() {
            rule.condition.clone_from(&first.ref_id);
        }
    })
}

/// Moves the rule into the group identified by `key`.
pub fn with_group_key(key: AlertRuleGroupKey) -> RuleMutator {
    rule_mutator(move |_, rule| {
        rule.org_id = key.org_id;
        rule.namespace_uid.clone_from(&key.namespace_uid);
        rule.rule_group.clone_from(&key.rule_group);
    })
}

/// Replaces the routing settings with one drawn from `settings`.
pub fn with_notification_settings_gen(
    settings: impl Fn() -> NotificationSettings + Send + Sync + 'static,
) -> RuleMutator {
    rule_mutator(move |_, rule| rule.notification_settings = vec![settings()])
}

/// Replaces the routing settings with `settings`.
pub fn with_notification_settings(settings: NotificationSettings) -> RuleMutator {
    rule_mutator(move |_, rule| rule.notification_settings = vec![settings.clone()])
}

/// Removes all routing settings.
pub fn with_no_notification_settings() -> RuleMutator {
    rule_mutator(|_, rule| rule.notification_settings.clear())
}
