//! Random notification settings and their mutators.

use std::time::Duration;

use alerting_model::{ALERT_NAME_LABEL, FOLDER_TITLE_LABEL, NotificationSettings, short_uid};
use rand::Rng;

use crate::mutator::{Mutator, apply_all, mutator};
use crate::random::FixtureRng;

/// Returns a factory of random notification settings with `mutators` applied.
///
/// Each call routes to a fresh receiver, groups by the alert name, the folder
/// and one random label, waits 1 to 100 seconds at every stage and
/// references two random mute timings.
pub fn notification_settings_gen(
    mutators: Vec<Mutator<NotificationSettings>>,
) -> impl Fn() -> NotificationSettings + Send + Sync {
    move || {
        let mut rng = rand::thread_rng();
        let mut settings = NotificationSettings {
            receiver: short_uid(),
            group_by: vec![
                ALERT_NAME_LABEL.to_string(),
                FOLDER_TITLE_LABEL.to_string(),
                short_uid(),
            ],
            group_wait: Some(Duration::from_secs(rng.gen_range(1..=100))),
            group_interval: Some(Duration::from_secs(rng.gen_range(1..=100))),
            repeat_interval: Some(Duration::from_secs(rng.gen_range(1..=100))),
            mute_time_intervals: vec![short_uid(), short_uid()],
        };
        apply_all(&mut settings, &mutators);
        settings
    }
}

/// Same distribution as [`notification_settings_gen`], drawn from a seeded source.
pub(crate) fn generate_with(rng: &FixtureRng) -> NotificationSettings {
    NotificationSettings {
        receiver: rng.short_uid(),
        group_by: vec![
            ALERT_NAME_LABEL.to_string(),
            FOLDER_TITLE_LABEL.to_string(),
            rng.short_uid(),
        ],
        group_wait: Some(crate::rule::seconds(rng.range(1..101))),
        group_interval: Some(crate::rule::seconds(rng.range(1..101))),
        repeat_interval: Some(crate::rule::seconds(rng.range(1..101))),
        mute_time_intervals: vec![rng.short_uid(), rng.short_uid()],
    }
}

/// Returns an independent copy of `settings` with `mutators` applied to the copy.
#[must_use]
pub fn copy_notification_settings(
    settings: &NotificationSettings,
    mutators: &[Mutator<NotificationSettings>],
) -> NotificationSettings {
    let mut copy = settings.clone();
    apply_all(&mut copy, mutators);
    copy
}

/// Sets the receiver.
pub fn with_receiver(receiver: impl Into<String>) -> Mutator<NotificationSettings> {
    let receiver = receiver.into();
    mutator(move |ns: &mut NotificationSettings| ns.receiver.clone_from(&receiver))
}

/// Sets or clears the group wait.
pub fn with_group_wait(group_wait: Option<Duration>) -> Mutator<NotificationSettings> {
    mutator(move |ns: &mut NotificationSettings| ns.group_wait = group_wait)
}

/// Sets or clears the group interval.
pub fn with_group_interval(group_interval: Option<Duration>) -> Mutator<NotificationSettings> {
    mutator(move |ns: &mut NotificationSettings| ns.group_interval = group_interval)
}

/// Sets or clears the repeat interval.
pub fn with_repeat_interval(repeat_interval: Option<Duration>) -> Mutator<NotificationSettings> {
    mutator(move |ns: &mut NotificationSettings| ns.repeat_interval = repeat_interval)
}

/// Replaces the grouping labels.
pub fn with_group_by<I, S>(group_by: I) -> Mutator<NotificationSettings>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let group_by: Vec<String> = group_by.into_iter().map(Into::into).collect();
    mutator(move |ns: &mut NotificationSettings| ns.group_by.clone_from(&group_by))
}

/// Replaces the mute timings.
pub fn with_mute_time_intervals<I, S>(intervals: I) -> Mutator<NotificationSettings>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let intervals: Vec<String> = intervals.into_iter().map(Into::into).collect();
    mutator(move |ns: &mut NotificationSettings| ns.mute_time_intervals.clone_from(&intervals))
}
