//! Reminder policy: derives a task's notification date and text.
//!
//! Everything here is pure. Callers apply the returned [`ReminderFields`] to a
//! task and hand the task to the scheduler themselves.

use chrono::{DateTime, Duration, Utc};

use crate::models::{ReminderFields, ReminderInterval, Task};

/// Body used when a task has no custom notification text.
pub fn default_notification_text(name: &str) -> String {
    format!("Time to do {} again!", name)
}

pub fn notification_title(name: &str) -> String {
    format!("Reminder: {}", name)
}

/// `date` plus the interval's day count, for the fixed intervals.
pub fn next_due(date: DateTime<Utc>, interval: ReminderInterval) -> Option<DateTime<Utc>> {
    interval.days().map(|days| date + Duration::days(days))
}

/// Reminder fields after the user picks `new_interval`.
///
/// `Custom` seeds the notification date with `now`; the caller is expected to
/// let the user override it.
pub fn derive_on_interval_change(
    task: &Task,
    new_interval: ReminderInterval,
    now: DateTime<Utc>,
) -> ReminderFields {
    match new_interval {
        ReminderInterval::None => ReminderFields {
            reminder_interval: ReminderInterval::None,
            notification_date: None,
            notification_text: String::new(),
        },
        ReminderInterval::Custom => ReminderFields {
            reminder_interval: ReminderInterval::Custom,
            notification_date: Some(now),
            notification_text: default_notification_text(&task.name),
        },
        fixed => ReminderFields {
            reminder_interval: fixed,
            notification_date: next_due(task.date, fixed),
            notification_text: default_notification_text(&task.name),
        },
    }
}

/// Reminder fields after the task's name or completion date changed.
///
/// Only fixed intervals move the notification date; a custom date stays where
/// the user put it.
pub fn derive_on_date_or_name_change(task: &Task) -> ReminderFields {
    let mut fields = task.reminder_fields();
    if !task.reminder_interval.is_enabled() {
        return fields;
    }

    fields.notification_text = default_notification_text(&task.name);
    if let Some(due) = next_due(task.date, task.reminder_interval) {
        fields.notification_date = Some(due);
    }
    fields
}

/// Reminder fields a task is stored with.
///
/// A disabled reminder never keeps a date. An enabled one missing its date
/// gets `date + interval days`, or `now` for `Custom`, the same seed
/// [`derive_on_interval_change`] uses. Dates that are already set are kept.
pub fn derive_on_commit(task: &Task, now: DateTime<Utc>) -> ReminderFields {
    let mut fields = task.reminder_fields();
    match task.reminder_interval {
        ReminderInterval::None => fields.notification_date = None,
        _ if fields.notification_date.is_some() => {}
        ReminderInterval::Custom => fields.notification_date = Some(now),
        fixed => fields.notification_date = next_due(task.date, fixed),
    }
    fields
}
