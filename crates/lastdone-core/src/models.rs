use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// How a task's reminder date is derived from its last completion.
///
/// The integer selector is what gets persisted: positive values are a number
/// of days after `Task::date`, `-1` lets the user pick the date, `0` disables
/// the reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ReminderInterval {
    #[default]
    None,
    Custom,
    Week,
    FourWeeks,
    Quarter,
}

impl ReminderInterval {
    /// Every selectable interval, in the order a picker shows them.
    pub const ALL: [ReminderInterval; 5] = [
        ReminderInterval::None,
        ReminderInterval::Week,
        ReminderInterval::FourWeeks,
        ReminderInterval::Quarter,
        ReminderInterval::Custom,
    ];

    pub fn selector(self) -> i64 {
        match self {
            ReminderInterval::None => 0,
            ReminderInterval::Custom => -1,
            ReminderInterval::Week => 7,
            ReminderInterval::FourWeeks => 28,
            ReminderInterval::Quarter => 90,
        }
    }

    /// Days to add to the completion date, for the fixed intervals only.
    pub fn days(self) -> Option<i64> {
        match self.selector() {
            n if n > 0 => Some(n),
            _ => None,
        }
    }

    /// True for every interval except `None`.
    pub fn is_enabled(self) -> bool {
        self != ReminderInterval::None
    }

    pub fn label(self) -> &'static str {
        match self {
            ReminderInterval::None => "No reminder",
            ReminderInterval::Custom => "Custom date",
            ReminderInterval::Week => "Every week",
            ReminderInterval::FourWeeks => "Every 4 weeks",
            ReminderInterval::Quarter => "Every quarter",
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid reminder interval: {0}")]
pub struct ParseReminderIntervalError(String);

impl TryFrom<i64> for ReminderInterval {
    type Error = ParseReminderIntervalError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReminderInterval::None),
            -1 => Ok(ReminderInterval::Custom),
            7 => Ok(ReminderInterval::Week),
            28 => Ok(ReminderInterval::FourWeeks),
            90 => Ok(ReminderInterval::Quarter),
            other => Err(ParseReminderIntervalError(other.to_string())),
        }
    }
}

impl From<ReminderInterval> for i64 {
    fn from(interval: ReminderInterval) -> Self {
        interval.selector()
    }
}

impl FromStr for ReminderInterval {
    type Err = ParseReminderIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(ReminderInterval::None),
            "custom" => Ok(ReminderInterval::Custom),
            "week" | "weekly" => Ok(ReminderInterval::Week),
            "four_weeks" | "4weeks" | "4w" => Ok(ReminderInterval::FourWeeks),
            "quarter" | "quarterly" => Ok(ReminderInterval::Quarter),
            other => other
                .parse::<i64>()
                .map_err(|_| ParseReminderIntervalError(s.to_string()))
                .and_then(ReminderInterval::try_from),
        }
    }
}

impl fmt::Display for ReminderInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    /// When the task was last done.
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub reminder_interval: ReminderInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notification_text: String,
}

impl Task {
    /// A fresh task with no reminder configured.
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            date,
            reminder_interval: ReminderInterval::None,
            notification_date: None,
            notification_text: String::new(),
        }
    }

    pub fn reminder_fields(&self) -> ReminderFields {
        ReminderFields {
            reminder_interval: self.reminder_interval,
            notification_date: self.notification_date,
            notification_text: self.notification_text.clone(),
        }
    }

    pub fn apply_reminder_fields(&mut self, fields: ReminderFields) {
        self.reminder_interval = fields.reminder_interval;
        self.notification_date = fields.notification_date;
        self.notification_text = fields.notification_text;
    }
}

/// The reminder-related slice of a task, as derived by the reminder policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReminderFields {
    pub reminder_interval: ReminderInterval,
    pub notification_date: Option<DateTime<Utc>>,
    pub notification_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub name: String,
    /// Defaults to the current time when absent.
    pub date: Option<DateTime<Utc>>,
}

/// Configuration for reminder scheduling - core version.
/// Kept separate from the application's file config.
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    /// IANA zone used to express trigger moments as calendar components
    pub timezone: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_selectors() {
        for interval in ReminderInterval::ALL {
            assert_eq!(ReminderInterval::try_from(interval.selector()), Ok(interval));
        }
        assert!(ReminderInterval::try_from(14).is_err());
    }

    #[test]
    fn test_interval_from_str() {
        assert_eq!("weekly".parse::<ReminderInterval>(), Ok(ReminderInterval::Week));
        assert_eq!("28".parse::<ReminderInterval>(), Ok(ReminderInterval::FourWeeks));
        assert_eq!("-1".parse::<ReminderInterval>(), Ok(ReminderInterval::Custom));
        assert!("fortnight".parse::<ReminderInterval>().is_err());
    }

    #[test]
    fn test_task_serializes_interval_as_selector() {
        let mut task = Task::new("Water plants", Utc::now());
        task.reminder_interval = ReminderInterval::Quarter;
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["reminder_interval"], 90);
        assert!(json.get("notification_date").is_none());
    }

    #[test]
    fn test_task_rejects_unknown_selector() {
        let json = format!(
            r#"{{"id":"{}","name":"x","date":"2025-01-01T00:00:00Z","reminder_interval":3}}"#,
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<Task>(&json).is_err());
    }
}
