use crate::error::CoreError;
use crate::notification::TriggerMoment;
use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Parse an IANA timezone name
pub fn parse_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone).map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))
}

/// Express an instant as the local calendar components a one-shot trigger fires on.
pub fn trigger_moment(at: DateTime<Utc>, tz: Tz) -> TriggerMoment {
    let local = at.with_timezone(&tz);
    TriggerMoment {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        second: local.second(),
        instant: at,
    }
}

/// Format datetime with timezone-aware display
pub fn format_with_timezone(datetime: DateTime<Utc>, tz: Tz, format: &str) -> String {
    datetime.with_timezone(&tz).format(format).to_string()
}
