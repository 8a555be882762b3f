use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;

/// Parse free-form dates like "yesterday", "3 days ago" or "2025-06-01 09:00",
/// interpreted in the user's timezone.
pub fn parse_date(date_str: &str, tz: Tz, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let trimmed = date_str.trim();
    if trimmed.eq_ignore_ascii_case("now") || trimmed.eq_ignore_ascii_case("today") {
        return Ok(now);
    }
    parse_date_string(trimmed, now.with_timezone(&tz), Dialect::Uk)
        .map(|local| local.with_timezone(&Utc))
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}
