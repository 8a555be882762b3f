use chrono::{DateTime, Utc};
use chrono_humanize::Humanize;
use chrono_tz::Tz;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use lastdone_core::models::{ReminderInterval, Task};
use lastdone_core::timezone::format_with_timezone;

/// How list dates are rendered.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub timezone: Tz,
    pub date_format: String,
    pub now: DateTime<Utc>,
}

impl DisplayOptions {
    fn format(&self, at: DateTime<Utc>) -> String {
        format_with_timezone(at, self.timezone, &self.date_format)
    }

    /// Whether `at` falls on the same local calendar day as `now`.
    fn is_today(&self, at: DateTime<Utc>) -> bool {
        at.with_timezone(&self.timezone).date_naive()
            == self.now.with_timezone(&self.timezone).date_naive()
    }
}

pub fn display_tasks(tasks: &[&Task], options: &DisplayOptions) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Last done", "Reminder", "Next reminder"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(&task.id.to_string()[..8]));
        row.add_cell(Cell::new(&task.name).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(format!(
            "{} ({})",
            options.format(task.date),
            task.date.humanize()
        )));

        let interval_cell = match task.reminder_interval {
            ReminderInterval::None => Cell::new("None").fg(Color::DarkGrey),
            interval => Cell::new(interval.label()),
        };
        row.add_cell(interval_cell);

        let next_cell = match task.notification_date {
            Some(at) if at <= options.now => {
                Cell::new(format!("{} (missed)", options.format(at))).fg(Color::Red)
            }
            Some(at) if options.is_today(at) => {
                Cell::new(options.format(at)).fg(Color::Yellow)
            }
            Some(at) => Cell::new(format!("{} ({})", options.format(at), at.humanize())),
            None => Cell::new("-"),
        };
        row.add_cell(next_cell);
        table.add_row(row);
    }

    println!("{table}");
}

/// One-line label used in pickers.
pub fn task_label(task: &Task, options: &DisplayOptions) -> String {
    format!("{}  (last done {})", task.name, options.format(task.date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn berlin_at(now: DateTime<Utc>) -> DisplayOptions {
        DisplayOptions {
            timezone: chrono_tz::Europe::Berlin,
            date_format: "%Y-%m-%d %H:%M".to_string(),
            now,
        }
    }

    #[test]
    fn test_today_follows_local_calendar() {
        // 23:30 UTC on the 14th is already the 15th in Berlin
        let options = berlin_at(Utc.with_ymd_and_hms(2025, 6, 14, 23, 30, 0).unwrap());

        assert!(options.is_today(Utc.with_ymd_and_hms(2025, 6, 15, 18, 0, 0).unwrap()));
        assert!(!options.is_today(Utc.with_ymd_and_hms(2025, 6, 14, 20, 0, 0).unwrap()));
    }

    #[test]
    fn test_task_label_uses_local_time() {
        let options = berlin_at(Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap());
        let task = Task::new("Wash car", Utc.with_ymd_and_hms(2025, 6, 14, 22, 30, 0).unwrap());
        assert_eq!(task_label(&task, &options), "Wash car  (last done 2025-06-15 00:30)");
    }
}
