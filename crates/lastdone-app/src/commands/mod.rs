use chrono::Utc;
use chrono_tz::Tz;
use lastdone_core::editor::TaskEditor;
use lastdone_core::notification::ScheduleOutcome;
use lastdone_core::store::JsonFilePersistence;
use std::sync::Arc;

use crate::notifier::TerminalNotifier;
use crate::views::table::DisplayOptions;

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;

pub type AppEditor = TaskEditor<JsonFilePersistence, Arc<TerminalNotifier>>;

/// Everything a menu action needs.
pub struct Context {
    pub editor: AppEditor,
    pub notifier: Arc<TerminalNotifier>,
    pub timezone: Tz,
    pub date_format: String,
}

impl Context {
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            timezone: self.timezone,
            date_format: self.date_format.clone(),
            now: Utc::now(),
        }
    }
}

/// Human-readable result of a scheduling decision.
pub fn describe_outcome(outcome: &ScheduleOutcome, options: &DisplayOptions) -> String {
    match outcome {
        ScheduleOutcome::Cancelled => "No reminder scheduled.".to_string(),
        ScheduleOutcome::Stale(at) => format!(
            "Reminder date {} has already passed; nothing scheduled.",
            lastdone_core::timezone::format_with_timezone(*at, options.timezone, &options.date_format)
        ),
        ScheduleOutcome::Scheduled(trigger) => format!(
            "Reminder set for {:04}-{:02}-{:02} {:02}:{:02}.",
            trigger.year, trigger.month, trigger.day, trigger.hour, trigger.minute
        ),
    }
}
