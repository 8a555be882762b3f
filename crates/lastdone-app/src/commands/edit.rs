use anyhow::Result;
use chrono::Utc;
use dialoguer::{Input, Select};
use lastdone_core::error::CoreError;
use lastdone_core::models::{ReminderInterval, Task};
use lastdone_core::notification::ScheduleOutcome;
use owo_colors::OwoColorize;

use crate::commands::{describe_outcome, Context};
use crate::parser::parse_date;
use crate::util::select_task;
use crate::views::table::DisplayOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    LastDone,
    Interval,
    NotificationDate,
    Done,
    Cancel,
}

impl Field {
    fn label(self, draft: &Task, options: &DisplayOptions) -> String {
        let format = |at| lastdone_core::timezone::format_with_timezone(at, options.timezone, &options.date_format);
        match self {
            Field::Name => format!("Name: {}", draft.name),
            Field::LastDone => format!("Last done: {}", format(draft.date)),
            Field::Interval => format!("Reminder: {}", draft.reminder_interval),
            Field::NotificationDate => match draft.notification_date {
                Some(at) => format!("Remind me on: {}", format(at)),
                None => "Remind me on: -".to_string(),
            },
            Field::Done => "Done".to_string(),
            Field::Cancel => "Cancel".to_string(),
        }
    }

    /// The notification date picker is only offered while a reminder is set.
    fn visible(draft: &Task) -> Vec<Field> {
        let mut fields = vec![Field::Name, Field::LastDone, Field::Interval];
        if draft.reminder_interval.is_enabled() {
            fields.push(Field::NotificationDate);
        }
        fields.extend([Field::Done, Field::Cancel]);
        fields
    }
}

enum Step {
    Continue(Option<ScheduleOutcome>),
    Finished,
}

pub fn edit_task(ctx: &mut Context) -> Result<()> {
    let Some(task_id) = select_task(ctx, "Edit which task?")? else {
        return Ok(());
    };

    match ctx.editor.begin_edit(task_id) {
        Ok(_) => {}
        Err(CoreError::NotFound(_)) => {
            println!("{}", "That task no longer exists.".yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let result = run_session(ctx);
    if result.is_err() && ctx.editor.session().is_some() {
        // leave no half-edited draft or previewed reminder behind
        ctx.editor.discard()?;
    }
    result
}

fn run_session(ctx: &mut Context) -> Result<()> {
    loop {
        let Some(draft) = ctx.editor.session().map(|s| s.draft().clone()) else {
            return Ok(());
        };

        let options = ctx.display_options();
        let fields = Field::visible(&draft);
        let labels: Vec<String> = fields.iter().map(|f| f.label(&draft, &options)).collect();
        let selection = Select::new()
            .with_prompt(format!("Editing '{}'", draft.name))
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match apply_field(ctx, selection.map(|index| fields[index]), &draft) {
            Ok(Step::Finished) => return Ok(()),
            Ok(Step::Continue(Some(outcome))) => {
                println!("{}", describe_outcome(&outcome, &ctx.display_options()));
            }
            Ok(Step::Continue(None)) => {}
            Err(e) if e.downcast_ref::<dialoguer::Error>().is_some() => return Err(e),
            // bad input only affects the field being edited
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
    }
}

fn apply_field(ctx: &mut Context, field: Option<Field>, draft: &Task) -> Result<Step> {
    let outcome = match field {
        Some(Field::Name) => {
            let name: String = Input::new()
                .with_prompt("Name")
                .with_initial_text(draft.name.clone())
                .interact_text()?;
            ctx.editor.set_name(name)?
        }
        Some(Field::LastDone) => {
            let when: String = Input::new()
                .with_prompt("Last done")
                .default("now".to_string())
                .interact_text()?;
            let date = parse_date(&when, ctx.timezone, Utc::now())?;
            ctx.editor.set_date(date)?
        }
        Some(Field::Interval) => {
            let interval = pick_interval(draft.reminder_interval)?;
            let outcome = ctx.editor.set_interval(interval)?;
            if interval == ReminderInterval::Custom {
                // the seeded date is "now", so ask for the real one straight away
                Some(pick_notification_date(ctx)?)
            } else {
                Some(outcome)
            }
        }
        Some(Field::NotificationDate) => Some(pick_notification_date(ctx)?),
        Some(Field::Done) => {
            let task = ctx.editor.commit()?;
            println!("Saved '{}'.", task.name.green());
            return Ok(Step::Finished);
        }
        Some(Field::Cancel) | None => {
            ctx.editor.discard()?;
            println!("Changes discarded.");
            return Ok(Step::Finished);
        }
    };
    Ok(Step::Continue(outcome))
}

fn pick_interval(current: ReminderInterval) -> Result<ReminderInterval> {
    let labels: Vec<&str> = ReminderInterval::ALL.iter().map(|i| i.label()).collect();
    let default = ReminderInterval::ALL
        .iter()
        .position(|i| *i == current)
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("Remind me")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(ReminderInterval::ALL[index])
}

fn pick_notification_date(ctx: &mut Context) -> Result<ScheduleOutcome> {
    let when: String = Input::new().with_prompt("Remind me on").interact_text()?;
    let date = parse_date(&when, ctx.timezone, Utc::now())?;
    Ok(ctx.editor.set_notification_date(date)?)
}
