use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::{describe_outcome, Context};
use crate::util::select_task;

pub fn mark_done(ctx: &mut Context) -> Result<()> {
    let Some(task_id) = select_task(ctx, "Which task did you just do?")? else {
        return Ok(());
    };

    let (task, outcome) = ctx.editor.mark_done(task_id)?;
    println!("Marked '{}' as done.", task.name.green());
    if task.reminder_interval.is_enabled() {
        println!("{}", describe_outcome(&outcome, &ctx.display_options()));
    }
    Ok(())
}
