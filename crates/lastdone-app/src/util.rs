use anyhow::Result;
use dialoguer::Select;
use uuid::Uuid;

use crate::commands::Context;
use crate::views::table::task_label;

/// Let the user pick a task, most recently done first. `None` when the list is
/// empty or the user backs out.
pub fn select_task(ctx: &Context, prompt: &str) -> Result<Option<Uuid>> {
    let options = ctx.display_options();
    let tasks = ctx.editor.store().filter("");
    if tasks.is_empty() {
        println!("No tasks yet.");
        return Ok(None);
    }

    let labels: Vec<String> = tasks.iter().map(|t| task_label(t, &options)).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|index| tasks[index].id))
}
