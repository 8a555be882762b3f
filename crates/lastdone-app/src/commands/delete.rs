use anyhow::Result;
use dialoguer::Confirm;

use crate::commands::Context;
use crate::util::select_task;

pub fn delete_task(ctx: &mut Context) -> Result<()> {
    let Some(task_id) = select_task(ctx, "Delete which task?")? else {
        return Ok(());
    };
    let Some(task) = ctx.editor.store().find(task_id) else {
        return Ok(());
    };

    let confirmation = Confirm::new()
        .with_prompt(format!("Are you sure you want to delete task '{}'?", task.name))
        .default(false)
        .interact()
        .unwrap_or(false);

    if !confirmation {
        println!("Deletion cancelled.");
        return Ok(());
    }

    let task = ctx.editor.delete_task(task_id)?;
    println!("Deleted task: '{}'", task.name);
    Ok(())
}
