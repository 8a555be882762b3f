use anyhow::Result;
use dialoguer::Input;

use crate::commands::Context;
use crate::views::table::display_tasks;

pub fn list_tasks(ctx: &Context, query: &str) -> Result<()> {
    let tasks = ctx.editor.store().filter(query);
    display_tasks(&tasks, &ctx.display_options());
    Ok(())
}

pub fn search_tasks(ctx: &Context) -> Result<()> {
    let query: String = Input::new()
        .with_prompt("Search")
        .allow_empty(true)
        .interact_text()?;
    list_tasks(ctx, &query)
}
