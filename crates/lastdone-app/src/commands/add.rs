use anyhow::Result;
use chrono::Utc;
use dialoguer::Input;
use lastdone_core::models::NewTaskData;
use owo_colors::OwoColorize;

use crate::commands::Context;
use crate::parser::parse_date;

pub fn add_task(ctx: &mut Context) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("What did you do?")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let when: String = Input::new()
        .with_prompt("When did you last do it?")
        .default("now".to_string())
        .interact_text()?;
    let date = parse_date(&when, ctx.timezone, Utc::now())?;

    let task = ctx.editor.create_task(NewTaskData {
        name,
        date: Some(date),
    })?;
    println!("Added task: '{}'", task.name.green());
    Ok(())
}
