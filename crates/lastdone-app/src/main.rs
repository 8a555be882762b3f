use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use dialoguer::Select;
use lastdone_core::editor::TaskEditor;
use lastdone_core::error::CoreError;
use lastdone_core::notification::{NotificationAuthorization, NotificationScheduler, SystemClock};
use lastdone_core::store::{JsonFilePersistence, TaskStore};
use owo_colors::{OwoColorize, Style};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

use cli::{Cli, MenuAction};
use commands::Context;
use notifier::TerminalNotifier;

mod cli;
mod commands;
mod config;
mod logging;
mod notifier;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (mut config, config_error) = match config::Config::load(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(timezone) = cli.timezone {
        config.timezone = timezone;
    }

    logging::init_logging(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "configuration could not be loaded; using defaults");
    }

    if let Err(e) = run(config).await {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(config: config::Config) -> Result<()> {
    let timezone = config::validate_timezone(&config.timezone).map_err(|e| anyhow!(e))?;

    let notifier = Arc::new(TerminalNotifier::new(Handle::current()));
    let mut authorization = NotificationAuthorization::new();
    if !authorization.request_once(&notifier) {
        println!(
            "{}",
            "Reminders are only shown while lastdone runs in a terminal.".yellow()
        );
    }

    let store = TaskStore::open(JsonFilePersistence::new(&config.data_file));
    let scheduler = NotificationScheduler::new(notifier.clone(), SystemClock, &config.reminder_config())?;
    let editor = TaskEditor::new(store, scheduler);
    let scheduled = editor.reschedule_all();
    info!(
        data_file = %config.data_file.display(),
        tasks = editor.store().len(),
        scheduled,
        "lastdone started"
    );

    let ctx = Context {
        editor,
        notifier,
        timezone,
        date_format: config.date_format,
    };

    // prompts block, so keep them off the runtime's worker threads
    tokio::task::spawn_blocking(move || run_menu(ctx))
        .await
        .context("interactive session panicked")?
}

fn run_menu(mut ctx: Context) -> Result<()> {
    commands::list::list_tasks(&ctx, "")?;

    loop {
        let pending = ctx.notifier.pending_count();
        let selection = Select::new()
            .with_prompt(format!("What next? ({} reminder(s) pending)", pending))
            .items(&MenuAction::ALL)
            .default(0)
            .interact_opt()?;

        let action = selection.map_or(MenuAction::Quit, |index| MenuAction::ALL[index]);
        let result = match action {
            MenuAction::List => commands::list::list_tasks(&ctx, ""),
            MenuAction::Search => commands::list::search_tasks(&ctx),
            MenuAction::Add => commands::add::add_task(&mut ctx),
            MenuAction::Done => commands::done::mark_done(&mut ctx),
            MenuAction::Edit => commands::edit::edit_task(&mut ctx),
            MenuAction::Delete => commands::delete::delete_task(&mut ctx),
            MenuAction::Quit => return Ok(()),
        };

        // core errors are reported and the menu carries on
        if let Err(e) = result {
            if e.downcast_ref::<dialoguer::Error>().is_some() {
                return Err(e);
            }
            handle_error(e);
        }
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(id) => {
                eprintln!("{} Task '{}' no longer exists.", "Error:".style(error_style), id);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidTimezone(tz) => {
                eprintln!(
                    "{} Unknown timezone '{}'. Use IANA names like 'Europe/Berlin'.",
                    "Error:".style(error_style),
                    tz.yellow()
                );
            }
            CoreError::Io(e) => {
                eprintln!("{} Could not save tasks: {}", "Error:".style(error_style), e);
            }
            CoreError::Serialization(e) => {
                eprintln!("{} Could not encode tasks: {}", "Error:".style(error_style), e);
            }
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
