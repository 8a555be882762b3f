use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Keep track of when you last did things, and get reminded to do them again
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    /// Task list file, overriding the configured one
    #[clap(short, long)]
    pub data_file: Option<PathBuf>,
    /// IANA timezone reminders are expressed in (e.g. 'Europe/Berlin')
    #[clap(short, long)]
    pub timezone: Option<String>,
}

/// Entries of the interactive main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    List,
    Search,
    Add,
    Done,
    Edit,
    Delete,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 7] = [
        MenuAction::List,
        MenuAction::Search,
        MenuAction::Add,
        MenuAction::Done,
        MenuAction::Edit,
        MenuAction::Delete,
        MenuAction::Quit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::List => "List tasks",
            MenuAction::Search => "Search",
            MenuAction::Add => "Add a task",
            MenuAction::Done => "Mark a task done now",
            MenuAction::Edit => "Edit a task",
            MenuAction::Delete => "Delete a task",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_launch_options() {
        let cli = Cli::parse_from(["lastdone", "--data-file", "tasks.json", "-t", "Asia/Tokyo"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("tasks.json")));
        assert_eq!(cli.timezone.as_deref(), Some("Asia/Tokyo"));
        assert!(cli.config.is_none());
    }
}
