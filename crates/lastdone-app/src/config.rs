use chrono_tz::Tz;
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use lastdone_core::models::ReminderConfig;
use lastdone_core::timezone::parse_timezone;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Where the task list is stored
    pub data_file: PathBuf,
    /// IANA timezone reminders are expressed in
    pub timezone: String,
    /// Default tracing filter when `LASTDONE_LOG` is unset
    pub log_level: String,
    /// chrono format string used when listing dates
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            timezone: detect_system_timezone(),
            log_level: "warn".to_string(),
            date_format: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `LASTDONE_*` environment variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self, figment::Error> {
        let path = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_file);
        Self::figment(&path).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("LASTDONE_"))
    }

    pub fn reminder_config(&self) -> ReminderConfig {
        ReminderConfig {
            timezone: self.timezone.clone(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "lastdone")
}

pub fn default_data_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("tasks.json"))
        .unwrap_or_else(|| PathBuf::from("lastdone-tasks.json"))
}

pub fn default_config_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("lastdone.toml"))
        .unwrap_or_else(|| PathBuf::from("lastdone.toml"))
}

/// Validates that a timezone string is a valid IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<Tz, String> {
    parse_timezone(timezone).map_err(|_| {
        format!(
            "Invalid timezone: '{}'. Use IANA timezone names like 'America/New_York'",
            timezone
        )
    })
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() && validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    if let Ok(tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    "UTC".to_string()
}
