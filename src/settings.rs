use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            theme: Theme::default(),
            log_level: default_log_level(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("expensetrack")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("expensetrack")
}

/// Settings from disk, plus the reason the file was ignored if it could
/// not be used. Missing file means defaults with no problem to report.
pub fn read_settings() -> (Settings, Option<String>) {
    let path = settings_path();
    if !path.exists() {
        return (Settings::default(), None);
    }
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|content| parse_settings(&content).map_err(|e| e.to_string()));
    match parsed {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    }
}

pub fn load_settings() -> Settings {
    let (settings, problem) = read_settings();
    if let Some(e) = problem {
        warn_unreadable(&e);
    }
    settings
}

pub fn warn_unreadable(error: &str) {
    tracing::warn!(path = %settings_path().display(), %error, "unreadable settings file, using defaults");
}

fn parse_settings(content: &str) -> serde_json::Result<Settings> {
    serde_json::from_str(content)
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ExpenseError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

/// Data directory for this run: an explicit override wins over settings.
pub fn resolve_data_dir(override_dir: Option<&str>, settings: &Settings) -> PathBuf {
    match override_dir {
        Some(dir) => PathBuf::from(shellexpand_path(dir)),
        None => PathBuf::from(&settings.data_dir),
    }
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
