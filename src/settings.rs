use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};

/// Overrides the settings directory (mainly for tests and portable setups).
pub const CONFIG_DIR_ENV: &str = "TALLY_CONFIG_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Line format key: `strict` or `loose`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Currency key: `rupee` or `dollar`.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_format() -> String {
    "strict".to_string()
}

fn default_currency() -> String {
    "rupee".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: default_format(),
            currency: default_currency(),
        }
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tally")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn log_path() -> PathBuf {
    config_dir().join("tally.log")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TallyError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}
