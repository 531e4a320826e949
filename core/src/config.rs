use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::debug;

const APP_DIR_NAME: &str = ".fishball";
const DATA_FILE_NAME: &str = "fishball.txt";
const CONFIG_FILE_NAME: &str = "config.json";
/// Upper bound for `reminder_days`, roughly a century.
pub const MAX_REMINDER_DAYS: i64 = 36_500;

/// Settings fixed for the lifetime of an interpreter.
///
/// Every field may be omitted from the JSON file; missing ones keep their
/// defaults.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_file: PathBuf,
    pub reminder_days: i64,
    pub welcome_message: String,
    pub exit_message: String,
    pub error_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_file = default_app_dir()
            .map(|dir| dir.join(DATA_FILE_NAME))
            .unwrap_or_else(|_| PathBuf::from(DATA_FILE_NAME));
        Self {
            data_file,
            reminder_days: 7,
            welcome_message: "Hello, I'm Fishball!\nWhat can I do for you?".to_string(),
            exit_message: "Bye. Hope to see you again soon!".to_string(),
            error_prefix: "OOPS! ".to_string(),
        }
    }
}

impl Config {
    /// Reads `path`, or `~/.fishball/config.json` when no path is given.
    ///
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_app_dir()?.join(CONFIG_FILE_NAME), false),
        };

        if !path.exists() {
            if explicit {
                return Err(anyhow!("Config file {} does not exist", path.display()));
            }
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        if !(0..=MAX_REMINDER_DAYS).contains(&config.reminder_days) {
            return Err(anyhow!(
                "Invalid config file {}: reminder_days must be between 0 and {}, got {}",
                path.display(),
                MAX_REMINDER_DAYS,
                config.reminder_days
            ));
        }
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

pub fn default_app_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(APP_DIR_NAME))
}
