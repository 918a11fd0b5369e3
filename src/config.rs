use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration, loaded from `~/.config/shiftcal/config.toml`.
///
/// Every field has a default and a missing file yields the default
/// configuration, so the tool works without any setup.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Directory generated ICS files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Advisory timezone advertised in generated calendars (X-WR-TIMEZONE)
    #[serde(default)]
    pub timezone: Option<String>,

    /// Names that get reminder alarms when no -r flags are given
    #[serde(default)]
    pub reminders: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_dir: default_output_dir(),
            timezone: None,
            reminders: Vec::new(),
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

/// Get the config directory path (~/.config/shiftcal)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("shiftcal");
    Ok(config_dir)
}

/// Get the config file path (~/.config/shiftcal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config, falling back to defaults when no file exists.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    Ok(config)
}
