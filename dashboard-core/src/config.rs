use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

fn default_base_url() -> String {
    "http://api.weatherapi.com/v1".to_string()
}

const fn default_forecast_days() -> u8 {
    3
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "http://api.weatherapi.com/v1"
/// forecast_days = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// WeatherAPI.com key; `WEATHER_API_KEY` in the environment takes precedence.
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Forecast window requested from the provider (the dashboard shows 3 days).
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self { api_key: None, base_url: default_base_url(), forecast_days: default_forecast_days() }
    }
}

impl Config {
    /// Load config from disk, or return defaults if the file doesn't exist yet.
    /// The `WEATHER_API_KEY` environment variable overrides any stored key.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str::<Config>(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(key) = env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            cfg.api_key = Some(key);
        }

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Platform directories for this application (also used by the city store).
    pub fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-dashboard", "dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// API key, or an error with a setup hint. The key itself is not validated
    /// here; a bad key surfaces as a failed fetch.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No WeatherAPI key configured.\n\
                 Hint: run `dashboard configure`, or set the {API_KEY_ENV} environment variable."
            )
        })
    }

    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }
}
