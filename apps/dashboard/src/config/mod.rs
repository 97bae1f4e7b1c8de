use crate::error::{DashboardError, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// OpenWeatherMap API key
    #[serde(default)]
    pub weather_api_key: String,
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,
    /// Base URL of the history service (without the `/api` suffix)
    #[serde(default = "default_history_api_url")]
    pub history_api_url: String,
    /// Identity handed to the history service
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Where unit and theme preferences are kept; defaults to the user config dir
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_history_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_user_id() -> String {
    "local-user".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            weather_api_key: String::new(),
            weather_api_url: default_weather_api_url(),
            history_api_url: default_history_api_url(),
            user_id: default_user_id(),
            preferences_path: None,
            http_timeout_secs: default_timeout_secs(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment (after `.env`, if any)
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::Environment::default())
            .build()?;

        let config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weather_api_key.trim().is_empty() {
            return Err(DashboardError::Config(
                "WEATHER_API_KEY must be set".to_string(),
            ));
        }
        if self.user_id.trim().is_empty() {
            return Err(DashboardError::Config("USER_ID must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolved location of the preferences file
    pub fn preferences_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.preferences_path {
            return Ok(path.clone());
        }

        dirs::config_dir()
            .map(|dir| dir.join("weather-dashboard").join("preferences.json"))
            .ok_or_else(|| {
                DashboardError::Config("Could not determine config directory".to_string())
            })
    }
}
