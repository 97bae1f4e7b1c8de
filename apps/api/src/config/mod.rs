use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection string; the in-memory store is used when unset
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            database_max_connections: default_max_connections(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment (after `.env`, if any)
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::Environment::default().try_parsing(true))
            .build()?;

        let mut config: Config = settings.try_deserialize()?;

        // An empty DATABASE_URL in a .env file means "no database"
        if config
            .database_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            config.database_url = None;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 5);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "port": 8080,
            "database_url": "postgres://localhost/history"
        }))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/history")
        );
    }
}
