use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// Weather provider or history service unreachable, or answered with a
    /// non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// Local preferences could not be read or written
    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Persistence(err.to_string())
    }
}

impl From<::config::ConfigError> for DashboardError {
    fn from(err: ::config::ConfigError) -> Self {
        DashboardError::Config(err.to_string())
    }
}
