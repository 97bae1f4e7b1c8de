pub mod history_client;
pub mod identity;
pub mod preferences;
pub mod weather_provider;

// Re-export public types
pub use history_client::HistoryClient;
pub use identity::{IdentityProvider, StaticIdentity};
pub use preferences::{Preferences, PreferencesStore};
pub use weather_provider::{ForecastQuery, WeatherProviderClient};
