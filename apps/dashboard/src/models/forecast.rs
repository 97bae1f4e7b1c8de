//! Wire types of the OpenWeatherMap 5 day / 3 hour forecast endpoint.
//! Only the fields the dashboard reads are modelled.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub coord: Coordinates,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: Option<String>,
    pub description: String,
}

/// One timestamped reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    pub fn description(&self) -> Option<&str> {
        self.weather.first().map(|c| c.description.as_str())
    }
}

/// Decoded forecast body. `city` is absent when the provider could not
/// resolve the query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub city: Option<City>,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

impl ForecastResponse {
    /// The provider's first entry stands in for current conditions
    pub fn current(&self) -> Option<&ForecastEntry> {
        self.list.first()
    }

    /// City name and current temperature, when the body carries both
    pub fn headline(&self) -> Option<(&str, f64)> {
        let city = self.city.as_ref()?;
        let current = self.current()?;
        Some((city.name.as_str(), current.main.temp))
    }
}
