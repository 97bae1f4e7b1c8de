use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Unit system the client was using when a temperature was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Metric,
    Imperial,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Metric => "metric",
            TemperatureUnit::Imperial => "imperial",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(TemperatureUnit::Metric),
            "imperial" => Ok(TemperatureUnit::Imperial),
            other => Err(format!("unknown temperature unit: {}", other)),
        }
    }
}

/// One recorded search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchEvent {
    #[schema(example = "Paris")]
    pub city: String,
    #[schema(example = 18.0)]
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<TemperatureUnit>,
}

/// Append-only search log owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHistory {
    pub user_id: String,
    pub search_history: Vec<SearchEvent>,
}

impl UserHistory {
    /// A freshly created record always starts with the event that created it
    pub fn new(user_id: impl Into<String>, first: SearchEvent) -> Self {
        Self {
            user_id: user_id.into(),
            search_history: vec![first],
        }
    }

    pub fn push(&mut self, event: SearchEvent) {
        self.search_history.push(event);
    }
}

/// Accepts `18`, `18.5` or `"18"`; anything else fails the request
fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrFloat {
        String(String),
        Float(f64),
    }

    match Option::<StringOrFloat>::deserialize(deserializer)? {
        Some(StringOrFloat::String(s)) => f64::from_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(StringOrFloat::Float(f)) => Ok(Some(f)),
        None => Ok(None),
    }
}

/// Body of `POST /api/user-history`
///
/// Every field is optional at the serde level so that a missing field is
/// rejected by the service instead of by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendHistoryRequest {
    #[schema(example = "u1")]
    pub user_id: Option<String>,
    #[schema(example = "Paris")]
    pub city: Option<String>,
    #[schema(example = 18.0)]
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub temperature: Option<f64>,
    pub unit: Option<TemperatureUnit>,
    /// Defaults to the time of insertion
    pub timestamp: Option<DateTime<Utc>>,
}
