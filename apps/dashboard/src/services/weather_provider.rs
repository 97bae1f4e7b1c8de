use crate::{
    error::{DashboardError, Result},
    models::{Coordinates, ForecastResponse, Units},
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

/// What to look the forecast up by
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastQuery {
    City(String),
    Coordinates(Coordinates),
}

/// OpenWeatherMap forecast client
#[derive(Debug, Clone)]
pub struct WeatherProviderClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherProviderClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn query_params(&self, query: &ForecastQuery, units: Units) -> Vec<(&'static str, String)> {
        let mut params = match query {
            ForecastQuery::City(city) => vec![("q", city.clone())],
            ForecastQuery::Coordinates(coord) => {
                vec![("lat", coord.lat.to_string()), ("lon", coord.lon.to_string())]
            }
        };
        params.push(("units", units.as_str().to_string()));
        params.push(("appid", self.api_key.clone()));
        params
    }

    /// Fetch the forecast. Any non-success status is a network error; a
    /// success body without a city is returned as-is for the caller to judge.
    #[instrument(skip(self))]
    pub async fn fetch_forecast(
        &self,
        query: &ForecastQuery,
        units: Units,
    ) -> Result<ForecastResponse> {
        let url = format!("{}/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&self.query_params(query, units))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let forecast: ForecastResponse = response
                    .json()
                    .await
                    .map_err(|e| DashboardError::Network(format!("Invalid forecast body: {}", e)))?;
                debug!("Received {} forecast entries", forecast.list.len());
                Ok(forecast)
            }
            status => Err(DashboardError::Network(format!(
                "Weather provider returned {}",
                status
            ))),
        }
    }
}
