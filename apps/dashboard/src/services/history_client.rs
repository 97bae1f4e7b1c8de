use crate::{
    error::{DashboardError, Result},
    models::{AppendHistoryRequest, SearchEvent, Units},
};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

/// Client for the history service's `/api/user-history` endpoints
#[derive(Debug, Clone)]
pub struct HistoryClient {
    client: Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/api/user-history[/{user_id}]`, each segment percent-encoded
    fn endpoint(&self, user_id: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| DashboardError::Config(format!("Invalid history URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| DashboardError::Config(format!("Invalid history URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["api", "user-history"])
            .extend(user_id);
        Ok(url)
    }

    pub async fn append(
        &self,
        user_id: &str,
        city: &str,
        temperature: f64,
        unit: Units,
    ) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(None)?)
            .json(&AppendHistoryRequest {
                user_id,
                city,
                temperature,
                unit,
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                debug!("History saved for {}", city);
                Ok(())
            }
            status => Err(DashboardError::Network(format!(
                "Failed to save history: {}",
                status
            ))),
        }
    }

    /// Full history for `user_id`, or `None` when the user has none yet
    pub async fn fetch(&self, user_id: &str) -> Result<Option<Vec<SearchEvent>>> {
        let response = self.client.get(self.endpoint(Some(user_id))?).send().await?;

        match response.status() {
            StatusCode::OK => response
                .json()
                .await
                .map(Some)
                .map_err(|e| DashboardError::Serialization(e.to_string())),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(DashboardError::Network(format!(
                "Failed to fetch history: {}",
                status
            ))),
        }
    }
}
