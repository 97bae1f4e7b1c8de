use crate::{
    error::ApiError,
    models::{AppendHistoryRequest, SearchEvent},
    services::history_store::HistoryStore,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub const SAVE_FAILED: &str = "Error saving history";
pub const READ_FAILED: &str = "Error retrieving history";
pub const NOT_FOUND: &str = "No history found";

#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Record one search for a user. An incomplete entry fails the same way
    /// a storage failure does.
    pub async fn save_search(&self, request: AppendHistoryRequest) -> Result<(), ApiError> {
        let (user_id, event) = Self::validate(request).map_err(|reason| {
            warn!("Rejected history entry: {}", reason);
            ApiError::PersistenceError(SAVE_FAILED.to_string())
        })?;

        self.store.append(&user_id, event).await.map_err(|e| {
            error!("Failed to save search history for {}: {}", user_id, e);
            ApiError::PersistenceError(SAVE_FAILED.to_string())
        })?;

        debug!("Saved search for user {}", user_id);
        Ok(())
    }

    /// Full history for a user, oldest first
    pub async fn get_search_history(&self, user_id: &str) -> Result<Vec<SearchEvent>, ApiError> {
        let history = self.store.find(user_id).await.map_err(|e| {
            error!("Failed to read search history for {}: {}", user_id, e);
            ApiError::PersistenceError(READ_FAILED.to_string())
        })?;

        history
            .map(|history| history.search_history)
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn is_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("History store health check failed: {}", e);
                false
            }
        }
    }

    fn validate(request: AppendHistoryRequest) -> Result<(String, SearchEvent), &'static str> {
        let user_id = request
            .user_id
            .filter(|id| !id.trim().is_empty())
            .ok_or("userId is missing or blank")?;
        let city = request
            .city
            .filter(|city| !city.trim().is_empty())
            .ok_or("city is missing or blank")?;
        let temperature = request
            .temperature
            .filter(|t| t.is_finite())
            .ok_or("temperature is missing or not a number")?;

        let event = SearchEvent {
            city,
            temperature,
            timestamp: request.timestamp.unwrap_or_else(Utc::now),
            unit: request.unit,
        };

        Ok((user_id, event))
    }
}
