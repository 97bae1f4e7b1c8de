use crate::{
    models::{SearchEvent, TemperatureUnit, UserHistory},
    services::history_store::{HistoryStore, StoreError},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::{debug, info};

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS user_histories (
        user_id TEXT PRIMARY KEY,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS search_events (
        id BIGSERIAL PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES user_histories (user_id),
        city TEXT NOT NULL,
        temperature DOUBLE PRECISION NOT NULL,
        unit TEXT,
        recorded_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS search_events_user_id_idx
        ON search_events (user_id, id)
    "#,
];

#[derive(Debug, FromRow)]
struct SearchEventRow {
    city: String,
    temperature: f64,
    unit: Option<String>,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<SearchEventRow> for SearchEvent {
    type Error = StoreError;

    fn try_from(row: SearchEventRow) -> Result<Self, Self::Error> {
        let unit = row
            .unit
            .map(|unit| unit.parse::<TemperatureUnit>())
            .transpose()
            .map_err(StoreError::Corrupt)?;

        Ok(SearchEvent {
            city: row.city,
            temperature: row.temperature,
            timestamp: row.recorded_at,
            unit,
        })
    }
}

/// PostgreSQL-backed history store.
///
/// Each event is its own row, so an append is an insert rather than a rewrite
/// of the whole history document.
#[derive(Debug, Clone)]
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to PostgreSQL history store");
        Ok(Self { pool })
    }

    /// Wrap an existing pool, e.g. one shared with other components
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("History schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn append(&self, user_id: &str, event: SearchEvent) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO user_histories (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO search_events (user_id, city, temperature, unit, recorded_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(&event.city)
        .bind(event.temperature)
        .bind(event.unit.map(|unit| unit.as_str()))
        .bind(event.timestamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<UserHistory>, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM user_histories WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Ok(None);
        }

        let rows: Vec<SearchEventRow> = sqlx::query_as(
            "SELECT city, temperature, unit, recorded_at FROM search_events \
             WHERE user_id = $1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let search_history = rows
            .into_iter()
            .map(SearchEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(UserHistory {
            user_id: user_id.to_string(),
            search_history,
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Store against `DATABASE_URL`, or `None` when no database is configured
    async fn store() -> Option<PgHistoryStore> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&url)
            .await
            .unwrap();
        let store = PgHistoryStore::from_pool(pool);
        store.migrate().await.unwrap();
        Some(store)
    }

    fn unique_user(label: &str) -> String {
        format!("{}-{}", label, Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    fn event(city: &str, temperature: f64) -> SearchEvent {
        SearchEvent {
            city: city.to_string(),
            temperature,
            timestamp: "2024-01-15T10:30:00Z".parse().unwrap(),
            unit: Some(TemperatureUnit::Metric),
        }
    }

    #[tokio::test]
    async fn test_pg_unknown_user_is_none() {
        let Some(store) = store().await else { return };

        assert!(store.find(&unique_user("missing")).await.unwrap().is_none());
        store.ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_pg_migrate_is_repeatable() {
        let Some(store) = store().await else { return };

        store.migrate().await.unwrap();
    }

    #[tokio::test]
    async fn test_pg_appends_keep_insertion_order() {
        let Some(store) = store().await else { return };
        let user = unique_user("order");

        store.append(&user, event("Paris", 18.0)).await.unwrap();
        store.append(&user, event("Oslo", -3.5)).await.unwrap();
        store.append(&user, event("Paris", 18.0)).await.unwrap();

        let history = store.find(&user).await.unwrap().unwrap();
        assert_eq!(history.user_id, user);
        let cities: Vec<_> = history.search_history.iter().map(|e| e.city.as_str()).collect();
        assert_eq!(cities, vec!["Paris", "Oslo", "Paris"]);
        assert_eq!(history.search_history[1], event("Oslo", -3.5));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_pg_concurrent_appends_are_not_lost() {
        let Some(store) = store().await else { return };
        let store = Arc::new(store);
        let user = unique_user("concurrent");

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let user = user.clone();
                tokio::spawn(async move { store.append(&user, event("Paris", i as f64)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let history = store.find(&user).await.unwrap().unwrap();
        assert_eq!(history.search_history.len(), 16);
    }

    #[test]
    fn test_row_conversion_parses_unit() {
        let row = SearchEventRow {
            city: "Paris".to_string(),
            temperature: 64.4,
            unit: Some("imperial".to_string()),
            recorded_at: Utc::now(),
        };

        let event = SearchEvent::try_from(row).unwrap();
        assert_eq!(event.unit, Some(TemperatureUnit::Imperial));
        assert_eq!(event.temperature, 64.4);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_unit() {
        let row = SearchEventRow {
            city: "Paris".to_string(),
            temperature: 18.0,
            unit: Some("kelvin".to_string()),
            recorded_at: Utc::now(),
        };

        assert!(matches!(
            SearchEvent::try_from(row),
            Err(StoreError::Corrupt(_))
        ));
    }
}
