use crate::{
    config::Config,
    error::{ApiError, Result},
    handlers::{self, json_config},
    models::{
        AppendHistoryRequest, ErrorResponse, HealthResponse, MessageResponse, SearchEvent,
        TemperatureUnit,
    },
    routes::{api_routes, openapi_route},
    services::{HistoryService, HistoryStore, MemoryHistoryStore, PgHistoryStore},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{info, warn};
use std::{net::TcpListener, sync::Arc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::user_history::save_user_history,
        handlers::user_history::get_user_history,
    ),
    components(schemas(
        AppendHistoryRequest,
        SearchEvent,
        TemperatureUnit,
        MessageResponse,
        ErrorResponse,
        HealthResponse,
    )),
    tags(
        (name = "History", description = "Per-user weather search history"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        let store = self.build_store().await?;
        Self::run_with_listener(listener, store).await
    }

    /// Pick the storage backend from configuration
    async fn build_store(&self) -> Result<Arc<dyn HistoryStore>> {
        match &self.config.database_url {
            Some(url) => {
                let store = PgHistoryStore::connect(url, self.config.database_max_connections)
                    .await
                    .map_err(|e| ApiError::PersistenceError(e.to_string()))?;
                store
                    .migrate()
                    .await
                    .map_err(|e| ApiError::PersistenceError(e.to_string()))?;
                Ok(Arc::new(store))
            }
            None => {
                warn!("DATABASE_URL not set, history is kept in memory only");
                Ok(Arc::new(MemoryHistoryStore::new()))
            }
        }
    }

    /// Run the server with a specific TCP listener and store
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(
        listener: TcpListener,
        store: Arc<dyn HistoryStore>,
    ) -> Result<()> {
        let history_service = web::Data::new(HistoryService::new(store));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(history_service.clone())
                .app_data(json_config())
                .service(api_routes())
                .service(openapi_route())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
