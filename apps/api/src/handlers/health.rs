use crate::{models::HealthResponse, services::HistoryService};
use actix_web::{get, web, HttpResponse};

/// Report service liveness and whether the history store is reachable
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "History store is unreachable", body = HealthResponse),
    )
)]
#[get("/health")]
pub async fn health_check(history_service: web::Data<HistoryService>) -> HttpResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    if history_service.is_healthy().await {
        HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            timestamp,
        })
    } else {
        HttpResponse::ServiceUnavailable().json(HealthResponse {
            status: "degraded".to_string(),
            timestamp,
        })
    }
}
