use crate::{
    error::ApiError,
    models::{AppendHistoryRequest, MessageResponse, SearchEvent},
    services::{history_service::SAVE_FAILED, HistoryService},
};
use actix_web::{
    error::JsonPayloadError,
    web::{self, Json},
    HttpRequest, HttpResponse,
};
use log::warn;

pub fn user_history_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/user-history").route(web::post().to(save_user_history)))
        .service(
            web::resource("/user-history/{user_id}").route(web::get().to(get_user_history)),
        );
}

/// A body that cannot be decoded fails like any other unsaved entry
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        warn!("Rejected history payload: {}", err);
        ApiError::PersistenceError(SAVE_FAILED.to_string()).into()
    })
}

/// Append one search to a user's history
#[utoipa::path(
    post,
    path = "/api/user-history",
    tag = "History",
    request_body = AppendHistoryRequest,
    responses(
        (status = 200, description = "Search recorded", body = MessageResponse),
        (status = 500, description = "Invalid entry or storage failure", body = ErrorResponse),
    )
)]
pub async fn save_user_history(
    request: Json<AppendHistoryRequest>,
    history_service: web::Data<HistoryService>,
) -> Result<HttpResponse, ApiError> {
    history_service.save_search(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("History saved successfully")))
}

/// Return a user's full search history, oldest first
#[utoipa::path(
    get,
    path = "/api/user-history/{user_id}",
    tag = "History",
    params(
        ("user_id" = String, Path, description = "Opaque user identifier")
    ),
    responses(
        (status = 200, description = "Stored searches in insertion order", body = [SearchEvent]),
        (status = 404, description = "No history recorded for this user", body = MessageResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_user_history(
    user_id: web::Path<String>,
    history_service: web::Data<HistoryService>,
) -> Result<HttpResponse, ApiError> {
    let history: Vec<SearchEvent> = history_service.get_search_history(&user_id).await?;

    Ok(HttpResponse::Ok().json(history))
}
