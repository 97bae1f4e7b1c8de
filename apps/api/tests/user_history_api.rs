//! HTTP-level tests for the user history endpoints, run against the
//! in-memory store through actix's test harness.

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use weather_history_api::{
    handlers::json_config,
    routes::{api_routes, openapi_route},
    services::{HistoryService, MemoryHistoryStore},
};

fn history_service() -> web::Data<HistoryService> {
    web::Data::new(HistoryService::new(Arc::new(MemoryHistoryStore::new())))
}

macro_rules! init_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data($service.clone())
                .app_data(json_config())
                .service(api_routes())
                .service(openapi_route()),
        )
        .await
    };
}

#[actix_web::test]
async fn test_post_then_get_returns_saved_event() {
    let service = history_service();
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/user-history")
        .set_json(json!({ "userId": "u1", "city": "Paris", "temperature": 18 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "History saved successfully" }));

    let req = test::TestRequest::get()
        .uri("/api/user-history/u1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["city"], "Paris");
    assert_eq!(events[0]["temperature"], 18.0);
    assert!(events[0]["timestamp"].is_string());
}

#[actix_web::test]
async fn test_unknown_user_is_404_not_empty_array() {
    let service = history_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/api/user-history/unknown")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "No history found" }));
}

#[actix_web::test]
async fn test_sequential_posts_are_read_back_oldest_first() {
    let service = history_service();
    let app = init_app!(service);

    for (city, temperature) in [("Paris", 18.0), ("Oslo", 2.5), ("Paris", 18.0)] {
        let req = test::TestRequest::post()
            .uri("/api/user-history")
            .set_json(json!({ "userId": "u1", "city": city, "temperature": temperature }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/api/user-history/u1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let cities: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["city"].as_str().unwrap())
        .collect();

    // Identical posts are stored twice
    assert_eq!(cities, vec!["Paris", "Oslo", "Paris"]);
}

#[actix_web::test]
async fn test_unit_is_echoed_when_supplied() {
    let service = history_service();
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/user-history")
        .set_json(json!({
            "userId": "u1",
            "city": "Denver",
            "temperature": 50.2,
            "unit": "imperial"
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/user-history/u1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["unit"], "imperial");
}

#[actix_web::test]
async fn test_incomplete_entries_fail_as_unsaved() {
    let service = history_service();
    let app = init_app!(service);

    let payloads = [
        json!({ "city": "Paris", "temperature": 18 }),
        json!({ "userId": "u1", "temperature": 18 }),
        json!({ "userId": "u1", "city": "  ", "temperature": 18 }),
        json!({ "userId": "u1", "city": "Paris" }),
        json!({ "userId": "u1", "city": "Paris", "temperature": "warm" }),
    ];

    for payload in payloads {
        let req = test::TestRequest::post()
            .uri("/api/user-history")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Error saving history" }));
    }

    let req = test::TestRequest::post()
        .uri("/api/user-history")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Nothing was created by the rejected requests
    let req = test::TestRequest::get()
        .uri("/api/user-history/u1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_numeric_string_temperature_is_saved() {
    let service = history_service();
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/user-history")
        .set_json(json!({ "userId": "u1", "city": "Paris", "temperature": "18" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/user-history/u1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["temperature"], 18.0);
}

#[actix_web::test]
async fn test_city_is_read_back_as_sent() {
    let service = history_service();
    let app = init_app!(service);

    let req = test::TestRequest::post()
        .uri("/api/user-history")
        .set_json(json!({ "userId": "u1", "city": " Paris ", "temperature": 18 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/user-history/u1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["city"], " Paris ");
}

#[actix_web::test]
async fn test_health_reports_ok() {
    let service = history_service();
    let app = init_app!(service);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_openapi_document_lists_history_paths() {
    let service = history_service();
    let app = init_app!(service);

    let req = test::TestRequest::get()
        .uri("/api-docs/openapi.json")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["paths"]["/api/user-history"].is_object());
    assert!(body["paths"]["/api/user-history/{user_id}"].is_object());
}
