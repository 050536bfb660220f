mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn health_reports_database_reachable() {
    let app = common::build_test_app().await;
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["db_ok"], true);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = common::build_test_app().await;
    let response = get(&app, "/employees").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("missing x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = common::build_test_app().await;
    let response = get(&app, "/departments").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
