#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, EmployeeStore};
use sea_orm::Database;
use server::{AppConfig, AppState, build_router};
use tower::ServiceExt;

pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseSettings::new("sqlite::memory:"),
        cors_allowed_origins: vec!["http://localhost:5173".to_string()],
    }
}

/// Full router over a freshly migrated in-memory database. Clone the router
/// to issue several requests against the same data.
pub async fn build_test_app() -> Router {
    let pool = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    build_router(AppState::new(pool, Arc::new(test_config())))
}

/// Full router with `store` injected in place of the database-backed one.
pub async fn build_test_app_with_store(store: Arc<dyn EmployeeStore>) -> Router {
    let pool = Database::connect("sqlite::memory:").await.unwrap();
    build_router(AppState::with_store(pool, store, Arc::new(test_config())))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create an employee and return its assigned id.
pub async fn create(app: &Router, body: serde_json::Value) -> i64 {
    let created = body_json(post_json(app, "/employees", body).await).await;
    created["id"].as_i64().unwrap()
}
