use axum::{http::StatusCode, response::IntoResponse, routing::get, Extension, Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::shared_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    /// If the database connection is ok
    database: bool,
    /// If all the other fields indicate healthy status.
    healthy: bool,
}

async fn health(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let database = state.store.healthy().await;

    (
        StatusCode::OK,
        Json(HealthResponse {
            healthy: database,
            database,
        }),
    )
}

async fn hello() -> impl IntoResponse {
    Json(json!({ "message": "Hello World" }))
}

pub fn configure() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
}
