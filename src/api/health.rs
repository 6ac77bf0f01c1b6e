//! Liveness endpoint for the hosting platform

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

pub fn router() -> Router {
    Router::new()
        .route("/", get(status))
        .route("/health", get(status))
}

#[derive(Serialize, Debug)]
pub struct Status {
    pub status: &'static str,
}

async fn status() -> (StatusCode, Json<Status>) {
    (StatusCode::OK, Json(Status { status: "running" }))
}
