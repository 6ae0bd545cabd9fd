// src/routes/health.rs
//! Service status endpoints: the `/` banner and the `/health` probe used by
//! container orchestrators and CI.
//!
//! Neither touches the classifier beyond asking whether one is loaded.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Local;
use serde::Serialize;

use crate::AppState;

/// JSON response body for `/`.
#[derive(Serialize)]
struct BannerResponse {
    message: &'static str,
    version: &'static str,
    description: &'static str,
    model_loaded: bool,
}

/// JSON response body for `/health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    timestamp: String,
}

async fn banner(State((recommender, _)): State<AppState>) -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "AI-Based Crop Recommendation System API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Crop, yield and sustainability advice for Jharkhand farmers",
        model_loaded: recommender.has_model(),
    })
}

/// Handle `GET /health`.
///
/// `model_loaded` is false when the service is answering from the threshold
/// rules alone.
async fn health(State((recommender, _)): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: recommender.has_model(),
        timestamp: Local::now().to_rfc3339(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
}
