//! Route gateway: merges every subrouter and attaches shared state and
//! middleware. `main.rs` and tests only see [`router`].

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{Config, Recommender};

mod crops;
mod districts;
mod health;
mod recommend;

/// State shared by every handler.
pub type AppState = (Arc<Recommender>, Config);

// ---

pub fn router(recommender: Arc<Recommender>, config: Config) -> Router {
    // ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(recommend::router())
        .merge(crops::router())
        .merge(districts::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state((recommender, config))
}
