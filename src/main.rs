//! Application entry point for the `crop-advisor` service.
//!
//! Startup sequence:
//! - Initializing structured logging/tracing
//! - Loading configuration from environment variables or `.env`
//! - Loading the classifier artifact, if one is configured
//! - Building the recommender and mounting all routes via the `routes` gateway
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `BIND_ADDR`, `PORT` (optional) – listen address (default `0.0.0.0:8000`)
//! - `MODEL_PATH` (optional) – JSON classifier artifact; rule fallback without it
//! - `YIELD_SEED` (optional) – fixed seed for yield variance
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, sync::Arc};

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use crop_advisor::{config, routes, CropCatalog, Recommender, TreeClassifier};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let recommender = build_recommender(&cfg);

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(Arc::new(recommender), cfg.clone());

    let addr = cfg.listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the recommender from the static catalog and the optional model.
///
/// A missing or unreadable artifact is logged and the service continues on
/// the threshold rules.
fn build_recommender(cfg: &config::Config) -> Recommender {
    // ---
    let recommender =
        Recommender::new(Arc::new(CropCatalog::jharkhand())).with_yield_seed(cfg.yield_seed);

    let Some(path) = &cfg.model_path else {
        tracing::warn!("MODEL_PATH not set, using rule-based fallback predictions");
        return recommender;
    };

    match TreeClassifier::from_path(path) {
        Ok(model) => {
            tracing::info!(
                "Loaded {:?} model with {} tree(s) from {}",
                model.kind(),
                model.n_trees(),
                path.display()
            );
            recommender.with_classifier(Arc::new(model))
        }
        Err(e) => {
            tracing::warn!(
                "Could not load model from {}: {}. Using rule-based fallback predictions.",
                path.display(),
                e
            );
            recommender
        }
    }
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `AXUM_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by the `AXUM_LOG_LEVEL` env var
///
/// Call once at startup, before any logging macro runs.
fn init_tracing() {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    // Use RUST_LOG if available, otherwise fall back to AXUM_LOG_LEVEL
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("AXUM_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},tower_http=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
