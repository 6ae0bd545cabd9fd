//! Error types for the recommendation pipeline and its HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

// ---

/// Failures raised by a classifier provider.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The model has no per-class probability output. Recoverable: the
    /// recommender substitutes a fixed confidence.
    #[error("classifier does not provide class probabilities")]
    ProbabilityUnsupported,

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error("feature mismatch: expected {expected:?}, found {found:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The single caller-visible failure of a recommendation request.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("{stage} failed: {cause}")]
    Computation { stage: &'static str, cause: String },
}

impl RecommendError {
    // ---
    pub fn computation(stage: &'static str, cause: impl ToString) -> Self {
        Self::Computation {
            stage,
            cause: cause.to_string(),
        }
    }
}

/// Errors returned from route handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Prediction error: {0}")]
    Computation(#[from] RecommendError),
}

/// Body shape for every error response.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Computation(e) => {
                tracing::error!("Recommendation failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
