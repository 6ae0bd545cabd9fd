use axum::{extract::State, routing::post, Json, Router};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{AppError, AppState, CropRecommendationResult, SoilClimateSample};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/recommend-crop", post(handler))
}

/// Handle `POST /recommend-crop`.
///
/// The body must carry all seven measurements; axum rejects anything else
/// before this runs. Values are not range-checked.
async fn handler(
    State((recommender, _)): State<AppState>,
    Json(sample): Json<SoilClimateSample>,
) -> Result<Json<CropRecommendationResult>, AppError> {
    // ---
    let request_id = Uuid::new_v4();
    debug!("POST /recommend-crop [{}] - {:?}", request_id, sample);

    let result = recommender.recommend(&sample)?;

    info!(
        "POST /recommend-crop [{}] - {} (confidence {}, yield {}, sustainability {})",
        request_id,
        result.crop,
        result.confidence,
        result.predicted_yield_kg_per_ha,
        result.sustainability_score
    );
    Ok(Json(result))
}
