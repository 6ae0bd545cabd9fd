//! In-process tests of the HTTP surface. No server or network needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use crop_advisor::{router, Config, CropCatalog, Recommender, TreeClassifier};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

const FOREST: &str = r#"{
    "kind": "random_forest",
    "classes": ["rice", "chickpea"],
    "features": ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"],
    "trees": [
        {"feature": [1, -2, -2], "threshold": [60.0, 0.0, 0.0], "left": [1, -1, -1], "right": [2, -1, -1], "class": [null, 0, 1]},
        {"feature": [1, -2, -2], "threshold": [60.0, 0.0, 0.0], "left": [1, -1, -1], "right": [2, -1, -1], "class": [null, 0, 1]},
        {"feature": [6, -2, -2], "threshold": [100.0, 0.0, 0.0], "left": [1, -1, -1], "right": [2, -1, -1], "class": [null, 1, 0]},
        {"feature": [6, -2, -2], "threshold": [100.0, 0.0, 0.0], "left": [1, -1, -1], "right": [2, -1, -1], "class": [null, 1, 0]}
    ]
}"#;

fn rules_app() -> Router {
    // ---
    let recommender = Recommender::new(Arc::new(CropCatalog::jharkhand())).with_yield_seed(Some(5));
    router(Arc::new(recommender), Config::default())
}

fn forest_app() -> Router {
    // ---
    let model = TreeClassifier::from_json(FOREST).unwrap();
    let recommender = Recommender::new(Arc::new(CropCatalog::jharkhand())).with_classifier(Arc::new(model));
    router(Arc::new(recommender), Config::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    // ---
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    // ---
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read(response).await
}

async fn read(response: axum::response::Response) -> (StatusCode, Value) {
    // ---
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_fallback_mode() {
    // ---
    let (status, body) = get(rules_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert!(body["timestamp"].is_string());

    let (_, body) = get(forest_app(), "/").await;
    assert_eq!(body["model_loaded"], true);
}

#[tokio::test]
async fn recommend_rice_with_rules() {
    // ---
    let sample = json!({
        "N": 90, "P": 42, "K": 43,
        "temperature": 21, "humidity": 82, "ph": 6.5, "rainfall": 203
    });
    let (status, body) = post_json(rules_app(), "/recommend-crop", sample).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crop"], "rice");
    assert_eq!(body["confidence"], 0.75);
    assert_eq!(body["predicted_yield_kg_per_ha"], 500.0);
    assert_eq!(body["sustainability_score"], 9.36);
    assert_eq!(body["recommendations"][2], "Expected investment: ₹35,000 per hectare");
}

#[tokio::test]
async fn recommend_wheat_with_rules() {
    // ---
    let sample = json!({
        "N": 20, "P": 28, "K": 30,
        "temperature": 22, "humidity": 60, "ph": 6.8, "rainfall": 80
    });
    let (status, body) = post_json(rules_app(), "/recommend-crop", sample).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crop"], "wheat");
    let advice = body["recommendations"].as_array().unwrap();
    assert_eq!(
        advice.last().unwrap(),
        "Consider nitrogen-rich fertilizers or organic compost"
    );
}

#[tokio::test]
async fn recommend_with_forest_uses_vote_confidence() {
    // ---
    // P > 60 votes chickpea twice, rainfall <= 100 votes chickpea twice.
    let sample = json!({
        "N": 40, "P": 70, "K": 90,
        "temperature": 22, "humidity": 70, "ph": 7.0, "rainfall": 90
    });
    let (status, body) = post_json(forest_app(), "/recommend-crop", sample).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crop"], "chickpea");
    assert_eq!(body["confidence"], 1.0);

    // Split vote: P <= 60 says rice, rainfall <= 100 says chickpea; tie -> rice.
    let sample = json!({
        "N": 40, "P": 30, "K": 90,
        "temperature": 22, "humidity": 70, "ph": 7.0, "rainfall": 90
    });
    let (_, body) = post_json(forest_app(), "/recommend-crop", sample).await;
    assert_eq!(body["crop"], "rice");
    assert_eq!(body["confidence"], 0.5);
}

#[tokio::test]
async fn recommend_rejects_missing_field() {
    // ---
    let sample = json!({
        "N": 90, "P": 42, "K": 43,
        "temperature": 21, "humidity": 82, "ph": 6.5
    });
    let (status, _) = post_json(rules_app(), "/recommend-crop", sample).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn recommend_out_of_range_is_not_rejected() {
    // ---
    let sample = json!({
        "N": -50, "P": 500, "K": 0,
        "temperature": 60, "humidity": 120, "ph": 15, "rainfall": -10
    });
    let (status, body) = post_json(rules_app(), "/recommend-crop", sample).await;
    assert_eq!(status, StatusCode::OK);
    let score = body["sustainability_score"].as_f64().unwrap();
    assert!((1.0..=10.0).contains(&score));
}

#[tokio::test]
async fn recommend_non_finite_intermediate_is_server_error() {
    // ---
    let sample = json!({
        "N": 1.7e308, "P": 1.7e308, "K": 0,
        "temperature": 25, "humidity": 0, "ph": 6.5, "rainfall": 100
    });
    let (status, body) = post_json(rules_app(), "/recommend-crop", sample).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Prediction error: yield estimate failed"));
}

#[tokio::test]
async fn crop_info_is_case_insensitive() {
    // ---
    let (status, body) = get(rules_app(), "/crop-info/Wheat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["season"], "Rabi");
    assert_eq!(body["expected_revenue_per_ha"], 44000.0);

    let (status, body) = get(rules_app(), "/crop-info/coconut").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Crop not found");
}

#[tokio::test]
async fn investment_analysis_scales_with_area() {
    // ---
    let (status, body) = get(rules_app(), "/investment-analysis/maize?area_hectares=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_investment"], 75000.0);
    assert_eq!(body["expected_yield_kg"], 6000.0);

    let (_, body) = get(rules_app(), "/investment-analysis/maize").await;
    assert_eq!(body["area_hectares"], 1.0);
}

#[tokio::test]
async fn investment_analysis_rejects_non_positive_area() {
    // ---
    for area in ["0", "-2", "0.0"] {
        let uri = format!("/investment-analysis/maize?area_hectares={area}");
        let (status, body) = get(rules_app(), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "area {area}");
        assert_eq!(body["detail"], "area_hectares must be a positive number");
    }
}

#[tokio::test]
async fn crop_prices_cover_catalog() {
    // ---
    let (status, body) = get(rules_app(), "/crop-prices").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prices"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn climate_and_district_listing() {
    // ---
    let (status, body) = get(rules_app(), "/climate-data/palamu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["district"], "Palamu");
    assert_eq!(body["average_rainfall"], 900.0);

    let (status, _) = get(rules_app(), "/climate-data/atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = get(rules_app(), "/districts").await;
    assert_eq!(body["total_districts"], 8);
}

#[test]
fn repeated_requests_share_one_recommender() {
    // ---
    let app = rules_app();
    let sample = json!({
        "N": 30, "P": 70, "K": 30,
        "temperature": 25, "humidity": 70, "ph": 7.5, "rainfall": 120
    });

    tokio_test::block_on(async move {
        for _ in 0..8 {
            let (status, body) = post_json(app.clone(), "/recommend-crop", sample.clone()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["crop"], "chickpea");
        }
    });
}
