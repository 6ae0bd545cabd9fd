//! Informational crop endpoints backed by the reference catalog:
//! market prices, per-crop economics and an investment breakdown.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::round_to;
use crate::{AppError, AppState, CropReferenceEntry};

// ---

/// Yield assumed for economics when no sample is given, kg/ha.
const ASSUMED_YIELD_KG_PER_HA: f64 = 2000.0;

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/crop-prices", get(prices_handler))
        .route("/crop-info/{crop}", get(info_handler))
        .route("/investment-analysis/{crop}", get(investment_handler))
}

#[derive(Debug, Serialize)]
struct CropPrice {
    crop: String,
    current_price_per_kg: f64,
    market_trend: &'static str,
    last_updated: String,
}

#[derive(Debug, Serialize)]
struct PricesResponse {
    prices: Vec<CropPrice>,
}

/// Simulated quote: average price moved by up to ±10%, with a trend drawn
/// up/down/stable at 30/30/40.
fn price_quote<R: Rng>(entry: &CropReferenceEntry, rng: &mut R, last_updated: &str) -> CropPrice {
    // ---
    let price = entry.avg_price * rng.gen_range(0.9..=1.1);
    let roll: f64 = rng.gen();
    let market_trend = if roll < 0.3 {
        "up"
    } else if roll < 0.6 {
        "down"
    } else {
        "stable"
    };

    CropPrice {
        crop: entry.crop.clone(),
        current_price_per_kg: round_to(price, 2),
        market_trend,
        last_updated: last_updated.to_string(),
    }
}

async fn prices_handler(State((recommender, _)): State<AppState>) -> Json<PricesResponse> {
    // ---
    let last_updated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut rng = rand::thread_rng();
    let prices = recommender
        .catalog()
        .crops()
        .iter()
        .map(|entry| price_quote(entry, &mut rng, &last_updated))
        .collect();

    Json(PricesResponse { prices })
}

#[derive(Debug, Serialize)]
struct CropInfo {
    crop: String,
    season: String,
    investment_per_ha: u32,
    expected_revenue_per_ha: f64,
    expected_profit_per_ha: f64,
    profit_margin: String,
    water_requirement: String,
    suitable_districts: Vec<String>,
    current_market_price: f64,
}

fn crop_info(requested: &str, entry: &CropReferenceEntry) -> CropInfo {
    // ---
    let revenue = ASSUMED_YIELD_KG_PER_HA * entry.avg_price;

    CropInfo {
        crop: requested.to_string(),
        season: entry.season.clone(),
        investment_per_ha: entry.investment_per_ha,
        expected_revenue_per_ha: revenue,
        expected_profit_per_ha: revenue * entry.profit_margin,
        profit_margin: format!("{:.1}%", entry.profit_margin * 100.0),
        water_requirement: entry.water_requirement.clone(),
        suitable_districts: entry.suitable_districts.clone(),
        current_market_price: entry.avg_price,
    }
}

async fn info_handler(
    Path(crop): Path<String>,
    State((recommender, _)): State<AppState>,
) -> Result<Json<CropInfo>, AppError> {
    // ---
    debug!("GET /crop-info/{}", crop);
    let entry = recommender
        .catalog()
        .crop(&crop.to_lowercase())
        .ok_or(AppError::NotFound("Crop not found"))?;

    Ok(Json(crop_info(&crop, entry)))
}

#[derive(Debug, Deserialize)]
struct InvestmentQuery {
    area_hectares: Option<f64>,
}

#[derive(Debug, Serialize, PartialEq)]
struct CostBreakdown {
    seeds: f64,
    fertilizers: f64,
    pesticides: f64,
    irrigation: f64,
    labor: f64,
    machinery: f64,
}

#[derive(Debug, Serialize)]
struct InvestmentAnalysis {
    crop: String,
    area_hectares: f64,
    total_investment: f64,
    cost_breakdown: CostBreakdown,
    expected_yield_kg: f64,
    expected_revenue: f64,
    expected_profit: f64,
    roi_percentage: f64,
    break_even_price_per_kg: f64,
    season: String,
    risk_level: &'static str,
}

fn investment_analysis(requested: &str, entry: &CropReferenceEntry, area: f64) -> InvestmentAnalysis {
    // ---
    let total_investment = f64::from(entry.investment_per_ha) * area;
    let total_yield = ASSUMED_YIELD_KG_PER_HA * area;
    let total_revenue = total_yield * entry.avg_price;
    let total_profit = total_revenue * entry.profit_margin;

    InvestmentAnalysis {
        crop: requested.to_string(),
        area_hectares: area,
        total_investment,
        cost_breakdown: CostBreakdown {
            seeds: total_investment * 0.15,
            fertilizers: total_investment * 0.25,
            pesticides: total_investment * 0.10,
            irrigation: total_investment * 0.20,
            labor: total_investment * 0.20,
            machinery: total_investment * 0.10,
        },
        expected_yield_kg: total_yield,
        expected_revenue: total_revenue,
        expected_profit: total_profit,
        roi_percentage: total_profit / total_investment * 100.0,
        break_even_price_per_kg: total_investment / total_yield,
        season: entry.season.clone(),
        risk_level: "Medium",
    }
}

async fn investment_handler(
    Path(crop): Path<String>,
    Query(params): Query<InvestmentQuery>,
    State((recommender, _)): State<AppState>,
) -> Result<Json<InvestmentAnalysis>, AppError> {
    // ---
    let area = params.area_hectares.unwrap_or(1.0);
    debug!("GET /investment-analysis/{} - area {} ha", crop, area);

    // Per-area ratios are undefined otherwise.
    if !(area.is_finite() && area > 0.0) {
        return Err(AppError::BadRequest("area_hectares must be a positive number"));
    }

    let entry = recommender
        .catalog()
        .crop(&crop.to_lowercase())
        .ok_or(AppError::NotFound("Crop not found"))?;

    Ok(Json(investment_analysis(&crop, entry, area)))
}
