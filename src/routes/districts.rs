use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{AppError, AppState, CropCatalog};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/climate-data/{district}", get(climate_handler))
        .route("/districts", get(districts_handler))
}

#[derive(Debug, Serialize)]
struct ClimateResponse {
    district: String,
    average_temperature: f64,
    average_rainfall: f64,
    average_humidity: f64,
    suitable_crops: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DistrictsResponse {
    districts: Vec<String>,
    total_districts: usize,
}

/// `"east singhbhum"` -> `"East Singhbhum"`.
fn title_case(name: &str) -> String {
    // ---
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn climate_for(catalog: &CropCatalog, requested: &str) -> Option<ClimateResponse> {
    // ---
    let name = title_case(requested);
    let climate = catalog.district(&name)?;

    Some(ClimateResponse {
        average_temperature: climate.avg_temp,
        average_rainfall: climate.avg_rainfall,
        average_humidity: climate.avg_humidity,
        suitable_crops: catalog
            .crops_for_district(&name)
            .into_iter()
            .map(str::to_string)
            .collect(),
        district: name,
    })
}

async fn climate_handler(
    Path(district): Path<String>,
    State((recommender, _)): State<AppState>,
) -> Result<Json<ClimateResponse>, AppError> {
    // ---
    climate_for(recommender.catalog(), &district)
        .map(Json)
        .ok_or(AppError::NotFound("District not found"))
}

async fn districts_handler(State((recommender, _)): State<AppState>) -> Json<DistrictsResponse> {
    // ---
    let districts: Vec<String> = recommender
        .catalog()
        .districts()
        .iter()
        .map(|d| d.district.clone())
        .collect();

    Json(DistrictsResponse {
        total_districts: districts.len(),
        districts,
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_title_case() {
        // ---
        assert_eq!(title_case("ranchi"), "Ranchi");
        assert_eq!(title_case("PALAMU"), "Palamu");
        assert_eq!(title_case("east singhbhum"), "East Singhbhum");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_climate_for_lists_catalog_crops() {
        // ---
        let catalog = CropCatalog::jharkhand();
        let climate = climate_for(&catalog, "hazaribagh").unwrap();
        assert_eq!(climate.district, "Hazaribagh");
        assert_eq!(climate.average_temperature, 23.0);
        assert_eq!(climate.suitable_crops, vec!["maize", "sugarcane", "kidney_beans"]);
        assert!(climate_for(&catalog, "atlantis").is_none());
    }
}
