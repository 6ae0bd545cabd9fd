//! Request and response models for the recommendation pipeline.

use serde::{Deserialize, Serialize};

// ---

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 7;

/// Feature names in the order the classifier was trained on.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Soil and climate measurements for one field.
///
/// Values are taken as given. Nothing here rejects a negative rainfall or a
/// pH of 15; the scoring formulas clamp what they emit instead.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SoilClimateSample {
    // ---
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    pub ph: f64,
    /// Millimetres.
    pub rainfall: f64,
}

impl SoilClimateSample {
    // ---
    /// Map the sample onto the classifier's feature vector (see [`FEATURE_ORDER`]).
    pub fn to_features(&self) -> [f64; FEATURE_COUNT] {
        // ---
        [
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Sum of the three macronutrients.
    pub fn npk_total(&self) -> f64 {
        self.nitrogen + self.phosphorus + self.potassium
    }
}

/// Outcome of one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendationResult {
    // ---
    pub crop: String,
    /// kg/ha, always within [500, 8000].
    pub predicted_yield_kg_per_ha: f64,
    /// Always within [1, 10].
    pub sustainability_score: f64,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}

/// Round to a fixed number of decimal places for presentation.
pub fn round_to(value: f64, places: i32) -> f64 {
    // ---
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
