//! Threshold rules used when no trained classifier is loaded.
//!
//! Rules are checked top to bottom and the first match wins, so a later rule
//! never sees a sample an earlier rule accepted. Input that matches nothing
//! gets [`DEFAULT_CROP`].

use crate::models::SoilClimateSample;

// ---

/// Confidence reported for a rule-based label.
pub const FALLBACK_CONFIDENCE: f64 = 0.75;

/// Label returned when no rule matches.
pub const DEFAULT_CROP: &str = "maize";

type Rule = (fn(&SoilClimateSample) -> bool, &'static str);

const RULES: [Rule; 8] = [
    (|s| s.rainfall > 200.0 && s.humidity > 80.0, "rice"),
    (|s| s.temperature < 25.0 && s.rainfall < 100.0, "wheat"),
    (|s| s.nitrogen > 80.0 && s.phosphorus > 40.0, "maize"),
    (|s| s.rainfall < 80.0 && s.temperature > 25.0, "cotton"),
    (|s| s.humidity > 75.0 && s.temperature > 26.0, "sugarcane"),
    (|s| s.phosphorus > 60.0 && s.rainfall < 150.0, "chickpea"),
    (|s| s.ph > 6.0 && s.ph < 7.0 && s.rainfall > 60.0, "kidney_beans"),
    // Unreachable: the sugarcane rule tests the same condition.
    (|s| s.temperature > 26.0 && s.humidity > 75.0, "banana"),
];

/// Pick a crop from the threshold table. Total and deterministic.
pub fn fallback_crop(sample: &SoilClimateSample) -> &'static str {
    // ---
    RULES
        .iter()
        .find(|(matches, _)| matches(sample))
        .map_or(DEFAULT_CROP, |&(_, crop)| crop)
}
