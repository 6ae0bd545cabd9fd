//! Yield and sustainability estimates.
//!
//! Both outputs are clamped into fixed display ranges whatever the inputs,
//! so a negative rainfall or a pH of 20 still yields a plausible number.

use rand::Rng;

use crate::models::{round_to, SoilClimateSample};

// ---

/// Lower and upper yield bounds, kg/ha.
pub const YIELD_MIN: f64 = 500.0;
pub const YIELD_MAX: f64 = 8000.0;

/// Sustainability score bounds.
pub const SUSTAINABILITY_MIN: f64 = 1.0;
pub const SUSTAINABILITY_MAX: f64 = 10.0;

/// Range of the random variance factor applied to yield.
pub const VARIANCE_LOW: f64 = 0.8;
pub const VARIANCE_HIGH: f64 = 1.2;

/// Yield multiplier per crop. Unlisted crops use 1.0.
pub fn yield_multiplier(crop: &str) -> f64 {
    // ---
    match crop {
        "rice" => 1.2,
        "wheat" => 1.0,
        "maize" => 1.3,
        "cotton" => 0.8,
        "sugarcane" => 2.5,
        "chickpea" => 0.7,
        "kidney_beans" => 0.6,
        "banana" => 1.1,
        _ => 1.0,
    }
}

/// Yield for a fixed variance factor, clamped and rounded to 2 places.
///
/// `(N + P + K) / 10 * humidity / 100 * multiplier * variance`
pub fn yield_with_variance(sample: &SoilClimateSample, crop: &str, variance: f64) -> f64 {
    // ---
    let base = sample.npk_total() / 10.0 * (sample.humidity / 100.0);
    let raw = base * yield_multiplier(crop) * variance;
    round_to(raw.clamp(YIELD_MIN, YIELD_MAX), 2)
}

/// Yield with a variance factor drawn uniformly from [0.8, 1.2].
///
/// The generator is the caller's, so a seeded `StdRng` makes this
/// reproducible.
pub fn estimate_yield<R: Rng>(sample: &SoilClimateSample, crop: &str, rng: &mut R) -> f64 {
    // ---
    let variance = rng.gen_range(VARIANCE_LOW..=VARIANCE_HIGH);
    yield_with_variance(sample, crop, variance)
}

/// Component scores behind [`sustainability_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SustainabilityBreakdown {
    pub water: f64,
    pub fertilizer: f64,
    pub ph: f64,
}

impl SustainabilityBreakdown {
    // ---
    pub fn from_sample(sample: &SoilClimateSample) -> Self {
        Self {
            water: floor_at_zero(10.0 - sample.rainfall / 200.0),
            fertilizer: floor_at_zero(10.0 - sample.nitrogen / 100.0),
            ph: ph_score(sample.ph),
        }
    }

    pub fn mean(&self) -> f64 {
        (self.water + self.fertilizer + self.ph) / 3.0
    }
}

/// 10 inside [6.0, 7.5], otherwise losing 2 points per unit away from 6.75.
pub fn ph_score(ph: f64) -> f64 {
    // ---
    if (6.0..=7.5).contains(&ph) {
        10.0
    } else {
        floor_at_zero(10.0 - (ph - 6.75).abs() * 2.0)
    }
}

/// Like `max(0.0)`, but a NaN stays NaN so the caller can reject it.
fn floor_at_zero(score: f64) -> f64 {
    if score < 0.0 {
        0.0
    } else {
        score
    }
}

/// Mean of the water, fertilizer and pH scores, clamped to [1, 10] and
/// rounded to 2 places. NaN inputs give NaN.
pub fn sustainability_score(sample: &SoilClimateSample) -> f64 {
    // ---
    let mean = SustainabilityBreakdown::from_sample(sample).mean();
    round_to(mean.clamp(SUSTAINABILITY_MIN, SUSTAINABILITY_MAX), 2)
}
