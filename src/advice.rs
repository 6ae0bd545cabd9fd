//! Advisory text attached to each recommendation.
//!
//! Crop-specific lines come from the reference catalog and are skipped when
//! the crop has no entry. Soil lines depend only on the sample.

use crate::models::SoilClimateSample;
use crate::reference::{CropCatalog, CropReferenceEntry};

// ---

pub const LIME_ADVICE: &str = "Consider adding lime to increase soil pH";
pub const ORGANIC_MATTER_ADVICE: &str = "Consider adding organic matter to reduce soil pH";
pub const NITROGEN_ADVICE: &str = "Consider nitrogen-rich fertilizers or organic compost";

/// Below this pH the soil is treated as too acidic.
pub const ACIDIC_PH: f64 = 6.0;
/// Above this pH the soil is treated as too alkaline.
pub const ALKALINE_PH: f64 = 7.5;
/// Below this nitrogen level a fertilizer hint is added.
pub const LOW_NITROGEN: f64 = 40.0;

/// Build the ordered advice list for `crop` grown on `sample`.
pub fn generate_advice(crop: &str, sample: &SoilClimateSample, catalog: &CropCatalog) -> Vec<String> {
    // ---
    let mut advice = catalog
        .crop(crop)
        .map(|entry| crop_advice(crop, entry))
        .unwrap_or_default();

    // At most one of the two pH hints.
    if sample.ph < ACIDIC_PH {
        advice.push(LIME_ADVICE.to_string());
    } else if sample.ph > ALKALINE_PH {
        advice.push(ORGANIC_MATTER_ADVICE.to_string());
    }

    if sample.nitrogen < LOW_NITROGEN {
        advice.push(NITROGEN_ADVICE.to_string());
    }

    advice
}

fn crop_advice(crop: &str, entry: &CropReferenceEntry) -> Vec<String> {
    // ---
    let mut lines = vec![
        format!("Best season for {}: {}", crop, entry.season),
        format!("Water requirement: {}", entry.water_requirement),
        format!(
            "Expected investment: ₹{} per hectare",
            group_thousands(entry.investment_per_ha)
        ),
    ];

    if !entry.suitable_districts.is_empty() {
        lines.push(format!(
            "Suitable districts: {}",
            entry.suitable_districts.join(", ")
        ));
    }

    lines
}

/// `35000` -> `"35,000"`.
pub fn group_thousands(value: u32) -> String {
    // ---
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn sample(n: f64, ph: f64) -> SoilClimateSample {
        // ---
        SoilClimateSample {
            nitrogen: n,
            phosphorus: 40.0,
            potassium: 40.0,
            temperature: 25.0,
            humidity: 70.0,
            ph,
            rainfall: 120.0,
        }
    }

    #[test]
    fn test_group_thousands() {
        // ---
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(35000), "35,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_known_crop_neutral_soil() {
        // ---
        let catalog = CropCatalog::jharkhand();
        let advice = generate_advice("rice", &sample(90.0, 6.5), &catalog);
        assert_eq!(
            advice,
            vec![
                "Best season for rice: Kharif",
                "Water requirement: High",
                "Expected investment: ₹35,000 per hectare",
                "Suitable districts: Ranchi, Dhanbad, Jamshedpur, Bokaro",
            ]
        );
    }

    #[test]
    fn test_soil_advice_order() {
        // ---
        let catalog = CropCatalog::jharkhand();
        let advice = generate_advice("wheat", &sample(20.0, 5.2), &catalog);
        assert_eq!(advice.len(), 6);
        assert_eq!(advice[4], LIME_ADVICE);
        assert_eq!(advice[5], NITROGEN_ADVICE);
    }

    #[test]
    fn test_ph_advice_mutually_exclusive() {
        // ---
        let catalog = CropCatalog::jharkhand();
        for ph in [0.0, 3.5, 5.99, 6.0, 6.75, 7.5, 7.51, 9.0, 14.0] {
            let advice = generate_advice("maize", &sample(90.0, ph), &catalog);
            let lime = advice.iter().any(|a| a == LIME_ADVICE);
            let organic = advice.iter().any(|a| a == ORGANIC_MATTER_ADVICE);
            assert!(!(lime && organic), "both pH hints for ph={ph}");
            assert_eq!(lime, ph < 6.0);
            assert_eq!(organic, ph > 7.5);
        }
    }

    #[test]
    fn test_unknown_crop_keeps_soil_advice() {
        // ---
        let catalog = CropCatalog::jharkhand();
        let advice = generate_advice("coconut", &sample(10.0, 8.2), &catalog);
        assert_eq!(advice, vec![ORGANIC_MATTER_ADVICE, NITROGEN_ADVICE]);
    }

    #[test]
    fn test_unknown_crop_good_soil_is_empty() {
        // ---
        let catalog = CropCatalog::jharkhand();
        assert!(generate_advice("coconut", &sample(90.0, 6.5), &catalog).is_empty());
    }

    #[test]
    fn test_empty_district_list_is_skipped() {
        // ---
        let entry = CropReferenceEntry {
            crop: "millet".to_string(),
            season: "Kharif".to_string(),
            water_requirement: "Low".to_string(),
            investment_per_ha: 15000,
            profit_margin: 0.3,
            suitable_districts: vec![],
            avg_price: 30.0,
        };
        let catalog = CropCatalog::new(vec![entry], vec![]);
        let advice = generate_advice("millet", &sample(90.0, 6.5), &catalog);
        assert_eq!(advice.len(), 3);
        assert!(advice.iter().all(|a| !a.starts_with("Suitable districts")));
    }
}
