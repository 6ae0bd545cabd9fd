//! Static crop economics and district climate tables for Jharkhand.
//!
//! Built once at startup and shared read-only by the recommender and the
//! informational routes.

use serde::Serialize;

// ---

/// Per-crop agronomic and economic metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropReferenceEntry {
    // ---
    pub crop: String,
    pub season: String,
    pub water_requirement: String,
    /// Rupees per hectare.
    pub investment_per_ha: u32,
    /// Fraction of revenue kept as profit.
    pub profit_margin: f64,
    pub suitable_districts: Vec<String>,
    /// Rupees per kg.
    pub avg_price: f64,
}

/// Average climate of one district.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictClimate {
    // ---
    pub district: String,
    pub avg_temp: f64,
    pub avg_rainfall: f64,
    pub avg_humidity: f64,
}

/// Read-only lookup over crop and district data.
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    crops: Vec<CropReferenceEntry>,
    districts: Vec<DistrictClimate>,
}

fn entry(
    name: &str,
    avg_price: f64,
    season: &str,
    investment_per_ha: u32,
    profit_margin: f64,
    water_requirement: &str,
    districts: &[&str],
) -> CropReferenceEntry {
    // ---
    CropReferenceEntry {
        crop: name.to_string(),
        season: season.to_string(),
        water_requirement: water_requirement.to_string(),
        investment_per_ha,
        profit_margin,
        suitable_districts: districts.iter().map(|d| d.to_string()).collect(),
        avg_price,
    }
}

fn district(name: &str, avg_temp: f64, avg_rainfall: f64, avg_humidity: f64) -> DistrictClimate {
    DistrictClimate {
        district: name.to_string(),
        avg_temp,
        avg_rainfall,
        avg_humidity,
    }
}

impl CropCatalog {
    // ---
    pub fn new(crops: Vec<CropReferenceEntry>, districts: Vec<DistrictClimate>) -> Self {
        Self { crops, districts }
    }

    /// The Jharkhand tables served in production.
    pub fn jharkhand() -> Self {
        // ---
        #[rustfmt::skip]
        let crops = vec![
            entry("rice", 25.0, "Kharif", 35000, 0.3, "High",
                  &["Ranchi", "Dhanbad", "Jamshedpur", "Bokaro"]),
            entry("wheat", 22.0, "Rabi", 28000, 0.25, "Medium",
                  &["Palamu", "Garhwa", "Latehar"]),
            entry("maize", 18.0, "Kharif/Rabi", 25000, 0.35, "Medium",
                  &["Ranchi", "Hazaribagh", "Koderma"]),
            entry("cotton", 45.0, "Kharif", 40000, 0.4, "Medium",
                  &["Palamu", "Garhwa"]),
            entry("sugarcane", 3.5, "Annual", 60000, 0.45, "High",
                  &["Ranchi", "Hazaribagh"]),
            entry("chickpea", 55.0, "Rabi", 20000, 0.5, "Low",
                  &["Palamu", "Garhwa", "Latehar"]),
            entry("kidney_beans", 80.0, "Rabi", 22000, 0.6, "Medium",
                  &["Ranchi", "Hazaribagh"]),
            entry("banana", 15.0, "Annual", 45000, 0.4, "High",
                  &["Ranchi", "Dhanbad"]),
        ];

        let districts = vec![
            district("Ranchi", 24.0, 1200.0, 70.0),
            district("Dhanbad", 26.0, 1100.0, 68.0),
            district("Jamshedpur", 27.0, 1300.0, 72.0),
            district("Bokaro", 25.0, 1150.0, 69.0),
            district("Hazaribagh", 23.0, 1000.0, 65.0),
            district("Palamu", 25.0, 900.0, 62.0),
            district("Garhwa", 24.0, 950.0, 63.0),
            district("Koderma", 24.0, 1050.0, 67.0),
        ];

        Self::new(crops, districts)
    }

    /// Exact-match lookup by crop label.
    pub fn crop(&self, label: &str) -> Option<&CropReferenceEntry> {
        self.crops.iter().find(|c| c.crop == label)
    }

    pub fn crops(&self) -> &[CropReferenceEntry] {
        &self.crops
    }

    pub fn district(&self, name: &str) -> Option<&DistrictClimate> {
        self.districts.iter().find(|d| d.district == name)
    }

    pub fn districts(&self) -> &[DistrictClimate] {
        &self.districts
    }

    /// Crops whose reference entry lists `district` as suitable, in table order.
    pub fn crops_for_district(&self, district: &str) -> Vec<&str> {
        // ---
        self.crops
            .iter()
            .filter(|c| c.suitable_districts.iter().any(|d| d == district))
            .map(|c| c.crop.as_str())
            .collect()
    }
}
