//! Crop recommendation service for Jharkhand soil and climate samples.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): each exposes a
//! small surface, re-exported here so `routes/*.rs` and tests depend on the
//! crate root rather than on sibling internals.

pub mod advice;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod recommender;
pub mod reference;
pub mod routes;
pub mod scoring;

pub use classifier::{CropClassifier, TreeClassifier};
pub use config::Config;
pub use error::{AppError, ClassifierError, RecommendError};
pub use models::{CropRecommendationResult, SoilClimateSample};
pub use recommender::Recommender;
pub use reference::{CropCatalog, CropReferenceEntry, DistrictClimate};
pub use routes::{router, AppState};
