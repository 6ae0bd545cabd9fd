//! Crop classifiers.
//!
//! A trained model is optional. When the recommender has none it falls back
//! to [`rules::fallback_crop`], a fixed threshold table that always produces
//! a label.

use crate::error::ClassifierError;
use crate::models::FEATURE_COUNT;

pub mod rules;
pub mod tree;

pub use tree::TreeClassifier;

// ---

/// A trained multi-class crop classifier.
///
/// Features arrive in [`crate::models::FEATURE_ORDER`]. Implementations are
/// shared across concurrent requests and must not mutate themselves.
pub trait CropClassifier: Send + Sync {
    // ---
    /// Predict a crop label.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<String, ClassifierError>;

    /// Per-class probabilities, aligned with [`CropClassifier::classes`].
    ///
    /// Models without probability output keep the default, which reports
    /// [`ClassifierError::ProbabilityUnsupported`].
    fn predict_probabilities(
        &self,
        _features: &[f64; FEATURE_COUNT],
    ) -> Result<Vec<f64>, ClassifierError> {
        Err(ClassifierError::ProbabilityUnsupported)
    }

    /// Labels the model can emit. A probability vector of any other length
    /// is ignored.
    fn classes(&self) -> &[String];

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// Where a label and its confidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    /// Trained model, confidence from its highest class probability.
    Model,
    /// Trained model without probability output; fixed confidence.
    ModelWithoutProbabilities,
    /// No model loaded; threshold rules.
    RuleFallback,
}

/// A label with the confidence attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPrediction {
    pub label: String,
    pub confidence: f64,
    pub source: PredictionSource,
}
