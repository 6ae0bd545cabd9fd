//! Recommendation pipeline: classify, score, advise.
//!
//! The [`Recommender`] owns read-only handles to the optional classifier and
//! the reference catalog. It holds no mutable state, so one instance serves
//! concurrent requests behind an `Arc`.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::advice::generate_advice;
use crate::classifier::rules::{fallback_crop, FALLBACK_CONFIDENCE};
use crate::classifier::{CropClassifier, LabelPrediction, PredictionSource};
use crate::error::{ClassifierError, RecommendError};
use crate::models::{round_to, CropRecommendationResult, SoilClimateSample};
use crate::reference::CropCatalog;
use crate::scoring::{estimate_yield, sustainability_score};

// ---

/// Confidence used when the model cannot report class probabilities.
pub const MODEL_DEFAULT_CONFIDENCE: f64 = 0.85;

/// Single entry point for crop recommendations.
#[derive(Clone)]
pub struct Recommender {
    // ---
    classifier: Option<Arc<dyn CropClassifier>>,
    catalog: Arc<CropCatalog>,
    /// When set, every request draws its yield variance from a generator
    /// seeded with this value.
    yield_seed: Option<u64>,
}

impl Recommender {
    // ---
    /// Recommender with no trained model; labels come from the threshold rules.
    pub fn new(catalog: Arc<CropCatalog>) -> Self {
        Self {
            classifier: None,
            catalog,
            yield_seed: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn CropClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_yield_seed(mut self, seed: Option<u64>) -> Self {
        self.yield_seed = seed;
        self
    }

    pub fn has_model(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Recommend a crop, drawing yield variance from the configured source.
    pub fn recommend(
        &self,
        sample: &SoilClimateSample,
    ) -> Result<CropRecommendationResult, RecommendError> {
        // ---
        match self.yield_seed {
            Some(seed) => self.recommend_with_rng(sample, &mut StdRng::seed_from_u64(seed)),
            None => self.recommend_with_rng(sample, &mut rand::thread_rng()),
        }
    }

    /// Recommend a crop using the caller's random generator for yield variance.
    ///
    /// Either the whole result is produced or a single
    /// [`RecommendError::Computation`] is returned.
    pub fn recommend_with_rng<R: Rng>(
        &self,
        sample: &SoilClimateSample,
        rng: &mut R,
    ) -> Result<CropRecommendationResult, RecommendError> {
        // ---
        let prediction = self.predict_label(sample)?;
        debug!(
            "Predicted {} (confidence {:.3}) via {:?}",
            prediction.label, prediction.confidence, prediction.source
        );

        let predicted_yield = estimate_yield(sample, &prediction.label, rng);
        if !predicted_yield.is_finite() {
            return Err(RecommendError::computation(
                "yield estimate",
                format!("non-finite result {predicted_yield}"),
            ));
        }

        let sustainability = sustainability_score(sample);
        if !sustainability.is_finite() {
            return Err(RecommendError::computation(
                "sustainability score",
                format!("non-finite result {sustainability}"),
            ));
        }

        let recommendations = generate_advice(&prediction.label, sample, &self.catalog);

        Ok(CropRecommendationResult {
            crop: prediction.label,
            predicted_yield_kg_per_ha: predicted_yield,
            sustainability_score: sustainability,
            confidence: round_to(prediction.confidence, 3),
            recommendations,
        })
    }

    /// Label and confidence from the model if one is loaded, else from the rules.
    pub fn predict_label(&self, sample: &SoilClimateSample) -> Result<LabelPrediction, RecommendError> {
        // ---
        let Some(classifier) = &self.classifier else {
            return Ok(LabelPrediction {
                label: fallback_crop(sample).to_string(),
                confidence: FALLBACK_CONFIDENCE,
                source: PredictionSource::RuleFallback,
            });
        };

        let features = sample.to_features();
        let label = classifier
            .predict(&features)
            .map_err(|e| RecommendError::computation("classification", e))?;

        let n_classes = classifier.classes().len();
        let prediction = match classifier.predict_probabilities(&features) {
            Ok(probabilities) => match max_probability(&probabilities, n_classes) {
                Some(confidence) => LabelPrediction {
                    label,
                    confidence,
                    source: PredictionSource::Model,
                },
                None => {
                    warn!(
                        "{} returned no usable probabilities, using default confidence",
                        classifier.name()
                    );
                    without_probabilities(label)
                }
            },
            Err(ClassifierError::ProbabilityUnsupported) => {
                warn!(
                    "{} does not provide probabilities, using default confidence",
                    classifier.name()
                );
                without_probabilities(label)
            }
            Err(e) => {
                warn!(
                    "Could not get probabilities from {}: {}",
                    classifier.name(),
                    e
                );
                without_probabilities(label)
            }
        };

        Ok(prediction)
    }
}

fn without_probabilities(label: String) -> LabelPrediction {
    LabelPrediction {
        label,
        confidence: MODEL_DEFAULT_CONFIDENCE,
        source: PredictionSource::ModelWithoutProbabilities,
    }
}

/// Highest probability of a well-formed distribution: one entry per class,
/// each inside [0, 1]. Anything else is unusable.
fn max_probability(probabilities: &[f64], n_classes: usize) -> Option<f64> {
    // ---
    if probabilities.len() != n_classes
        || probabilities.iter().any(|p| !(0.0..=1.0).contains(p))
    {
        return None;
    }
    probabilities.iter().copied().reduce(f64::max)
}
