//! Tree-ensemble classifier loaded from a JSON artifact.
//!
//! The artifact carries sklearn-style parallel node arrays per tree:
//!
//! ```text
//! {
//!   "kind": "random_forest",
//!   "classes": ["rice", "wheat", ...],
//!   "features": ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"],
//!   "trees": [
//!     { "feature": [4, -2, -2], "threshold": [80.0, 0.0, 0.0],
//!       "left": [1, -1, -1], "right": [2, -1, -1], "class": [null, 1, 0] }
//!   ]
//! }
//! ```
//!
//! A negative `feature` marks a leaf. Samples with `x[feature] <= threshold`
//! go left. Only inference lives here; training happens offline.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::CropClassifier;
use crate::error::ClassifierError;
use crate::models::{FEATURE_COUNT, FEATURE_ORDER};

// ---

/// How the artifact was trained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Single tree; no probability output.
    DecisionTree,
    /// Voting ensemble; vote fractions serve as probabilities.
    RandomForest,
}

#[derive(Debug, Deserialize)]
struct TreeArrays {
    feature: Vec<i32>,
    threshold: Vec<f64>,
    left: Vec<i32>,
    right: Vec<i32>,
    class: Vec<Option<usize>>,
}

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    kind: ModelKind,
    classes: Vec<String>,
    features: Vec<String>,
    trees: Vec<TreeArrays>,
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(Option<usize>),
}

/// One validated tree. Child indices always point forward, so traversal
/// terminates.
#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    // ---
    fn from_arrays(arrays: TreeArrays, n_classes: usize) -> Result<Self, String> {
        // ---
        let n = arrays.feature.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        if arrays.threshold.len() != n
            || arrays.left.len() != n
            || arrays.right.len() != n
            || arrays.class.len() != n
        {
            return Err("inconsistent node array lengths".into());
        }

        let child = |parent: usize, raw: i32| -> Result<usize, String> {
            match usize::try_from(raw) {
                Ok(idx) if idx > parent && idx < n => Ok(idx),
                _ => Err(format!("node {parent} has invalid child index {raw}")),
            }
        };

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let node = match usize::try_from(arrays.feature[i]) {
                Err(_) => match arrays.class[i] {
                    Some(c) if c >= n_classes => {
                        return Err(format!("leaf {i} predicts unknown class {c}"))
                    }
                    class => Node::Leaf(class),
                },
                Ok(feature) if feature >= FEATURE_COUNT => {
                    return Err(format!("node {i} splits on unknown feature {feature}"))
                }
                Ok(feature) => Node::Split {
                    feature,
                    threshold: arrays.threshold[i],
                    left: child(i, arrays.left[i])?,
                    right: child(i, arrays.right[i])?,
                },
            };
            nodes.push(node);
        }

        Ok(Self { nodes })
    }

    /// Class index at the leaf this sample lands on, if the leaf has one.
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Option<usize> {
        // ---
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(class) => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Decision tree or random forest over the seven soil/climate features.
#[derive(Debug, Clone)]
pub struct TreeClassifier {
    kind: ModelKind,
    classes: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl TreeClassifier {
    // ---
    /// Load and validate an artifact from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate an artifact.
    ///
    /// Rejects artifacts whose feature list differs from [`FEATURE_ORDER`],
    /// whose trees are malformed, or whose kind and tree count disagree.
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        // ---
        let artifact: ModelArtifact = serde_json::from_str(json)?;

        if artifact.features != FEATURE_ORDER {
            return Err(ClassifierError::FeatureMismatch {
                expected: FEATURE_ORDER.iter().map(|f| f.to_string()).collect(),
                found: artifact.features,
            });
        }
        if artifact.classes.is_empty() {
            return Err(ClassifierError::InvalidArtifact("no classes".into()));
        }
        match (artifact.kind, artifact.trees.len()) {
            (_, 0) => return Err(ClassifierError::InvalidArtifact("no trees".into())),
            (ModelKind::DecisionTree, n) if n > 1 => {
                return Err(ClassifierError::InvalidArtifact(format!(
                    "decision_tree artifact has {n} trees"
                )))
            }
            _ => {}
        }

        let n_classes = artifact.classes.len();
        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                DecisionTree::from_arrays(t, n_classes)
                    .map_err(|e| ClassifierError::InvalidArtifact(format!("tree {i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind: artifact.kind,
            classes: artifact.classes,
            trees,
        })
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Vote count per class. Trees landing on a class-less leaf abstain.
    fn votes(&self, features: &[f64; FEATURE_COUNT]) -> Vec<usize> {
        // ---
        let mut votes = vec![0usize; self.classes.len()];
        for class in self.trees.iter().filter_map(|t| t.predict(features)) {
            votes[class] += 1;
        }
        votes
    }
}

impl CropClassifier for TreeClassifier {
    // ---
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<String, ClassifierError> {
        // ---
        let votes = self.votes(features);

        // Ties go to the lowest class index.
        let mut best: Option<(usize, usize)> = None;
        for (class, &count) in votes.iter().enumerate() {
            if count > 0 && best.map_or(true, |(_, top)| count > top) {
                best = Some((class, count));
            }
        }

        best.map(|(class, _)| self.classes[class].clone())
            .ok_or_else(|| ClassifierError::Prediction("no tree reached a labelled leaf".into()))
    }

    fn predict_probabilities(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<Vec<f64>, ClassifierError> {
        // ---
        if self.kind == ModelKind::DecisionTree {
            return Err(ClassifierError::ProbabilityUnsupported);
        }

        let total = self.trees.len() as f64;
        Ok(self
            .votes(features)
            .into_iter()
            .map(|v| v as f64 / total)
            .collect())
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn name(&self) -> &str {
        match self.kind {
            ModelKind::DecisionTree => "decision_tree",
            ModelKind::RandomForest => "random_forest",
        }
    }
}
