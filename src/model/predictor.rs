use std::path::Path;

use super::artifact::{ArtifactError, ModelArtifact, TreeNodes};

// ---------------------------------------------------------------------------
// Predictor – the in-memory trained model
// ---------------------------------------------------------------------------

/// A pre-trained regression ensemble, ready for inference.
///
/// Built from a validated [`ModelArtifact`]; immutable for the rest of the
/// process. Prediction is the base score plus the sum of one leaf value per
/// tree.
#[derive(Debug)]
pub struct Predictor {
    num_features: usize,
    feature_names: Vec<String>,
    base_score: f64,
    trees: Vec<TreeNodes>,
}

/// Error type for prediction requests.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("expected {expected} features per row, got {got}")]
    FeatureWidth { expected: usize, got: usize },
}

impl Predictor {
    /// Validate an artifact and take ownership of its ensemble.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        artifact.validate()?;
        Ok(Predictor {
            num_features: artifact.num_features,
            feature_names: artifact.feature_names,
            base_score: artifact.base_score,
            trees: artifact.trees,
        })
    }

    /// Read, parse, and validate the artifact at `path`.
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let text = std::fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&text)?;
        Self::from_artifact(artifact)
    }

    /// Feature width every scored row must match.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Training-time feature names in column order; empty when the artifact
    /// carried none.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of trees in the ensemble.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Score a single feature row.
    pub fn predict_row(&self, row: &[f64]) -> Result<f64, PredictError> {
        if row.len() != self.num_features {
            return Err(PredictError::FeatureWidth {
                expected: self.num_features,
                got: row.len(),
            });
        }
        let sum: f64 = self.trees.iter().map(|tree| score_tree(tree, row)).sum();
        Ok(self.base_score + sum)
    }

    /// Score every row, one prediction each. A single bad row fails the
    /// whole call; no partial output.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Walk one tree from the root down to a leaf.
///
/// Rule: `row[feature] < threshold` goes left, otherwise right. NaN compares
/// false and therefore falls through to the right child. Child indices were
/// bounds-checked at load time.
fn score_tree(tree: &TreeNodes, row: &[f64]) -> f64 {
    let mut node = 0usize;
    loop {
        let feature = tree.feature[node];
        if feature < 0 {
            return tree.value[node];
        }
        node = if row[feature as usize] < tree.threshold[node] {
            tree.left[node] as usize
        } else {
            tree.right[node] as usize
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Two features, two trees:
    /// * tree 0 splits on feature 0 at 2.0 → leaves -1.0 / 1.0
    /// * tree 1 splits on feature 1 at 10.0 → leaves 0.25 / 0.75
    /// base_score 0.5
    fn predictor() -> Predictor {
        let artifact = ModelArtifact {
            version: 1,
            num_features: 2,
            feature_names: vec!["size".into(), "weight".into()],
            base_score: 0.5,
            trees: vec![
                TreeNodes {
                    feature: vec![0, -1, -1],
                    threshold: vec![2.0, 0.0, 0.0],
                    left: vec![1, 0, 0],
                    right: vec![2, 0, 0],
                    value: vec![0.0, -1.0, 1.0],
                },
                TreeNodes {
                    feature: vec![1, -1, -1],
                    threshold: vec![10.0, 0.0, 0.0],
                    left: vec![1, 0, 0],
                    right: vec![2, 0, 0],
                    value: vec![0.0, 0.25, 0.75],
                },
            ],
        };
        Predictor::from_artifact(artifact).unwrap()
    }

    #[test]
    fn sums_leaves_and_base_score() {
        let p = predictor();
        // 0.5 + (-1.0) + 0.25
        assert_eq!(p.predict_row(&[1.0, 5.0]).unwrap(), -0.25);
        // 0.5 + 1.0 + 0.75
        assert_eq!(p.predict_row(&[3.0, 12.0]).unwrap(), 2.25);
    }

    #[test]
    fn threshold_boundary_goes_right() {
        let p = predictor();
        // feature 0 == threshold → right leaf (1.0)
        assert_eq!(p.predict_row(&[2.0, 0.0]).unwrap(), 0.5 + 1.0 + 0.25);
    }

    #[test]
    fn batch_yields_one_prediction_per_row() {
        let p = predictor();
        let rows = vec![vec![1.0, 5.0], vec![3.0, 12.0], vec![0.0, 0.0]];
        let out = p.predict(&rows).unwrap();
        assert_eq!(out.len(), rows.len());
        assert_eq!(out[0], -0.25);
        assert_eq!(out[1], 2.25);
    }

    #[test]
    fn wrong_width_is_rejected() {
        let p = predictor();
        assert!(matches!(
            p.predict_row(&[1.0]),
            Err(PredictError::FeatureWidth { expected: 2, got: 1 })
        ));
        assert!(matches!(
            p.predict(&[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]),
            Err(PredictError::FeatureWidth { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn exposes_trained_feature_contract() {
        let p = predictor();
        assert_eq!(p.num_features(), 2);
        assert_eq!(p.feature_names(), ["size", "weight"]);
    }

    #[test]
    fn invalid_artifact_does_not_build() {
        let artifact = ModelArtifact {
            version: 1,
            num_features: 1,
            feature_names: vec![],
            base_score: 0.0,
            trees: vec![TreeNodes {
                feature: vec![3, -1, -1],
                threshold: vec![1.0, 0.0, 0.0],
                left: vec![1, 0, 0],
                right: vec![2, 0, 0],
                value: vec![0.0, 0.0, 0.0],
            }],
        };
        assert!(Predictor::from_artifact(artifact).is_err());
    }
}
