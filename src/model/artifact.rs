use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Artifact schema
// ---------------------------------------------------------------------------

/// The on-disk model artifact, as written by the training pipeline.
///
/// JSON layout:
/// ```json
/// {
///   "version": 1,
///   "num_features": 3,
///   "feature_names": ["age", "mileage", "horsepower"],
///   "base_score": 0.5,
///   "trees": [
///     {
///       "feature":   [0, -1, -1],
///       "threshold": [2.5, 0.0, 0.0],
///       "left":      [1, 0, 0],
///       "right":     [2, 0, 0],
///       "value":     [0.0, -1.2, 3.4]
///     }
///   ]
/// }
/// ```
///
/// Trees store their nodes as parallel arrays indexed by node id, root at 0.
/// `feature == -1` marks a leaf whose prediction is `value[node]`; on inner
/// nodes `value` is unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Artifact format version.
    pub version: u32,

    /// Feature width every scored row must match.
    pub num_features: usize,

    /// Training-time feature names, in column order. May be empty when the
    /// pipeline did not record them.
    #[serde(default)]
    pub feature_names: Vec<String>,

    /// Constant added to every prediction.
    #[serde(default)]
    pub base_score: f64,

    /// The ensemble, one entry per tree.
    pub trees: Vec<TreeNodes>,
}

/// Node arrays for a single tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodes {
    /// Split feature index per node; -1 for leaves.
    pub feature: Vec<i32>,
    /// Split threshold per node (unused on leaves).
    pub threshold: Vec<f64>,
    /// Left child index per node (unused on leaves).
    pub left: Vec<u32>,
    /// Right child index per node (unused on leaves).
    pub right: Vec<u32>,
    /// Leaf value per node (unused on inner nodes).
    pub value: Vec<f64>,
}

impl TreeNodes {
    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.feature.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.feature.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for reading and validating the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("reading model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artifact declares {names} feature names for {features} features")]
    FeatureNameCount { names: usize, features: usize },

    #[error("tree {0} has no nodes")]
    EmptyTree(usize),

    #[error("tree {tree}: node arrays have inconsistent lengths")]
    RaggedTree { tree: usize },

    #[error("tree {tree}, node {node}: child {child} out of range ({num_nodes} nodes)")]
    InvalidChild {
        tree: usize,
        node: usize,
        child: u32,
        num_nodes: usize,
    },

    #[error(
        "tree {tree}, node {node}: split feature {feature} out of range ({num_features} features)"
    )]
    InvalidSplitFeature {
        tree: usize,
        node: usize,
        feature: i32,
        num_features: usize,
    },
}

// ---------------------------------------------------------------------------
// Structural validation
// ---------------------------------------------------------------------------

impl ModelArtifact {
    /// Check the invariants the predictor relies on, so traversal can index
    /// the node arrays without bounds checks failing mid-prediction.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if !self.feature_names.is_empty() && self.feature_names.len() != self.num_features {
            return Err(ArtifactError::FeatureNameCount {
                names: self.feature_names.len(),
                features: self.num_features,
            });
        }

        for (tree_idx, tree) in self.trees.iter().enumerate() {
            let num_nodes = tree.len();
            if num_nodes == 0 {
                return Err(ArtifactError::EmptyTree(tree_idx));
            }
            if tree.threshold.len() != num_nodes
                || tree.left.len() != num_nodes
                || tree.right.len() != num_nodes
                || tree.value.len() != num_nodes
            {
                return Err(ArtifactError::RaggedTree { tree: tree_idx });
            }

            for node in 0..num_nodes {
                let feature = tree.feature[node];
                if feature < 0 {
                    continue; // leaf
                }
                if feature as usize >= self.num_features {
                    return Err(ArtifactError::InvalidSplitFeature {
                        tree: tree_idx,
                        node,
                        feature,
                        num_features: self.num_features,
                    });
                }
                for child in [tree.left[node], tree.right[node]] {
                    if child as usize >= num_nodes {
                        return Err(ArtifactError::InvalidChild {
                            tree: tree_idx,
                            node,
                            child,
                            num_nodes,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
