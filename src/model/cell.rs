use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use super::artifact::ArtifactError;
use super::predictor::Predictor;

/// Fixed artifact filename, resolved against the working directory.
pub const MODEL_ARTIFACT: &str = "model.json";

// ---------------------------------------------------------------------------
// ModelCell – load once, share the handle
// ---------------------------------------------------------------------------

/// Process-wide lazily-initialized model handle.
///
/// The first successful [`ModelCell::get_or_load`] deserializes the artifact
/// and pins the resulting [`Predictor`]; every later call returns a clone of
/// the same `Arc`. A failed load leaves the cell empty, so the call can be
/// retried. If two threads race the first load both may deserialize, the
/// cell keeps whichever finishes first and the handles are interchangeable.
pub struct ModelCell {
    path: PathBuf,
    cell: OnceLock<Arc<Predictor>>,
}

impl ModelCell {
    /// Cell for the artifact at `path`; nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ModelCell {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    /// Where the artifact is read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the shared predictor, loading the artifact on first use.
    pub fn get_or_load(&self) -> Result<Arc<Predictor>, ArtifactError> {
        if let Some(predictor) = self.cell.get() {
            return Ok(predictor.clone());
        }
        let loaded = Arc::new(Predictor::from_path(&self.path)?);
        log::info!(
            "loaded model artifact {:?}: {} features, {} trees",
            self.path,
            loaded.num_features(),
            loaded.num_trees()
        );
        Ok(self.cell.get_or_init(|| loaded).clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
