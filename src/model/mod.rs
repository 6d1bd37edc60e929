/// Model layer: the serialized artifact, the in-memory predictor, and the
/// process-wide shared handle.
///
/// Architecture:
/// ```text
///   model.json
///       │
///       ▼
///  ┌───────────┐
///  │ artifact   │  serde schema + structural validation
///  └───────────┘
///       │
///       ▼
///  ┌───────────┐
///  │ predictor  │  additive tree ensemble, predict rows → values
///  └───────────┘
///       │
///       ▼
///  ┌───────────┐
///  │   cell     │  load once, hand out the same Arc thereafter
///  └───────────┘
/// ```

pub mod artifact;
pub mod cell;
pub mod predictor;

pub use artifact::{ArtifactError, ModelArtifact, TreeNodes};
pub use cell::{ModelCell, MODEL_ARTIFACT};
pub use predictor::{PredictError, Predictor};
