//! Model loading - Artifact format, classifiers and the model slot

mod artifact;
mod forest;
mod loader;
mod logistic;
mod slot;

pub use artifact::{ModelArtifact, ModelKind, ModelSpec, SUPPORTED_FORMAT_VERSION};
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use loader::{load_at_startup, load_model, ModelLoadError};
pub use logistic::{LogisticRegression, StandardScaler};
pub use slot::{LoadedModel, ModelMetadata, ModelSlot};
