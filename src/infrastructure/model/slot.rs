//! Process-wide holder of the loaded classifier

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::artifact::ModelKind;
use crate::domain::ChurnClassifier;
use crate::infrastructure::observability::set_model_loaded;

/// Where a loaded model came from
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub name: String,
    pub kind: ModelKind,
    pub source: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

impl ModelMetadata {
    pub fn new(name: impl Into<String>, kind: ModelKind, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }
}

/// A classifier ready to serve, with its metadata
pub struct LoadedModel {
    classifier: Box<dyn ChurnClassifier>,
    metadata: ModelMetadata,
}

impl LoadedModel {
    pub fn new(classifier: Box<dyn ChurnClassifier>, metadata: ModelMetadata) -> Self {
        Self {
            classifier,
            metadata,
        }
    }

    pub fn classifier(&self) -> &dyn ChurnClassifier {
        self.classifier.as_ref()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Single model slot for the process lifetime.
///
/// Written during startup, shutdown or test setup; read by every request.
/// Readers get an `Arc` snapshot; clearing the slot leaves snapshots
/// already handed out intact.
#[derive(Debug, Default)]
pub struct ModelSlot {
    current: RwLock<Option<Arc<LoadedModel>>>,
}

impl ModelSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_model(model: LoadedModel) -> Self {
        let slot = Self::empty();
        slot.install(model);
        slot
    }

    /// Replace the slot content with `model`
    pub fn install(&self, model: LoadedModel) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::new(model));
        set_model_loaded(true);
    }

    /// Reset the slot to absent
    pub fn clear(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = None;
        set_model_loaded(false);
    }

    pub fn current(&self) -> Option<Arc<LoadedModel>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
