//! Model artifact loading

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::artifact::ModelArtifact;
use super::slot::{LoadedModel, ModelMetadata, ModelSlot};

/// Errors raised while reading a model artifact
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model artifact {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Read, parse and validate the artifact at `path`
pub fn load_model(path: &Path) -> Result<LoadedModel, ModelLoadError> {
    let file = File::open(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let artifact: ModelArtifact =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    artifact
        .validate()
        .map_err(|message| ModelLoadError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;

    let metadata = ModelMetadata::new(artifact.name.clone(), artifact.kind(), path);

    Ok(LoadedModel::new(artifact.into_classifier(), metadata))
}

/// Build the process model slot at startup.
///
/// A missing or broken artifact is logged and leaves the slot empty; the
/// service still starts and reports the model as unavailable.
pub fn load_at_startup(path: &Path) -> ModelSlot {
    match load_model(path) {
        Ok(model) => {
            info!(
                path = %path.display(),
                name = %model.metadata().name,
                kind = %model.metadata().kind,
                "Model loaded"
            );
            ModelSlot::with_model(model)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Model not loaded");
            ModelSlot::empty()
        }
    }
}
