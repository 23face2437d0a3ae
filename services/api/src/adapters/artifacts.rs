//! services/api/src/adapters/artifacts.rs
//!
//! Filesystem implementation of the `ModelStore` port: reads a named,
//! gzip-compressed, JSON-serialized model artifact and deserializes it into
//! an invocable predictor. Artifacts are reloaded on every call; there is
//! no cross-request model cache.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use krishi_core::error::PredictError;
use krishi_core::model::Artifact;
use krishi_core::ports::ModelStore;
use std::io::Read;
use std::path::PathBuf;

/// A model store rooted at a directory of artifact files.
#[derive(Clone)]
pub struct FsModelStore {
    models_dir: PathBuf,
}

impl FsModelStore {
    pub fn new(models_dir: PathBuf) -> Self {
        Self { models_dir }
    }
}

#[async_trait]
impl ModelStore for FsModelStore {
    async fn load(&self, name: &str) -> Result<Artifact, PredictError> {
        let path = self.models_dir.join(name);

        let compressed = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PredictError::ArtifactNotFound(path.display().to_string())
            } else {
                PredictError::ArtifactCorrupt(format!("{}: {e}", path.display()))
            }
        })?;

        let mut document = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut document)
            .map_err(|e| PredictError::ArtifactCorrupt(format!("{}: {e}", path.display())))?;

        Artifact::from_json(&document)
    }
}
