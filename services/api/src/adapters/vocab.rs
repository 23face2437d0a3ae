//! services/api/src/adapters/vocab.rs
//!
//! Provides the crop label vocabulary from the reference dataset.
//!
//! The vocabulary is fitted once per process on first use and then reused;
//! the label set and ordinal codes are identical to a per-request refit.
//! A failed load is not cached: every request retries until the dataset
//! becomes readable.

use async_trait::async_trait;
use krishi_core::codec::Vocabulary;
use krishi_core::error::PredictError;
use krishi_core::ports::VocabularySource;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A lazily-fitted, process-cached vocabulary backed by a CSV dataset.
pub struct CsvVocabularySource {
    dataset_path: PathBuf,
    cache: OnceCell<Arc<Vocabulary>>,
}

impl CsvVocabularySource {
    pub fn new(dataset_path: PathBuf) -> Self {
        Self {
            dataset_path,
            cache: OnceCell::new(),
        }
    }

    async fn fit_from_dataset(&self) -> Result<Arc<Vocabulary>, PredictError> {
        let text = tokio::fs::read_to_string(&self.dataset_path)
            .await
            .map_err(|e| {
                PredictError::VocabularyLoad(format!("{}: {e}", self.dataset_path.display()))
            })?;
        Ok(Arc::new(Vocabulary::from_csv(&text)?))
    }
}

#[async_trait]
impl VocabularySource for CsvVocabularySource {
    async fn vocabulary(&self) -> Result<Arc<Vocabulary>, PredictError> {
        let vocabulary = self
            .cache
            .get_or_try_init(|| self.fit_from_dataset())
            .await?;
        Ok(Arc::clone(vocabulary))
    }
}
