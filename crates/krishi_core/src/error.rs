//! crates/krishi_core/src/error.rs
//!
//! The error taxonomy for the inference dispatch path. Every failure a
//! prediction route can hit is classified here, caught at the dispatcher
//! boundary, and rendered as a human-readable error view.

/// Classified failures of the prediction pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The model artifact path did not resolve to a file.
    #[error("model artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The artifact exists but could not be decompressed or deserialized.
    #[error("model artifact is corrupt: {0}")]
    ArtifactCorrupt(String),

    /// The artifact deserialized into something this service cannot run.
    #[error("unsupported model artifact: {0}")]
    ArtifactUnsupported(String),

    /// A request field was missing, malformed, or out of the accepted range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The crop label vocabulary could not be reconstructed.
    #[error("crop vocabulary unavailable: {0}")]
    VocabularyLoad(String),

    /// The classifier emitted a code outside the fitted vocabulary.
    #[error("predicted class {code} is outside the vocabulary of {vocab_len} labels")]
    Decode { code: usize, vocab_len: usize },

    /// The model returned a different number of predictions than requested.
    #[error("model returned {actual} predictions for a request of {expected}")]
    OutputMismatch { expected: usize, actual: usize },
}

impl PredictError {
    /// The message shown on the rendered error view. Kept separate from the
    /// `Display` impl so logs stay specific while pages stay readable.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::ArtifactNotFound(_) => {
                "The prediction model for this page is not installed.".to_string()
            }
            PredictError::ArtifactCorrupt(_) => {
                "The prediction model for this page could not be read.".to_string()
            }
            PredictError::ArtifactUnsupported(_) => {
                "The prediction model for this page is not usable by this server.".to_string()
            }
            PredictError::InvalidInput(detail) => format!("Invalid input: {detail}"),
            PredictError::VocabularyLoad(_) => {
                "The crop reference data is unavailable; try again later.".to_string()
            }
            PredictError::Decode { .. } => {
                "The model produced a crop the server does not recognise.".to_string()
            }
            PredictError::OutputMismatch { .. } => {
                "The model returned an unexpected number of predictions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_never_leak_internal_detail() {
        let err = PredictError::ArtifactNotFound("models/model1.json.gz".to_string());
        assert!(!err.user_message().contains("model1"));

        let err = PredictError::VocabularyLoad("/data/Crop_recommendation.csv".to_string());
        assert!(!err.user_message().contains("/data"));
    }

    #[test]
    fn invalid_input_message_names_the_problem() {
        let err = PredictError::InvalidInput("field 'months' must be a whole number".to_string());
        assert!(err.user_message().contains("months"));
    }
}
