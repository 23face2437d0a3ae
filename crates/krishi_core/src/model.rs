//! crates/krishi_core/src/model.rs
//!
//! The invocable model types and the artifact envelope they are shipped in.
//!
//! An artifact on disk is a gzip-compressed JSON document of the form
//! `{ "kind": "<model-kind>", "model": { ... } }`. The envelope is parsed in
//! two phases so that an unknown `kind` classifies as `ArtifactUnsupported`
//! rather than being conflated with a corrupt payload.

use serde::{Deserialize, Serialize};

use crate::error::PredictError;

/// Envelope kind for the regional rainfall forecasters.
pub const RAINFALL_FORECASTER_KIND: &str = "rainfall-forecaster";
/// Envelope kind for the crop recommendation classifier.
pub const CROP_CLASSIFIER_KIND: &str = "crop-classifier";

//=========================================================================================
// Rainfall Forecaster
//=========================================================================================

/// A fitted monthly rainfall forecaster for one region.
///
/// Forecasts are a level plus a linear trend plus a January-first seasonal
/// component, floored at zero since negative rainfall is meaningless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainfallForecaster {
    pub level: f64,
    pub trend: f64,
    pub seasonal: [f64; 12],
}

impl RainfallForecaster {
    /// Predicts rainfall (mm) for `periods` consecutive months, starting at
    /// the first seasonal slot (January).
    pub fn predict(&self, periods: u32) -> Vec<f64> {
        (0..periods)
            .map(|i| {
                let value =
                    self.level + self.trend * f64::from(i) + self.seasonal[(i % 12) as usize];
                value.max(0.0)
            })
            .collect()
    }
}

//=========================================================================================
// Crop Classifier
//=========================================================================================

/// One class prototype of the crop classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Centroid {
    /// Ordinal class code; decoded against the label vocabulary.
    pub code: usize,
    /// Prototype in `[N, P, K, temperature, humidity, pH, rainfall]` order.
    pub features: [f64; 7],
}

/// A nearest-centroid crop classifier over the seven-feature query vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropClassifier {
    pub centroids: Vec<Centroid>,
}

impl CropClassifier {
    /// Returns the class code of the centroid closest (squared Euclidean
    /// distance) to `features`, or `None` for an empty classifier.
    pub fn predict(&self, features: &[f64; 7]) -> Option<usize> {
        self.centroids
            .iter()
            .map(|c| (squared_distance(&c.features, features), c.code))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, code)| code)
    }
}

fn squared_distance(a: &[f64; 7], b: &[f64; 7]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

//=========================================================================================
// Artifact Envelope
//=========================================================================================

/// The raw two-field envelope, before the payload is interpreted.
#[derive(Deserialize)]
struct Envelope {
    kind: String,
    model: serde_json::Value,
}

/// A deserialized, invocable model artifact.
#[derive(Debug, Clone)]
pub enum Artifact {
    Rainfall(RainfallForecaster),
    Crop(CropClassifier),
}

impl Artifact {
    /// Parses a decompressed artifact document.
    ///
    /// A document that is not valid JSON, lacks the envelope fields, or whose
    /// payload does not match its declared kind is `ArtifactCorrupt`. A valid
    /// envelope with a kind this service does not know is
    /// `ArtifactUnsupported`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PredictError> {
        let envelope: Envelope = serde_json::from_slice(bytes)
            .map_err(|e| PredictError::ArtifactCorrupt(e.to_string()))?;

        match envelope.kind.as_str() {
            RAINFALL_FORECASTER_KIND => {
                let model: RainfallForecaster = serde_json::from_value(envelope.model)
                    .map_err(|e| PredictError::ArtifactCorrupt(e.to_string()))?;
                Ok(Artifact::Rainfall(model))
            }
            CROP_CLASSIFIER_KIND => {
                let model: CropClassifier = serde_json::from_value(envelope.model)
                    .map_err(|e| PredictError::ArtifactCorrupt(e.to_string()))?;
                if model.centroids.is_empty() {
                    return Err(PredictError::ArtifactCorrupt(
                        "classifier has no centroids".to_string(),
                    ));
                }
                Ok(Artifact::Crop(model))
            }
            other => Err(PredictError::ArtifactUnsupported(format!(
                "unknown model kind '{other}'"
            ))),
        }
    }

    /// Narrows to a rainfall forecaster, classifying a kind mismatch as
    /// `ArtifactUnsupported`.
    pub fn into_rainfall(self) -> Result<RainfallForecaster, PredictError> {
        match self {
            Artifact::Rainfall(model) => Ok(model),
            Artifact::Crop(_) => Err(PredictError::ArtifactUnsupported(
                "expected a rainfall forecaster, found a crop classifier".to_string(),
            )),
        }
    }

    /// Narrows to a crop classifier, classifying a kind mismatch as
    /// `ArtifactUnsupported`.
    pub fn into_crop(self) -> Result<CropClassifier, PredictError> {
        match self {
            Artifact::Crop(model) => Ok(model),
            Artifact::Rainfall(_) => Err(PredictError::ArtifactUnsupported(
                "expected a crop classifier, found a rainfall forecaster".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecaster() -> RainfallForecaster {
        RainfallForecaster {
            level: 100.0,
            trend: 1.0,
            seasonal: [
                -50.0, -40.0, -20.0, 0.0, 20.0, 200.0, 400.0, 350.0, 150.0, 30.0, -10.0, -45.0,
            ],
        }
    }

    #[test]
    fn forecaster_returns_exactly_the_requested_periods() {
        let model = forecaster();
        assert_eq!(model.predict(1).len(), 1);
        assert_eq!(model.predict(12).len(), 12);
        assert_eq!(model.predict(37).len(), 37);
    }

    #[test]
    fn forecaster_repeats_seasonality_with_trend() {
        let model = forecaster();
        let out = model.predict(24);
        // Same month one year later differs only by 12 trend steps.
        assert!((out[12] - out[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn forecaster_never_predicts_negative_rainfall() {
        let model = RainfallForecaster {
            level: 10.0,
            trend: -5.0,
            seasonal: [0.0; 12],
        };
        assert!(model.predict(48).into_iter().all(|v| v >= 0.0));
    }

    #[test]
    fn classifier_picks_the_nearest_centroid() {
        let model = CropClassifier {
            centroids: vec![
                Centroid {
                    code: 0,
                    features: [0.0; 7],
                },
                Centroid {
                    code: 5,
                    features: [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9],
                },
            ],
        };
        let query = [89.0, 41.0, 44.0, 21.0, 80.0, 6.4, 200.0];
        assert_eq!(model.predict(&query), Some(5));
    }

    #[test]
    fn empty_classifier_predicts_nothing() {
        let model = CropClassifier { centroids: vec![] };
        assert_eq!(model.predict(&[0.0; 7]), None);
    }

    #[test]
    fn envelope_with_unknown_kind_is_unsupported() {
        let doc = br#"{"kind": "neural-net", "model": {}}"#;
        assert!(matches!(
            Artifact::from_json(doc),
            Err(PredictError::ArtifactUnsupported(_))
        ));
    }

    #[test]
    fn envelope_with_garbage_payload_is_corrupt() {
        let doc = br#"{"kind": "rainfall-forecaster", "model": {"level": "not a number"}}"#;
        assert!(matches!(
            Artifact::from_json(doc),
            Err(PredictError::ArtifactCorrupt(_))
        ));
    }

    #[test]
    fn envelope_round_trips_a_forecaster() {
        let doc = serde_json::json!({
            "kind": RAINFALL_FORECASTER_KIND,
            "model": forecaster(),
        });
        let bytes = serde_json::to_vec(&doc).expect("serialize fixture");
        let artifact = Artifact::from_json(&bytes).expect("parse fixture");
        let model = artifact.into_rainfall().expect("rainfall kind");
        assert_eq!(model.predict(3).len(), 3);
    }

    #[test]
    fn kind_mismatch_surfaces_as_unsupported() {
        let doc = serde_json::json!({
            "kind": RAINFALL_FORECASTER_KIND,
            "model": forecaster(),
        });
        let bytes = serde_json::to_vec(&doc).expect("serialize fixture");
        let artifact = Artifact::from_json(&bytes).expect("parse fixture");
        assert!(matches!(
            artifact.into_crop(),
            Err(PredictError::ArtifactUnsupported(_))
        ));
    }
}
