//! crates/krishi_core/src/codec.rs
//!
//! Converts raw form fields into model-ready values, and decodes the crop
//! classifier's categorical output back into a label.

use crate::domain::CropQuery;
use crate::error::PredictError;

/// Upper bound on the number of months a single forecast may request.
pub const MAX_FORECAST_MONTHS: u32 = 120;

//=========================================================================================
// Rainfall Input
//=========================================================================================

/// Parses the `months` form field into a period count.
///
/// Accepts `1..=MAX_FORECAST_MONTHS`; anything missing, non-integer,
/// non-positive, or past the bound is `InvalidInput`.
pub fn parse_period_count(raw: Option<&str>) -> Result<u32, PredictError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PredictError::InvalidInput("field 'months' is required".to_string()))?;

    let count: i64 = raw.parse().map_err(|_| {
        PredictError::InvalidInput("field 'months' must be a whole number".to_string())
    })?;

    if count < 1 || count > i64::from(MAX_FORECAST_MONTHS) {
        return Err(PredictError::InvalidInput(format!(
            "field 'months' must be between 1 and {MAX_FORECAST_MONTHS}"
        )));
    }

    Ok(count as u32)
}

//=========================================================================================
// Crop Input
//=========================================================================================

/// Parses one numeric crop field. Values must be finite floats; ranges are
/// deliberately not enforced and pass through to the model uninterpreted.
pub fn parse_crop_field(name: &str, raw: Option<&str>) -> Result<f64, PredictError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PredictError::InvalidInput(format!("field '{name}' is required")))?;

    let value: f64 = raw
        .parse()
        .map_err(|_| PredictError::InvalidInput(format!("field '{name}' must be a number")))?;

    if !value.is_finite() {
        return Err(PredictError::InvalidInput(format!(
            "field '{name}' must be a finite number"
        )));
    }

    Ok(value)
}

impl CropQuery {
    /// Builds a query from the raw form fields, in the model's fixed
    /// `[N, P, K, temperature, humidity, ph, rainfall]` order.
    #[allow(clippy::too_many_arguments)]
    pub fn parse(
        nitrogen: Option<&str>,
        phosphorus: Option<&str>,
        potassium: Option<&str>,
        temperature: Option<&str>,
        humidity: Option<&str>,
        ph: Option<&str>,
        rainfall: Option<&str>,
    ) -> Result<Self, PredictError> {
        Ok(CropQuery {
            nitrogen: parse_crop_field("N", nitrogen)?,
            phosphorus: parse_crop_field("P", phosphorus)?,
            potassium: parse_crop_field("K", potassium)?,
            temperature: parse_crop_field("temperature", temperature)?,
            humidity: parse_crop_field("humidity", humidity)?,
            ph: parse_crop_field("ph", ph)?,
            rainfall: parse_crop_field("rainfall", rainfall)?,
        })
    }
}

//=========================================================================================
// Label Vocabulary
//=========================================================================================

/// The ordered set of distinct crop labels the classifier's codes map into.
///
/// Codes are ordinal positions over the sorted, deduplicated label set, so a
/// vocabulary fitted from the same reference data always assigns the same
/// code to the same label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    /// Fits a vocabulary: sort, then deduplicate.
    pub fn fit<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut labels: Vec<String> = labels.into_iter().collect();
        labels.sort();
        labels.dedup();
        Vocabulary { labels }
    }

    /// Reconstructs the vocabulary from the reference dataset: a CSV whose
    /// header names a `label` column.
    pub fn from_csv(text: &str) -> Result<Self, PredictError> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| PredictError::VocabularyLoad("dataset is empty".to_string()))?;

        let label_column = header
            .split(',')
            .position(|column| column.trim() == "label")
            .ok_or_else(|| {
                PredictError::VocabularyLoad("dataset has no 'label' column".to_string())
            })?;

        let labels = lines.filter_map(|line| {
            line.split(',')
                .nth(label_column)
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
        });

        let vocabulary = Vocabulary::fit(labels);
        if vocabulary.is_empty() {
            return Err(PredictError::VocabularyLoad(
                "dataset contains no labels".to_string(),
            ));
        }
        Ok(vocabulary)
    }

    /// Maps a predicted class code back to its label.
    pub fn decode(&self, code: usize) -> Result<&str, PredictError> {
        self.labels
            .get(code)
            .map(String::as_str)
            .ok_or(PredictError::Decode {
                code,
                vocab_len: self.labels.len(),
            })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_count_accepts_the_valid_range() {
        assert_eq!(parse_period_count(Some("1")).unwrap(), 1);
        assert_eq!(parse_period_count(Some("12")).unwrap(), 12);
        assert_eq!(parse_period_count(Some("120")).unwrap(), 120);
        assert_eq!(parse_period_count(Some(" 3 ")).unwrap(), 3);
    }

    #[test]
    fn period_count_rejects_missing_and_malformed_input() {
        for raw in [None, Some(""), Some("abc"), Some("3.5"), Some("1e2")] {
            assert!(matches!(
                parse_period_count(raw),
                Err(PredictError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn period_count_rejects_out_of_bound_values() {
        for raw in ["0", "-1", "121", "99999999999999999999"] {
            assert!(matches!(
                parse_period_count(Some(raw)),
                Err(PredictError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn crop_fields_parse_in_model_order() {
        let query = CropQuery::parse(
            Some("90"),
            Some("42"),
            Some("43"),
            Some("20.8"),
            Some("82"),
            Some("6.5"),
            Some("202.9"),
        )
        .unwrap();
        assert_eq!(
            query.feature_vector(),
            [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]
        );
    }

    #[test]
    fn crop_fields_reject_non_numeric_and_non_finite_values() {
        let err = CropQuery::parse(
            Some("ninety"),
            Some("42"),
            Some("43"),
            Some("20.8"),
            Some("82"),
            Some("6.5"),
            Some("202.9"),
        )
        .unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(ref d) if d.contains("'N'")));

        let err = parse_crop_field("humidity", Some("NaN")).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
        let err = parse_crop_field("humidity", Some("inf")).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
    }

    #[test]
    fn crop_field_missing_names_the_field() {
        let err = parse_crop_field("ph", None).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(ref d) if d.contains("'ph'")));
    }

    #[test]
    fn vocabulary_fit_sorts_and_deduplicates() {
        let vocab = Vocabulary::fit(
            ["rice", "maize", "rice", "chickpea"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(vocab.labels(), ["chickpea", "maize", "rice"]);
        assert_eq!(vocab.decode(2).unwrap(), "rice");
    }

    #[test]
    fn vocabulary_decode_rejects_out_of_range_codes() {
        let vocab = Vocabulary::fit(["rice".to_string()]);
        assert!(matches!(
            vocab.decode(1),
            Err(PredictError::Decode { code: 1, vocab_len: 1 })
        ));
    }

    #[test]
    fn vocabulary_loads_from_the_reference_dataset_layout() {
        let csv = "N,P,K,temperature,humidity,ph,rainfall,label\n\
                   90,42,43,20.8,82.0,6.5,202.9,rice\n\
                   85,58,41,21.7,80.3,7.0,226.6,rice\n\
                   60,55,44,23.0,82.3,7.8,263.9,maize\n";
        let vocab = Vocabulary::from_csv(csv).unwrap();
        assert_eq!(vocab.labels(), ["maize", "rice"]);
    }

    #[test]
    fn vocabulary_rejects_datasets_without_labels() {
        assert!(matches!(
            Vocabulary::from_csv(""),
            Err(PredictError::VocabularyLoad(_))
        ));
        assert!(matches!(
            Vocabulary::from_csv("N,P,K\n1,2,3\n"),
            Err(PredictError::VocabularyLoad(_))
        ));
        assert!(matches!(
            Vocabulary::from_csv("N,P,label\n"),
            Err(PredictError::VocabularyLoad(_))
        ));
    }
}
