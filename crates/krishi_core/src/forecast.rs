//! crates/krishi_core/src/forecast.rs
//!
//! Pairs a model's predictions with consecutive calendar-month labels.

use crate::domain::ForecastPoint;
use crate::error::PredictError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Generates `count` consecutive "Month YYYY" labels starting January of
/// `start_year`.
pub fn month_labels(start_year: i32, count: u32) -> Vec<String> {
    (0..count)
        .map(|i| {
            let year = start_year + (i / 12) as i32;
            let month = MONTH_NAMES[(i % 12) as usize];
            format!("{month} {year}")
        })
        .collect()
}

/// Zips month labels with the model output.
///
/// The prediction length must equal the requested count. A model that
/// returns a different length has broken its contract and surfaces as
/// `OutputMismatch`; the sequences are never silently truncated or padded.
pub fn format_forecast(
    start_year: i32,
    count: u32,
    predictions: &[f64],
) -> Result<Vec<ForecastPoint>, PredictError> {
    if predictions.len() != count as usize {
        return Err(PredictError::OutputMismatch {
            expected: count as usize,
            actual: predictions.len(),
        });
    }

    let points = month_labels(start_year, count)
        .into_iter()
        .zip(predictions.iter().copied())
        .map(|(label, rainfall_mm)| ForecastPoint { label, rainfall_mm })
        .collect();

    Ok(points)
}
