//! services/api/src/web/rain.rs
//!
//! The four regional rainfall dispatchers and their informational pages.
//!
//! Each dispatcher follows the same composition: load the region's fixed
//! artifact, parse the requested period count, run the forecaster, and pair
//! its output with calendar-month labels starting January of next year.
//! Every failure is classified, logged, and rendered; nothing propagates to
//! the transport layer.

use axum::{
    extract::{Form, State},
    response::Html,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::web::state::AppState;
use crate::web::views;
use krishi_core::codec::parse_period_count;
use krishi_core::domain::ForecastPoint;
use krishi_core::error::PredictError;
use krishi_core::forecast::format_forecast;

/// Fixed artifact names, one per region.
pub const KONKAN_ARTIFACT: &str = "model1.json.gz";
pub const MADHYA_MAHARASHTRA_ARTIFACT: &str = "model2.json.gz";
pub const MARATHWADA_ARTIFACT: &str = "model3.json.gz";
pub const VIDARBHA_ARTIFACT: &str = "model4.json.gz";

//=========================================================================================
// Informational Pages
//=========================================================================================

pub async fn rain_home() -> Html<String> {
    views::rain_home()
}

pub async fn home() -> Html<String> {
    views::home()
}

pub async fn konkan() -> Html<String> {
    views::region("Konkan", "/konkan_prediction")
}

pub async fn vidarbha() -> Html<String> {
    views::region("Vidarbha", "/vidarbha_prediction")
}

pub async fn marathwada() -> Html<String> {
    views::region("Marathwada", "/marathwada_prediction")
}

pub async fn madhya_maharashtra() -> Html<String> {
    views::region("Madhya Maharashtra", "/madhya_maharashtra_prediction")
}

//=========================================================================================
// Prediction Dispatch
//=========================================================================================

#[derive(Deserialize)]
pub struct ForecastForm {
    pub months: Option<String>,
}

async fn run_forecast(
    state: &AppState,
    artifact_name: &str,
    form: &ForecastForm,
) -> Result<Vec<ForecastPoint>, PredictError> {
    // 1. Load this region's artifact fresh.
    let artifact = state.models.load(artifact_name).await?;
    let model = artifact.into_rainfall()?;

    // 2. Parse and validate the requested period count.
    let count = parse_period_count(form.months.as_deref())?;

    // 3. Run inference and label the output from January of next year.
    let predictions = model.predict(count);
    let start_year = Utc::now().year() + 1;
    format_forecast(start_year, count, &predictions)
}

async fn dispatch(state: &AppState, artifact_name: &str, form: ForecastForm) -> Html<String> {
    match run_forecast(state, artifact_name, &form).await {
        Ok(points) => views::forecast_result(&points),
        Err(e) => {
            error!(artifact = artifact_name, "Rainfall prediction failed: {e}");
            views::forecast_error(&e.user_message())
        }
    }
}

pub async fn konkan_prediction(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ForecastForm>,
) -> Html<String> {
    dispatch(&state, KONKAN_ARTIFACT, form).await
}

pub async fn vidarbha_prediction(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ForecastForm>,
) -> Html<String> {
    dispatch(&state, VIDARBHA_ARTIFACT, form).await
}

pub async fn marathwada_prediction(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ForecastForm>,
) -> Html<String> {
    dispatch(&state, MARATHWADA_ARTIFACT, form).await
}

pub async fn madhya_maharashtra_prediction(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ForecastForm>,
) -> Html<String> {
    dispatch(&state, MADHYA_MAHARASHTRA_ARTIFACT, form).await
}
