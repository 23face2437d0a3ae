//! services/api/src/web/crop.rs
//!
//! The crop recommendation dispatcher and its informational pages.

use axum::{
    extract::{Form, State},
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::web::state::AppState;
use crate::web::views;
use krishi_core::domain::CropQuery;
use krishi_core::error::PredictError;

/// Fixed artifact name of the crop classifier.
pub const CROP_ARTIFACT: &str = "XB.json.gz";

//=========================================================================================
// Informational Pages
//=========================================================================================

pub async fn crop_home() -> Html<String> {
    views::crop_home()
}

pub async fn crop_index() -> Html<String> {
    views::crop_index()
}

//=========================================================================================
// Prediction Dispatch
//=========================================================================================

/// The seven raw form fields, named exactly as the form posts them.
#[derive(Deserialize)]
pub struct CropForm {
    #[serde(rename = "N")]
    pub n: Option<String>,
    #[serde(rename = "P")]
    pub p: Option<String>,
    #[serde(rename = "K")]
    pub k: Option<String>,
    pub temperature: Option<String>,
    pub humidity: Option<String>,
    pub ph: Option<String>,
    pub rainfall: Option<String>,
}

async fn run_recommendation(state: &AppState, form: &CropForm) -> Result<String, PredictError> {
    // 1. Load the classifier artifact fresh.
    let artifact = state.models.load(CROP_ARTIFACT).await?;
    let model = artifact.into_crop()?;

    // 2. Encode the seven fields in the model's fixed order.
    let query = CropQuery::parse(
        form.n.as_deref(),
        form.p.as_deref(),
        form.k.as_deref(),
        form.temperature.as_deref(),
        form.humidity.as_deref(),
        form.ph.as_deref(),
        form.rainfall.as_deref(),
    )?;

    // 3. Classify, then decode the code against the label vocabulary.
    let code = model
        .predict(&query.feature_vector())
        .ok_or_else(|| PredictError::ArtifactCorrupt("classifier has no centroids".to_string()))?;

    let vocabulary = state.vocabulary.vocabulary().await?;
    Ok(vocabulary.decode(code)?.to_string())
}

pub async fn crop_parameters(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CropForm>,
) -> Html<String> {
    match run_recommendation(&state, &form).await {
        Ok(crop) => views::crop_result(&crop),
        Err(e) => {
            error!("Crop prediction failed: {e}");
            views::crop_error(&e.user_message())
        }
    }
}
