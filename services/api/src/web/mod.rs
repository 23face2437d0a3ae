//! services/api/src/web/mod.rs
//!
//! The HTTP surface: route table, login gate, handlers, and views.

pub mod auth;
pub mod crop;
pub mod gate;
pub mod rain;
pub mod routes;
pub mod state;
pub mod views;

use axum::{
    middleware as axum_middleware,
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use state::AppState;

async fn landing() -> Html<String> {
    views::landing()
}

/// Builds the application router. The login gate wraps every route; the
/// serving-layer policies (timeout, tracing) are layered on by the binary so
/// the routes stay testable without them.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(landing))
        // Account creation and session management, one pair per realm.
        .route(
            "/register_rain",
            get(auth::register_rain_form).post(auth::register_rain_submit),
        )
        .route(
            "/register_crop",
            get(auth::register_crop_form).post(auth::register_crop_submit),
        )
        .route(
            "/login_rain",
            get(auth::login_rain_form).post(auth::login_rain_submit),
        )
        .route(
            "/login_crop",
            get(auth::login_crop_form).post(auth::login_crop_submit),
        )
        .route("/logout_rain", get(auth::logout_rain))
        .route("/logout_crop", post(auth::logout_crop))
        // Rainfall pages and dispatchers.
        .route("/rain_home", get(rain::rain_home))
        .route("/home", get(rain::home))
        .route("/konkan", get(rain::konkan))
        .route("/konkan_prediction", post(rain::konkan_prediction))
        .route("/vidarbha", get(rain::vidarbha))
        .route("/vidarbha_prediction", post(rain::vidarbha_prediction))
        .route("/marathwada", get(rain::marathwada))
        .route("/marathwada_prediction", post(rain::marathwada_prediction))
        .route("/madhya_maharashtra", get(rain::madhya_maharashtra))
        .route(
            "/madhya_maharashtra_prediction",
            post(rain::madhya_maharashtra_prediction),
        )
        // Crop pages and dispatcher.
        .route("/crop_home", get(crop::crop_home))
        .route("/crop_index", get(crop::crop_index))
        .route("/crop_parameters", post(crop::crop_parameters))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            gate::require_login,
        ))
        .with_state(state)
}
