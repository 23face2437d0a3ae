//! services/api/src/web/auth.rs
//!
//! Registration, login, and logout handlers for both realms.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Form, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::adapters::sessions::SESSION_TTL_DAYS;
use crate::web::gate::session_id_from_headers;
use crate::web::routes::Realm;
use crate::web::state::AppState;
use crate::web::views;
use krishi_core::ports::PortError;

//=========================================================================================
// Form Payloads
//=========================================================================================

#[derive(Deserialize)]
pub struct CredentialsForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn session_cookie(session_id: &str) -> String {
    let max_age_secs = SESSION_TTL_DAYS * 24 * 60 * 60;
    format!("session={session_id}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}")
}

const CLEARED_SESSION_COOKIE: &str = "session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0";

//=========================================================================================
// Registration
//=========================================================================================

async fn register(state: &AppState, realm: Realm, form: CredentialsForm) -> Response {
    // 1. Both fields are required; re-render the form inline otherwise.
    let (Some(email), Some(password)) = (
        form.email.as_deref().map(str::trim).filter(|e| !e.is_empty()),
        form.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return views::register(realm, Some("Email and password are required")).into_response();
    };

    // 2. Hash the password.
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = match Argon2::default().hash_password(password.as_bytes(), &salt) {
        Ok(hash) => hash.to_string(),
        Err(e) => {
            error!("Failed to hash password: {:?}", e);
            return views::register(realm, Some("Registration failed, try again"))
                .into_response();
        }
    };

    // 3. Create the account; a taken email is a recoverable validation error.
    match state.accounts.create_account(email, &password_hash).await {
        Ok(_) => Redirect::to(realm.login_path()).into_response(),
        Err(PortError::Duplicate(_)) => {
            views::register(realm, Some("Email already registered")).into_response()
        }
        Err(e) => {
            error!("Failed to create account: {:?}", e);
            views::register(realm, Some("Registration failed, try again")).into_response()
        }
    }
}

pub async fn register_rain_form() -> Response {
    views::register(Realm::Rain, None).into_response()
}

pub async fn register_crop_form() -> Response {
    views::register(Realm::Crop, None).into_response()
}

pub async fn register_rain_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    register(&state, Realm::Rain, form).await
}

pub async fn register_crop_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    register(&state, Realm::Crop, form).await
}

//=========================================================================================
// Login
//=========================================================================================

async fn login(state: &AppState, realm: Realm, form: CredentialsForm) -> Response {
    let (Some(email), Some(password)) = (
        form.email.as_deref().map(str::trim).filter(|e| !e.is_empty()),
        form.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return views::login(realm, Some("Invalid User")).into_response();
    };

    // 1. Look the account up; unknown emails get the same message as bad
    //    passwords.
    let credentials = match state.accounts.find_by_email(email).await {
        Ok(Some(credentials)) => credentials,
        Ok(None) => return views::login(realm, Some("Invalid User")).into_response(),
        Err(e) => {
            error!("Failed to look up account: {:?}", e);
            return views::login(realm, Some("Login failed, try again")).into_response();
        }
    };

    // 2. Verify the password. No session is created on any failure path.
    let parsed_hash = match PasswordHash::new(&credentials.password_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Failed to parse stored password hash: {:?}", e);
            return views::login(realm, Some("Login failed, try again")).into_response();
        }
    };
    let valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    if !valid {
        return views::login(realm, Some("Invalid User")).into_response();
    }

    // 3. Create the session and hand the cookie back with the redirect.
    match state.sessions.create(&credentials.email).await {
        Ok(session_id) => (
            [(header::SET_COOKIE, session_cookie(&session_id))],
            Redirect::to(realm.post_login_path()),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create session: {:?}", e);
            views::login(realm, Some("Login failed, try again")).into_response()
        }
    }
}

pub async fn login_rain_form() -> Response {
    views::login(Realm::Rain, None).into_response()
}

pub async fn login_crop_form() -> Response {
    views::login(Realm::Crop, None).into_response()
}

pub async fn login_rain_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    login(&state, Realm::Rain, form).await
}

pub async fn login_crop_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    login(&state, Realm::Crop, form).await
}

//=========================================================================================
// Logout
//=========================================================================================

async fn logout(state: &AppState, realm: Realm, headers: &HeaderMap) -> Response {
    if let Some(session_id) = session_id_from_headers(headers) {
        if let Err(e) = state.sessions.destroy(session_id).await {
            error!("Failed to destroy session: {:?}", e);
        }
    }
    (
        [(header::SET_COOKIE, CLEARED_SESSION_COOKIE.to_string())],
        Redirect::to(realm.login_path()),
    )
        .into_response()
}

/// GET /logout_rain
pub async fn logout_rain(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    logout(&state, Realm::Rain, &headers).await
}

/// POST /logout_crop
pub async fn logout_crop(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    logout(&state, Realm::Crop, &headers).await
}
