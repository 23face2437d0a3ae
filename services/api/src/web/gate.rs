//! services/api/src/web/gate.rs
//!
//! The login gate that runs before every route dispatch.
//!
//! The gate is stateless per request: it resolves the route against the
//! explicit table in [`routes`](crate::web::routes), and for protected
//! routes checks only whether the session cookie resolves to a live
//! identity. Unauthenticated requests to protected routes are redirected to
//! the realm's login page; everything else proceeds unmodified.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::error;

use crate::web::routes::RouteId;
use crate::web::state::AppState;

/// Pulls the session id out of a Cookie header, if one is present.
pub fn session_id_from_headers(headers: &axum::http::HeaderMap) -> Option<&str> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|c| {
        let c = c.trim();
        c.strip_prefix("session=")
    })
}

/// Middleware guarding the prediction submission endpoints.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    // 1. Resolve the route. Unknown paths fall through to the 404 handler.
    let Some(route) = RouteId::from_path(req.uri().path()) else {
        return next.run(req).await;
    };

    // 2. Routes outside the protected set bypass the check entirely.
    if !route.requires_session() {
        return next.run(req).await;
    }

    // 3. Check for a live session identity.
    let identity = match session_id_from_headers(req.headers()) {
        Some(session_id) => match state.sessions.identity(session_id).await {
            Ok(identity) => identity,
            Err(e) => {
                error!("Failed to resolve session: {:?}", e);
                None
            }
        },
        None => None,
    };

    // 4. No identity: redirect to the realm's login entry point.
    if identity.is_none() {
        return Redirect::to(route.realm().login_path()).into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn session_id_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc-123; lang=mr"),
        );
        assert_eq!(session_id_from_headers(&headers), Some("abc-123"));
    }

    #[test]
    fn absent_cookie_header_yields_no_session() {
        let headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_id_from_headers(&headers), None);
    }
}
