use std::sync::Arc;

use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::prelude::Result;

pub const SESSION_COOKIE: &str = "_Host_user";

/// Session context injected into requests that pass the guard.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
}

/// Presence-only gate: any non-empty session cookie renders the protected
/// view, an absent one redirects to the login view. The cookie's content is
/// never validated against the backend.
pub async fn authenticate(headers: HeaderMap, mut request: Request, next: Next) -> Result<Response> {
    let jar = CookieJar::from_headers(&headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE).filter(|c| !c.value().is_empty()) {
        let session = Session {
            username: cookie.value().to_string(),
        };
        request.extensions_mut().insert(Arc::new(session));
        return Ok(next.run(request).await);
    }
    tracing::warn!("session marker missing, redirecting to login");
    Ok(Redirect::to("/login").into_response())
}
