//! Session gate for every authenticated route.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use super::{AppState, models::ApiError};
use crate::core::constants::TOKEN_COOKIE;
use crate::core::errors::ClinicError;

/// Reads the session cookie, verifies it and attaches the caller's
/// [`UserProfile`](crate::core::models::UserProfile) to the request extensions.
/// Downstream handlers do not re-authenticate.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ClinicError::Unauthenticated("user not authenticated".to_string()))?;

    let identity = state.service.validate_token(&token)?;
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
