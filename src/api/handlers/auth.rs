use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::AppState;
use crate::api::models::{ApiError, ApiResponse, ErrorResponse, LoginRequest, RegisterRequest, ok, ok_empty};
use crate::core::constants::TOKEN_COOKIE;
use crate::core::models::UserProfile;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful, `data` is null"),
        (status = 400, description = "Missing field, unknown role or malformed email", body = ErrorResponse),
        (status = 409, description = "Email already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(req) = payload?;
    let user = state.service.register(req.into()).await?;
    Ok(ok_empty(format!("Dear {}, registration successful, please login", user.name)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = UserProfile),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<ApiResponse<UserProfile>>), ApiError> {
    let Json(req) = payload?;
    let (profile, token) = state.service.login(req.email, req.password).await?;

    let max_age = time::Duration::seconds(state.service.session_ttl().num_seconds());
    let mut cookie = session_cookie(token, state.cookie_secure);
    cookie.set_max_age(max_age);

    Ok((jar.add(cookie), ok("login success", profile)))
}

/// Cross-site clients only send the cookie back when it is `SameSite=None`.
fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Identity carried by the session token", body = UserProfile),
        (status = 403, description = "Missing, invalid or expired session", body = ErrorResponse)
    )
)]
pub async fn me(Extension(caller): Extension<UserProfile>) -> Json<ApiResponse<UserProfile>> {
    ok("session restored", caller)
}

/// Dropping the cookie is the whole of logout; the token itself stays valid until expiry.
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared")
    )
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<ApiResponse<()>>) {
    // Always emit the expiring cookie, even if the request carried none.
    let mut cookie = session_cookie(String::new(), state.cookie_secure);
    cookie.make_removal();
    (jar.add(cookie), ok_empty("Logged out successfully"))
}
