//! Authentication route handlers.
//!
//! Registration and OTP verification, login/refresh/logout, and the
//! password flows. The refresh token is transported exclusively in an
//! HTTP-only cookie scoped to this route tree; only the access token
//! appears in response bodies.

pub mod login;
pub mod logout;
pub mod me;
pub mod password;
pub mod refresh;
pub mod register;
pub mod verify;

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use nb_shared::config::Environment;

/// Name of the refresh-token cookie
pub(crate) const REFRESH_COOKIE: &str = "refresh_token";

/// Build the refresh-token cookie.
///
/// Production serves the frontend cross-site, so the cookie needs
/// `SameSite=None; Secure` there; development keeps `Strict`.
pub(crate) fn refresh_cookie(
    token: &str,
    ttl_seconds: i64,
    environment: Environment,
) -> Cookie<'static> {
    let (same_site, secure) = if environment.is_production() {
        (SameSite::None, true)
    } else {
        (SameSite::Strict, false)
    };
    Cookie::build(REFRESH_COOKIE, token.to_string())
        .path("/api/v1/auth")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .max_age(Duration::seconds(ttl_seconds))
        .finish()
}

/// An expired cookie that removes the refresh token on logout
pub(crate) fn clear_refresh_cookie(environment: Environment) -> Cookie<'static> {
    let mut cookie = refresh_cookie("", 0, environment);
    cookie.make_removal();
    cookie
}
