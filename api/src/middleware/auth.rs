//! JWT bearer-token extraction.
//!
//! Two extractors over the same verification path: `AuthedActor` fails
//! with 401 when no valid token is present, `MaybeActor` yields `None`
//! for anonymous requests (guest bookings) but still rejects a token
//! that is present and invalid.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};

use nb_core::domain::value_objects::Actor;
use nb_core::errors::{AuthenticationError, DomainError};
use nb_core::services::TokenService;

use crate::handlers::ApiError;

/// Pull the raw token out of an `Authorization: Bearer ...` header
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verify the bearer token, if any, into an Actor
fn authenticate(req: &HttpRequest) -> Result<Option<Actor>, ApiError> {
    let raw = match bearer_token(req) {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| ApiError(DomainError::internal("token service not configured")))?;

    let claims = tokens.verify_access_token(raw).map_err(ApiError)?;
    let actor = Actor::new(
        claims.account_id().map_err(DomainError::from)?,
        claims.parsed_role().map_err(DomainError::from)?,
    );
    Ok(Some(actor))
}

/// Actor extracted from a required bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthedActor(pub Actor);

impl FromRequest for AuthedActor {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|actor| {
            actor
                .map(AuthedActor)
                .ok_or(ApiError(AuthenticationError::MissingCredentials.into()))
        }))
    }
}

/// Actor extracted from an optional bearer token
#[derive(Debug, Clone, Copy)]
pub struct MaybeActor(pub Option<Actor>);

impl FromRequest for MaybeActor {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(MaybeActor))
    }
}

/// Client address and user agent for the login audit trail
pub fn client_event(req: &HttpRequest) -> nb_core::domain::entities::account::LoginEvent {
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();
    let user_agent = req
        .headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    nb_core::domain::entities::account::LoginEvent::new(ip, user_agent)
}
