//! CORS configuration.
//!
//! Development allows any origin for easy local testing; production is
//! restricted to the configured frontend origin. Credentials are always
//! supported because the refresh token travels in a cookie.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use nb_shared::config::{Environment, ServerConfig};

pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(3600);

    if environment.is_production() {
        cors.allowed_origin(&server.frontend_url)
    } else {
        // allow_any_origin is incompatible with credentials; echo the
        // caller's origin instead
        cors.allowed_origin_fn(|_, _| true)
    }
}
