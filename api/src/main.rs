//! API server entry point.
//!
//! Wires the MySQL repositories and the SMTP dispatcher into the
//! services and starts the HTTP server.

use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nb_api::app::create_app;
use nb_api::state::AppState;
use nb_core::services::{
    AuthService, AuthServiceConfig, BookingService, CredentialConfig, CredentialService,
    LockoutPolicy, TokenService, TokenServiceConfig,
};
use nb_infra::{
    DatabasePool, MySqlAccountRepository, MySqlBookingRepository, MySqlPropertyRepository,
    SmtpNotificationDispatcher,
};
use nb_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    info!(environment = ?config.environment, "starting nestbook-api");
    if config.jwt.is_using_default_secret() {
        warn!("JWT secrets are using built-in defaults; set JWT_SECRET and JWT_REFRESH_SECRET");
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let accounts = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
    let bookings = Arc::new(MySqlBookingRepository::new(pool.get_pool().clone()));
    let properties = Arc::new(MySqlPropertyRepository::new(pool.get_pool().clone()));

    let notifier = Arc::new(
        SmtpNotificationDispatcher::new(&config.smtp)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );

    let credentials = CredentialService::new(CredentialConfig {
        bcrypt_cost: config.auth.bcrypt_cost,
        min_password_length: config.auth.min_password_length,
        otp_ttl_seconds: config.auth.otp_ttl_seconds,
        reset_token_ttl_seconds: config.auth.reset_token_ttl_seconds,
    });
    let token_service = TokenService::new(TokenServiceConfig {
        access_secret: config.jwt.access_secret.clone(),
        refresh_secret: config.jwt.refresh_secret.clone(),
        access_ttl_seconds: config.jwt.access_token_expiry,
        refresh_ttl_seconds: config.jwt.refresh_token_expiry,
        issuer: config.jwt.issuer.clone(),
        audience: config.jwt.audience.clone(),
    });
    let lockout = LockoutPolicy::new(
        config.auth.lockout_threshold,
        config.auth.lockout_duration_seconds,
    );

    let auth_service = Arc::new(AuthService::new(
        accounts,
        notifier,
        credentials,
        token_service.clone(),
        lockout,
        AuthServiceConfig {
            frontend_url: config.server.frontend_url.clone(),
        },
    ));
    let booking_service = Arc::new(BookingService::new(bookings, properties));

    let app_state = web::Data::new(AppState {
        auth_service,
        booking_service,
        token_service,
        environment: config.environment,
        refresh_ttl_seconds: config.jwt.refresh_token_expiry,
    });

    let bind_address = config.server.bind_address();
    let server_config = config.server.clone();
    info!(%bind_address, "listening");

    HttpServer::new(move || create_app(app_state.clone(), &server_config))
        .bind(&bind_address)?
        .run()
        .await
}
