//! Application factory.
//!
//! Builds the Actix app from a pre-wired [`AppState`]; generic over the
//! repository and dispatcher implementations so tests can run the full
//! HTTP surface against the in-memory mocks.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::NotificationDispatcher;
use nb_shared::config::ServerConfig;
use nb_shared::types::response::ErrorBody;

use crate::middleware::cors::create_cors;
use crate::routes::auth::{
    login::login, logout::logout, me::me,
    password::{change_password, forgot_password, reset_password},
    refresh::refresh, register::register,
    verify::{resend_otp, verify_otp},
};
use crate::routes::bookings::{
    create::create_booking,
    list::{list_all_bookings, list_my_bookings},
    manage::{update_payment, update_status},
};
use crate::state::AppState;

/// Create and configure the application with all dependencies.
pub fn create_app<A, B, P, N>(
    app_state: web::Data<AppState<A, B, P, N>>,
    server_config: &ServerConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    B: BookingRepository + 'static,
    P: PropertyRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    let cors = create_cors(app_state.environment, server_config);
    // The bearer-token extractors pull the verifier straight from app data
    let token_service = web::Data::new(app_state.token_service.clone());

    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<A, B, P, N>))
                        .route("/verify-otp", web::post().to(verify_otp::<A, B, P, N>))
                        .route("/resend-otp", web::post().to(resend_otp::<A, B, P, N>))
                        .route("/login", web::post().to(login::<A, B, P, N>))
                        .route("/refresh", web::post().to(refresh::<A, B, P, N>))
                        .route("/logout", web::post().to(logout::<A, B, P, N>))
                        .route("/me", web::get().to(me::<A, B, P, N>))
                        .route(
                            "/password/forgot",
                            web::post().to(forgot_password::<A, B, P, N>),
                        )
                        .route(
                            "/password/reset",
                            web::post().to(reset_password::<A, B, P, N>),
                        )
                        .route(
                            "/password/change",
                            web::post().to(change_password::<A, B, P, N>),
                        ),
                )
                .service(
                    web::scope("/bookings")
                        .route("", web::post().to(create_booking::<A, B, P, N>))
                        .route("", web::get().to(list_all_bookings::<A, B, P, N>))
                        .route("/mine", web::get().to(list_my_bookings::<A, B, P, N>))
                        .route(
                            "/{id}/status",
                            web::patch().to(update_status::<A, B, P, N>),
                        )
                        .route(
                            "/{id}/payment",
                            web::patch().to(update_payment::<A, B, P, N>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "nestbook-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
