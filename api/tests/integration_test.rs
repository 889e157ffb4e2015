//! End-to-end tests over the HTTP surface, backed by the in-memory
//! repositories and the recording mail dispatcher.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use nb_api::app::create_app;
use nb_api::state::AppState;
use nb_core::domain::entities::property::Property;
use nb_core::repositories::{
    MockAccountRepository, MockBookingRepository, MockPropertyRepository, PropertyRepository,
};
use nb_core::services::{
    AuthService, AuthServiceConfig, BookingService, CredentialConfig, CredentialService,
    LockoutPolicy, MockNotificationDispatcher, TokenService, TokenServiceConfig,
};
use nb_shared::config::{Environment, ServerConfig};
use uuid::Uuid;

type TestState = AppState<
    MockAccountRepository,
    MockBookingRepository,
    MockPropertyRepository,
    MockNotificationDispatcher,
>;

struct Harness {
    state: web::Data<TestState>,
    notifier: Arc<MockNotificationDispatcher>,
    properties: Arc<MockPropertyRepository>,
    server_config: ServerConfig,
}

fn harness() -> Harness {
    let accounts = Arc::new(MockAccountRepository::new());
    let bookings = Arc::new(MockBookingRepository::new());
    let properties = Arc::new(MockPropertyRepository::new());
    let notifier = Arc::new(MockNotificationDispatcher::new());

    let credentials = CredentialService::new(CredentialConfig {
        bcrypt_cost: 4, // keep the test suite fast
        ..CredentialConfig::default()
    });
    let token_config = TokenServiceConfig::default();
    let refresh_ttl_seconds = token_config.refresh_ttl_seconds;
    let token_service = TokenService::new(token_config);

    let auth_service = Arc::new(AuthService::new(
        accounts,
        notifier.clone(),
        credentials,
        token_service.clone(),
        LockoutPolicy::default(),
        AuthServiceConfig::default(),
    ));
    let booking_service = Arc::new(BookingService::new(bookings, properties.clone()));

    let state = web::Data::new(AppState {
        auth_service,
        booking_service,
        token_service,
        environment: Environment::Development,
        refresh_ttl_seconds,
    });

    Harness {
        state,
        notifier,
        properties,
        server_config: ServerConfig::default(),
    }
}

/// Pull the six-digit code out of the last OTP mail
async fn last_otp(notifier: &MockNotificationDispatcher) -> String {
    let sent = notifier.sent_messages().await;
    let body = &sent.last().expect("no mail sent").text_body;
    let at = body.find("code is ").expect("no code in mail") + "code is ".len();
    body[at..at + 6].to_string()
}

/// Register and verify an account; returns the access token
async fn signed_up<B>(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    notifier: &MockNotificationDispatcher,
    email: &str,
) -> String
where
    B: actix_web::body::MessageBody,
{
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "name": "Ada", "email": email, "password": "correct-horse" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let otp = last_otp(notifier).await;
    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/verify-otp")
            .set_json(json!({ "email": email, "otp": otp }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": "correct-horse" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie_set = resp
        .headers()
        .get(actix_web::http::header::SET_COOKIE)
        .expect("no refresh cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie_set.starts_with("refresh_token="));
    assert!(cookie_set.contains("HttpOnly"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    body["accessToken"].as_str().expect("no access token").to_string()
}

#[actix_web::test]
async fn test_register_login_me_flow() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;

    let token = signed_up(&app, &h.notifier, "ada@example.com").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["account"]["email"], "ada@example.com");
    assert_eq!(body["account"]["verified"], true);
    // credential material never leaves the server
    assert!(body["account"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn test_me_requires_token() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "AUTHENTICATION_REQUIRED");
}

#[actix_web::test]
async fn test_login_with_wrong_password_reports_attempts() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;
    signed_up(&app, &h.notifier, "ada@example.com").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CREDENTIALS");
    assert_eq!(body["details"]["attemptsRemaining"], 4);
}

#[actix_web::test]
async fn test_guest_booking_conflict_over_http() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;

    let property = Property::new(
        "Harbor View Flat".to_string(),
        300.0,
        "Harborside".to_string(),
        Uuid::new_v4(),
    );
    let code = property.public_code.clone();
    h.properties.create(property).await.unwrap();

    let booking = json!({
        "property": code,
        "date": "2026-09-12",
        "startTime": "10:00",
        "endTime": "12:00",
        "guestName": "Walk-in Guest",
        "guestEmail": "guest@example.com"
    });

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/bookings")
            .set_json(&booking)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Pending");
    assert_eq!(body["startTime"], "10:00");

    // overlapping slot on the same day is refused
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/bookings")
            .set_json(json!({
                "property": code,
                "date": "2026-09-12",
                "startTime": "11:00",
                "endTime": "13:00",
                "guestEmail": "other@example.com"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SLOT_UNAVAILABLE");

    // back-to-back slot is fine (half-open interval)
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/bookings")
            .set_json(json!({
                "property": code,
                "date": "2026-09-12",
                "startTime": "12:00",
                "endTime": "13:00",
                "guestEmail": "other@example.com"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_status_update_requires_manager() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;

    let property = Property::new(
        "Harbor View Flat".to_string(),
        300.0,
        "Harborside".to_string(),
        Uuid::new_v4(),
    );
    let code = property.public_code.clone();
    h.properties.create(property).await.unwrap();

    let token = signed_up(&app, &h.notifier, "stranger@example.com").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/bookings")
            .set_json(json!({
                "property": code,
                "date": "2026-09-12",
                "startTime": "10:00",
                "endTime": "12:00",
                "guestEmail": "guest@example.com"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let booking_id = body["id"].as_str().unwrap().to_string();

    // a regular user unrelated to the property may not approve
    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/bookings/{booking_id}/status"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "status": "Approved" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // garbage status string is a 400 before any authorization check
    let resp = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/bookings/{booking_id}/status"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "status": "Confirmed" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_refresh_uses_cookie_and_rotates() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;
    signed_up(&app, &h.notifier, "ada@example.com").await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "correct-horse" }))
            .to_request(),
    )
    .await;
    let cookie = resp.response().cookies().next().expect("no cookie").into_owned();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated = resp.response().cookies().next().expect("no cookie").into_owned();
    assert_ne!(rotated.value(), cookie.value());

    // replaying the pre-rotation token is refused
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_without_token_is_unauthorized() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_unknown_route_is_404_with_error_body() {
    let h = harness();
    let app = test::init_service(create_app(h.state.clone(), &h.server_config)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v2/nothing").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
