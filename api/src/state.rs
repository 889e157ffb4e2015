//! Shared application state.

use std::sync::Arc;

use nb_core::repositories::{AccountRepository, BookingRepository, PropertyRepository};
use nb_core::services::{AuthService, BookingService, NotificationDispatcher, TokenService};
use nb_shared::config::Environment;

/// Application state holding the wired services.
///
/// Generic over the repository and dispatcher implementations so the
/// same handlers run against MySQL in production and the in-memory
/// mocks in tests.
pub struct AppState<A, B, P, N>
where
    A: AccountRepository,
    B: BookingRepository,
    P: PropertyRepository,
    N: NotificationDispatcher,
{
    pub auth_service: Arc<AuthService<A, N>>,
    pub booking_service: Arc<BookingService<B, P>>,
    pub token_service: TokenService,
    pub environment: Environment,
    /// Refresh-cookie lifetime, mirroring the refresh token TTL
    pub refresh_ttl_seconds: i64,
}
