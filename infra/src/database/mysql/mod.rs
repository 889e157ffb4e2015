//! MySQL repository implementations.

mod account_repository_impl;
mod booking_repository_impl;
mod property_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use booking_repository_impl::MySqlBookingRepository;
pub use property_repository_impl::MySqlPropertyRepository;
