//! Auth service tests
