//! HTTP API layer for NestBook.
//!
//! Thin actix-web handlers over the core services: DTO mapping, JWT
//! extraction, refresh-token cookie handling and the domain-error to
//! HTTP-status mapping live here; all business rules stay in `nb_core`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
