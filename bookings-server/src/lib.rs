//! bookings-server: HTTP API over the bookings/users dataset
//!
//! Layers, leaves first:
//! - [`db`]: pooled PostgreSQL store and the named queries run against it
//! - [`models`]: booking/user shapes and validated request input
//! - [`http`]: axum router, extractors and error-to-status mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DbConfig, PgStore, Store};
pub use http::{run_server, ServerConfig};
