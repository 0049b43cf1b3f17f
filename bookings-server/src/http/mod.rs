//! HTTP server layer
//!
//! Axum server with:
//! - CORS allow-list
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, CorsConfig, ServerConfig, ServerError};
