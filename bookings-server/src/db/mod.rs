//! Database layer - connection pool, store adapter and queries
//!
//! - One pool per process, created at startup and never replaced
//! - Statements are static text; values are always bound parameters
//! - One statement per operation, bounded by the store timeout

pub mod pool;
pub mod queries;
pub mod store;

#[cfg(test)]
pub mod mock;

pub use pool::{create_pool, DbConfig};
pub use queries::{DbError, Queries};
pub use store::{Param, PgStore, Row, Store, StoreError};
