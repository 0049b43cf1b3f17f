//! Data store adapter
//!
//! Every statement projects its rows as a single JSON column named `row`
//! (`SELECT to_jsonb(t) AS row FROM ...`), so one decode path covers both
//! the opaque booking rows and the typed user rows.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::PgPool;

/// One record as returned by the store: column name to value.
pub type Row = Map<String, Value>;

/// Positional statement parameter, bound as `$1, $2, ...`.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Text(String),
}

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Executes parameterized statements against the relational store.
///
/// Statements are `&'static str`: caller values only ever travel through
/// `params`, never through the statement text.
#[async_trait]
pub trait Store: Send + Sync {
    /// Run `statement` with `params` bound positionally and return every row.
    async fn fetch(&self, statement: &'static str, params: &[Param]) -> Result<Vec<Row>, StoreError>;

    /// Round-trip a trivial statement to confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn fetch(&self, statement: &'static str, params: &[Param]) -> Result<Vec<Row>, StoreError> {
        let mut query = sqlx::query_scalar::<_, Json<Row>>(statement);
        for param in params {
            query = match param {
                Param::Int(v) => query.bind(*v),
                Param::Text(s) => query.bind(s.clone()),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|Json(row)| row).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
