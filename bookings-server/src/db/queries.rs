//! Named operations over bookings and users
//!
//! Each operation issues exactly one statement through the [`Store`] and
//! is bounded by the per-request store timeout. On expiry the store future
//! is dropped; the database may still finish the statement.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::store::{Param, Row, Store, StoreError};
use crate::models::{Booking, NewUser, User, UserId};

const LIST_BOOKINGS: &str = "SELECT to_jsonb(b) AS row FROM booking b";

const LIST_USERS: &str = "SELECT to_jsonb(u) AS row FROM users u ORDER BY u.id ASC";

const GET_USER: &str = "SELECT to_jsonb(u) AS row FROM users u WHERE u.id = $1";

const CREATE_USER: &str = r#"
    WITH created AS (
        INSERT INTO users (name, email) VALUES ($1, $2)
        RETURNING *
    )
    SELECT to_jsonb(created) AS row FROM created
"#;

const UPDATE_USER: &str = r#"
    WITH updated AS (
        UPDATE users SET name = $1, email = $2 WHERE id = $3
        RETURNING *
    )
    SELECT to_jsonb(updated) AS row FROM updated
"#;

const DELETE_USER: &str = r#"
    WITH deleted AS (
        DELETE FROM users WHERE id = $1
        RETURNING id
    )
    SELECT to_jsonb(deleted) AS row FROM deleted
"#;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("store did not respond within {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },

    #[error("{operation} returned no row")]
    MissingRow { operation: &'static str },
}

/// Query layer over a shared store handle.
#[derive(Clone)]
pub struct Queries {
    store: Arc<dyn Store>,
    timeout: Duration,
}

impl Queries {
    pub fn new(store: Arc<dyn Store>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// All rows of the booking table, as returned.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, DbError> {
        let rows = self.fetch(LIST_BOOKINGS, &[]).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    /// All users, ascending by id.
    pub async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let rows = self.fetch(LIST_USERS, &[]).await?;
        let mut users = rows.into_iter().map(decode_user).collect::<Result<Vec<_>, _>>()?;
        // Ascending by id even if the store ignores ORDER BY
        users.sort_by_key(|u| u.id.get());
        Ok(users)
    }

    pub async fn get_user(&self, id: UserId) -> Result<User, DbError> {
        let rows = self.fetch(GET_USER, &[Param::Int(id.get())]).await?;
        first_user(rows).ok_or_else(|| user_not_found(id))?
    }

    /// Insert a user and return it with its assigned id.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, DbError> {
        let params = [Param::Text(user.name().to_owned()), Param::Text(user.email().to_owned())];
        let rows = self.fetch(CREATE_USER, &params).await?;
        first_user(rows).ok_or(DbError::MissingRow {
            operation: "create user",
        })?
    }

    pub async fn update_user(&self, id: UserId, user: &NewUser) -> Result<User, DbError> {
        let params = [
            Param::Text(user.name().to_owned()),
            Param::Text(user.email().to_owned()),
            Param::Int(id.get()),
        ];
        let rows = self.fetch(UPDATE_USER, &params).await?;
        first_user(rows).ok_or_else(|| user_not_found(id))?
    }

    pub async fn delete_user(&self, id: UserId) -> Result<(), DbError> {
        let rows = self.fetch(DELETE_USER, &[Param::Int(id.get())]).await?;
        if rows.is_empty() {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    /// Confirm the store answers within the timeout.
    pub async fn ping(&self) -> Result<(), DbError> {
        match tokio::time::timeout(self.timeout, self.store.ping()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(DbError::Timeout {
                timeout: self.timeout,
            }),
        }
    }

    async fn fetch(&self, statement: &'static str, params: &[Param]) -> Result<Vec<Row>, DbError> {
        tracing::debug!(statement = statement.trim(), ?params, "executing statement");

        match tokio::time::timeout(self.timeout, self.store.fetch(statement, params)).await {
            Ok(Ok(rows)) => Ok(rows),
            Ok(Err(e)) => Err(DbError::Store(e)),
            Err(_) => Err(DbError::Timeout {
                timeout: self.timeout,
            }),
        }
    }
}

fn decode_user(row: Row) -> Result<User, DbError> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| DbError::Store(StoreError::Decode(e)))
}

fn first_user(rows: Vec<Row>) -> Option<Result<User, DbError>> {
    rows.into_iter().next().map(decode_user)
}

fn user_not_found(id: UserId) -> DbError {
    DbError::NotFound {
        resource: "user",
        id: id.to_string(),
    }
}
