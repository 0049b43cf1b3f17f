//! User records and their validated inputs

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for user names and emails (matches VARCHAR(255))
const MAX_FIELD_LEN: usize = 255;

/// Store-assigned user identifier, parsed from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Parse a path segment as a user id.
    ///
    /// # Example
    /// ```
    /// use bookings_server::models::UserId;
    ///
    /// assert_eq!(UserId::parse("42").unwrap().get(), 42);
    /// assert!(UserId::parse("abc").is_err());
    /// assert!(UserId::parse("4.2").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::NotAnInteger {
                field: "id",
                value: s.to_owned(),
            })
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the `users` table.
///
/// Columns beyond these are dropped when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Raw `POST /users` / `PUT /users/{id}` body before validation.
///
/// An `id` in the body is ignored: ids are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

/// Validated user fields for insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Validate and normalize user fields.
    ///
    /// # Rules
    /// - Both fields trimmed, non-empty, at most 255 characters
    /// - Email must contain `@` with text on both sides
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = bounded("name", name)?;
        let email = bounded("email", email)?;

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "email",
                    reason: "must look like local@domain",
                })
            }
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl TryFrom<UserPayload> for NewUser {
    type Error = ValidationError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        Self::new(&payload.name, &payload.email)
    }
}

fn bounded<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LEN,
        });
    }
    Ok(value)
}
