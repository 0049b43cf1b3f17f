//! Domain models with validation at construction
//!
//! Request input is validated when these types are built.
//! Invalid input returns ValidationError, not panic.

pub mod booking;
pub mod user;
pub mod validation;

pub use booking::Booking;
pub use user::{NewUser, User, UserId, UserPayload};
pub use validation::ValidationError;
