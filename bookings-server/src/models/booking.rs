//! Booking rows
//!
//! The booking table's columns are owned by the schema, not by this
//! service, so a booking is forwarded exactly as the store returns it.

use serde::{Deserialize, Serialize};

use crate::db::Row;

/// One row of the `booking` table, serialized verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Booking(pub Row);

impl From<Row> for Booking {
    fn from(row: Row) -> Self {
        Self(row)
    }
}
