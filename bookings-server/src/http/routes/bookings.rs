//! Booking endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Booking;

/// GET /booking - every booking row, unmodified
async fn list_bookings(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.queries.list_bookings().await?))
}

/// Booking routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/booking", get(list_bookings))
}
