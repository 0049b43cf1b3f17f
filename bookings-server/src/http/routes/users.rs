//! User endpoints
//!
//! Ids are validated by [`UserIdPath`] before any query runs.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, UserIdPath};
use crate::http::server::AppState;
use crate::models::{NewUser, User, UserPayload};

/// GET /users - all users, ascending by id
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.queries.list_users().await?))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.queries.get_user(id).await?))
}

/// POST /users - create a user, returning it with its assigned id
async fn create_user(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let input = NewUser::try_from(payload)?;
    let user = state.queries.create_user(&input).await?;
    tracing::info!(id = %user.id, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id}
async fn update_user(
    State(state): State<Arc<AppState>>,
    UserIdPath(id): UserIdPath,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<User>, ApiError> {
    let input = NewUser::try_from(payload)?;
    Ok(Json(state.queries.update_user(id, &input).await?))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    UserIdPath(id): UserIdPath,
) -> Result<StatusCode, ApiError> {
    state.queries.delete_user(id).await?;
    tracing::info!(%id, "user deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
