use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
    Router,
};
use tracing::instrument;

use super::services;
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn photo_routes() -> Router<AppState> {
    Router::new().route(
        "/restaurants/:id/photoUrls/:photo_id",
        delete(delete_photo),
    )
}

/// Always 200; unknown photos and non-owners are ignored.
#[instrument(skip(state))]
pub async fn delete_photo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((restaurant_id, photo_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    services::delete_photo(&state, restaurant_id, photo_id, user_id).await?;
    Ok(StatusCode::OK)
}
