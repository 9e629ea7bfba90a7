use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use super::{repo, repo_types::Like};
use crate::{auth::AuthUser, error::AppError, restaurants, state::AppState};

pub fn like_routes() -> Router<AppState> {
    Router::new().route("/restaurants/:id/likes", post(like).delete(unlike))
}

#[instrument(skip(state))]
pub async fn like(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Like>), AppError> {
    if restaurants::repo::get(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Invalid restaurant id."));
    }
    let like = repo::create(&state.db, user_id, id).await?;
    info!(user_id, restaurant_id = id, "restaurant liked");
    Ok((StatusCode::CREATED, Json(like)))
}

#[instrument(skip(state))]
pub async fn unlike(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    repo::delete(&state.db, user_id, id).await?;
    Ok(StatusCode::OK)
}
