use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CommentWrapper, SerializedComment},
    repo, services,
};
use crate::{auth::AuthUser, error::AppError, restaurants, state::AppState, users};

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants/:id/comments",
            get(list_comments).post(create_comment),
        )
        .route("/comments/:id", delete(delete_comment))
}

#[instrument(skip(state, _user))]
pub async fn list_comments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SerializedComment>>, AppError> {
    Ok(Json(services::find_for_restaurant(&state.db, id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<CommentWrapper>,
) -> Result<(StatusCode, Json<SerializedComment>), AppError> {
    if restaurants::repo::get(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("Invalid restaurant id."));
    }
    let user = users::repo::get(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("Invalid user id."))?;

    let comment = repo::create(&state.db, &body.comment, user_id, id).await?;
    info!(comment_id = comment.id, restaurant_id = id, user_id, "comment created");
    Ok((StatusCode::CREATED, Json(SerializedComment { comment, user })))
}

/// Always 200; unknown comments and non-authors are ignored.
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::delete_comment(&state.db, id, user_id).await?;
    Ok(StatusCode::OK)
}
