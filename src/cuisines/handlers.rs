use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::CuisineWrapper, repo, repo_types::Cuisine};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn cuisine_routes() -> Router<AppState> {
    Router::new()
        .route("/cuisines", get(list_cuisines).post(create_cuisine))
        .route("/cuisines/:id", get(get_cuisine))
}

#[instrument(skip(state, _user))]
pub async fn list_cuisines(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Cuisine>>, AppError> {
    Ok(Json(repo::get_all(&state.db).await?))
}

#[instrument(skip(state, _user))]
pub async fn get_cuisine(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Cuisine>, AppError> {
    repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Invalid cuisine id."))
}

#[instrument(skip(state, body))]
pub async fn create_cuisine(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CuisineWrapper>,
) -> Result<(StatusCode, Json<Cuisine>), AppError> {
    let name = body.cuisine.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Cuisine name is required.".into()));
    }
    let cuisine = repo::create(&state.db, name).await?;
    info!(cuisine_id = cuisine.id, user_id, "cuisine created");
    Ok((StatusCode::CREATED, Json(cuisine)))
}
