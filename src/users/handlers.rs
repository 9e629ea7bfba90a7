use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::{dto::UserRegistration, repo, repo_types::User};
use crate::{
    auth::{
        services::{hash_password, is_valid_email},
        AuthUser,
    },
    error::AppError,
    restaurants::{dto::SerializedRestaurant, services as restaurants},
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/profile/posts", get(posts))
        .route("/profile/likes", get(likes))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<UserRegistration>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email.".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation("Password too short.".into()));
    }
    if repo::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered.".into()));
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal(e)
    })?;
    let user = repo::create(&state.db, &payload.email, &hash, payload.name.trim()).await?;

    info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>, AppError> {
    repo::get(&state.db, user_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Invalid user id."))
}

#[instrument(skip(state))]
pub async fn posts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SerializedRestaurant>>, AppError> {
    Ok(Json(restaurants::posted_by(&state, user_id).await?))
}

#[instrument(skip(state))]
pub async fn likes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SerializedRestaurant>>, AppError> {
    Ok(Json(restaurants::liked_by(&state, user_id).await?))
}
