use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LogonCredentials, LogoutRequest, UserSession},
        repo,
        services::{generate_token, verify_password},
    },
    error::AppError,
    state::AppState,
    users,
};

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/session", post(login).delete(logout))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LogonCredentials>,
) -> Result<(StatusCode, Json<UserSession>), AppError> {
    let email = payload.email.trim().to_lowercase();

    let Some(user) = users::repo::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let token = generate_token();
    repo::create(&state.db, &token, user.id).await?;

    info!(user_id = user.id, "user logged in");
    Ok((
        StatusCode::ACCEPTED,
        Json(UserSession {
            id: user.id,
            email: user.email,
            name: user.name,
            token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> Result<StatusCode, AppError> {
    repo::delete(&state.db, &payload.token).await?;
    info!("session closed");
    Ok(StatusCode::ACCEPTED)
}
