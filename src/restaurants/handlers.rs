use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use super::{
    dto::{RestaurantWrapper, SerializedRestaurant},
    services::{self, UpdateOutcome},
};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route(
            "/restaurants/:id",
            get(get_restaurant)
                .patch(update_restaurant)
                .delete(delete_restaurant),
        )
}

#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SerializedRestaurant>>, AppError> {
    Ok(Json(services::get_all(&state, user_id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<RestaurantWrapper>,
) -> Result<(StatusCode, Json<SerializedRestaurant>), AppError> {
    if let Some(field) = body.restaurant.missing_for_create() {
        warn!(field, "restaurant payload incomplete");
        return Err(AppError::Validation(format!("{field} is required.")));
    }
    let created = services::create(&state, &body.restaurant, user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<SerializedRestaurant>, AppError> {
    services::get(&state, id, user_id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Invalid restaurant id."))
}

#[instrument(skip(state, body))]
pub async fn update_restaurant(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<RestaurantWrapper>,
) -> Result<Json<SerializedRestaurant>, AppError> {
    if body.restaurant.name.trim().is_empty() {
        return Err(AppError::Validation("name is required.".into()));
    }
    match services::update(&state, id, &body.restaurant, user_id).await? {
        UpdateOutcome::Updated(view) => Ok(Json(view)),
        UpdateOutcome::NotFound => Err(AppError::NotFound("Invalid restaurant id.")),
        UpdateOutcome::Forbidden => Err(AppError::Forbidden),
    }
}

/// Always 200; unknown restaurants and non-creators are ignored.
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::delete(&state, id, user_id).await?;
    Ok(StatusCode::OK)
}
