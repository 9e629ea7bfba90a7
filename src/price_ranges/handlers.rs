use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::{repo, repo_types::PriceRange};
use crate::{auth::AuthUser, error::AppError, state::AppState};

pub fn price_range_routes() -> Router<AppState> {
    Router::new().route("/priceranges", get(list_price_ranges))
}

#[instrument(skip(state, _user))]
pub async fn list_price_ranges(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<PriceRange>>, AppError> {
    Ok(Json(repo::get_all(&state.db).await?))
}
