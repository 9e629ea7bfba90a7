use crate::state::AppState;
use axum::Router;

pub mod access;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod repo;
pub mod services;

pub use extractors::AuthUser;

pub fn router() -> Router<AppState> {
    handlers::session_routes()
}
