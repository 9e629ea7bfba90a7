use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A (user, restaurant) pair; at most one per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub user_id: i64,
    pub restaurant_id: i64,
}
