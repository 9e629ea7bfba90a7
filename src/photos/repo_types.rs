use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PhotoUrl {
    pub id: i64,
    pub url: String,
    pub restaurant_id: i64,
}

/// Photo URL supplied with a restaurant, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhotoUrl {
    pub url: String,
}
