use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(serialize_with = "crate::json::timestamp")]
    pub created_at: OffsetDateTime,
    pub restaurant_id: i64,
    pub created_by_user_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub content: String,
}
