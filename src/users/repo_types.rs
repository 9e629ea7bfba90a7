use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public part of a user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// User row including the password hash, only read during login.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithPassword {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
