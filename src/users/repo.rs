use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{User, UserWithPassword};
use crate::db::exactly_one;

pub async fn create(
    db: &PgPool,
    email: &str,
    password_hash: &str,
    name: &str,
) -> anyhow::Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, name)
        VALUES ($1, $2, $3)
        RETURNING id, email, name
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .fetch_one(db)
    .await
    .context("insert user")
}

pub async fn get(db: &PgPool, user_id: i64) -> anyhow::Result<Option<User>> {
    let rows = sqlx::query_as::<_, User>("SELECT id, email, name FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("get user")?;
    Ok(exactly_one(rows))
}

/// Credentials lookup for login; emails are stored lowercased.
pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<UserWithPassword>> {
    let rows = sqlx::query_as::<_, UserWithPassword>(
        r#"
        SELECT id, email, name, password_hash
          FROM users
         WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await
    .context("find user by email")?;
    Ok(exactly_one(rows))
}

pub async fn find_for_user_ids(db: &PgPool, user_ids: &[i64]) -> anyhow::Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT id, email, name FROM users WHERE id = ANY($1)")
        .bind(user_ids)
        .fetch_all(db)
        .await
        .context("find users by ids")
}

/// Creator of the given restaurant.
pub async fn find_for_restaurant_id(
    db: &PgPool,
    restaurant_id: i64,
) -> anyhow::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.email, u.name
          FROM users u
          JOIN restaurant r ON r.created_by_user_id = u.id
         WHERE r.id = $1
        "#,
    )
    .bind(restaurant_id)
    .fetch_optional(db)
    .await
    .context("find user for restaurant")
}
