use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{Comment, NewComment};
use crate::db::exactly_one;

pub async fn create(
    db: &PgPool,
    new_comment: &NewComment,
    user_id: i64,
    restaurant_id: i64,
) -> anyhow::Result<Comment> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (content, restaurant_id, created_by_user_id)
        VALUES ($1, $2, $3)
        RETURNING id, content, created_at, restaurant_id, created_by_user_id
        "#,
    )
    .bind(&new_comment.content)
    .bind(restaurant_id)
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("insert comment")
}

pub async fn get(db: &PgPool, comment_id: i64) -> anyhow::Result<Option<Comment>> {
    let rows = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, content, created_at, restaurant_id, created_by_user_id
          FROM comments
         WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_all(db)
    .await
    .context("get comment")?;
    Ok(exactly_one(rows))
}

/// Newest first.
pub async fn find_for_restaurant(db: &PgPool, restaurant_id: i64) -> anyhow::Result<Vec<Comment>> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, content, created_at, restaurant_id, created_by_user_id
          FROM comments
         WHERE restaurant_id = $1
         ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(db)
    .await
    .context("list comments by restaurant")
}

pub async fn delete(db: &PgPool, comment_id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(db)
        .await
        .context("delete comment")?;
    Ok(())
}
