use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{NewPhotoUrl, PhotoUrl};
use crate::db::exactly_one;

pub async fn find_for_restaurants(
    db: &PgPool,
    restaurant_ids: &[i64],
) -> anyhow::Result<Vec<PhotoUrl>> {
    sqlx::query_as::<_, PhotoUrl>(
        r#"
        SELECT id, url, restaurant_id
          FROM photo_url
         WHERE restaurant_id = ANY($1)
         ORDER BY id ASC
        "#,
    )
    .bind(restaurant_ids)
    .fetch_all(db)
    .await
    .context("list photos by restaurants")
}

pub async fn find_for_restaurant(db: &PgPool, restaurant_id: i64) -> anyhow::Result<Vec<PhotoUrl>> {
    sqlx::query_as::<_, PhotoUrl>(
        r#"
        SELECT id, url, restaurant_id
          FROM photo_url
         WHERE restaurant_id = $1
         ORDER BY id ASC
        "#,
    )
    .bind(restaurant_id)
    .fetch_all(db)
    .await
    .context("list photos by restaurant")
}

/// Inserts each photo in order and returns the persisted rows.
pub async fn create_for_restaurant(
    db: &PgPool,
    restaurant_id: i64,
    photos: &[NewPhotoUrl],
) -> anyhow::Result<Vec<PhotoUrl>> {
    let mut persisted = Vec::with_capacity(photos.len());
    for photo in photos {
        let row = sqlx::query_as::<_, PhotoUrl>(
            r#"
            INSERT INTO photo_url (url, restaurant_id)
            VALUES ($1, $2)
            RETURNING id, url, restaurant_id
            "#,
        )
        .bind(&photo.url)
        .bind(restaurant_id)
        .fetch_one(db)
        .await
        .with_context(|| format!("insert photo {}", photo.url))?;
        persisted.push(row);
    }
    Ok(persisted)
}

pub async fn get(db: &PgPool, photo_id: i64) -> anyhow::Result<Option<PhotoUrl>> {
    let rows = sqlx::query_as::<_, PhotoUrl>(
        "SELECT id, url, restaurant_id FROM photo_url WHERE id = $1",
    )
    .bind(photo_id)
    .fetch_all(db)
    .await
    .context("get photo")?;
    Ok(exactly_one(rows))
}

pub async fn delete(db: &PgPool, photo_id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM photo_url WHERE id = $1")
        .bind(photo_id)
        .execute(db)
        .await
        .context("delete photo")?;
    Ok(())
}
