use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::Cuisine;
use crate::db::exactly_one;

pub async fn get_all(db: &PgPool) -> anyhow::Result<Vec<Cuisine>> {
    sqlx::query_as::<_, Cuisine>("SELECT id, name FROM cuisine ORDER BY id")
        .fetch_all(db)
        .await
        .context("list cuisines")
}

pub async fn get(db: &PgPool, cuisine_id: i64) -> anyhow::Result<Option<Cuisine>> {
    let rows = sqlx::query_as::<_, Cuisine>("SELECT id, name FROM cuisine WHERE id = $1")
        .bind(cuisine_id)
        .fetch_all(db)
        .await
        .context("get cuisine")?;
    Ok(exactly_one(rows))
}

pub async fn create(db: &PgPool, name: &str) -> anyhow::Result<Cuisine> {
    sqlx::query_as::<_, Cuisine>("INSERT INTO cuisine (name) VALUES ($1) RETURNING id, name")
        .bind(name)
        .fetch_one(db)
        .await
        .context("insert cuisine")
}

pub async fn find_for_restaurant(
    db: &PgPool,
    restaurant_id: i64,
) -> anyhow::Result<Option<Cuisine>> {
    sqlx::query_as::<_, Cuisine>(
        r#"
        SELECT c.id, c.name
          FROM cuisine c
          JOIN restaurant r ON r.cuisine_id = c.id
         WHERE r.id = $1
        "#,
    )
    .bind(restaurant_id)
    .fetch_optional(db)
    .await
    .context("find cuisine for restaurant")
}
