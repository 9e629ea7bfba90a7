use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::{NewRestaurant, Restaurant};
use crate::db::exactly_one;

const COLUMNS: &str = "id, name, address, nearest_station, place_id, latitude, longitude, notes, \
                       cuisine_id, price_range_id, created_by_user_id, created_at, updated_at";

pub async fn get_all(db: &PgPool) -> anyhow::Result<Vec<Restaurant>> {
    sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(db)
    .await
    .context("list restaurants")
}

pub async fn get(db: &PgPool, restaurant_id: i64) -> anyhow::Result<Option<Restaurant>> {
    let rows = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant WHERE id = $1"
    ))
    .bind(restaurant_id)
    .fetch_all(db)
    .await
    .context("get restaurant")?;
    Ok(exactly_one(rows))
}

pub async fn create(
    db: &PgPool,
    new: &NewRestaurant,
    created_by_user_id: i64,
) -> anyhow::Result<Restaurant> {
    sqlx::query_as::<_, Restaurant>(&format!(
        r#"
        INSERT INTO restaurant (
            name, address, nearest_station, place_id, latitude, longitude,
            notes, cuisine_id, price_range_id, created_by_user_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&new.name)
    .bind(&new.address)
    .bind(&new.nearest_station)
    .bind(&new.place_id)
    .bind(new.latitude)
    .bind(new.longitude)
    .bind(&new.notes)
    .bind(new.cuisine_id)
    .bind(new.price_range_id)
    .bind(created_by_user_id)
    .fetch_one(db)
    .await
    .context("insert restaurant")
}

/// Replaces the row's fields; an omitted cuisine or price range keeps the
/// stored one.
pub async fn update(
    db: &PgPool,
    restaurant_id: i64,
    new: &NewRestaurant,
) -> anyhow::Result<Option<Restaurant>> {
    sqlx::query_as::<_, Restaurant>(&format!(
        r#"
        UPDATE restaurant
           SET name = $1,
               address = $2,
               nearest_station = $3,
               place_id = $4,
               latitude = $5,
               longitude = $6,
               notes = $7,
               cuisine_id = COALESCE($8, cuisine_id),
               price_range_id = COALESCE($9, price_range_id),
               updated_at = now()
         WHERE id = $10
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&new.name)
    .bind(&new.address)
    .bind(&new.nearest_station)
    .bind(&new.place_id)
    .bind(new.latitude)
    .bind(new.longitude)
    .bind(&new.notes)
    .bind(new.cuisine_id)
    .bind(new.price_range_id)
    .bind(restaurant_id)
    .fetch_optional(db)
    .await
    .context("update restaurant")
}

pub async fn delete(db: &PgPool, restaurant_id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM restaurant WHERE id = $1")
        .bind(restaurant_id)
        .execute(db)
        .await
        .context("delete restaurant")?;
    Ok(())
}

pub async fn find_posted_by(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Restaurant>> {
    sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant WHERE created_by_user_id = $1 \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list restaurants by creator")
}

pub async fn find_by_ids(db: &PgPool, restaurant_ids: &[i64]) -> anyhow::Result<Vec<Restaurant>> {
    sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant WHERE id = ANY($1) ORDER BY created_at DESC, id DESC"
    ))
    .bind(restaurant_ids)
    .fetch_all(db)
    .await
    .context("list restaurants by ids")
}
