use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::PriceRange;
use crate::db::exactly_one;

pub async fn get_all(db: &PgPool) -> anyhow::Result<Vec<PriceRange>> {
    sqlx::query_as::<_, PriceRange>(r#"SELECT id, "range" FROM price_range ORDER BY id"#)
        .fetch_all(db)
        .await
        .context("list price ranges")
}

pub async fn get(db: &PgPool, price_range_id: i64) -> anyhow::Result<Option<PriceRange>> {
    let rows =
        sqlx::query_as::<_, PriceRange>(r#"SELECT id, "range" FROM price_range WHERE id = $1"#)
            .bind(price_range_id)
            .fetch_all(db)
            .await
            .context("get price range")?;
    Ok(exactly_one(rows))
}

pub async fn find_for_restaurant(
    db: &PgPool,
    restaurant_id: i64,
) -> anyhow::Result<Option<PriceRange>> {
    sqlx::query_as::<_, PriceRange>(
        r#"
        SELECT p.id, p."range"
          FROM price_range p
          JOIN restaurant r ON r.price_range_id = p.id
         WHERE r.id = $1
        "#,
    )
    .bind(restaurant_id)
    .fetch_optional(db)
    .await
    .context("find price range for restaurant")
}
