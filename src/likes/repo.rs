use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::Like;

/// Inserts the pair unless it already exists; either way returns it.
pub async fn create(db: &PgPool, user_id: i64, restaurant_id: i64) -> anyhow::Result<Like> {
    sqlx::query(
        r#"
        INSERT INTO likes (user_id, restaurant_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, restaurant_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(restaurant_id)
    .execute(db)
    .await
    .context("insert like")?;

    Ok(Like {
        user_id,
        restaurant_id,
    })
}

pub async fn delete(db: &PgPool, user_id: i64, restaurant_id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM likes WHERE user_id = $1 AND restaurant_id = $2")
        .bind(user_id)
        .bind(restaurant_id)
        .execute(db)
        .await
        .context("delete like")?;
    Ok(())
}

pub async fn find_for_restaurant(db: &PgPool, restaurant_id: i64) -> anyhow::Result<Vec<Like>> {
    sqlx::query_as::<_, Like>("SELECT user_id, restaurant_id FROM likes WHERE restaurant_id = $1")
        .bind(restaurant_id)
        .fetch_all(db)
        .await
        .context("list likes by restaurant")
}

/// Likes of every restaurant in the batch, for list views.
pub async fn find_for_restaurants(
    db: &PgPool,
    restaurant_ids: &[i64],
) -> anyhow::Result<Vec<Like>> {
    sqlx::query_as::<_, Like>(
        "SELECT user_id, restaurant_id FROM likes WHERE restaurant_id = ANY($1)",
    )
    .bind(restaurant_ids)
    .fetch_all(db)
    .await
    .context("list likes by restaurants")
}

pub async fn find_for_user(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Like>> {
    sqlx::query_as::<_, Like>("SELECT user_id, restaurant_id FROM likes WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("list likes by user")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[sqlx::test(migrations = "./migrations")]
    async fn liking_twice_stores_one_row(db: PgPool) {
        let user = test_support::user(&db, "taro").await;
        let restaurant = test_support::restaurant(&db, user.id).await;

        create(&db, user.id, restaurant.id).await.unwrap();
        let again = create(&db, user.id, restaurant.id).await.unwrap();

        assert_eq!(
            again,
            Like {
                user_id: user.id,
                restaurant_id: restaurant.id,
            }
        );
        assert_eq!(find_for_restaurant(&db, restaurant.id).await.unwrap(), vec![again]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn unlike_removes_only_that_pair(db: PgPool) {
        let taro = test_support::user(&db, "taro").await;
        let jiro = test_support::user(&db, "jiro").await;
        let restaurant = test_support::restaurant(&db, taro.id).await;
        create(&db, taro.id, restaurant.id).await.unwrap();
        create(&db, jiro.id, restaurant.id).await.unwrap();

        delete(&db, taro.id, restaurant.id).await.unwrap();
        delete(&db, taro.id, restaurant.id).await.unwrap();

        let left = find_for_restaurant(&db, restaurant.id).await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].user_id, jiro.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn batched_and_per_user_lookups(db: PgPool) {
        let taro = test_support::user(&db, "taro").await;
        let first = test_support::restaurant(&db, taro.id).await;
        let second = test_support::restaurant(&db, taro.id).await;
        let unliked = test_support::restaurant(&db, taro.id).await;
        create(&db, taro.id, first.id).await.unwrap();
        create(&db, taro.id, second.id).await.unwrap();

        let batch = find_for_restaurants(&db, &[first.id, unliked.id]).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].restaurant_id, first.id);

        let mut liked: Vec<i64> = find_for_user(&db, taro.id)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.restaurant_id)
            .collect();
        liked.sort_unstable();
        assert_eq!(liked, vec![first.id, second.id]);
    }
}
