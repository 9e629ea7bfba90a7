use anyhow::Context;
use sqlx::PgPool;

pub async fn create(db: &PgPool, token: &str, user_id: i64) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(token)
        .bind(user_id)
        .execute(db)
        .await
        .context("insert session")?;
    Ok(())
}

/// User owning a live session token.
pub async fn find_user_id(db: &PgPool, token: &str) -> anyhow::Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM sessions WHERE token = $1")
        .bind(token)
        .fetch_optional(db)
        .await
        .context("find session")?;
    Ok(row.map(|(id,)| id))
}

pub async fn delete(db: &PgPool, token: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(db)
        .await
        .context("delete session")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[sqlx::test(migrations = "./migrations")]
    async fn session_lifecycle(db: PgPool) {
        let user = test_support::user(&db, "jiro").await;

        create(&db, "abcde12345", user.id).await.unwrap();
        assert_eq!(find_user_id(&db, "abcde12345").await.unwrap(), Some(user.id));
        assert_eq!(find_user_id(&db, "unknown").await.unwrap(), None);

        delete(&db, "abcde12345").await.unwrap();
        delete(&db, "abcde12345").await.unwrap();
        assert_eq!(find_user_id(&db, "abcde12345").await.unwrap(), None);
    }
}
