use anyhow::Context;
use sqlx::PgPool;

/// Applies the bundled schema in `./migrations`.
pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")
}

/// A lookup is a hit only when exactly one row came back.
pub fn exactly_one<T>(mut rows: Vec<T>) -> Option<T> {
    if rows.len() == 1 {
        rows.pop()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_requires_a_single_row() {
        assert_eq!(exactly_one(Vec::<i64>::new()), None);
        assert_eq!(exactly_one(vec![7]), Some(7));
        assert_eq!(exactly_one(vec![7, 8]), None);
    }
}
