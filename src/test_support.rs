//! Fixtures for tests running against a freshly migrated database.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    photos::repo_types::NewPhotoUrl,
    restaurants::{
        self,
        repo_types::{NewRestaurant, Restaurant},
    },
    state::AppState,
    storage::fake::FakeStorage,
    users::{self, repo_types::User},
};

/// State over `db`, plus a handle on the storage to inspect deletions.
pub fn state(db: PgPool) -> (AppState, Arc<FakeStorage>) {
    let storage = Arc::new(FakeStorage::default());
    (AppState::with_db(db, storage.clone()), storage)
}

pub async fn user(db: &PgPool, name: &str) -> User {
    users::repo::create(db, &format!("{name}@email.com"), "not-a-hash", name)
        .await
        .expect("insert user")
}

/// Afuri, ramen, `~999`.
pub fn new_restaurant(photo_urls: &[&str]) -> NewRestaurant {
    NewRestaurant {
        name: "Afuri".into(),
        address: Some("Roppongi".into()),
        nearest_station: Some("Roppongi Station".into()),
        place_id: Some("some-place-id".into()),
        latitude: Some(1.23),
        longitude: Some(2.34),
        notes: Some("soooo goood".into()),
        cuisine_id: Some(2),
        price_range_id: Some(1),
        photo_urls: photo_urls
            .iter()
            .map(|url| NewPhotoUrl {
                url: url.to_string(),
            })
            .collect(),
    }
}

/// Bare restaurant row without photos.
pub async fn restaurant(db: &PgPool, created_by_user_id: i64) -> Restaurant {
    restaurants::repo::create(db, &new_restaurant(&[]), created_by_user_id)
        .await
        .expect("insert restaurant")
}

/// `SELECT count(*)` over `table` rows whose `column` equals `id`.
pub async fn count(db: &PgPool, table: &str, column: &str, id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT count(*) FROM {table} WHERE {column} = $1"))
        .bind(id)
        .fetch_one(db)
        .await
        .expect("count rows")
}
