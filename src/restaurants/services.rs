//! Assembles restaurants with their photos, vocabularies, creator, comments
//! and likes into [`SerializedRestaurant`] views.

use std::collections::HashMap;

use tracing::{info, warn};

use super::{
    dto::SerializedRestaurant,
    repo,
    repo_types::{NewRestaurant, Restaurant},
};
use crate::{
    auth::access::check_owner,
    comments,
    cuisines::{self, repo_types::Cuisine},
    likes::{self, repo_types::Like},
    photos::{self, repo_types::PhotoUrl},
    price_ranges::{self, repo_types::PriceRange},
    state::AppState,
    users::{self, repo_types::User},
};

/// Rows fetched in bulk for a list of restaurants.
#[derive(Debug, Default)]
pub struct ListData {
    pub photos: Vec<PhotoUrl>,
    pub creators: Vec<User>,
    pub cuisines: Vec<Cuisine>,
    pub price_ranges: Vec<PriceRange>,
    pub likes: Vec<Like>,
}

pub enum UpdateOutcome {
    Updated(SerializedRestaurant),
    NotFound,
    Forbidden,
}

/// Whether `requester_id` is among the likers, and how many likers there are.
pub fn like_summary(likes: &[Like], requester_id: i64) -> (bool, i64) {
    let liked = likes.iter().any(|l| l.user_id == requester_id);
    (liked, likes.len() as i64)
}

/// List views keep the order of `restaurants` and carry no comments.
pub fn assemble_list(
    restaurants: Vec<Restaurant>,
    data: ListData,
    requester_id: i64,
) -> Vec<SerializedRestaurant> {
    let mut photos_by_restaurant: HashMap<i64, Vec<PhotoUrl>> = HashMap::new();
    for photo in data.photos {
        photos_by_restaurant
            .entry(photo.restaurant_id)
            .or_default()
            .push(photo);
    }
    let mut likes_by_restaurant: HashMap<i64, Vec<Like>> = HashMap::new();
    for like in data.likes {
        likes_by_restaurant
            .entry(like.restaurant_id)
            .or_default()
            .push(like);
    }
    let creators: HashMap<i64, User> = data.creators.into_iter().map(|u| (u.id, u)).collect();
    let cuisines: HashMap<i64, Cuisine> = data.cuisines.into_iter().map(|c| (c.id, c)).collect();
    let price_ranges: HashMap<i64, PriceRange> =
        data.price_ranges.into_iter().map(|p| (p.id, p)).collect();

    restaurants
        .into_iter()
        .map(|restaurant| {
            let (liked, num_likes) = likes_by_restaurant
                .get(&restaurant.id)
                .map(|likes| like_summary(likes, requester_id))
                .unwrap_or((false, 0));
            SerializedRestaurant {
                photo_urls: photos_by_restaurant
                    .remove(&restaurant.id)
                    .unwrap_or_default(),
                cuisine: cuisines.get(&restaurant.cuisine_id).cloned(),
                price_range: price_ranges.get(&restaurant.price_range_id).cloned(),
                created_by: creators.get(&restaurant.created_by_user_id).cloned(),
                comments: Vec::new(),
                liked,
                num_likes,
                restaurant,
            }
        })
        .collect()
}

/// View of a restaurant that was just created: nobody has liked or
/// commented on it yet.
pub fn fresh_view(
    restaurant: Restaurant,
    photo_urls: Vec<PhotoUrl>,
    cuisine: Option<Cuisine>,
    price_range: Option<PriceRange>,
    created_by: Option<User>,
) -> SerializedRestaurant {
    SerializedRestaurant {
        restaurant,
        photo_urls,
        cuisine,
        price_range,
        created_by,
        comments: Vec::new(),
        liked: false,
        num_likes: 0,
    }
}

fn ids_of(restaurants: &[Restaurant]) -> Vec<i64> {
    restaurants.iter().map(|r| r.id).collect()
}

/// Batch-loads everything the list views need: one query per table.
async fn serialize_many(
    st: &AppState,
    restaurants: Vec<Restaurant>,
    requester_id: i64,
) -> anyhow::Result<Vec<SerializedRestaurant>> {
    if restaurants.is_empty() {
        return Ok(Vec::new());
    }
    let ids = ids_of(&restaurants);
    let mut creator_ids: Vec<i64> = restaurants.iter().map(|r| r.created_by_user_id).collect();
    creator_ids.sort_unstable();
    creator_ids.dedup();

    let data = ListData {
        photos: photos::repo::find_for_restaurants(&st.db, &ids).await?,
        creators: users::repo::find_for_user_ids(&st.db, &creator_ids).await?,
        cuisines: cuisines::repo::get_all(&st.db).await?,
        price_ranges: price_ranges::repo::get_all(&st.db).await?,
        likes: likes::repo::find_for_restaurants(&st.db, &ids).await?,
    };
    Ok(assemble_list(restaurants, data, requester_id))
}

/// Full view with comments; `photo_urls` are supplied by the caller.
async fn serialize_one(
    st: &AppState,
    restaurant: Restaurant,
    photo_urls: Vec<PhotoUrl>,
    requester_id: i64,
) -> anyhow::Result<SerializedRestaurant> {
    let created_by = users::repo::find_for_restaurant_id(&st.db, restaurant.id).await?;
    let cuisine = cuisines::repo::find_for_restaurant(&st.db, restaurant.id).await?;
    let price_range = price_ranges::repo::find_for_restaurant(&st.db, restaurant.id).await?;
    let comments = comments::services::find_for_restaurant(&st.db, restaurant.id).await?;
    let likes = likes::repo::find_for_restaurant(&st.db, restaurant.id).await?;
    let (liked, num_likes) = like_summary(&likes, requester_id);

    Ok(SerializedRestaurant {
        restaurant,
        photo_urls,
        cuisine,
        price_range,
        created_by,
        comments,
        liked,
        num_likes,
    })
}

pub async fn get_all(
    st: &AppState,
    requester_id: i64,
) -> anyhow::Result<Vec<SerializedRestaurant>> {
    let restaurants = repo::get_all(&st.db).await?;
    serialize_many(st, restaurants, requester_id).await
}

pub async fn posted_by(st: &AppState, user_id: i64) -> anyhow::Result<Vec<SerializedRestaurant>> {
    let restaurants = repo::find_posted_by(&st.db, user_id).await?;
    serialize_many(st, restaurants, user_id).await
}

pub async fn liked_by(st: &AppState, user_id: i64) -> anyhow::Result<Vec<SerializedRestaurant>> {
    let ids: Vec<i64> = likes::repo::find_for_user(&st.db, user_id)
        .await?
        .into_iter()
        .map(|l| l.restaurant_id)
        .collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let restaurants = repo::find_by_ids(&st.db, &ids).await?;
    serialize_many(st, restaurants, user_id).await
}

pub async fn get(
    st: &AppState,
    restaurant_id: i64,
    requester_id: i64,
) -> anyhow::Result<Option<SerializedRestaurant>> {
    let Some(restaurant) = repo::get(&st.db, restaurant_id).await? else {
        return Ok(None);
    };
    let photo_urls = photos::repo::find_for_restaurant(&st.db, restaurant.id).await?;
    serialize_one(st, restaurant, photo_urls, requester_id)
        .await
        .map(Some)
}

/// Callers check `NewRestaurant::missing_for_create` first.
pub async fn create(
    st: &AppState,
    new: &NewRestaurant,
    creator_id: i64,
) -> anyhow::Result<SerializedRestaurant> {
    let restaurant = repo::create(&st.db, new, creator_id).await?;
    let photo_urls =
        photos::repo::create_for_restaurant(&st.db, restaurant.id, &new.photo_urls).await?;
    let created_by = users::repo::get(&st.db, creator_id).await?;
    let cuisine = cuisines::repo::get(&st.db, restaurant.cuisine_id).await?;
    let price_range = price_ranges::repo::get(&st.db, restaurant.price_range_id).await?;

    info!(
        restaurant_id = restaurant.id,
        creator_id,
        photos = photo_urls.len(),
        "restaurant created"
    );
    Ok(fresh_view(restaurant, photo_urls, cuisine, price_range, created_by))
}

/// Updates the row and adds photo URLs not stored yet; stored photos are
/// never removed here.
pub async fn update(
    st: &AppState,
    restaurant_id: i64,
    new: &NewRestaurant,
    requester_id: i64,
) -> anyhow::Result<UpdateOutcome> {
    let Some(current) = repo::get(&st.db, restaurant_id).await? else {
        return Ok(UpdateOutcome::NotFound);
    };
    if !check_owner(current.created_by_user_id, requester_id).is_allowed() {
        warn!(restaurant_id, requester_id, "restaurant update by non-owner rejected");
        return Ok(UpdateOutcome::Forbidden);
    }
    let Some(restaurant) = repo::update(&st.db, restaurant_id, new).await? else {
        return Ok(UpdateOutcome::NotFound);
    };

    let mut photo_urls = photos::repo::find_for_restaurant(&st.db, restaurant.id).await?;
    let additions = photos::services::only_new(&photo_urls, &new.photo_urls);
    let persisted = photos::repo::create_for_restaurant(&st.db, restaurant.id, &additions).await?;
    photo_urls.extend(persisted);

    info!(restaurant_id, added_photos = additions.len(), "restaurant updated");
    let view = serialize_one(st, restaurant, photo_urls, requester_id).await?;
    Ok(UpdateOutcome::Updated(view))
}

/// Deletes the restaurant and then its photo files, but only for its
/// creator; anyone else is ignored. Returns whether anything was deleted.
pub async fn delete(st: &AppState, restaurant_id: i64, requester_id: i64) -> anyhow::Result<bool> {
    let Some(restaurant) = repo::get(&st.db, restaurant_id).await? else {
        return Ok(false);
    };
    if !check_owner(restaurant.created_by_user_id, requester_id).is_allowed() {
        warn!(restaurant_id, requester_id, "restaurant delete by non-owner skipped");
        return Ok(false);
    }

    let photo_urls = photos::repo::find_for_restaurant(&st.db, restaurant_id).await?;
    repo::delete(&st.db, restaurant_id).await?;
    let files = photos::services::delete_files(st.storage.as_ref(), &photo_urls).await;

    info!(restaurant_id, files, "restaurant deleted");
    Ok(true)
}
