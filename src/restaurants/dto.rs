use serde::{Deserialize, Serialize, Serializer};

use super::repo_types::{NewRestaurant, Restaurant};
use crate::{
    comments::dto::SerializedComment, cuisines::repo_types::Cuisine,
    photos::repo_types::PhotoUrl, price_ranges::repo_types::PriceRange,
    users::repo_types::User,
};

/// `{"restaurant": {...}}`
#[derive(Debug, Deserialize)]
pub struct RestaurantWrapper {
    pub restaurant: NewRestaurant,
}

/// A restaurant together with everything a client shows alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub photo_urls: Vec<PhotoUrl>,
    pub cuisine: Option<Cuisine>,
    pub price_range: Option<PriceRange>,
    #[serde(rename = "created_by_user_name", serialize_with = "creator_name")]
    pub created_by: Option<User>,
    pub comments: Vec<SerializedComment>,
    pub liked: bool,
    pub num_likes: i64,
}

fn creator_name<S: Serializer>(user: &Option<User>, s: S) -> Result<S::Ok, S::Error> {
    match user {
        Some(u) => s.serialize_str(&u.name),
        None => s.serialize_none(),
    }
}
