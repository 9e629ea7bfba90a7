use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::json::{lenient_f64, lenient_i64};
use crate::photos::repo_types::NewPhotoUrl;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub nearest_station: Option<String>,
    pub place_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub cuisine_id: i64,
    pub price_range_id: i64,
    pub created_by_user_id: i64,
    #[serde(serialize_with = "crate::json::timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(serialize_with = "crate::json::timestamp")]
    pub updated_at: OffsetDateTime,
}

/// Restaurant fields as sent by clients on create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub nearest_station: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cuisine_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price_range_id: Option<i64>,
    #[serde(default)]
    pub photo_urls: Vec<NewPhotoUrl>,
}

impl NewRestaurant {
    /// First field a brand-new restaurant cannot do without.
    pub fn missing_for_create(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name")
        } else if self.cuisine_id.is_none() {
            Some("cuisine_id")
        } else if self.price_range_id.is_none() {
            Some("price_range_id")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stringly_typed_numbers() {
        let payload = r#"{
            "name": "Afuri",
            "address": "Roppongi",
            "nearest_station": "Roppongi Station",
            "place_id": "some-place-id",
            "latitude": "1.23",
            "longitude": "2.34",
            "notes": "soooo goood",
            "photo_urls": [{"url": "http://some-url"}],
            "cuisine_id": "2",
            "price_range_id": "1"
        }"#;
        let new: NewRestaurant = serde_json::from_str(payload).unwrap();

        assert_eq!(new.name, "Afuri");
        assert_eq!(new.latitude, Some(1.23));
        assert_eq!(new.longitude, Some(2.34));
        assert_eq!(new.cuisine_id, Some(2));
        assert_eq!(new.price_range_id, Some(1));
        assert_eq!(new.photo_urls[0].url, "http://some-url");
        assert_eq!(new.missing_for_create(), None);
    }

    #[test]
    fn update_payload_may_omit_price_range() {
        let new: NewRestaurant =
            serde_json::from_str(r#"{"name": "Updated Name", "cuisine_id": "2"}"#).unwrap();
        assert_eq!(new.price_range_id, None);
        assert!(new.photo_urls.is_empty());
        assert_eq!(new.missing_for_create(), Some("price_range_id"));
    }

    #[test]
    fn blank_name_is_missing() {
        let new = NewRestaurant {
            name: "  ".into(),
            cuisine_id: Some(1),
            price_range_id: Some(1),
            ..Default::default()
        };
        assert_eq!(new.missing_for_create(), Some("name"));
    }
}
