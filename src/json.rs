//! Serde helpers shared by the JSON views and request bodies.

use serde::{de, Deserialize, Deserializer, Serializer};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime, UtcOffset,
};

const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// `2016-02-29T06:07:55.000Z`, always in UTC.
pub fn timestamp<S: Serializer>(at: &OffsetDateTime, s: S) -> Result<S::Ok, S::Error> {
    let formatted = at
        .to_offset(UtcOffset::UTC)
        .format(TIMESTAMP)
        .map_err(serde::ser::Error::custom)?;
    s.serialize_str(&formatted)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Value(T),
    Text(String),
}

fn parse_lenient<'de, T, D>(v: Option<Lenient<T>>) -> Result<Option<T>, D::Error>
where
    T: std::str::FromStr,
    D: Deserializer<'de>,
{
    match v {
        None => Ok(None),
        Some(Lenient::Value(v)) => Ok(Some(v)),
        Some(Lenient::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Lenient::Text(s)) => s
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid number: {}", s))),
    }
}

/// Accepts `1.23`, `"1.23"`, `""` or `null`.
pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Option::<Lenient<f64>>::deserialize(d)?;
    parse_lenient::<f64, D>(v)
}

/// Accepts `2`, `"2"`, `""` or `null`.
pub fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v = Option::<Lenient<i64>>::deserialize(d)?;
    parse_lenient::<i64, D>(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Stamp {
        #[serde(serialize_with = "timestamp")]
        at: OffsetDateTime,
    }

    #[derive(Deserialize)]
    struct Numbers {
        #[serde(default, deserialize_with = "lenient_f64")]
        lat: Option<f64>,
        #[serde(default, deserialize_with = "lenient_i64")]
        id: Option<i64>,
    }

    #[test]
    fn timestamp_has_millis_and_zulu() {
        let json = serde_json::to_string(&Stamp {
            at: OffsetDateTime::UNIX_EPOCH,
        })
        .unwrap();
        assert_eq!(json, r#"{"at":"1970-01-01T00:00:00.000Z"}"#);
    }

    #[test]
    fn timestamp_is_normalized_to_utc() {
        let at = time::macros::datetime!(2016-02-29 15:07:55.123 +09:00);
        let json = serde_json::to_string(&Stamp { at }).unwrap();
        assert_eq!(json, r#"{"at":"2016-02-29T06:07:55.123Z"}"#);
    }

    #[test]
    fn numbers_accept_strings_and_numbers() {
        let n: Numbers = serde_json::from_str(r#"{"lat":"1.23","id":"2"}"#).unwrap();
        assert_eq!(n.lat, Some(1.23));
        assert_eq!(n.id, Some(2));

        let n: Numbers = serde_json::from_str(r#"{"lat":2.34,"id":7}"#).unwrap();
        assert_eq!(n.lat, Some(2.34));
        assert_eq!(n.id, Some(7));
    }

    #[test]
    fn numbers_may_be_missing_or_blank() {
        let n: Numbers = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!((n.lat, n.id), (None, None));
        let n: Numbers = serde_json::from_str(r#"{"lat":"","id":null}"#).unwrap();
        assert_eq!((n.lat, n.id), (None, None));
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        assert!(serde_json::from_str::<Numbers>(r#"{"id":"two"}"#).is_err());
    }
}
