use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;

/// Wire shape used by the API for request bodies, matching an HTML
/// `datetime-local` value: `2024-01-01T09:30`.
const MINUTE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// Responses may carry seconds: `2024-01-01T09:30:00`.
const SECOND_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

pub fn format_datetime(dt: PrimitiveDateTime) -> String {
    dt.format(MINUTE_FORMAT)
        .expect("minute format is infallible for a valid datetime")
}

pub fn parse_datetime(s: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(s, SECOND_FORMAT).or_else(|_| PrimitiveDateTime::parse(s, MINUTE_FORMAT))
}

/// Serde adapter for datetime fields on the wire. Serializes minute
/// precision, accepts minute or second precision when deserializing.
pub mod datetime_minute {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S: Serializer>(
        dt: &PrimitiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_datetime(*dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<PrimitiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_datetime(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_minute_precision() {
        assert_eq!(
            parse_datetime("2024-01-01T09:30").unwrap(),
            datetime!(2024-01-01 09:30)
        );
    }

    #[test]
    fn parses_second_precision() {
        assert_eq!(
            parse_datetime("2024-01-01T09:30:45").unwrap(),
            datetime!(2024-01-01 09:30:45)
        );
    }

    #[test]
    fn formats_minute_precision() {
        assert_eq!(format_datetime(datetime!(2024-01-01 09:30:45)), "2024-01-01T09:30");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("yesterday").is_err());
    }
}
