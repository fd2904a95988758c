//! Publication date (de)serialization
//!
//! Serialized as RFC 3339. Accepted on input:
//! - RFC 3339 (`2020-01-01T10:00:00Z`, `2020-01-01T10:00:00+02:00`)
//! - naive date-time, taken as UTC (`2020-01-01T10:00:00`, fractional seconds allowed)
//! - plain date, midnight UTC (`2020-01-01`)
//!
//! Only years 0000 through 9999 (after conversion to UTC) are accepted, the
//! range RFC 3339 can write back out.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const MAX_YEAR: i32 = 9999;

/// Parse a publication date in any of the accepted formats
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    parse_any(raw.trim()).filter(|dt| (0..=MAX_YEAR).contains(&dt.year()))
}

fn parse_any(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid publication date: {}", raw)))
}

/// Same as the parent module, for `Option<DateTime<Utc>>` fields
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => super::parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid publication date: {}", raw))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_plain_date() {
        let dt = parse("2020-01-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2020, 1, 1));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_naive_datetime_with_fraction() {
        // Shape written by the .NET serializer for DateTime.Now
        let dt = parse("2024-05-17T13:45:12.1234567").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.minute(), 45);
    }

    #[test]
    fn test_parse_rfc3339_offset_normalized() {
        let dt = parse("2021-06-01T02:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.day(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_parse_rejects_years_rfc3339_cannot_write() {
        assert!(parse("+12345-01-01T00:00:00").is_none());
        assert!(parse("-0001-01-01T00:00:00").is_none());
        assert!(parse("+10000-01-01").is_none());
        // in range locally, year 10000 once shifted to UTC
        assert!(parse("9999-12-31T23:00:00-02:00").is_none());

        assert_eq!(parse("9999-12-31T23:59:59").unwrap().year(), 9999);
        assert_eq!(parse("0000-01-01").unwrap().year(), 0);
    }

    #[test]
    fn test_serialized_dates_parse_back() {
        #[derive(serde::Serialize)]
        struct Wrapper(#[serde(with = "super")] DateTime<Utc>);

        for raw in ["0000-01-01", "9999-12-31T23:59:59.999999999", "1984-11-20T00:00:00"] {
            let dt = parse(raw).unwrap();
            let written = serde_json::to_value(Wrapper(dt)).unwrap();
            assert_eq!(parse(written.as_str().unwrap()), Some(dt));
        }
    }
}
