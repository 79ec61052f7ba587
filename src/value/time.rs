//! Date and time codecs

use crate::error::ValueError;
use crate::value::simple::parse_int;
use crate::value::{binary_operator, is_blank, BinaryOpCodec, Codec, Value};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use std::cmp::Ordering;

static UNIX_TIMESTAMP: Lazy<Codec> =
    Lazy::new(|| Codec::new(parse_unix_timestamp).with_compare(compare_dates));

static UTC_DATE: Lazy<Codec> = Lazy::new(|| Codec::new(parse_utc_date).with_compare(compare_dates));

/// Milliseconds since the Unix epoch
pub fn unix_timestamp() -> Codec {
    UNIX_TIMESTAMP.clone()
}

/// `<year>-<month>-<day>` at midnight UTC, months counted from 1
pub fn utc_date() -> Codec {
    UTC_DATE.clone()
}

pub fn unix_timestamp_with_binary_op() -> BinaryOpCodec {
    binary_operator(unix_timestamp(), None)
}

pub fn utc_date_with_binary_op() -> BinaryOpCodec {
    binary_operator(utc_date(), None)
}

fn parse_unix_timestamp(input: &str) -> Result<Value, ValueError> {
    let millis = parse_int(input)?
        .as_i64()
        .ok_or_else(|| ValueError::NotANumber(input.to_string()))?;
    DateTime::from_timestamp_millis(millis)
        .map(Value::Timestamp)
        .ok_or_else(|| ValueError::OutOfRange(format!("timestamp {}", millis)))
}

fn parse_utc_date(input: &str) -> Result<Value, ValueError> {
    let parts: Vec<&str> = input.split('-').collect();
    if parts.len() != 3 || parts.iter().any(|p| is_blank(p)) {
        return Err(ValueError::InvalidFormat(
            "should be '<year>-<month>-<day>'".to_string(),
        ));
    }

    let number = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| ValueError::NotANumber(s.to_string()))
    };
    let year = parts[0]
        .trim()
        .parse::<i32>()
        .map_err(|_| ValueError::NotANumber(parts[0].to_string()))?;
    let month = number(parts[1])?;
    let day = number(parts[2])?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| Value::Timestamp(dt.and_utc()))
        .ok_or_else(|| ValueError::OutOfRange(format!("no such date: {}", input)))
}

fn compare_dates(a: &Value, b: &Value) -> Ordering {
    match (a.as_timestamp(), b.as_timestamp()) {
        (Some(a), Some(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unix_timestamp() {
        let value = unix_timestamp().parse("0").unwrap();
        assert_eq!(value, Value::Timestamp(Utc.timestamp_opt(0, 0).unwrap()));

        let value = unix_timestamp().parse("1700000000123").unwrap();
        assert_eq!(
            value.as_timestamp().unwrap().timestamp_millis(),
            1_700_000_000_123
        );
    }

    #[test]
    fn test_utc_date() {
        let value = utc_date().parse("2024-02-29").unwrap();
        assert_eq!(
            value,
            Value::Timestamp(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_utc_date_bad_shape() {
        for bad in ["2024-02", "2024-02-01-05", "2024--01", ""] {
            assert!(
                matches!(utc_date().parse(bad), Err(ValueError::InvalidFormat(_))),
                "Expected format error for: {}",
                bad
            );
        }
        assert!(matches!(
            utc_date().parse("2023-02-29"),
            Err(ValueError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_dates_order_chronologically() {
        let codec = utc_date();
        let earlier = codec.parse("1999-12-31").unwrap();
        let later = codec.parse("2000-01-01").unwrap();
        assert_eq!(codec.compare(&earlier, &later), Ordering::Less);
        assert_eq!(codec.compare(&later, &earlier), Ordering::Greater);
    }
}
