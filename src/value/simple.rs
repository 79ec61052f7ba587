//! Plain string and number codecs

use crate::error::ValueError;
use crate::value::{binary_operator, compare_numbers, BinaryOpCodec, Codec, ReduceFn, Value};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::sync::Arc;

static STRING: Lazy<Codec> = Lazy::new(|| {
    Codec::new(|input| Ok(Value::Text(input.to_string()))).with_compare(|a, b| {
        match (a.as_str(), b.as_str()) {
            (Some(a), Some(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    })
});

static INT: Lazy<Codec> = Lazy::new(|| Codec::new(parse_int).with_compare(compare_numeric));

static FLOAT: Lazy<Codec> = Lazy::new(|| Codec::new(parse_float).with_compare(compare_numeric));

static INT_WITH_BINARY_OP: Lazy<BinaryOpCodec> = Lazy::new(|| {
    let reduce: ReduceFn = Arc::new(reduce_int);
    binary_operator(INT.clone(), Some(reduce))
});

static FLOAT_WITH_BINARY_OP: Lazy<BinaryOpCodec> =
    Lazy::new(|| binary_operator(FLOAT.clone(), None));

/// Text taken verbatim
pub fn string() -> Codec {
    STRING.clone()
}

/// Signed 64-bit decimal integer
pub fn int() -> Codec {
    INT.clone()
}

/// 64-bit float, NaN rejected
pub fn float() -> Codec {
    FLOAT.clone()
}

/// Integer with an operator prefix; `.reduced()` adjusts the value by one
pub fn int_with_binary_op() -> BinaryOpCodec {
    INT_WITH_BINARY_OP.clone()
}

/// Float with an operator prefix; `.reduced()` uses the `not` flag
pub fn float_with_binary_op() -> BinaryOpCodec {
    FLOAT_WITH_BINARY_OP.clone()
}

pub(crate) fn parse_int(input: &str) -> Result<Value, ValueError> {
    input
        .trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| ValueError::NotANumber(input.to_string()))
}

fn parse_float(input: &str) -> Result<Value, ValueError> {
    match input.trim().parse::<f64>() {
        Ok(f) if !f.is_nan() => Ok(Value::Float(f)),
        _ => Err(ValueError::NotANumber(input.to_string())),
    }
}

fn compare_numeric(a: &Value, b: &Value) -> Ordering {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a.cmp(&b);
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => compare_numbers(a, b),
        _ => Ordering::Equal,
    }
}

fn reduce_int(value: &Value, diff: i8) -> Result<Value, ValueError> {
    let i = value
        .as_i64()
        .ok_or_else(|| ValueError::Other(format!("cannot reduce non-integer {:?}", value)))?;
    i.checked_add(i64::from(diff))
        .map(Value::Integer)
        .ok_or_else(|| ValueError::OutOfRange(format!("{} {:+}", i, diff)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(
            string().parse("Hello:World").unwrap(),
            Value::from("Hello:World")
        );
    }

    #[test]
    fn test_int_parse() {
        assert_eq!(int().parse("24").unwrap(), Value::Integer(24));
        assert_eq!(int().parse("-7").unwrap(), Value::Integer(-7));
        assert_eq!(
            int().parse("abc").unwrap_err(),
            ValueError::NotANumber("abc".to_string())
        );
    }

    #[test]
    fn test_float_rejects_nan() {
        assert_eq!(float().parse("2.5").unwrap(), Value::Float(2.5));
        assert!(float().parse("NaN").is_err());
        assert!(float().parse("one").is_err());
    }

    #[test]
    fn test_numeric_compare() {
        let codec = int();
        assert_eq!(
            codec.compare(&Value::Integer(1), &Value::Integer(2)),
            Ordering::Less
        );
        assert_eq!(
            codec.compare(&Value::Integer(i64::MAX), &Value::Integer(i64::MAX - 1)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_int_reduction_overflow() {
        assert_eq!(reduce_int(&Value::Integer(5), -1).unwrap(), Value::Integer(4));
        assert!(matches!(
            reduce_int(&Value::Integer(i64::MAX), 1),
            Err(ValueError::OutOfRange(_))
        ));
    }
}
