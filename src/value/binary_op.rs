//! Values prefixed with a comparison operator (`<`, `<=`, `=`, `!=`, `>=`, `>`)
//!
//! [`binary_operator`] wraps any base codec. Besides the literal form it derives
//! a `reduced` codec in which the inclusive operators `<=` and `>=` are rewritten
//! to the exclusive `<` and `>`: either with a `not` flag and the value left
//! untouched, or, when a reduction function is supplied, by nudging the value
//! one step (`>=5` becomes `>4`).

use crate::error::ValueError;
use crate::value::{Codec, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Comparison operator as written in a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "=")]
    EqualTo,
    #[serde(rename = "!=")]
    NotEqualTo,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqualTo,
    #[serde(rename = ">=")]
    GreaterThanOrEqualTo,
    #[serde(rename = ">")]
    GreaterThan,
}

impl BinaryOperator {
    /// Ordering of operators when two values carry different ones
    pub const PRIORITY: [BinaryOperator; 6] = [
        BinaryOperator::EqualTo,
        BinaryOperator::NotEqualTo,
        BinaryOperator::LessThan,
        BinaryOperator::LessThanOrEqualTo,
        BinaryOperator::GreaterThanOrEqualTo,
        BinaryOperator::GreaterThan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::EqualTo => "=",
            BinaryOperator::NotEqualTo => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqualTo => "<=",
            BinaryOperator::GreaterThanOrEqualTo => ">=",
            BinaryOperator::GreaterThan => ">",
        }
    }

    #[inline]
    pub fn priority(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|op| *op == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator left after reduction: never `<=` or `>=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReducedOperator {
    #[serde(rename = "=")]
    EqualTo,
    #[serde(rename = "!=")]
    NotEqualTo,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
}

impl ReducedOperator {
    /// The same operator as a [`BinaryOperator`]
    pub fn widen(self) -> BinaryOperator {
        match self {
            ReducedOperator::EqualTo => BinaryOperator::EqualTo,
            ReducedOperator::NotEqualTo => BinaryOperator::NotEqualTo,
            ReducedOperator::LessThan => BinaryOperator::LessThan,
            ReducedOperator::GreaterThan => BinaryOperator::GreaterThan,
        }
    }

    #[inline]
    pub fn priority(self) -> usize {
        self.widen().priority()
    }
}

impl fmt::Display for ReducedOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.widen().as_str())
    }
}

/// Literal operator and value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOpValue {
    pub value: Box<Value>,
    pub operator: BinaryOperator,
}

impl BinaryOpValue {
    pub fn new(operator: BinaryOperator, value: impl Into<Value>) -> Self {
        Self {
            value: Box::new(value.into()),
            operator,
        }
    }
}

/// Reduced operator and value.
///
/// `not` is `Some` on the generic path and `None` when the value was adjusted
/// by a reduction function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedBinaryOpValue {
    pub value: Box<Value>,
    pub operator: ReducedOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<bool>,
}

impl ReducedBinaryOpValue {
    pub fn new(operator: ReducedOperator, value: impl Into<Value>, not: Option<bool>) -> Self {
        Self {
            value: Box::new(value.into()),
            operator,
            not,
        }
    }

    #[inline]
    pub fn is_negated(&self) -> bool {
        self.not == Some(true)
    }
}

/// Moves a value one step (`diff` is `1` or `-1`)
pub type ReduceFn = Arc<dyn Fn(&Value, i8) -> Result<Value, ValueError> + Send + Sync>;

/// Literal and reduced codecs derived from one base codec
#[derive(Clone, Debug)]
pub struct BinaryOpCodec {
    codec: Codec,
    reduced: Codec,
}

impl BinaryOpCodec {
    /// Produces [`Value::BinaryOp`]
    pub fn codec(&self) -> Codec {
        self.codec.clone()
    }

    /// Produces [`Value::Reduced`]
    pub fn reduced(&self) -> Codec {
        self.reduced.clone()
    }
}

impl From<BinaryOpCodec> for Codec {
    fn from(codec: BinaryOpCodec) -> Self {
        codec.codec
    }
}

/// Wrap `base` with operator parsing, comparison and scoring
pub fn binary_operator(base: Codec, reduce: Option<ReduceFn>) -> BinaryOpCodec {
    let literal_base = base.clone();
    let compare_base = base.clone();
    let complexity_base = base.clone();
    let codec = Codec::new(move |input| parse_literal(&literal_base, input).map(Value::BinaryOp))
        .with_compare(move |a, b| compare_binary_ops(a, b, &compare_base))
        .with_complexity(move |value| match value {
            Value::BinaryOp(op) => complexity_base.complexity(&op.value),
            other => complexity_base.complexity(other),
        });

    let reduced_base = base.clone();
    let compare_base = base.clone();
    let complexity_base = base;
    let reduced = Codec::new(move |input| {
        let literal = parse_literal(&reduced_base, input)?;
        reduce_operator(literal, reduce.as_ref()).map(Value::Reduced)
    })
    .with_compare(move |a, b| compare_binary_ops(a, b, &compare_base))
    .with_complexity(move |value| match value {
        Value::Reduced(op) => {
            u32::from(op.is_negated()).saturating_add(complexity_base.complexity(&op.value))
        }
        other => complexity_base.complexity(other),
    });

    BinaryOpCodec { codec, reduced }
}

/// Split an optional operator prefix off `input`, defaulting to `=`
pub fn split_operator(input: &str) -> (BinaryOperator, &str) {
    const PREFIXES: [(&str, BinaryOperator); 6] = [
        ("!=", BinaryOperator::NotEqualTo),
        ("<=", BinaryOperator::LessThanOrEqualTo),
        (">=", BinaryOperator::GreaterThanOrEqualTo),
        ("=", BinaryOperator::EqualTo),
        ("<", BinaryOperator::LessThan),
        (">", BinaryOperator::GreaterThan),
    ];

    for (prefix, operator) in PREFIXES {
        if let Some(rest) = input.strip_prefix(prefix) {
            return (operator, rest);
        }
    }
    (BinaryOperator::EqualTo, input)
}

fn parse_literal(base: &Codec, input: &str) -> Result<BinaryOpValue, ValueError> {
    let (operator, rest) = split_operator(input);
    Ok(BinaryOpValue {
        value: Box::new(base.parse(rest)?),
        operator,
    })
}

/// Rewrite `<=`/`>=` into `<`/`>`.
///
/// Without `reduce` the value is kept and the comparison is flipped and
/// negated (`>=N` is `not <N`). With `reduce` the value moves one step and no
/// flag is recorded (`>=N` is `>N-1`).
pub fn reduce_operator(
    literal: BinaryOpValue,
    reduce: Option<&ReduceFn>,
) -> Result<ReducedBinaryOpValue, ValueError> {
    let BinaryOpValue { value, operator } = literal;
    let reduced = match (operator, reduce) {
        (BinaryOperator::GreaterThanOrEqualTo, Some(reduce)) => ReducedBinaryOpValue {
            value: Box::new(reduce(&value, -1)?),
            operator: ReducedOperator::GreaterThan,
            not: None,
        },
        (BinaryOperator::GreaterThanOrEqualTo, None) => ReducedBinaryOpValue {
            value,
            operator: ReducedOperator::LessThan,
            not: Some(true),
        },
        (BinaryOperator::LessThanOrEqualTo, Some(reduce)) => ReducedBinaryOpValue {
            value: Box::new(reduce(&value, 1)?),
            operator: ReducedOperator::LessThan,
            not: None,
        },
        (BinaryOperator::LessThanOrEqualTo, None) => ReducedBinaryOpValue {
            value,
            operator: ReducedOperator::GreaterThan,
            not: Some(true),
        },
        (other, reduce) => ReducedBinaryOpValue {
            value,
            operator: match other {
                BinaryOperator::NotEqualTo => ReducedOperator::NotEqualTo,
                BinaryOperator::LessThan => ReducedOperator::LessThan,
                BinaryOperator::GreaterThan => ReducedOperator::GreaterThan,
                _ => ReducedOperator::EqualTo,
            },
            not: if reduce.is_some() { None } else { Some(false) },
        },
    };
    Ok(reduced)
}

/// Order two operator values.
///
/// Differing `not` flags decide first (`false` sorts lower). Otherwise equal
/// operators defer to the base codec, and different operators follow
/// [`BinaryOperator::PRIORITY`].
pub fn compare_binary_ops(a: &Value, b: &Value, base: &Codec) -> Ordering {
    match (a, b) {
        (Value::BinaryOp(a), Value::BinaryOp(b)) => {
            compare_operands(a.operator.priority(), b.operator.priority(), &a.value, &b.value, base)
        }
        (Value::Reduced(a), Value::Reduced(b)) => {
            if let (Some(a_not), Some(b_not)) = (a.not, b.not) {
                if a_not != b_not {
                    return a_not.cmp(&b_not);
                }
            }
            compare_operands(a.operator.priority(), b.operator.priority(), &a.value, &b.value, base)
        }
        _ => Ordering::Equal,
    }
}

fn compare_operands(a_op: usize, b_op: usize, a: &Value, b: &Value, base: &Codec) -> Ordering {
    if a_op == b_op {
        base.compare(a, b)
    } else {
        a_op.cmp(&b_op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{float_with_binary_op, int_with_binary_op};

    #[test]
    fn test_split_operator() {
        let cases = [
            ("5", BinaryOperator::EqualTo, "5"),
            ("=5", BinaryOperator::EqualTo, "5"),
            ("!=5", BinaryOperator::NotEqualTo, "5"),
            ("<5", BinaryOperator::LessThan, "5"),
            ("<=5", BinaryOperator::LessThanOrEqualTo, "5"),
            (">=5", BinaryOperator::GreaterThanOrEqualTo, "5"),
            (">5", BinaryOperator::GreaterThan, "5"),
            ("!5", BinaryOperator::EqualTo, "!5"),
        ];
        for (input, operator, rest) in cases {
            assert_eq!(split_operator(input), (operator, rest), "Failed for: {}", input);
        }
    }

    #[test]
    fn test_literal_parse() {
        let codec = int_with_binary_op().codec();
        assert_eq!(
            codec.parse(">=10").unwrap(),
            Value::BinaryOp(BinaryOpValue::new(BinaryOperator::GreaterThanOrEqualTo, 10i64))
        );
        assert_eq!(
            codec.parse("10").unwrap(),
            Value::BinaryOp(BinaryOpValue::new(BinaryOperator::EqualTo, 10i64))
        );
        assert!(codec.parse(">=ten").is_err());
    }

    #[test]
    fn test_special_reduction() {
        let reduced = int_with_binary_op().reduced();
        assert_eq!(
            reduced.parse(">=10").unwrap(),
            Value::Reduced(ReducedBinaryOpValue::new(ReducedOperator::GreaterThan, 9i64, None))
        );
        assert_eq!(
            reduced.parse("<=10").unwrap(),
            Value::Reduced(ReducedBinaryOpValue::new(ReducedOperator::LessThan, 11i64, None))
        );
        assert_eq!(
            reduced.parse("!=10").unwrap(),
            Value::Reduced(ReducedBinaryOpValue::new(ReducedOperator::NotEqualTo, 10i64, None))
        );
    }

    #[test]
    fn test_special_reduction_overflow() {
        let reduced = int_with_binary_op().reduced();
        let input = format!("<={}", i64::MAX);
        assert!(matches!(reduced.parse(&input), Err(ValueError::OutOfRange(_))));
    }

    #[test]
    fn test_generic_reduction() {
        let reduced = float_with_binary_op().reduced();
        assert_eq!(
            reduced.parse(">=1.5").unwrap(),
            Value::Reduced(ReducedBinaryOpValue::new(ReducedOperator::LessThan, 1.5, Some(true)))
        );
        assert_eq!(
            reduced.parse("<=1.5").unwrap(),
            Value::Reduced(ReducedBinaryOpValue::new(
                ReducedOperator::GreaterThan,
                1.5,
                Some(true)
            ))
        );
        assert_eq!(
            reduced.parse(">1.5").unwrap(),
            Value::Reduced(ReducedBinaryOpValue::new(
                ReducedOperator::GreaterThan,
                1.5,
                Some(false)
            ))
        );
    }

    #[test]
    fn test_operator_priority_ordering() {
        let codec = int_with_binary_op().codec();
        let less = codec.parse("<100").unwrap();
        let greater = codec.parse(">1").unwrap();
        assert_eq!(codec.compare(&less, &greater), Ordering::Less);
        assert_eq!(codec.compare(&greater, &less), Ordering::Greater);
        assert_eq!(codec.compare(&less, &less), Ordering::Equal);

        let a = codec.parse(">1").unwrap();
        let b = codec.parse(">2").unwrap();
        assert_eq!(codec.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_not_flag_decides_first() {
        let codec = float_with_binary_op().reduced();
        let plain = Value::Reduced(ReducedBinaryOpValue::new(
            ReducedOperator::GreaterThan,
            1.0,
            Some(false),
        ));
        let negated = Value::Reduced(ReducedBinaryOpValue::new(
            ReducedOperator::EqualTo,
            1.0,
            Some(true),
        ));
        assert_eq!(codec.compare(&plain, &negated), Ordering::Less);
        assert_eq!(codec.compare(&negated, &plain), Ordering::Greater);
    }

    #[test]
    fn test_complexity() {
        let literal = float_with_binary_op().codec();
        assert_eq!(literal.complexity(&literal.parse(">=1").unwrap()), 1);

        let reduced = float_with_binary_op().reduced();
        assert_eq!(reduced.complexity(&reduced.parse(">=1").unwrap()), 2);
        assert_eq!(reduced.complexity(&reduced.parse(">1").unwrap()), 1);

        let special = int_with_binary_op().reduced();
        assert_eq!(special.complexity(&special.parse(">=1").unwrap()), 1);
    }

    #[test]
    fn test_inner_complexity_propagates() {
        let base = Codec::new(|s| Ok(Value::Text(s.to_string())))
            .with_complexity(|v| v.as_str().map_or(1, |s| s.len() as u32));
        let wrapped = binary_operator(base, None);
        let reduced = wrapped.reduced();
        assert_eq!(reduced.complexity(&reduced.parse("<=abc").unwrap()), 4);
        assert_eq!(wrapped.codec().complexity(&wrapped.codec().parse("<=abc").unwrap()), 3);
    }
}
