//! Leaf values and the codecs that parse, compare and score them
//!
//! Every value-bearing condition kind is backed by a [`Codec`]. The engine
//! never inspects a value itself beyond the generic fallback ordering in
//! [`compare_values`]; everything else goes through the kind's codec.

mod binary_op;
mod simple;
mod time;


pub use binary_op::*;
pub use simple::*;
pub use time::*;

use crate::error::ValueError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Value carried by a leaf condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Value of a flag kind (no `parse`)
    Unit,
    Text(String),
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<Utc>),
    BinaryOp(BinaryOpValue),
    Reduced(ReducedBinaryOpValue),
}

impl Value {
    /// Numeric view used by the fallback ordering
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

pub type ParseFn = Arc<dyn Fn(&str) -> Result<Value, ValueError> + Send + Sync>;
pub type CompareFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;
pub type ComplexityFn = Arc<dyn Fn(&Value) -> u32 + Send + Sync>;

/// Parse/compare/complexity behaviour for one value type
#[derive(Clone)]
pub struct Codec {
    parse: ParseFn,
    compare: Option<CompareFn>,
    complexity: Option<ComplexityFn>,
}

impl Codec {
    pub fn new<F>(parse: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ValueError> + Send + Sync + 'static,
    {
        Self {
            parse: Arc::new(parse),
            compare: None,
            complexity: None,
        }
    }

    pub fn with_compare<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.compare = Some(Arc::new(compare));
        self
    }

    /// Custom scoring. Must return at least 1 for any value it accepts.
    pub fn with_complexity<F>(mut self, complexity: F) -> Self
    where
        F: Fn(&Value) -> u32 + Send + Sync + 'static,
    {
        self.complexity = Some(Arc::new(complexity));
        self
    }

    #[inline]
    pub fn parse(&self, input: &str) -> Result<Value, ValueError> {
        (self.parse)(input)
    }

    /// Compare two values, falling back to [`compare_values`]
    #[inline]
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match &self.compare {
            Some(compare) => compare(a, b),
            None => compare_values(a, b),
        }
    }

    /// Complexity of a value, 1 unless the codec scores it
    #[inline]
    pub fn complexity(&self, value: &Value) -> u32 {
        complexity_of(value, self.complexity.as_ref())
    }

    pub(crate) fn parts(&self) -> (ParseFn, Option<CompareFn>, Option<ComplexityFn>) {
        (
            self.parse.clone(),
            self.compare.clone(),
            self.complexity.clone(),
        )
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("compare", &self.compare.is_some())
            .field("complexity", &self.complexity.is_some())
            .finish()
    }
}

/// Apply an optional complexity function, defaulting to 1
#[inline]
pub fn complexity_of(value: &Value, func: Option<&ComplexityFn>) -> u32 {
    match func {
        Some(f) => f(value),
        None => 1,
    }
}

/// Fallback ordering for values of a kind without its own `compare`.
///
/// Numbers compare numerically and text lexically. Every other pairing is
/// considered equal: the comparison is intentionally shallow.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Value::Integer(x), Value::Integer(y)) = (a, b) {
        return x.cmp(y);
    }
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return compare_numbers(x, y);
    }
    if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
        return compare_strings(x, y);
    }
    Ordering::Equal
}

/// Numeric ordering; NaN compares equal to everything
#[inline]
pub fn compare_numbers(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[inline]
pub fn compare_strings(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Blank means empty or whitespace-only
#[inline]
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
