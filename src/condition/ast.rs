//! Condition tree produced by parsing a query

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A typed condition: the three builtins plus one leaf per registered kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Condition {
    /// Negation, written `-x` or `not:x`
    Not { operand: Box<Condition> },
    /// Conjunction, written by juxtaposition or `( ... )`
    And { operands: Vec<Condition> },
    /// Disjunction, written with `|`
    Or { operands: Vec<Condition> },
    /// Kind-specific condition like `author:alice`
    Leaf { kind: String, value: Value },
}

impl Condition {
    pub fn leaf(kind: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Leaf {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Leaf of a value-less kind
    pub fn flag(kind: impl Into<String>) -> Self {
        Condition::Leaf {
            kind: kind.into(),
            value: Value::Unit,
        }
    }

    pub fn not(operand: Condition) -> Self {
        Condition::Not {
            operand: Box::new(operand),
        }
    }

    pub fn and(operands: Vec<Condition>) -> Self {
        Condition::And { operands }
    }

    pub fn or(operands: Vec<Condition>) -> Self {
        Condition::Or { operands }
    }

    /// `and`, `or` and `not` for builtins, the kind name for leaves
    pub fn kind(&self) -> &str {
        match self {
            Condition::Not { .. } => "not",
            Condition::And { .. } => "and",
            Condition::Or { .. } => "or",
            Condition::Leaf { kind, .. } => kind,
        }
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Condition::Leaf { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Condition::flag("b").kind(), "b");
        assert_eq!(Condition::not(Condition::flag("b")).kind(), "not");
        assert_eq!(Condition::and(vec![]).kind(), "and");
        assert_eq!(Condition::or(vec![]).kind(), "or");
        assert!(Condition::or(vec![]).is_builtin());
        assert!(!Condition::leaf("a", "x").is_builtin());
    }

    #[test]
    fn test_json_shape() {
        let cond = Condition::and(vec![
            Condition::leaf("a", "value"),
            Condition::not(Condition::flag("b")),
        ]);
        let json = serde_json::to_value(&cond).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "and",
                "operands": [
                    { "type": "leaf", "kind": "a", "value": { "text": "value" } },
                    { "type": "not", "operand": { "type": "leaf", "kind": "b", "value": "unit" } }
                ]
            })
        );

        let back: Condition = serde_json::from_value(json).unwrap();
        assert_eq!(back, cond);
    }
}
