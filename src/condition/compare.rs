//! Total ordering of condition trees
//!
//! Used by the optimiser to spot duplicate operands and by callers that need
//! a deterministic order. Leaf kinds always sort before the builtins; within
//! a category kinds are ordered by name.

use crate::condition::ast::Condition;
use crate::specification::Specification;
use crate::value::{compare_values, Value};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Compare two conditions
pub fn compare_conditions(a: &Condition, b: &Condition, spec: &Specification) -> Ordering {
    match (a.is_builtin(), b.is_builtin()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    if a.kind() != b.kind() {
        return a.kind().cmp(b.kind());
    }

    match (a, b) {
        (Condition::Not { operand: a }, Condition::Not { operand: b }) => {
            compare_conditions(a, b, spec)
        }
        (Condition::And { operands: a }, Condition::And { operands: b })
        | (Condition::Or { operands: a }, Condition::Or { operands: b }) => {
            compare_operands(a, b, spec)
        }
        (Condition::Leaf { kind, value: a }, Condition::Leaf { value: b, .. }) => {
            compare_leaf_values(kind, a, b, spec)
        }
        _ => Ordering::Equal,
    }
}

/// `compare_conditions(a, b, spec) == Ordering::Equal`
#[inline]
pub fn are_conditions_equal(a: &Condition, b: &Condition, spec: &Specification) -> bool {
    compare_conditions(a, b, spec) == Ordering::Equal
}

/// Operand lists holding the same elements in any order are equal. Otherwise
/// the shorter list sorts first, and equal lengths only look at the first
/// operand of each.
fn compare_operands(a: &[Condition], b: &[Condition], spec: &Specification) -> Ordering {
    if same_elements(a, b, |x, y| are_conditions_equal(x, y, spec)) {
        return Ordering::Equal;
    }
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    match (a.first(), b.first()) {
        (Some(x), Some(y)) => compare_conditions(x, y, spec),
        _ => Ordering::Equal,
    }
}

fn compare_leaf_values(kind: &str, a: &Value, b: &Value, spec: &Specification) -> Ordering {
    match spec.get(kind).and_then(|descriptor| descriptor.comparator()) {
        Some(compare) => compare(a, b),
        None => compare_values(a, b),
    }
}

/// Whether `a` and `b` match one-to-one under `eq`, ignoring order
pub fn same_elements<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }

    // Candidates keep their order so each `x` takes the first match left
    let mut remaining: SmallVec<[&T; 8]> = b.iter().collect();
    for x in a {
        match remaining.iter().position(|y| eq(x, y)) {
            Some(pos) => {
                remaining.remove(pos);
            }
            None => return false,
        }
    }
    true
}
