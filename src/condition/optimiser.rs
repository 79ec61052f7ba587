//! Rewrites condition trees into canonical form

use crate::condition::ast::Condition;
use crate::condition::compare::are_conditions_equal;
use crate::specification::Specification;

/// Optimise a condition, bottom-up, without touching the input.
///
/// - a `Not` directly wrapping a `Not` cancels out (one pair per level)
/// - `And`/`Or` operands are optimised, emptied ones dropped and duplicates
///   removed keeping the first occurrence
/// - an `And`/`Or` left with no operands is `None`, with one it is replaced
///   by that operand
pub fn optimise(condition: &Condition, spec: &Specification) -> Option<Condition> {
    match condition {
        Condition::Not { operand } => match optimise(operand, spec)? {
            Condition::Not { operand: inner } => Some(*inner),
            inner => Some(Condition::not(inner)),
        },
        Condition::And { operands } => collapse(remove_duplicates(operands, spec), Condition::and),
        Condition::Or { operands } => collapse(remove_duplicates(operands, spec), Condition::or),
        Condition::Leaf { .. } => Some(condition.clone()),
    }
}

fn remove_duplicates(conditions: &[Condition], spec: &Specification) -> Vec<Condition> {
    let mut filtered: Vec<Condition> = Vec::with_capacity(conditions.len());
    for condition in conditions {
        let optimised = match optimise(condition, spec) {
            Some(optimised) => optimised,
            None => continue,
        };
        if filtered
            .iter()
            .any(|existing| are_conditions_equal(&optimised, existing, spec))
        {
            continue;
        }
        filtered.push(optimised);
    }
    filtered
}

fn collapse(mut operands: Vec<Condition>, build: fn(Vec<Condition>) -> Condition) -> Option<Condition> {
    match operands.len() {
        0 => None,
        1 => operands.pop(),
        _ => Some(build(operands)),
    }
}
