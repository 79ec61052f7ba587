//! Complexity scoring
//!
//! A cheap upper bound on how expensive a condition is to process further.
//! Callers compare it against a limit before optimising or storing a query.

use crate::condition::ast::Condition;
use crate::specification::Specification;

/// Score a condition.
///
/// Leaves cost 1 unless their kind scores its own values, `Not` adds 1 and
/// `And`/`Or` add one per operand on top of the operands' own cost.
pub fn calculate_complexity(condition: &Condition, spec: &Specification) -> u32 {
    match condition {
        Condition::Not { operand } => calculate_complexity(operand, spec).saturating_add(1),
        Condition::And { operands } | Condition::Or { operands } => {
            let base = u32::try_from(operands.len()).unwrap_or(u32::MAX);
            operands.iter().fold(base, |acc, operand| {
                acc.saturating_add(calculate_complexity(operand, spec))
            })
        }
        Condition::Leaf { kind, value } => spec
            .get(kind)
            .map_or(1, |descriptor| descriptor.complexity(value)),
    }
}
