//! Query parser: turns tokens into a typed condition tree

use crate::condition::ast::Condition;
use crate::condition::tokenizer::{reduce, tokenize, Token};
use crate::error::{QueryError, Result};
use crate::specification::Specification;
use crate::value::is_blank;

/// Parse a query into a condition tree.
///
/// Returns `Ok(None)` for a blank query; every other failure is an error for
/// the first problem found, left to right.
pub fn parse(query: &str, spec: &Specification) -> Result<Option<Condition>> {
    let tokens = match tokenize(query)? {
        Some(tokens) => tokens,
        None => return Ok(None),
    };

    let condition = translate(&reduce(tokens), spec)?;
    tracing::trace!(kind = condition.kind(), "translated query");
    Ok(Some(condition))
}

/// Translate a token tree using the kinds registered in `spec`
pub fn translate(token: &Token, spec: &Specification) -> Result<Condition> {
    match token {
        Token::Plain(text) => parse_condition(text, spec),
        Token::Negated(token) => Ok(Condition::not(translate(token, spec)?)),
        Token::Group(tokens) => Ok(Condition::and(translate_all(tokens, spec)?)),
        Token::Or(tokens) => Ok(Condition::or(translate_all(tokens, spec)?)),
    }
}

fn translate_all(tokens: &[Token], spec: &Specification) -> Result<Vec<Condition>> {
    tokens.iter().map(|token| translate(token, spec)).collect()
}

/// Parse a single `type:value` word
pub fn parse_condition(condition: &str, spec: &Specification) -> Result<Condition> {
    let (kind, value) = match condition.split_once(':') {
        Some((kind, value)) => (kind, Some(value)),
        None => (condition, None),
    };

    if is_blank(kind) {
        return Err(QueryError::MissingType(condition.to_string()));
    }

    match kind {
        "not" => {
            let operand = required_value(condition, kind, value)?;
            Ok(Condition::not(parse_condition(operand, spec)?))
        }
        "and" | "or" => Err(QueryError::ReservedType {
            condition: condition.to_string(),
            kind: kind.to_string(),
        }),
        _ => {
            let descriptor = spec.get(kind).ok_or_else(|| QueryError::UnrecognisedType {
                condition: condition.to_string(),
                kind: kind.to_string(),
            })?;

            match descriptor.parser() {
                Some(parse) => {
                    let value = required_value(condition, kind, value)?;
                    let parsed = parse(value).map_err(|source| QueryError::InvalidValue {
                        condition: condition.to_string(),
                        source,
                    })?;
                    Ok(Condition::leaf(kind, parsed))
                }
                // Flags ignore anything after the colon
                None => Ok(Condition::flag(kind)),
            }
        }
    }
}

fn required_value<'a>(condition: &str, kind: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(value) if !is_blank(value) => Ok(value),
        _ => Err(QueryError::MissingValue {
            condition: condition.to_string(),
            kind: kind.to_string(),
        }),
    }
}
