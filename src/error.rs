//! Error types for the query condition engine

use thiserror::Error;

/// Main error type for the query condition engine
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Group begun but not ended: '{0}'")]
    UnclosedGroup(String),

    #[error("Group ended but not begun: '{0}'")]
    UnopenedGroup(String),

    #[error("'{0}': Was expecting a condition but got OR operator")]
    OrWithoutLeftOperand(String),

    #[error("'{0}': Was expecting a condition but got emptiness")]
    OrWithoutRightOperand(String),

    #[error("'{0}': Condition does not have a type")]
    MissingType(String),

    #[error("'{condition}': Reserved type '{kind}' used")]
    ReservedType { condition: String, kind: String },

    #[error("'{condition}': Unrecognised condition type '{kind}'")]
    UnrecognisedType { condition: String, kind: String },

    #[error("'{condition}': Condition type '{kind}' requires a value but one was not specified")]
    MissingValue { condition: String, kind: String },

    #[error("'{condition}': Could not parse value: {source}")]
    InvalidValue {
        condition: String,
        #[source]
        source: ValueError,
    },

    #[error("Invalid kind name: '{0}'")]
    InvalidKindName(String),

    #[error("Reserved kind name: '{0}'")]
    ReservedKindName(String),

    #[error("Duplicate kind name: '{0}'")]
    DuplicateKindName(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Query complexity {complexity} exceeds the limit of {limit}")]
    ComplexityExceeded { complexity: u32, limit: u32 },
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Config(err.to_string())
    }
}

/// Error raised by a value codec while parsing or reducing a value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("Parsed value is not a number: '{0}'")]
    NotANumber(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the query condition engine
pub type Result<T> = std::result::Result<T, QueryError>;
