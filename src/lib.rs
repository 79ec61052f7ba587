//! Query Condition Core - search-bar query compiler
//!
//! Compiles queries such as `author:alice -archived ( stars:>=10 | pinned )`
//! into typed condition trees, then normalises, orders and scores them.
//! Which condition kinds exist, and how their values are parsed, compared and
//! scored, is decided by the caller through a [`Specification`].
//!
//! ```
//! use query_condition_core::{optimise, parse, value, Condition, Specification};
//!
//! let spec = Specification::builder()
//!     .kind("author", value::string())
//!     .flag("archived")
//!     .build()
//!     .unwrap();
//!
//! let parsed = parse("author:alice -archived", &spec).unwrap().unwrap();
//! assert_eq!(
//!     optimise(&parsed, &spec),
//!     Some(Condition::and(vec![
//!         Condition::leaf("author", "alice"),
//!         Condition::not(Condition::flag("archived")),
//!     ]))
//! );
//! ```

pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod specification;
pub mod value;

pub use crate::condition::{
    are_conditions_equal, calculate_complexity, compare_conditions, optimise, parse, tokenize,
    Condition, Token,
};
pub use crate::config::{BuiltinCodec, EngineConfig};
pub use crate::engine::QueryEngine;
pub use crate::error::{QueryError, Result, ValueError};
pub use crate::specification::{KindDescriptor, Specification, SpecificationBuilder};
pub use crate::value::{binary_operator, Codec, Value};
