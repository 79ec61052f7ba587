//! Engine configuration
//!
//! Lets an embedding application declare its condition kinds and limits in
//! JSON instead of building a [`Specification`] by hand:
//!
//! ```json
//! {
//!   "kinds": { "author": "string", "stars": "int_op_reduced", "archived": "flag" },
//!   "max_complexity": 64
//! }
//! ```

mod kind;

pub use kind::*;

use crate::condition::DEFAULT_CACHE_CAPACITY;
use crate::error::Result;
use crate::specification::Specification;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings for a [`crate::QueryEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Kind name to built-in codec
    pub kinds: BTreeMap<String, BuiltinCodec>,
    /// Queries scoring above this are rejected before optimisation
    pub max_complexity: Option<u32>,
    /// Run the optimiser on every compiled query
    pub optimise: bool,
    /// Cache compiled queries by their text
    pub cache: bool,
    /// Distinct queries held before the cache is flushed
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kinds: BTreeMap::new(),
            max_complexity: None,
            optimise: true,
            cache: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Deserialize configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the specification declared by `kinds`
    pub fn to_specification(&self) -> Result<Specification> {
        self.kinds
            .iter()
            .fold(Specification::builder(), |builder, (name, codec)| {
                builder.descriptor(name.clone(), codec.descriptor())
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.optimise);
        assert!(config.cache);
        assert_eq!(config.max_complexity, None);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_full_config() {
        let config = EngineConfig::from_json(
            r#"{
                "kinds": {
                    "author": "string",
                    "stars": "int_op_reduced",
                    "created": "utc_date_op",
                    "archived": "flag"
                },
                "max_complexity": 64,
                "optimise": false,
                "cache": false,
                "cache_capacity": 16
            }"#,
        )
        .unwrap();

        assert_eq!(config.kinds.len(), 4);
        assert_eq!(config.kinds["stars"], BuiltinCodec::IntOpReduced);
        assert_eq!(config.max_complexity, Some(64));
        assert!(!config.optimise);
        assert!(!config.cache);
        assert_eq!(config.cache_capacity, 16);

        let spec = config.to_specification().unwrap();
        assert_eq!(spec.kinds(), vec!["archived", "author", "created", "stars"]);
        assert!(!spec.get("archived").unwrap().has_value());
        assert!(spec.get("created").unwrap().has_value());
    }

    #[test]
    fn test_unknown_codec() {
        let err = EngineConfig::from_json(r#"{ "kinds": { "a": "uuid" } }"#).unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn test_unknown_field() {
        let err = EngineConfig::from_json(r#"{ "max_depth": 3 }"#).unwrap_err();
        assert!(matches!(err, QueryError::Config(_)));
    }

    #[test]
    fn test_reserved_kind_in_config() {
        let config = EngineConfig::from_json(r#"{ "kinds": { "or": "flag" } }"#).unwrap();
        assert!(matches!(
            config.to_specification().unwrap_err(),
            QueryError::ReservedKindName(_)
        ));
    }
}
