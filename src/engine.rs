//! Query engine - the full compile pipeline behind one handle

use crate::condition::{
    are_conditions_equal, calculate_complexity, compare_conditions, optimise, parse, Condition,
    QueryCache,
};
use crate::config::EngineConfig;
use crate::error::{QueryError, Result};
use crate::specification::Specification;
use std::cmp::Ordering;
use std::sync::Arc;

/// Owns a specification and runs `parse -> limit -> optimise` on queries.
///
/// The engine is `Send + Sync`; share it behind an `Arc` to compile queries
/// from several threads.
///
/// `max_complexity` is checked after tokenizing, so it does not bound the cost
/// of the tokenizer itself. Nesting depth (groups, leading `-`) drives
/// recursion in every stage; cap the length of untrusted input before calling
/// [`QueryEngine::compile`].
#[derive(Debug)]
pub struct QueryEngine {
    spec: Arc<Specification>,
    config: EngineConfig,
    cache: QueryCache,
}

impl QueryEngine {
    /// Engine over an explicit specification. `config.kinds` is not consulted.
    pub fn new(spec: Specification, config: EngineConfig) -> Self {
        Self {
            spec: Arc::new(spec),
            cache: QueryCache::with_capacity(config.cache_capacity),
            config,
        }
    }

    /// Engine whose specification is declared by `config.kinds`
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let spec = config.to_specification()?;
        Ok(Self::new(spec, config))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(EngineConfig::from_json(json)?)
    }

    pub fn specification(&self) -> &Specification {
        &self.spec
    }

    /// Shared handle to the specification
    pub fn shared_specification(&self) -> Arc<Specification> {
        Arc::clone(&self.spec)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile a query into canonical form.
    ///
    /// Blank queries, and queries that optimise away entirely, yield `None`.
    pub fn compile(&self, query: &str) -> Result<Option<Condition>> {
        if self.config.cache {
            self.cache.get_or_compile(query, |q| self.compile_uncached(q))
        } else {
            self.compile_uncached(query)
        }
    }

    fn compile_uncached(&self, query: &str) -> Result<Option<Condition>> {
        let parsed = match parse(query, &self.spec)? {
            Some(parsed) => parsed,
            None => return Ok(None),
        };

        let complexity = calculate_complexity(&parsed, &self.spec);
        if let Some(limit) = self.config.max_complexity {
            if complexity > limit {
                tracing::warn!(complexity, limit, "query rejected: too complex");
                return Err(QueryError::ComplexityExceeded { complexity, limit });
            }
        }

        let compiled = if self.config.optimise {
            optimise(&parsed, &self.spec)
        } else {
            Some(parsed)
        };
        tracing::debug!(
            complexity,
            optimised = self.config.optimise,
            empty = compiled.is_none(),
            "compiled query"
        );
        Ok(compiled)
    }

    pub fn parse(&self, query: &str) -> Result<Option<Condition>> {
        parse(query, &self.spec)
    }

    pub fn optimise(&self, condition: &Condition) -> Option<Condition> {
        optimise(condition, &self.spec)
    }

    pub fn compare(&self, a: &Condition, b: &Condition) -> Ordering {
        compare_conditions(a, b, &self.spec)
    }

    pub fn are_equal(&self, a: &Condition, b: &Condition) -> bool {
        are_conditions_equal(a, b, &self.spec)
    }

    pub fn complexity(&self, condition: &Condition) -> u32 {
        calculate_complexity(condition, &self.spec)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
