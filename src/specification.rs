//! Registry of the condition kinds a query may use

use crate::error::{QueryError, Result};
use crate::value::{complexity_of, Codec, CompareFn, ComplexityFn, ParseFn, Value};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Builtin condition types that can never be registered as kinds
pub const RESERVED_KINDS: [&str; 3] = ["and", "or", "not"];

static KIND_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.\-]*$").expect("kind name pattern is valid")
});

/// Optional per-kind behaviour. A kind without `parse` is a flag.
#[derive(Clone, Default)]
pub struct KindDescriptor {
    parse: Option<ParseFn>,
    compare: Option<CompareFn>,
    complexity: Option<ComplexityFn>,
}

impl KindDescriptor {
    /// Value-less kind
    pub fn flag() -> Self {
        Self::default()
    }

    pub fn with_parse<F>(mut self, parse: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, crate::error::ValueError> + Send + Sync + 'static,
    {
        self.parse = Some(Arc::new(parse));
        self
    }

    pub fn with_compare<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.compare = Some(Arc::new(compare));
        self
    }

    pub fn with_complexity<F>(mut self, complexity: F) -> Self
    where
        F: Fn(&Value) -> u32 + Send + Sync + 'static,
    {
        self.complexity = Some(Arc::new(complexity));
        self
    }

    #[inline]
    pub fn has_value(&self) -> bool {
        self.parse.is_some()
    }

    pub(crate) fn parser(&self) -> Option<&ParseFn> {
        self.parse.as_ref()
    }

    pub(crate) fn comparator(&self) -> Option<&CompareFn> {
        self.compare.as_ref()
    }

    /// Complexity of a value of this kind, 1 unless scored
    #[inline]
    pub fn complexity(&self, value: &Value) -> u32 {
        complexity_of(value, self.complexity.as_ref())
    }
}

impl From<Codec> for KindDescriptor {
    fn from(codec: Codec) -> Self {
        let (parse, compare, complexity) = codec.parts();
        Self {
            parse: Some(parse),
            compare,
            complexity,
        }
    }
}

impl fmt::Debug for KindDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindDescriptor")
            .field("parse", &self.parse.is_some())
            .field("compare", &self.compare.is_some())
            .field("complexity", &self.complexity.is_some())
            .finish()
    }
}

/// Validated, read-only mapping from kind name to descriptor
#[derive(Debug, Clone, Default)]
pub struct Specification {
    kinds: AHashMap<String, KindDescriptor>,
}

impl Specification {
    pub fn builder() -> SpecificationBuilder {
        SpecificationBuilder::default()
    }

    #[inline]
    pub fn get(&self, kind: &str) -> Option<&KindDescriptor> {
        self.kinds.get(kind)
    }

    #[inline]
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Registered kind names, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Collects kinds and validates them all in [`SpecificationBuilder::build`]
#[derive(Debug, Default)]
pub struct SpecificationBuilder {
    kinds: Vec<(String, KindDescriptor)>,
}

impl SpecificationBuilder {
    /// Register a kind with an explicit descriptor
    pub fn descriptor(mut self, name: impl Into<String>, descriptor: KindDescriptor) -> Self {
        self.kinds.push((name.into(), descriptor));
        self
    }

    /// Register a value-bearing kind backed by `codec`
    pub fn kind(self, name: impl Into<String>, codec: impl Into<Codec>) -> Self {
        self.descriptor(name, KindDescriptor::from(codec.into()))
    }

    /// Register a value-less kind
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.descriptor(name, KindDescriptor::flag())
    }

    pub fn build(self) -> Result<Specification> {
        let mut kinds = AHashMap::with_capacity(self.kinds.len());
        for (name, descriptor) in self.kinds {
            validate_kind_name(&name)?;
            if kinds.contains_key(&name) {
                return Err(QueryError::DuplicateKindName(name));
            }
            kinds.insert(name, descriptor);
        }
        Ok(Specification { kinds })
    }
}

fn validate_kind_name(name: &str) -> Result<()> {
    if RESERVED_KINDS.contains(&name) {
        return Err(QueryError::ReservedKindName(name.to_string()));
    }
    if !KIND_NAME.is_match(name) {
        return Err(QueryError::InvalidKindName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn test_build_and_lookup() {
        let spec = Specification::builder()
            .kind("a", value::string())
            .flag("b")
            .kind("int", value::int_with_binary_op())
            .kind("some-condition", value::int())
            .build()
            .unwrap();

        assert_eq!(spec.len(), 4);
        assert!(spec.get("a").unwrap().has_value());
        assert!(!spec.get("b").unwrap().has_value());
        assert!(spec.contains("some-condition"));
        assert!(spec.get("c").is_none());
        assert_eq!(spec.kinds(), vec!["a", "b", "int", "some-condition"]);
    }

    #[test]
    fn test_reserved_names_rejected() {
        for name in RESERVED_KINDS {
            let err = Specification::builder().flag(name).build().unwrap_err();
            assert!(matches!(err, QueryError::ReservedKindName(_)), "Failed for: {}", name);
        }
    }

    #[test]
    fn test_invalid_names_rejected() {
        for name in ["", "-a", "a:b", "a b", "(", "|", "a|b"] {
            let err = Specification::builder().flag(name).build().unwrap_err();
            assert!(matches!(err, QueryError::InvalidKindName(_)), "Failed for: {:?}", name);
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Specification::builder()
            .flag("a")
            .kind("a", value::string())
            .build()
            .unwrap_err();
        assert!(matches!(err, QueryError::DuplicateKindName(name) if name == "a"));
    }

    #[test]
    fn test_descriptor_complexity_default() {
        let flag = KindDescriptor::flag();
        assert_eq!(flag.complexity(&Value::Unit), 1);

        let scored = KindDescriptor::flag().with_complexity(|_| 7);
        assert_eq!(scored.complexity(&Value::Unit), 7);
    }

    #[test]
    fn test_custom_descriptor() {
        use crate::condition::{compare_conditions, optimise, parse, Condition};

        // Tags keep their spelling but compare case-insensitively
        let tag = KindDescriptor::flag()
            .with_parse(|input| Ok(Value::Text(input.to_string())))
            .with_compare(|a, b| match (a.as_str(), b.as_str()) {
                (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
                _ => Ordering::Equal,
            });
        let spec = Specification::builder()
            .descriptor("tag", tag)
            .build()
            .unwrap();
        assert!(spec.get("tag").unwrap().has_value());

        let parsed = parse("tag:Rust tag:rust tag:Go", &spec).unwrap().unwrap();
        assert_eq!(
            parsed,
            Condition::and(vec![
                Condition::leaf("tag", "Rust"),
                Condition::leaf("tag", "rust"),
                Condition::leaf("tag", "Go"),
            ])
        );

        assert_eq!(
            compare_conditions(&Condition::leaf("tag", "go"), &Condition::leaf("tag", "RUST"), &spec),
            Ordering::Less
        );
        assert_eq!(
            optimise(&parsed, &spec),
            Some(Condition::and(vec![
                Condition::leaf("tag", "Rust"),
                Condition::leaf("tag", "Go"),
            ]))
        );
    }
}
