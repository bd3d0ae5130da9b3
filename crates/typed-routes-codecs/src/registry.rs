//! The process-wide named codec registry.
//!
//! The registry is seeded with the built-in primitive codecs (`Boolean`,
//! `Number`, `String`, `Date`) and can be extended at runtime with
//! [`add_codec`] / [`add_codec_factory`]. Last write wins; there is no
//! removal operation.
//!
//! The registry is intended to be populated during application startup,
//! **before** any route tree referencing custom codecs is built. Concurrent
//! registration is not coordinated beyond the lock itself; building a tree
//! before its custom codecs are registered yields a missing-codec lookup,
//! not an explicit error.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use typed_routes_core::{RouteResult, Value};

use crate::codec::SharedCodec;
use crate::primitives;

/// A parametric codec constructor registered by name.
///
/// Factories receive their parameters as [`Value`]s, e.g. the allowed set
/// of a custom literal codec.
pub type CodecFactory = Arc<dyn Fn(&[Value]) -> RouteResult<SharedCodec> + Send + Sync>;

/// A registry entry: either a ready codec or a codec factory.
#[derive(Clone)]
enum RegistryEntry {
    Codec(SharedCodec),
    Factory(CodecFactory),
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(codec) => f.debug_tuple("Codec").field(codec).finish(),
            Self::Factory(_) => f.debug_tuple("Factory").finish(),
        }
    }
}

static REGISTRY: Lazy<RwLock<HashMap<String, RegistryEntry>>> = Lazy::new(|| {
    let mut entries: HashMap<String, RegistryEntry> = HashMap::new();
    entries.insert(
        "Boolean".to_string(),
        RegistryEntry::Codec(primitives::boolean()),
    );
    entries.insert(
        "Number".to_string(),
        RegistryEntry::Codec(primitives::number()),
    );
    entries.insert(
        "String".to_string(),
        RegistryEntry::Codec(primitives::string()),
    );
    entries.insert("Date".to_string(), RegistryEntry::Codec(primitives::date()));
    RwLock::new(entries)
});

/// Registers a codec under the given name, replacing any existing entry.
pub fn add_codec(name: impl Into<String>, codec: SharedCodec) {
    let name = name.into();
    tracing::debug!(name = %name, "registering codec");
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name, RegistryEntry::Codec(codec));
}

/// Registers a codec factory under the given name, replacing any existing
/// entry.
pub fn add_codec_factory(name: impl Into<String>, factory: CodecFactory) {
    let name = name.into();
    tracing::debug!(name = %name, "registering codec factory");
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name, RegistryEntry::Factory(factory));
}

/// Looks up a codec by name. Returns `None` if the name is unknown or
/// refers to a factory.
pub fn get(name: &str) -> Option<SharedCodec> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    match registry.get(name) {
        Some(RegistryEntry::Codec(codec)) => Some(Arc::clone(codec)),
        _ => None,
    }
}

/// Looks up a codec factory by name. Returns `None` if the name is unknown
/// or refers to a plain codec.
pub fn get_factory(name: &str) -> Option<CodecFactory> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    match registry.get(name) {
        Some(RegistryEntry::Factory(factory)) => Some(Arc::clone(factory)),
        _ => None,
    }
}

/// Returns the names of all registered entries, sorted.
pub fn names() -> Vec<String> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<String> = registry.keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use typed_routes_core::Value;

    #[test]
    fn test_builtins_are_registered() {
        for name in ["Boolean", "Number", "String", "Date"] {
            assert!(get(name).is_some(), "missing builtin {name}");
        }
    }

    #[test]
    fn test_builtin_codecs_work_through_registry() {
        let boolean = get("Boolean").unwrap();
        assert_eq!(boolean.decode("true", None).unwrap(), Value::Bool(true));
        let number = get("Number").unwrap();
        assert_eq!(number.decode("2", None).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_unknown_name_returns_none() {
        assert!(get("NoSuchCodec").is_none());
        assert!(get_factory("NoSuchCodec").is_none());
    }

    #[test]
    fn test_add_codec_and_last_write_wins() {
        add_codec("TestOverwrite", primitives::string());
        add_codec("TestOverwrite", primitives::number());
        let codec = get("TestOverwrite").unwrap();
        assert_eq!(codec.decode("7", None).unwrap(), Value::Number(7.0));
        assert!(codec.decode("seven", None).is_err());
    }

    #[test]
    fn test_add_codec_factory() {
        add_codec_factory(
            "TestLiteral",
            Arc::new(|args: &[Value]| {
                let allowed: Vec<f64> = args.iter().filter_map(Value::as_number).collect();
                Ok(primitives::number_literal(allowed))
            }),
        );
        let factory = get_factory("TestLiteral").unwrap();
        let codec = factory(&[Value::from(1), Value::from(2)]).unwrap();
        assert_eq!(codec.decode("2", None).unwrap(), Value::Number(2.0));
        assert!(codec.decode("3", None).is_err());
        // A factory entry is not visible as a plain codec.
        assert!(get("TestLiteral").is_none());
    }

    #[test]
    fn test_names_contains_builtins() {
        let names = names();
        assert!(names.iter().any(|n| n == "Boolean"));
        assert!(names.iter().any(|n| n == "Date"));
    }
}
