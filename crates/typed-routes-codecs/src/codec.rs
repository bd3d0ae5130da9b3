//! The [`Codec`] trait: a paired decode/encode contract between URL text
//! and typed [`Value`]s.
//!
//! Codecs are stateless and immutable; one instance is created once and
//! shared (via [`SharedCodec`]) across every route that references it.

use std::fmt;
use std::sync::Arc;

use typed_routes_core::{RouteResult, Value};

/// Context supplied when decoding a **query parameter**.
///
/// Carries the parameter key and the raw (still percent-encoded) query
/// string, so the key-based array formats can read every occurrence of the
/// key rather than a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    /// The query parameter key being decoded.
    pub key: String,
    /// The raw query string of the URL, without the leading `?`.
    pub search: String,
}

impl QueryContext {
    /// Creates a query decoding context for the given key and raw query
    /// string.
    pub fn new(key: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            search: search.into(),
        }
    }
}

/// Trait for converting URL text to typed values and back.
///
/// The round-trip invariant `decode(encode(v)) == v` must hold for every
/// value in the codec's domain, and `decode` must fail with a
/// [`RouteError::Decode`](typed_routes_core::RouteError::Decode) for any
/// text outside its accepted grammar instead of silently coercing.
pub trait Codec: Send + Sync + fmt::Debug {
    /// Converts text into a typed [`Value`].
    ///
    /// `ctx` is `Some` only when decoding a query parameter; path variable
    /// decoding passes `None`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the text does not conform to this codec's
    /// grammar.
    fn decode(&self, text: &str, ctx: Option<&QueryContext>) -> RouteResult<Value>;

    /// Converts a typed [`Value`] back into URL text.
    ///
    /// `key` is `Some` only when encoding a query parameter; the key-based
    /// array formats use it to emit complete `key=v&key=v` fragments.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the value's type or shape does not match
    /// what this codec expects.
    fn encode(&self, value: &Value, key: Option<&str>) -> RouteResult<String>;
}

/// A codec shared across routes.
pub type SharedCodec = Arc<dyn Codec>;
