//! The array codec: sequences of an inner codec's values under four
//! serialization formats.
//!
//! | Format                | Encoded form of `[1, 2]` with key `x` |
//! |-----------------------|---------------------------------------|
//! | `json`                | `[1,2]`                               |
//! | `delimited`           | `1,2` (configurable delimiter)        |
//! | `repeat-key`          | `x=1&x=2`                             |
//! | `key-square-brackets` | `x[]=1&x[]=2`                         |
//!
//! The two key-based formats are only usable for query parameters: they
//! need the raw query string (via [`QueryContext`]) to decode, and a key to
//! encode. An empty sequence encodes to the empty string in every format.

use std::sync::Arc;

use typed_routes_core::query::QueryPairs;
use typed_routes_core::{RouteError, RouteResult, Value};

use crate::codec::{Codec, QueryContext, SharedCodec};

/// The serialization format of an [`ArrayCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayFormat {
    /// Bracket-wrapped, comma-separated: `[v1,v2]`.
    #[default]
    Json,
    /// Values joined by a delimiter: `v1,v2`.
    Delimited,
    /// One `key=value` pair per element: `x=v1&x=v2`.
    RepeatKey,
    /// One `key[]=value` pair per element: `x[]=v1&x[]=v2`.
    KeySquareBrackets,
}

impl ArrayFormat {
    /// The format's name as used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Delimited => "delimited",
            Self::RepeatKey => "repeat-key",
            Self::KeySquareBrackets => "key-square-brackets",
        }
    }
}

/// Options for constructing an [`ArrayCodec`].
#[derive(Debug, Clone)]
pub struct ArrayOptions {
    /// The delimiter for the `delimited` format. Defaults to `","`.
    pub delimiter: String,
    /// The serialization format. Defaults to [`ArrayFormat::Json`].
    pub format: ArrayFormat,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            format: ArrayFormat::Json,
        }
    }
}

impl ArrayOptions {
    /// Returns options with the given format and the default delimiter.
    pub fn format(format: ArrayFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Returns options with the `delimited` format and the given delimiter.
    pub fn delimited(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            format: ArrayFormat::Delimited,
        }
    }
}

/// Codec for sequences of an inner codec's values.
///
/// Inner-codec errors propagate verbatim, so a failing element reports the
/// deepest semantic failure rather than a generic array error.
#[derive(Debug, Clone)]
pub struct ArrayCodec {
    inner: SharedCodec,
    delimiter: String,
    format: ArrayFormat,
}

impl ArrayCodec {
    /// Creates an array codec over `inner` with the given options.
    pub fn new(inner: SharedCodec, options: ArrayOptions) -> Self {
        Self {
            inner,
            delimiter: options.delimiter,
            format: options.format,
        }
    }

    fn decode_each<'a>(
        &self,
        pieces: impl Iterator<Item = &'a str>,
    ) -> RouteResult<Value> {
        let mut items = Vec::new();
        for piece in pieces {
            items.push(self.inner.decode(piece, None)?);
        }
        Ok(Value::Array(items))
    }

    fn decode_from_query(&self, ctx: Option<&QueryContext>) -> RouteResult<Value> {
        let Some(ctx) = ctx else {
            return Err(RouteError::decode(format!(
                r#"The "{}" array format can only decode query parameters"#,
                self.format.label()
            )));
        };
        let lookup = match self.format {
            ArrayFormat::KeySquareBrackets => format!("{}[]", ctx.key),
            _ => ctx.key.clone(),
        };
        let pairs = QueryPairs::parse(&ctx.search);
        let values = pairs.get_list(&lookup).cloned().unwrap_or_default();
        self.decode_each(values.iter().map(String::as_str))
    }

    fn encode_items(&self, items: &[Value], key: Option<&str>) -> RouteResult<String> {
        let mut encoded = Vec::with_capacity(items.len());
        for item in items {
            encoded.push(self.inner.encode(item, None)?);
        }
        match self.format {
            ArrayFormat::Json => Ok(format!("[{}]", encoded.join(","))),
            ArrayFormat::Delimited => Ok(encoded.join(&self.delimiter)),
            ArrayFormat::RepeatKey | ArrayFormat::KeySquareBrackets => {
                let Some(key) = key else {
                    return Err(RouteError::encode(format!(
                        r#"The "{}" array format requires a query parameter key"#,
                        self.format.label()
                    )));
                };
                let suffix = if self.format == ArrayFormat::KeySquareBrackets {
                    "[]"
                } else {
                    ""
                };
                let pairs: Vec<String> = encoded
                    .into_iter()
                    .map(|v| format!("{key}{suffix}={v}"))
                    .collect();
                Ok(pairs.join("&"))
            }
        }
    }
}

impl Codec for ArrayCodec {
    fn decode(&self, text: &str, ctx: Option<&QueryContext>) -> RouteResult<Value> {
        match self.format {
            ArrayFormat::RepeatKey | ArrayFormat::KeySquareBrackets => {
                self.decode_from_query(ctx)
            }
            _ if text.is_empty() => Ok(Value::Array(Vec::new())),
            ArrayFormat::Json => {
                let content = text
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or_else(|| {
                        RouteError::decode(format!(
                            r#"Array values must be wrapped in "[" and "]". Got "{text}" instead"#
                        ))
                    })?;
                // "[]" yields one empty-string element; sequences of empty
                // strings are representable in this format.
                self.decode_each(content.split(','))
            }
            ArrayFormat::Delimited => self.decode_each(text.split(self.delimiter.as_str())),
        }
    }

    fn encode(&self, value: &Value, key: Option<&str>) -> RouteResult<String> {
        let Some(items) = value.as_array() else {
            return Err(RouteError::encode(format!(
                r#"Array codec expects an array value. Got "{value}" ({}) instead"#,
                value.type_name()
            )));
        };
        if items.is_empty() {
            return Ok(String::new());
        }
        self.encode_items(items, key)
    }
}

/// Builds a json-format array codec over the given inner codec.
pub fn array(inner: SharedCodec) -> SharedCodec {
    Arc::new(ArrayCodec::new(inner, ArrayOptions::default()))
}

/// Builds an array codec over the given inner codec with explicit options.
pub fn array_with(inner: SharedCodec, options: ArrayOptions) -> SharedCodec {
    Arc::new(ArrayCodec::new(inner, options))
}
