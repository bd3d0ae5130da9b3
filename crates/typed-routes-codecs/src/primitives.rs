//! Built-in primitive codecs: Boolean, Number, String, Date, the literal
//! set codecs, and the `null`/`undefined`/`nullish` wrappers.
//!
//! Each codec is a pure function pair with no shared state. The literal
//! codecs hold an explicit reference to their underlying primitive and
//! delegate to it, so inner errors surface verbatim.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::sync::Arc;

use typed_routes_core::value::format_number;
use typed_routes_core::{RouteError, RouteResult, Value};

use crate::codec::{Codec, QueryContext, SharedCodec};

/// Codec for boolean values.
///
/// Decode accepts exactly the literal strings `"true"` and `"false"`
/// (case-sensitive); encode accepts only [`Value::Bool`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    fn decode(&self, text: &str, _ctx: Option<&QueryContext>) -> RouteResult<Value> {
        match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => Err(RouteError::decode(format!(
                r#"Boolean values must be "true" or "false". Got "{other}" instead"#
            ))),
        }
    }

    fn encode(&self, value: &Value, _key: Option<&str>) -> RouteResult<String> {
        match value {
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(RouteError::encode(format!(
                r#"Boolean codec expects a boolean value. Got "{other}" ({}) instead"#,
                other.type_name()
            ))),
        }
    }
}

/// Codec for numeric values.
///
/// Decode rejects the empty string, anything that does not parse as a
/// number, and `NaN` results; `"Infinity"` and `"-Infinity"` are accepted.
/// Encode accepts only [`Value::Number`] and renders infinities as
/// `Infinity`/`-Infinity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCodec;

impl Codec for NumberCodec {
    fn decode(&self, text: &str, _ctx: Option<&QueryContext>) -> RouteResult<Value> {
        if text.is_empty() {
            return Err(RouteError::decode(
                r#"Number values must be numeric. Got "" instead"#,
            ));
        }
        match text.parse::<f64>() {
            Ok(n) if !n.is_nan() => Ok(Value::Number(n)),
            _ => Err(RouteError::decode(format!(
                r#"Number values must be numeric. Got "{text}" instead"#
            ))),
        }
    }

    fn encode(&self, value: &Value, _key: Option<&str>) -> RouteResult<String> {
        match value {
            Value::Number(n) => Ok(format_number(*n)),
            other => Err(RouteError::encode(format!(
                r#"Number codec expects a numeric value. Got "{other}" ({}) instead"#,
                other.type_name()
            ))),
        }
    }
}

/// Codec for string values.
///
/// Decode is the identity; encode accepts only [`Value::String`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    fn decode(&self, text: &str, _ctx: Option<&QueryContext>) -> RouteResult<Value> {
        Ok(Value::String(text.to_string()))
    }

    fn encode(&self, value: &Value, _key: Option<&str>) -> RouteResult<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(RouteError::encode(format!(
                r#"String codec expects a string value. Got "{other}" ({}) instead"#,
                other.type_name()
            ))),
        }
    }
}

/// Codec for UTC dates.
///
/// Decode accepts ISO-8601 (RFC 3339, naive date-times, bare dates) and
/// RFC 2822 forms; encode renders the UTC ISO-8601 representation with
/// millisecond precision and a `Z` suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCodec;

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

impl Codec for DateCodec {
    fn decode(&self, text: &str, _ctx: Option<&QueryContext>) -> RouteResult<Value> {
        parse_date(text).map(Value::Date).ok_or_else(|| {
            RouteError::decode(format!(
                r#"Date values must be ISO-8601 or RFC 2822 strings. Got "{text}" instead"#
            ))
        })
    }

    fn encode(&self, value: &Value, _key: Option<&str>) -> RouteResult<String> {
        match value {
            Value::Date(d) => Ok(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            other => Err(RouteError::encode(format!(
                r#"Date codec expects a date value. Got "{other}" ({}) instead"#,
                other.type_name()
            ))),
        }
    }
}

fn format_number_set(allowed: &[f64]) -> String {
    let rendered: Vec<String> = allowed.iter().copied().map(format_number).collect();
    format!("[{}]", rendered.join(", "))
}

fn format_string_set(allowed: &[String]) -> String {
    let rendered: Vec<String> = allowed.iter().map(|s| format!("\"{s}\"")).collect();
    format!("[{}]", rendered.join(", "))
}

/// Codec constrained to a fixed set of numeric literals.
///
/// Decode parses through [`NumberCodec`] first (so unparsable text fails
/// with the Number error before the membership check); encode checks
/// membership first, then delegates.
#[derive(Debug, Clone)]
pub struct NumberLiteralCodec {
    allowed: Vec<f64>,
    inner: NumberCodec,
}

impl NumberLiteralCodec {
    /// Creates a codec accepting only the given numeric literals.
    pub fn new(allowed: impl Into<Vec<f64>>) -> Self {
        Self {
            allowed: allowed.into(),
            inner: NumberCodec,
        }
    }
}

impl Codec for NumberLiteralCodec {
    fn decode(&self, text: &str, ctx: Option<&QueryContext>) -> RouteResult<Value> {
        let value = self.inner.decode(text, ctx)?;
        match value.as_number() {
            Some(n) if self.allowed.contains(&n) => Ok(value),
            _ => Err(RouteError::decode(format!(
                r#"Expected one of {}. Got "{text}" instead"#,
                format_number_set(&self.allowed)
            ))),
        }
    }

    fn encode(&self, value: &Value, key: Option<&str>) -> RouteResult<String> {
        match value.as_number() {
            Some(n) if self.allowed.contains(&n) => self.inner.encode(value, key),
            _ => Err(RouteError::encode(format!(
                r#"Expected one of {}. Got "{value}" instead"#,
                format_number_set(&self.allowed)
            ))),
        }
    }
}

/// Codec constrained to a fixed set of string literals.
///
/// Mirrors [`NumberLiteralCodec`], delegating to [`StringCodec`].
#[derive(Debug, Clone)]
pub struct StringLiteralCodec {
    allowed: Vec<String>,
    inner: StringCodec,
}

impl StringLiteralCodec {
    /// Creates a codec accepting only the given string literals.
    pub fn new<S: Into<String>>(allowed: impl IntoIterator<Item = S>) -> Self {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            inner: StringCodec,
        }
    }
}

impl Codec for StringLiteralCodec {
    fn decode(&self, text: &str, ctx: Option<&QueryContext>) -> RouteResult<Value> {
        let value = self.inner.decode(text, ctx)?;
        match value.as_str() {
            Some(s) if self.allowed.iter().any(|a| a == s) => Ok(value),
            _ => Err(RouteError::decode(format!(
                r#"Expected one of {}. Got "{text}" instead"#,
                format_string_set(&self.allowed)
            ))),
        }
    }

    fn encode(&self, value: &Value, key: Option<&str>) -> RouteResult<String> {
        match value.as_str() {
            Some(s) if self.allowed.iter().any(|a| a == s) => self.inner.encode(value, key),
            _ => Err(RouteError::encode(format!(
                r#"Expected one of {}. Got "{value}" instead"#,
                format_string_set(&self.allowed)
            ))),
        }
    }
}

/// Wrapper that additionally accepts the literal text `"null"` and the
/// [`Value::Null`] value.
///
/// The literal always takes precedence over the inner codec, even when the
/// inner codec would also have matched the text (the ambiguity with the
/// String codec is accepted).
#[derive(Debug, Clone)]
pub struct NullCodec {
    inner: SharedCodec,
}

impl NullCodec {
    /// Wraps the given codec.
    pub fn new(inner: SharedCodec) -> Self {
        Self { inner }
    }
}

impl Codec for NullCodec {
    fn decode(&self, text: &str, ctx: Option<&QueryContext>) -> RouteResult<Value> {
        if text == "null" {
            Ok(Value::Null)
        } else {
            self.inner.decode(text, ctx)
        }
    }

    fn encode(&self, value: &Value, key: Option<&str>) -> RouteResult<String> {
        if value.is_null() {
            Ok("null".to_string())
        } else {
            self.inner.encode(value, key)
        }
    }
}

/// Wrapper that additionally accepts the literal text `"undefined"` and the
/// [`Value::Undefined`] value. Symmetric to [`NullCodec`].
#[derive(Debug, Clone)]
pub struct UndefinedCodec {
    inner: SharedCodec,
}

impl UndefinedCodec {
    /// Wraps the given codec.
    pub fn new(inner: SharedCodec) -> Self {
        Self { inner }
    }
}

impl Codec for UndefinedCodec {
    fn decode(&self, text: &str, ctx: Option<&QueryContext>) -> RouteResult<Value> {
        if text == "undefined" {
            Ok(Value::Undefined)
        } else {
            self.inner.decode(text, ctx)
        }
    }

    fn encode(&self, value: &Value, key: Option<&str>) -> RouteResult<String> {
        if value.is_undefined() {
            Ok("undefined".to_string())
        } else {
            self.inner.encode(value, key)
        }
    }
}

/// Returns the shared Boolean codec.
pub fn boolean() -> SharedCodec {
    Arc::new(BooleanCodec)
}

/// Returns the shared Number codec.
pub fn number() -> SharedCodec {
    Arc::new(NumberCodec)
}

/// Returns the shared String codec.
pub fn string() -> SharedCodec {
    Arc::new(StringCodec)
}

/// Returns the shared Date codec.
pub fn date() -> SharedCodec {
    Arc::new(DateCodec)
}

/// Builds a codec constrained to the given numeric literals.
pub fn number_literal(allowed: impl Into<Vec<f64>>) -> SharedCodec {
    Arc::new(NumberLiteralCodec::new(allowed))
}

/// Builds a codec constrained to the given string literals.
pub fn string_literal<S: Into<String>>(allowed: impl IntoIterator<Item = S>) -> SharedCodec {
    Arc::new(StringLiteralCodec::new(allowed))
}

/// Wraps a codec to also accept `"null"` / [`Value::Null`].
pub fn null(inner: SharedCodec) -> SharedCodec {
    Arc::new(NullCodec::new(inner))
}

/// Wraps a codec to also accept `"undefined"` / [`Value::Undefined`].
pub fn undefined(inner: SharedCodec) -> SharedCodec {
    Arc::new(UndefinedCodec::new(inner))
}

/// Wraps a codec to accept null, undefined, or the inner type: the
/// composition `null(undefined(inner))`.
pub fn nullish(inner: SharedCodec) -> SharedCodec {
    null(undefined(inner))
}
