//! The dynamic value model shared by all codecs.
//!
//! Route path variables and query parameters are heterogeneous at runtime
//! (a number here, a date there), so codecs convert between text and a
//! single [`Value`] enum rather than a generic type parameter. Each variant
//! corresponds to the domain of one built-in codec family.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// A typed value carried through codec encoding and decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null value, produced by the `null(...)` wrapper codec.
    Null,
    /// The absent value, produced by the `undefined(...)` wrapper codec.
    Undefined,
    /// A boolean, produced by the Boolean codec.
    Bool(bool),
    /// A number, produced by the Number codec. `NaN` is never stored; the
    /// Number codec rejects it on both sides.
    Number(f64),
    /// A string, produced by the String codec.
    String(String),
    /// A UTC date, produced by the Date codec.
    Date(DateTime<Utc>),
    /// A sequence of values, produced by the array codec.
    Array(Vec<Value>),
}

/// Formats a number the way URL text expects it: infinities render as
/// `Infinity`/`-Infinity`, everything else uses the shortest decimal form
/// (`1.0` becomes `"1"`, `0.5` stays `"0.5"`).
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        value.to_string()
    }
}

impl Value {
    /// Returns a short, human-readable name for this value's type, used in
    /// encode error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Array(_) => "array",
        }
    }

    /// Returns the boolean if this is a [`Value::Bool`].
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a [`Value::Number`].
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the date if this is a [`Value::Date`].
    pub const fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the element slice if this is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is [`Value::Undefined`].
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Undefined => write!(f, "undefined"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{}", d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(1), Value::Number(1.0));
        assert_eq!(Value::from(0.5), Value::Number(0.5));
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
        assert_eq!(
            Value::from(vec![Value::from(1), Value::from(2)]),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Number(2.0).as_number(), Some(2.0));
        assert_eq!(Value::String("hi".into()).as_str(), Some("hi"));
        assert_eq!(Value::Null.as_bool(), None);
        assert!(Value::Null.is_null());
        assert!(Value::Undefined.is_undefined());
        assert!(!Value::Bool(false).is_null());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::String(String::new()).type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Undefined.type_name(), "undefined");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.1), "-0.1");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::String("abc".into()).to_string(), "abc");
        assert_eq!(Value::Null.to_string(), "null");
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-05-01T12:00:00.000Z");
        assert_eq!(
            Value::Array(vec![Value::from(1), Value::from(2)]).to_string(),
            "[1,2]"
        );
    }
}
