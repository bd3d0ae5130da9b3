//! Core error types for the typed-routes workspace.
//!
//! All fallible operations in the codec and router layers return
//! [`RouteResult`]. The error taxonomy is deliberately small: decoding,
//! encoding, URL/template mismatch, and construction-time misconfiguration.
//! None of these are recovered internally; they propagate synchronously to
//! the caller of `decode`/`encode`/`parse_url`/`make_url`.

use thiserror::Error;

/// The primary error type for typed-routes.
///
/// Nested codec composition (array-of-X, `null(X)`, ...) propagates the
/// inner codec's error verbatim rather than wrapping it, so messages always
/// describe the deepest semantic failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Input text does not conform to a codec's grammar.
    ///
    /// The message carries the offending text and a description of what was
    /// expected, e.g. `Boolean values must be "true" or "false". Got "some"
    /// instead`.
    #[error("{0}")]
    Decode(String),

    /// A value's runtime type or shape does not match what a codec expects.
    #[error("{0}")]
    Encode(String),

    /// A URL did not match a route's resolved path template.
    ///
    /// Raised by `parse_url` when the chunk count or a literal chunk of the
    /// candidate URL differs from the template.
    #[error("URL \"{url}\" does not match the route template \"{template}\"")]
    UrlParse {
        /// The URL that was being parsed.
        url: String,
        /// The full path template it was matched against.
        template: String,
    },

    /// A route or codec was declared inconsistently at construction time
    /// (e.g. a `:name` placeholder without a codec, or vice versa).
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),
}

impl RouteError {
    /// Creates a [`RouteError::Decode`] from any displayable message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a [`RouteError::Encode`] from any displayable message.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }

    /// Creates a [`RouteError::UrlParse`] for the given URL and template.
    pub fn url_parse(url: impl Into<String>, template: impl Into<String>) -> Self {
        Self::UrlParse {
            url: url.into(),
            template: template.into(),
        }
    }
}

/// A convenience type alias for `Result<T, RouteError>`.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display_is_bare_message() {
        let err = RouteError::decode(r#"Boolean values must be "true" or "false". Got "some" instead"#);
        assert_eq!(
            err.to_string(),
            r#"Boolean values must be "true" or "false". Got "some" instead"#
        );
    }

    #[test]
    fn test_encode_error_display_is_bare_message() {
        let err = RouteError::encode("Number codec expects a numeric value");
        assert_eq!(err.to_string(), "Number codec expects a numeric value");
    }

    #[test]
    fn test_url_parse_error_names_url_and_template() {
        let err = RouteError::url_parse("/foo", "/library/:libId");
        let text = err.to_string();
        assert!(text.contains("/foo"));
        assert!(text.contains("/library/:libId"));
    }

    #[test]
    fn test_improperly_configured_display() {
        let err = RouteError::ImproperlyConfigured("bad route".into());
        assert_eq!(err.to_string(), "Improperly configured: bad route");
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(RouteError::decode("x"), RouteError::decode("x"));
        assert_ne!(RouteError::decode("x"), RouteError::encode("x"));
    }
}
