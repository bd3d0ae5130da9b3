//! Query string parsing and percent-encoding helpers.
//!
//! [`QueryPairs`] splits a raw query string into a [`MultiValueMap`] so that
//! repeated keys (`x=1&x=2`) keep every occurrence, which the repeat-key
//! array formats depend on.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::utils::MultiValueMap;

/// Characters escaped by [`encode_component`].
///
/// This is the `encodeURIComponent` set: everything except alphanumerics
/// and `- _ . ! ~ * ' ( )` is percent-encoded. Spaces become `%20`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single URL component (a query value or path chunk).
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Percent-decodes a URL component. Invalid UTF-8 sequences are replaced
/// rather than rejected; `+` is treated as an encoded space, as in query
/// strings.
pub fn decode_component(text: &str) -> String {
    let unplussed = text.replace('+', " ");
    percent_decode_str(&unplussed)
        .decode_utf8_lossy()
        .into_owned()
}

/// Percent-decodes a path chunk. Unlike [`decode_component`], `+` stays a
/// literal plus; plus-as-space is a query string convention only.
pub fn decode_path_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// A parsed query string with support for repeated keys.
///
/// # Examples
///
/// ```
/// use typed_routes_core::query::QueryPairs;
///
/// let pairs = QueryPairs::parse("x=1&x=2&tab=main%20page");
/// assert_eq!(pairs.get("x"), Some("1"));
/// assert_eq!(pairs.get_list("x"), Some(&vec!["1".to_string(), "2".to_string()]));
/// assert_eq!(pairs.get("tab"), Some("main page"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryPairs {
    pairs: MultiValueMap<String, String>,
}

impl QueryPairs {
    /// Parses a raw query string (with or without the leading `?`).
    ///
    /// Keys and values are percent-decoded; a pair with no `=` is treated as
    /// a key with an empty value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut pairs = MultiValueMap::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair
                .find('=')
                .map_or((pair, ""), |eq| (&pair[..eq], &pair[eq + 1..]));
            pairs.append(decode_component(key), decode_component(value));
        }

        Self { pairs }
    }

    /// Returns the first value for the given key, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(&key.to_string()).map(String::as_str)
    }

    /// Returns all values for the given key, or `None` if absent.
    pub fn get_list(&self, key: &str) -> Option<&Vec<String>> {
        self.pairs.get_list(&key.to_string())
    }

    /// Returns `true` if the key appeared at least once.
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.contains_key(&key.to_string())
    }

    /// Returns `true` if the query string held no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
