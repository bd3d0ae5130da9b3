//! Resolved routes: typed URL construction and parsing.
//!
//! A [`Route`] closes over its full path template and its accumulated path
//! variable codecs. It is immutable once built, so a [`RouteTree`] can be
//! shared across threads without synchronization.

use std::collections::BTreeMap;
use std::ops::Index;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use typed_routes_codecs::{QueryContext, SharedCodec};
use typed_routes_core::query::{decode_path_component, encode_component, QueryPairs};
use typed_routes_core::{RouteError, RouteResult, Value};

use crate::builder::{placeholders, PLACEHOLDER_RE};

/// Base used to parse relative URLs; templates carry no scheme or host.
static FALLBACK_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost").expect("fallback base URL is valid"));

/// Builds a matcher for one template chunk: a capture group per `:name`
/// placeholder, with the text around the placeholders taken literally, so
/// `v:major` matches `v2` and captures `2`.
fn chunk_matcher(chunk: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("^");
    let mut last = 0;
    for found in PLACEHOLDER_RE.find_iter(chunk) {
        pattern.push_str(&regex::escape(&chunk[last..found.start()]));
        pattern.push_str("(.*)");
        last = found.end();
    }
    pattern.push_str(&regex::escape(&chunk[last..]));
    pattern.push('$');
    Regex::new(&pattern)
}

/// Parameters for [`Route::make_url`]: path variable and query parameter
/// values keyed by name.
///
/// # Examples
///
/// ```
/// use typed_routes_router::UrlParams;
///
/// let params = UrlParams::new().with("libId", 1).with("tab", "tab one");
/// assert!(params.get("libId").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlParams {
    values: BTreeMap<String, Value>,
}

impl UrlParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the augmented set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Adds a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The result of [`Route::parse_url`]: decoded path variables and query
/// parameters.
///
/// Query parameters absent from the URL are simply omitted; they are
/// optional by nature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedUrl {
    /// Decoded values for every accumulated path variable.
    pub path_vars: BTreeMap<String, Value>,
    /// Decoded values for the route's own query parameters found in the URL.
    pub query_params: BTreeMap<String, Value>,
}

/// A read-only view of a route's configuration, returned by
/// [`Route::config`].
#[derive(Debug)]
pub struct RouteInfo<'a> {
    /// The route's local path template fragment.
    pub segment: &'a str,
    /// Path variable codecs accumulated from the root down to this route.
    pub path_vars: &'a BTreeMap<String, SharedCodec>,
    /// This route's own query parameter codecs (never inherited).
    pub query_params: &'a BTreeMap<String, SharedCodec>,
    /// Resolved child routes by name.
    pub sub_routes: &'a BTreeMap<String, Route>,
}

/// One resolved segment of a route tree.
///
/// A route is simultaneously usable for its own URL operations and
/// indexable by child name for further navigation:
///
/// ```
/// use typed_routes_codecs::number;
/// use typed_routes_router::{RouteBuilder, RouteConfig};
///
/// let tree = RouteBuilder::new()
///     .nest(
///         RouteConfig::new("library", "/library/:libId")
///             .path_var("libId", number())
///             .sub_routes(
///                 RouteBuilder::new()
///                     .path(RouteConfig::new("shelf", "/shelf"))
///                     .unwrap(),
///             ),
///     )
///     .unwrap()
///     .build();
///
/// assert_eq!(tree["library"]["shelf"].template(), "/library/:libId/shelf");
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    segment: String,
    full_template: String,
    path_vars: BTreeMap<String, SharedCodec>,
    query_params: BTreeMap<String, SharedCodec>,
    sub_routes: BTreeMap<String, Route>,
}

impl Route {
    pub(crate) const fn new(
        name: String,
        segment: String,
        full_template: String,
        path_vars: BTreeMap<String, SharedCodec>,
        query_params: BTreeMap<String, SharedCodec>,
        sub_routes: BTreeMap<String, Route>,
    ) -> Self {
        Self {
            name,
            segment,
            full_template,
            path_vars,
            query_params,
            sub_routes,
        }
    }

    /// Returns this route's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full path template, placeholders intact
    /// (e.g. `/library/:libId/author/:authorId`).
    pub fn template(&self) -> &str {
        &self.full_template
    }

    /// Returns a read-only view of this route's configuration.
    pub fn config(&self) -> RouteInfo<'_> {
        RouteInfo {
            segment: self.segment.as_str(),
            path_vars: &self.path_vars,
            query_params: &self.query_params,
            sub_routes: &self.sub_routes,
        }
    }

    /// Returns the child route with the given name, if any.
    pub fn sub(&self, name: &str) -> Option<&Self> {
        self.sub_routes.get(name)
    }

    /// Builds a URL from this route's template and the given parameters.
    ///
    /// Every `:name` occurrence in the template with a supplied value is
    /// replaced with the encoded value, including placeholders embedded
    /// inside a chunk (`/api/v:major`); a variable without a supplied value
    /// leaves its placeholder in place. Each of this route's **own** query
    /// parameters present in `params` with a non-undefined value is encoded
    /// and appended. A pre-assembled `key=v&key=v` fragment produced by the
    /// key-based array formats is spliced in as-is; any other value is
    /// percent-encoded and assigned to its key.
    ///
    /// # Errors
    ///
    /// Propagates the first codec encode error.
    pub fn make_url(&self, params: &UrlParams) -> RouteResult<String> {
        let mut url = String::with_capacity(self.full_template.len());
        let mut last = 0;
        for found in PLACEHOLDER_RE.find_iter(&self.full_template) {
            url.push_str(&self.full_template[last..found.start()]);
            let name = &found.as_str()[1..];
            match (self.path_vars.get(name), params.get(name)) {
                (Some(codec), Some(value)) => url.push_str(&codec.encode(value, None)?),
                _ => url.push_str(found.as_str()),
            }
            last = found.end();
        }
        url.push_str(&self.full_template[last..]);

        let mut query_parts: Vec<String> = Vec::new();
        for (key, codec) in &self.query_params {
            let Some(value) = params.get(key) else {
                continue;
            };
            if value.is_undefined() {
                continue;
            }
            let encoded = codec.encode(value, Some(key))?;
            // The key-based array formats emit complete `key=v&key=v` (or
            // `key[]=v`) fragments; those go in untouched.
            if encoded.contains(&format!("{key}=")) || encoded.contains(&format!("{key}[]=")) {
                query_parts.push(encoded);
            } else {
                query_parts.push(format!("{key}={}", encode_component(&encoded)));
            }
        }
        if !query_parts.is_empty() {
            url.push('?');
            url.push_str(&query_parts.join("&"));
        }
        Ok(url)
    }

    /// Parses a URL against this route's template, decoding every
    /// accumulated path variable and any of this route's own query
    /// parameters present in the query string.
    ///
    /// Relative URLs are accepted (a placeholder host is assumed); absolute
    /// URLs are matched on their path alone. Path chunk values are
    /// percent-decoded; `+` stays a literal plus in paths.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UrlParse`] if the URL's chunk count or any
    /// literal chunk differs from the template, and propagates codec decode
    /// errors for matched chunks and query values.
    pub fn parse_url(&self, uri: &str) -> RouteResult<ParsedUrl> {
        let parsed = Url::options()
            .base_url(Some(&FALLBACK_BASE))
            .parse(uri)
            .map_err(|_| RouteError::url_parse(uri, &self.full_template))?;

        let template_chunks: Vec<&str> = self.full_template.split('/').collect();
        let path_chunks: Vec<&str> = parsed.path().split('/').collect();

        if template_chunks.len() != path_chunks.len() {
            return Err(RouteError::url_parse(uri, &self.full_template));
        }

        let mut path_vars = BTreeMap::new();
        for (expected, actual) in template_chunks.iter().zip(&path_chunks) {
            let names = placeholders(expected);
            if names.is_empty() {
                if expected != actual {
                    return Err(RouteError::url_parse(uri, &self.full_template));
                }
                continue;
            }
            let matcher =
                chunk_matcher(expected).map_err(|_| RouteError::url_parse(uri, &self.full_template))?;
            let Some(caps) = matcher.captures(actual) else {
                return Err(RouteError::url_parse(uri, &self.full_template));
            };
            for (position, name) in names.iter().enumerate() {
                let (Some(codec), Some(found)) = (self.path_vars.get(name), caps.get(position + 1))
                else {
                    continue;
                };
                let text = decode_path_component(found.as_str());
                path_vars.insert(name.clone(), codec.decode(&text, None)?);
            }
        }

        let search = parsed.query().unwrap_or("");
        let pairs = QueryPairs::parse(search);
        let mut query_params = BTreeMap::new();
        for (key, codec) in &self.query_params {
            let bracket_key = format!("{key}[]");
            if !pairs.contains(key) && !pairs.contains(&bracket_key) {
                continue;
            }
            let text = pairs
                .get(key)
                .or_else(|| pairs.get(&bracket_key))
                .unwrap_or("")
                .to_string();
            let ctx = QueryContext::new(key.clone(), search);
            query_params.insert(key.clone(), codec.decode(&text, Some(&ctx))?);
        }

        Ok(ParsedUrl {
            path_vars,
            query_params,
        })
    }
}

impl Index<&str> for Route {
    type Output = Self;

    /// Navigates to a child route by name.
    ///
    /// # Panics
    ///
    /// Panics if no child with that name exists.
    fn index(&self, name: &str) -> &Self::Output {
        self.sub(name)
            .unwrap_or_else(|| panic!("no sub-route named \"{name}\" under \"{}\"", self.name))
    }
}

/// A finished route tree: the top-level routes by name.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    routes: BTreeMap<String, Route>,
}

impl RouteTree {
    pub(crate) const fn new(routes: BTreeMap<String, Route>) -> Self {
        Self { routes }
    }

    /// Returns the top-level route with the given name, if any.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Returns an iterator over the top-level route names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Returns an iterator over (name, route) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(name, route)| (name.as_str(), route))
    }

    /// Returns `true` if the tree has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Index<&str> for RouteTree {
    type Output = Route;

    /// Returns the top-level route by name.
    ///
    /// # Panics
    ///
    /// Panics if no route with that name exists.
    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
            .unwrap_or_else(|| panic!("no route named \"{name}\" in the tree"))
    }
}

impl<'a> IntoIterator for &'a RouteTree {
    type Item = (&'a String, &'a Route);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RouteBuilder;
    use crate::config::RouteConfig;
    use typed_routes_codecs::{boolean, number, string};

    fn library_tree() -> RouteTree {
        RouteBuilder::new()
            .nest(
                RouteConfig::new("library", "/library/:libId")
                    .path_var("libId", number())
                    .query_param("limit", boolean())
                    .query_param("page", number())
                    .sub_routes(
                        RouteBuilder::new()
                            .path(
                                RouteConfig::new("author", "/author/:authorId")
                                    .path_var("authorId", number())
                                    .query_param("tab", string()),
                            )
                            .unwrap(),
                    ),
            )
            .unwrap()
            .build()
    }

    #[test]
    fn test_template_concatenates_ancestors() {
        let tree = library_tree();
        assert_eq!(tree["library"].template(), "/library/:libId");
        assert_eq!(
            tree["library"]["author"].template(),
            "/library/:libId/author/:authorId"
        );
    }

    #[test]
    fn test_make_url_without_params() {
        let tree = RouteBuilder::new()
            .path(RouteConfig::new("home", "/home"))
            .unwrap()
            .build();
        assert_eq!(
            tree["home"].make_url(&UrlParams::new()).unwrap(),
            "/home"
        );
    }

    #[test]
    fn test_make_url_substitutes_and_appends_query() {
        let tree = library_tree();
        let url = tree["library"]["author"]
            .make_url(
                &UrlParams::new()
                    .with("libId", 1)
                    .with("authorId", 2)
                    .with("tab", "tab one"),
            )
            .unwrap();
        assert_eq!(url, "/library/1/author/2?tab=tab%20one");
    }

    #[test]
    fn test_make_url_missing_path_var_leaves_placeholder() {
        let tree = library_tree();
        let url = tree["library"]
            .make_url(&UrlParams::new())
            .unwrap();
        assert_eq!(url, "/library/:libId");
    }

    #[test]
    fn test_make_url_skips_undefined_query_values() {
        let tree = library_tree();
        let url = tree["library"]
            .make_url(
                &UrlParams::new()
                    .with("libId", 1)
                    .with("limit", Value::Undefined),
            )
            .unwrap();
        assert_eq!(url, "/library/1");
    }

    #[test]
    fn test_make_url_multiple_query_params_sorted_by_key() {
        let tree = library_tree();
        let url = tree["library"]
            .make_url(
                &UrlParams::new()
                    .with("libId", 1)
                    .with("limit", true)
                    .with("page", 3),
            )
            .unwrap();
        assert_eq!(url, "/library/1?limit=true&page=3");
    }

    #[test]
    fn test_make_url_propagates_encode_error() {
        let tree = library_tree();
        let err = tree["library"]
            .make_url(&UrlParams::new().with("libId", "not a number"))
            .unwrap_err();
        assert!(matches!(err, RouteError::Encode(_)));
    }

    #[test]
    fn test_parse_url_extracts_typed_values() {
        let tree = library_tree();
        let parsed = tree["library"]["author"]
            .parse_url("/library/1/author/4?tab=info")
            .unwrap();
        assert_eq!(parsed.path_vars["libId"], Value::Number(1.0));
        assert_eq!(parsed.path_vars["authorId"], Value::Number(4.0));
        assert_eq!(
            parsed.query_params["tab"],
            Value::String("info".to_string())
        );
    }

    #[test]
    fn test_parse_url_mismatch_names_url_and_template() {
        let tree = library_tree();
        let err = tree["library"]["author"].parse_url("/foo").unwrap_err();
        assert_eq!(
            err,
            RouteError::url_parse("/foo", "/library/:libId/author/:authorId")
        );
    }

    #[test]
    fn test_parse_url_literal_chunk_mismatch() {
        let tree = library_tree();
        assert!(tree["library"].parse_url("/archive/1").is_err());
    }

    #[test]
    fn test_parse_url_absent_query_keys_are_omitted() {
        let tree = library_tree();
        let parsed = tree["library"].parse_url("/library/9").unwrap();
        assert_eq!(parsed.path_vars["libId"], Value::Number(9.0));
        assert!(parsed.query_params.is_empty());
    }

    #[test]
    fn test_parse_url_accepts_absolute_urls() {
        let tree = library_tree();
        let parsed = tree["library"]
            .parse_url("https://example.com/library/5?page=2")
            .unwrap();
        assert_eq!(parsed.path_vars["libId"], Value::Number(5.0));
        assert_eq!(parsed.query_params["page"], Value::Number(2.0));
    }

    #[test]
    fn test_parse_url_percent_decodes_path_chunks() {
        let tree = RouteBuilder::new()
            .path(
                RouteConfig::new("doc", "/doc/:title").path_var("title", string()),
            )
            .unwrap()
            .build();
        let parsed = tree["doc"].parse_url("/doc/hello%20world").unwrap();
        assert_eq!(
            parsed.path_vars["title"],
            Value::String("hello world".to_string())
        );
    }

    #[test]
    fn test_parse_url_plus_in_path_chunk_stays_literal() {
        let tree = RouteBuilder::new()
            .path(
                RouteConfig::new("doc", "/doc/:title").path_var("title", string()),
            )
            .unwrap()
            .build();
        let parsed = tree["doc"].parse_url("/doc/c++").unwrap();
        assert_eq!(parsed.path_vars["title"], Value::String("c++".to_string()));
    }

    #[test]
    fn test_make_url_substitutes_mid_chunk_placeholder() {
        let tree = RouteBuilder::new()
            .path(
                RouteConfig::new("api", "/api/v:major").path_var("major", number()),
            )
            .unwrap()
            .build();
        let url = tree["api"]
            .make_url(&UrlParams::new().with("major", 2))
            .unwrap();
        assert_eq!(url, "/api/v2");
    }

    #[test]
    fn test_parse_url_extracts_mid_chunk_placeholder() {
        let tree = RouteBuilder::new()
            .path(
                RouteConfig::new("api", "/api/v:major").path_var("major", number()),
            )
            .unwrap()
            .build();
        let parsed = tree["api"].parse_url("/api/v2").unwrap();
        assert_eq!(parsed.path_vars["major"], Value::Number(2.0));
        // The literal part of the chunk still has to match.
        assert!(tree["api"].parse_url("/api/x2").is_err());
    }

    #[test]
    fn test_parse_url_propagates_decode_error() {
        let tree = library_tree();
        let err = tree["library"].parse_url("/library/oops").unwrap_err();
        assert!(matches!(err, RouteError::Decode(_)));
    }

    #[test]
    fn test_config_exposes_accumulated_path_vars_and_own_query_params() {
        let tree = library_tree();
        let author = &tree["library"]["author"];
        let info = author.config();
        assert_eq!(info.segment, "/author/:authorId");
        assert!(info.path_vars.contains_key("libId"));
        assert!(info.path_vars.contains_key("authorId"));
        // Query params are never inherited.
        assert!(info.query_params.contains_key("tab"));
        assert!(!info.query_params.contains_key("limit"));
        assert!(!info.query_params.contains_key("page"));
    }

    #[test]
    fn test_tree_navigation() {
        let tree = library_tree();
        assert!(tree.get("library").is_some());
        assert!(tree.get("missing").is_none());
        assert_eq!(tree.names().collect::<Vec<_>>(), vec!["library"]);
        assert!(tree["library"].sub("author").is_some());
        assert!(tree["library"].sub("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "no route named")]
    fn test_tree_index_panics_on_missing_route() {
        let tree = library_tree();
        let _ = &tree["nope"];
    }
}
