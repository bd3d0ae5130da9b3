//! The accumulating route tree builder.
//!
//! [`RouteBuilder`] is a persistent value: [`path`](RouteBuilder::path) and
//! [`nest`](RouteBuilder::nest) return a new, independently usable builder
//! and leave the receiver untouched, so partial builder states can be
//! reused and composed freely. Codecs stay scoped to their own segment
//! here; ancestor merging happens once, in [`build`](RouteBuilder::build).

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use typed_routes_codecs::SharedCodec;
use typed_routes_core::{RouteError, RouteResult};

use crate::config::RouteConfig;
use crate::resolver::resolve;
use crate::route::RouteTree;

/// Matches `:name` placeholders in a path fragment.
pub(crate) static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(":([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder regex is valid")
});

/// One not-yet-resolved segment in the builder's accumulating map.
#[derive(Debug, Clone)]
pub(crate) struct RouteNode {
    pub(crate) name: String,
    pub(crate) segment: String,
    pub(crate) path_vars: BTreeMap<String, SharedCodec>,
    pub(crate) query_params: BTreeMap<String, SharedCodec>,
    pub(crate) children: BTreeMap<String, RouteNode>,
}

/// An accumulating, immutable collection of route segments.
///
/// Registering a sibling with a name that already exists silently replaces
/// the earlier entry; the builder is permissive here by design.
///
/// # Examples
///
/// ```
/// use typed_routes_codecs::number;
/// use typed_routes_router::{RouteBuilder, RouteConfig};
///
/// let tree = RouteBuilder::new()
///     .path(RouteConfig::new("home", "/home"))
///     .unwrap()
///     .path(
///         RouteConfig::new("user", "/user/:id").path_var("id", number()),
///     )
///     .unwrap()
///     .build();
///
/// assert_eq!(tree["home"].template(), "/home");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteBuilder {
    nodes: BTreeMap<String, RouteNode>,
}

/// Returns the placeholder names appearing in a path fragment, in order.
pub(crate) fn placeholders(path: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(path)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Checks the segment-level invariants: a leading slash, and a one-to-one
/// correspondence between `:name` placeholders and declared path variable
/// codecs.
fn validate(config: &RouteConfig) -> RouteResult<()> {
    if !config.path.starts_with('/') {
        return Err(RouteError::ImproperlyConfigured(format!(
            r#"route path must begin with "/". Got "{}""#,
            config.path
        )));
    }

    let found: BTreeSet<String> = placeholders(&config.path).into_iter().collect();
    let declared: BTreeSet<String> = config.path_vars.keys().cloned().collect();

    if let Some(missing) = found.difference(&declared).next() {
        return Err(RouteError::ImproperlyConfigured(format!(
            r#"path variable ":{missing}" in "{}" has no codec"#,
            config.path
        )));
    }
    if let Some(unused) = declared.difference(&found).next() {
        return Err(RouteError::ImproperlyConfigured(format!(
            r#"codec declared for path variable "{unused}" but "{}" has no ":{unused}" placeholder"#,
            config.path
        )));
    }
    Ok(())
}

impl RouteBuilder {
    /// Creates an empty root builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_node(&self, node: RouteNode) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.insert(node.name.clone(), node);
        Self { nodes }
    }

    /// Registers a terminal segment (no children) and returns the augmented
    /// builder.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::ImproperlyConfigured`] if the path lacks a
    /// leading `/`, if placeholders and codecs do not correspond one to
    /// one, or if the config carries a sub-builder.
    pub fn path(&self, config: RouteConfig) -> RouteResult<Self> {
        validate(&config)?;
        if config.sub_routes.is_some() {
            return Err(RouteError::ImproperlyConfigured(format!(
                r#"path() registers a terminal segment but "{}" declares sub_routes; use nest()"#,
                config.name
            )));
        }
        Ok(self.with_node(RouteNode {
            name: config.name,
            segment: config.path,
            path_vars: config.path_vars,
            query_params: config.query_params,
            children: BTreeMap::new(),
        }))
    }

    /// Registers a segment whose children come from the config's
    /// sub-builder, and returns the augmented builder.
    ///
    /// The children's path variables are not merged with this segment's
    /// here; accumulation happens during [`build`](Self::build).
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::ImproperlyConfigured`] under the same segment
    /// rules as [`path`](Self::path), or if the config has no sub-builder.
    pub fn nest(&self, config: RouteConfig) -> RouteResult<Self> {
        validate(&config)?;
        let Some(sub_builder) = config.sub_routes else {
            return Err(RouteError::ImproperlyConfigured(format!(
                r#"nest() requires sub_routes for "{}"; use path() for terminal segments"#,
                config.name
            )));
        };
        Ok(self.with_node(RouteNode {
            name: config.name,
            segment: config.path,
            path_vars: config.path_vars,
            query_params: config.query_params,
            children: sub_builder.nodes,
        }))
    }

    /// Finalizes the builder into a [`RouteTree`], resolving every segment's
    /// full template and accumulated path variables.
    ///
    /// Building is side-effect-free; calling it again on the same builder
    /// produces a fresh, structurally equivalent tree.
    pub fn build(&self) -> RouteTree {
        let empty = BTreeMap::new();
        let routes = self
            .nodes
            .values()
            .map(|node| (node.name.clone(), resolve(node, "", &empty)))
            .collect();
        RouteTree::new(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typed_routes_codecs::{number, string};

    #[test]
    fn test_placeholders_extraction() {
        assert_eq!(
            placeholders("/library/:libId/author/:authorId"),
            vec!["libId".to_string(), "authorId".to_string()]
        );
        assert!(placeholders("/plain/path").is_empty());
    }

    #[test]
    fn test_path_registers_route() {
        let tree = RouteBuilder::new()
            .path(RouteConfig::new("home", "/home"))
            .unwrap()
            .build();
        assert_eq!(tree["home"].template(), "/home");
    }

    #[test]
    fn test_path_requires_leading_slash() {
        let err = RouteBuilder::new()
            .path(RouteConfig::new("home", "home"))
            .unwrap_err();
        assert!(matches!(err, RouteError::ImproperlyConfigured(_)));
    }

    #[test]
    fn test_placeholder_without_codec_fails() {
        let err = RouteBuilder::new()
            .path(RouteConfig::new("user", "/user/:id"))
            .unwrap_err();
        assert!(err.to_string().contains(r#":id"#));
    }

    #[test]
    fn test_codec_without_placeholder_fails() {
        let err = RouteBuilder::new()
            .path(RouteConfig::new("user", "/user").path_var("id", number()))
            .unwrap_err();
        assert!(err.to_string().contains("no \":id\" placeholder"));
    }

    #[test]
    fn test_nest_requires_sub_routes() {
        let err = RouteBuilder::new()
            .nest(RouteConfig::new("lib", "/library"))
            .unwrap_err();
        assert!(err.to_string().contains("nest()"));
    }

    #[test]
    fn test_path_rejects_sub_routes() {
        let children = RouteBuilder::new()
            .path(RouteConfig::new("child", "/child"))
            .unwrap();
        let err = RouteBuilder::new()
            .path(RouteConfig::new("parent", "/parent").sub_routes(children))
            .unwrap_err();
        assert!(err.to_string().contains("use nest()"));
    }

    #[test]
    fn test_builder_is_persistent() {
        let base = RouteBuilder::new()
            .path(RouteConfig::new("home", "/home"))
            .unwrap();

        let with_about = base.path(RouteConfig::new("about", "/about")).unwrap();
        let with_contact = base.path(RouteConfig::new("contact", "/contact")).unwrap();

        let about_tree = with_about.build();
        let contact_tree = with_contact.build();

        assert!(about_tree.get("about").is_some());
        assert!(about_tree.get("contact").is_none());
        assert!(contact_tree.get("contact").is_some());
        assert!(contact_tree.get("about").is_none());
        // The original is still just "home".
        let base_tree = base.build();
        assert!(base_tree.get("home").is_some());
        assert!(base_tree.get("about").is_none());
    }

    #[test]
    fn test_sibling_name_collision_overwrites() {
        let tree = RouteBuilder::new()
            .path(RouteConfig::new("page", "/first"))
            .unwrap()
            .path(RouteConfig::new("page", "/second"))
            .unwrap()
            .build();
        assert_eq!(tree["page"].template(), "/second");
    }

    #[test]
    fn test_build_twice_produces_equivalent_trees() {
        let builder = RouteBuilder::new()
            .path(
                RouteConfig::new("user", "/user/:id")
                    .path_var("id", number())
                    .query_param("tab", string()),
            )
            .unwrap();

        let first = builder.build();
        let second = builder.build();
        assert_eq!(first["user"].template(), second["user"].template());
        assert_eq!(
            first.names().collect::<Vec<_>>(),
            second.names().collect::<Vec<_>>()
        );
    }
}
