//! Route segment configuration.
//!
//! A [`RouteConfig`] describes one path segment before it enters the
//! builder: its name, its local path template fragment, the codecs for its
//! `:name` placeholders and query parameters, and (for nested segments) a
//! sub-builder of child routes.

use std::collections::BTreeMap;

use typed_routes_codecs::SharedCodec;

use crate::builder::RouteBuilder;

/// The input to registering one route segment with
/// [`RouteBuilder::path`](crate::RouteBuilder::path) or
/// [`RouteBuilder::nest`](crate::RouteBuilder::nest).
///
/// The path must begin with `/` and may contain `:name` placeholders; every
/// placeholder must be bound with [`path_var`](Self::path_var) and vice
/// versa. The builder checks this at registration time.
///
/// # Examples
///
/// ```
/// use typed_routes_codecs::{boolean, number};
/// use typed_routes_router::RouteConfig;
///
/// let config = RouteConfig::new("library", "/library/:libId")
///     .path_var("libId", number())
///     .query_param("limit", boolean());
/// ```
#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) path_vars: BTreeMap<String, SharedCodec>,
    pub(crate) query_params: BTreeMap<String, SharedCodec>,
    pub(crate) sub_routes: Option<RouteBuilder>,
}

impl RouteConfig {
    /// Creates a configuration for a segment with the given name (unique
    /// among its siblings) and local path fragment.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            path_vars: BTreeMap::new(),
            query_params: BTreeMap::new(),
            sub_routes: None,
        }
    }

    /// Binds a codec to a `:name` placeholder in the path.
    #[must_use]
    pub fn path_var(mut self, name: impl Into<String>, codec: SharedCodec) -> Self {
        self.path_vars.insert(name.into(), codec);
        self
    }

    /// Declares a query parameter local to this segment. Query parameters
    /// are not inherited by child routes.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, codec: SharedCodec) -> Self {
        self.query_params.insert(name.into(), codec);
        self
    }

    /// Attaches a sub-builder whose routes become this segment's children.
    /// Required by `nest`, rejected by `path`.
    #[must_use]
    pub fn sub_routes(mut self, builder: RouteBuilder) -> Self {
        self.sub_routes = Some(builder);
        self
    }
}
