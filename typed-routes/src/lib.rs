//! # typed-routes
//!
//! Type-safe route definitions with bidirectional URL codecs.
//!
//! Declare a tree of path segments (static and parameterized) once, then
//! get URL builders that substitute typed parameters into the templates and
//! URL parsers that extract typed values back out, each field converted
//! through its codec.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access; depend on the individual crates for finer-grained control.
//!
//! # Examples
//!
//! ```
//! use typed_routes::codecs::{boolean, number, string};
//! use typed_routes::{RouteBuilder, RouteConfig, UrlParams};
//!
//! let tree = RouteBuilder::new()
//!     .nest(
//!         RouteConfig::new("library", "/library/:libId")
//!             .path_var("libId", number())
//!             .query_param("limit", boolean())
//!             .sub_routes(
//!                 RouteBuilder::new()
//!                     .path(
//!                         RouteConfig::new("author", "/author/:authorId")
//!                             .path_var("authorId", number())
//!                             .query_param("tab", string()),
//!                     )
//!                     .unwrap(),
//!             ),
//!     )
//!     .unwrap()
//!     .build();
//!
//! let author = &tree["library"]["author"];
//! assert_eq!(author.template(), "/library/:libId/author/:authorId");
//!
//! let url = author
//!     .make_url(
//!         &UrlParams::new()
//!             .with("libId", 1)
//!             .with("authorId", 2)
//!             .with("tab", "tab one"),
//!     )
//!     .unwrap();
//! assert_eq!(url, "/library/1/author/2?tab=tab%20one");
//!
//! let parsed = author.parse_url("/library/1/author/4?tab=info").unwrap();
//! assert_eq!(parsed.path_vars["libId"].as_number(), Some(1.0));
//! assert_eq!(parsed.query_params["tab"].as_str(), Some("info"));
//! ```

/// Foundation types: errors, the dynamic value model, query utilities.
pub use typed_routes_core as core;

/// String ⇄ value codecs: primitives, arrays, and the codec registry.
pub use typed_routes_codecs as codecs;

/// Route trees: builder, resolution, and URL construction/parsing.
pub use typed_routes_router as router;

// The working surface, re-exported at the root.
pub use typed_routes_codecs::{Codec, QueryContext, SharedCodec};
pub use typed_routes_core::{RouteError, RouteResult, Value};
pub use typed_routes_router::{
    ParsedUrl, Route, RouteBuilder, RouteConfig, RouteInfo, RouteTree, UrlParams,
};
