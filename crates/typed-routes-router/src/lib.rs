//! # typed-routes-router
//!
//! Declarative route trees with typed URL construction and parsing:
//!
//! - [`config`] - Per-segment route configuration ([`RouteConfig`])
//! - [`builder`] - The persistent, accumulating [`RouteBuilder`]
//! - [`route`] - Resolved [`Route`]s with `make_url`/`parse_url`/`template`
//!
//! # Examples
//!
//! ```
//! use typed_routes_codecs::{number, string};
//! use typed_routes_router::{RouteBuilder, RouteConfig, UrlParams};
//!
//! let tree = RouteBuilder::new()
//!     .path(
//!         RouteConfig::new("user", "/user/:userId")
//!             .path_var("userId", number())
//!             .query_param("tab", string()),
//!     )
//!     .unwrap()
//!     .build();
//!
//! let user = &tree["user"];
//! assert_eq!(user.template(), "/user/:userId");
//!
//! let url = user
//!     .make_url(&UrlParams::new().with("userId", 7).with("tab", "posts"))
//!     .unwrap();
//! assert_eq!(url, "/user/7?tab=posts");
//!
//! let parsed = user.parse_url("/user/7?tab=posts").unwrap();
//! assert_eq!(parsed.path_vars["userId"].as_number(), Some(7.0));
//! ```

pub mod builder;
pub mod config;
mod resolver;
pub mod route;

pub use builder::RouteBuilder;
pub use config::RouteConfig;
pub use route::{ParsedUrl, Route, RouteInfo, RouteTree, UrlParams};
