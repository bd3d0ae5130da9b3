//! # typed-routes-core
//!
//! Foundation types for the typed-routes workspace. This crate has no
//! dependency on the codec or router layers and provides:
//!
//! - [`error`] - Error types and result aliases
//! - [`value`] - The dynamic [`Value`] model that flows through codecs
//! - [`query`] - Query string parsing and percent-encoding helpers
//! - [`utils`] - Utility types (`MultiValueMap`)

pub mod error;
pub mod query;
pub mod utils;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{RouteError, RouteResult};
pub use value::Value;
