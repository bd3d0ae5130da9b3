//! Utility types for the typed-routes workspace.
//!
//! - [`MultiValueMap`]: A map that can hold multiple values per key, used
//!   for query string parameters where a key may repeat.

mod multi_value_map;

pub use multi_value_map::MultiValueMap;
