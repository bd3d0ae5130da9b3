//! A map that can hold multiple values per key.
//!
//! Query strings allow a key to appear multiple times (`x=1&x=2`), which is
//! exactly what the repeat-key array formats rely on. [`MultiValueMap`]
//! keeps every occurrence in insertion order.

use std::collections::hash_map;
use std::collections::HashMap;
use std::hash::Hash;

/// A map from keys to lists of values.
///
/// [`get`](MultiValueMap::get) returns the **first** value for a key (URL
/// parsing decodes the first occurrence of a query parameter), while
/// [`get_list`](MultiValueMap::get_list) returns all of them.
///
/// # Examples
///
/// ```
/// use typed_routes_core::utils::MultiValueMap;
///
/// let mut m = MultiValueMap::new();
/// m.append("x".to_string(), "1");
/// m.append("x".to_string(), "2");
///
/// assert_eq!(m.get(&"x".to_string()), Some(&"1"));
/// assert_eq!(m.get_list(&"x".to_string()), Some(&vec!["1", "2"]));
/// ```
#[derive(Debug, Clone)]
pub struct MultiValueMap<K: Eq + Hash, V> {
    inner: HashMap<K, Vec<V>>,
}

impl<K: Eq + Hash, V> Default for MultiValueMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> MultiValueMap<K, V> {
    /// Creates an empty `MultiValueMap`.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Returns a reference to the **first** value associated with the key,
    /// or `None` if the key is not present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key).and_then(|v| v.first())
    }

    /// Returns a reference to all values associated with the key, or `None`
    /// if the key is not present.
    pub fn get_list(&self, key: &K) -> Option<&Vec<V>> {
        self.inner.get(key)
    }

    /// Appends a value to the list for the given key.
    pub fn append(&mut self, key: K, value: V) {
        self.inner.entry(key).or_default().push(value);
    }

    /// Returns `true` if the map contains the specified key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> hash_map::Keys<'_, K, Vec<V>> {
        self.inner.keys()
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map contains no keys.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over (key, value-list) pairs.
    pub fn iter(&self) -> hash_map::Iter<'_, K, Vec<V>> {
        self.inner.iter()
    }
}

impl<K: Eq + Hash, V> IntoIterator for MultiValueMap<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = hash_map::IntoIter<K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K: Eq + Hash, V> IntoIterator for &'a MultiValueMap<K, V> {
    type Item = (&'a K, &'a Vec<V>);
    type IntoIter = hash_map::Iter<'a, K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let m: MultiValueMap<String, String> = MultiValueMap::new();
        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
    }

    #[test]
    fn test_append_and_get_returns_first() {
        let mut m = MultiValueMap::new();
        m.append("x", "1");
        m.append("x", "2");
        m.append("x", "3");

        assert_eq!(m.get(&"x"), Some(&"1"));
        assert_eq!(m.get_list(&"x"), Some(&vec!["1", "2", "3"]));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_get_missing_key() {
        let m: MultiValueMap<&str, &str> = MultiValueMap::new();
        assert_eq!(m.get(&"missing"), None);
        assert_eq!(m.get_list(&"missing"), None);
    }

    #[test]
    fn test_contains_key() {
        let mut m = MultiValueMap::new();
        m.append("a", 1);
        assert!(m.contains_key(&"a"));
        assert!(!m.contains_key(&"b"));
    }

    #[test]
    fn test_iter_preserves_per_key_order() {
        let mut m = MultiValueMap::new();
        m.append("a", 1);
        m.append("a", 2);
        m.append("b", 3);

        let items: HashMap<_, _> = m.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(items.get("a"), Some(&vec![1, 2]));
        assert_eq!(items.get("b"), Some(&vec![3]));
    }
}
