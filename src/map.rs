//! Ordered map type for document tables.
//!
//! This module provides [`AnyMap`], a wrapper around [`IndexMap`] that keeps
//! table entries in insertion order. Insertion order is not semantically
//! significant for tables, but keeping it makes repeated traversals
//! deterministic and debugging output predictable; the serializer
//! independently visits keys in sorted order.
//!
//! ## Examples
//!
//! ```rust
//! use anydoc::{Any, AnyMap};
//!
//! let mut map = AnyMap::new();
//! map.insert("name".to_string(), Any::from("Alice"));
//! map.insert("age".to_string(), Any::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.string().ok()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to document values.
///
/// This is a thin wrapper around [`IndexMap`] that maintains insertion order.
/// Keys are unique; inserting an existing key replaces that key's value
/// without duplicating the key.
///
/// # Examples
///
/// ```rust
/// use anydoc::{Any, AnyMap};
///
/// let mut map = AnyMap::new();
/// map.insert("first".to_string(), Any::from(1));
/// map.insert("second".to_string(), Any::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnyMap(IndexMap<String, crate::Any>);

impl AnyMap {
    /// Creates an empty `AnyMap`.
    #[must_use]
    pub fn new() -> Self {
        AnyMap(IndexMap::new())
    }

    /// Creates an empty `AnyMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AnyMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use anydoc::{Any, AnyMap};
    ///
    /// let mut map = AnyMap::new();
    /// assert!(map.insert("key".to_string(), Any::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Any::from(43)).is_some());
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Any) -> Option<crate::Any> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Any> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Any> {
        self.0.get_mut(key)
    }

    /// Returns a mutable reference to the entry for `key`, inserting a
    /// [`Any::default`](crate::Any::default) (`None`) value if absent.
    pub fn entry_or_none(&mut self, key: &str) -> &mut crate::Any {
        self.0.entry(key.to_string()).or_default()
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key from the map, returning its value if present.
    ///
    /// Preserves the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Any> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Any> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Any> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Any> {
        self.0.iter()
    }

    /// Returns the keys in ascending lexicographic order.
    ///
    /// This is the visitation order the serializer uses, regardless of how the
    /// entries were inserted.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl std::ops::Index<&str> for AnyMap {
    type Output = crate::Any;

    /// # Panics
    ///
    /// Panics if the key is absent. Use [`AnyMap::get`] for a fallible lookup.
    fn index(&self, key: &str) -> &crate::Any {
        &self.0[key]
    }
}

impl From<HashMap<String, crate::Any>> for AnyMap {
    fn from(map: HashMap<String, crate::Any>) -> Self {
        AnyMap(map.into_iter().collect())
    }
}

impl From<AnyMap> for HashMap<String, crate::Any> {
    fn from(map: AnyMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for AnyMap {
    type Item = (String, crate::Any);
    type IntoIter = indexmap::map::IntoIter<String, crate::Any>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnyMap {
    type Item = (&'a String, &'a crate::Any);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Any>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Any)> for AnyMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Any)>>(iter: T) -> Self {
        AnyMap(IndexMap::from_iter(iter))
    }
}
