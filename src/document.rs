//! An insertion-ordered map, used for decoded KeyString documents.
//!
//! The map is a [`Vec`] of pairs kept in insertion order, with a hash index from
//! each key to its slot, so building a wide document stays linear. Inserting a key
//! that is already present replaces its value in place: the later write wins, the
//! first position is kept.
//!
//! # Example
//!
//! ```
//! use keystring::prelude::*;
//!
//! let mut doc = Document::new();
//! doc.insert("b".to_string(), Value::Integer(1));
//! doc.insert("a".to_string(), Value::Null);
//! doc.insert("b".to_string(), Value::Integer(2));
//!
//! let keys: Vec<&str> = doc.keys().map(String::as_str).collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! assert_eq!(doc.get("b"), Some(&Value::Integer(2)));
//! ```

use crate::value::Value;
use std::{
    borrow::Borrow,
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

/// A decoded KeyString document.
pub type Document = OrderedMap<String, Value>;

#[derive(Clone)]
/// A map implemented as a [`Vec`] of pairs in insertion order, indexed by key.
///
/// Equality and hashing look at the pairs only, in order.
///
/// See also: [module level documentation](`crate::document`).
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        OrderedMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self { Self::default() }

    /// Returns length.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Indicates whether the map is empty.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.entries.iter() }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.entries.iter().map(|(k, _)| k) }

    /// Returns the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> { self.entries.iter().map(|(_, v)| v) }
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    /// Inserts a pair, returning the previous value if `key` was already present.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    /// Looks up the value stored under `key`.
    pub fn get<Q: ?Sized + Hash + Eq>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Indicates whether `key` is present.
    pub fn contains_key<Q: ?Sized + Hash + Eq>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
    {
        self.index.contains_key(key)
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool { self.entries == other.entries }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash, V: Hash> Hash for OrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.entries.hash(state) }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.entries.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.entries.iter() }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> OrderedMap<K, V> {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: Hash + Eq + Clone, V> From<Vec<(K, V)>> for OrderedMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { v.into_iter().collect() }
}
