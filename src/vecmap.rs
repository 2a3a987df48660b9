//! A map kept as a [`Vec`] of pairs in insertion order, used for AWB
//! [objects][`crate::Value::Object`].
//!
//! Key order is part of an object's meaning: decoding preserves the order keys appear
//! on the wire and encoding writes them back in the same order.
//!
//! # Example
//!
//! ```
//! use awcodec::vecmap::VecMap;
//!
//! let mut vmap = VecMap::new();
//! vmap.insert("b", 1);
//! vmap.insert("a", 2);
//!
//! // insertion order, not sorted order
//! let keys: Vec<_> = vmap.keys().collect();
//! assert_eq!(keys, vec![&"b", &"a"]);
//!
//! // re-inserting keeps the original slot
//! vmap.insert("b", 3);
//! assert_eq!(vmap.iter().next(), Some(&("b", 3)));
//! ```

use std::{borrow::Borrow, iter::FromIterator, slice::Iter, vec::IntoIter};

#[derive(PartialEq, Clone, Hash, Debug)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// Lookups are linear, which is what AWB objects (a handful of keys each) want.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use awcodec::vecmap::VecMap;
    ///
    /// let vmap: VecMap<_, _> = vec![("foo", "bar")].into_iter().collect();
    ///
    /// // should have one element
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Returns the keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    /// Returns the values, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> { self.0.iter().map(|(_, v)| v) }
}

impl<K: PartialEq, V> VecMap<K, V> {
    /// Inserts a pair. If the key is already present its value is replaced in place and
    /// the old value returned.
    ///
    /// # Arguments
    ///
    /// * `k: K` - The key.
    /// * `v: V` - The value.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        match self.0.iter_mut().find(|(key, _)| *key == k) {
            Some((_, slot)) => Some(std::mem::replace(slot, v)),
            None => {
                self.0.push((k, v));
                None
            }
        }
    }

    /// Looks up a key.
    ///
    /// # Example
    ///
    /// ```
    /// use awcodec::vecmap::VecMap;
    ///
    /// let mut vmap = VecMap::new();
    /// vmap.insert("x".to_string(), 1);
    ///
    /// assert_eq!(vmap.get("x"), Some(&1));
    /// assert_eq!(vmap.get("y"), None);
    /// ```
    pub fn get<Q: ?Sized>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq,
    {
        self.0
            .iter()
            .find(|(key, _)| <K as Borrow<Q>>::borrow(key) == k)
            .map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key<Q: ?Sized>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq,
    {
        self.get(k).is_some()
    }
}

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap::new() }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let mut out = VecMap::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<K: PartialEq, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { v.into_iter().collect() }
}
