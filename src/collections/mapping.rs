//! Read interfaces shared by the sealed and growable variants.
//!
//! Generic code that only reads (lookups, marginals, enumeration) can accept
//! either variant through these traits. Writes stay inherent because the two
//! variants disagree on ownership: growable maps take keys by value so they
//! can admit new ones, sealed maps only borrow them.

use indexmap::IndexMap;

use crate::error::Error;

/// Read access to a map addressed by an ordered key pair `(K1, K2)`.
pub trait TwoKeyMapping<K1, K2, V> {
    /// Returns the value at `(k1, k2)`, or `KeyNotFound` if either key lies
    /// outside its domain.
    fn get(&self, k1: &K1, k2: &K2) -> Result<&V, Error>;

    /// Returns the value at `(k1, k2)`, or `None` if either key lies outside
    /// its domain. Never fails.
    fn try_get(&self, k1: &K1, k2: &K2) -> Option<&V>;

    /// Snapshot of the row of `k1`: one entry per second key.
    fn marginalize_first(&self, k1: &K1) -> Result<IndexMap<K2, V>, Error>
    where
        K2: Clone,
        V: Clone;

    /// Snapshot of the column of `k2`: one entry per first key.
    fn marginalize_second(&self, k2: &K2) -> Result<IndexMap<K1, V>, Error>
    where
        K1: Clone,
        V: Clone;

    /// All key pairs, first-key major.
    fn keys<'a>(&'a self) -> impl Iterator<Item = (&'a K1, &'a K2)>
    where
        K1: 'a,
        K2: 'a;

    /// All values, in the same order as [`keys`](Self::keys).
    fn values<'a>(&'a self) -> impl Iterator<Item = &'a V>
    where
        V: 'a;
}

/// Read access to a map addressed by an unordered key pair `{K, K}`.
pub trait SymmetricMapping<K, V> {
    /// Returns the value at `{a, b}`; `get(a, b)` and `get(b, a)` always
    /// address the same cell.
    fn get(&self, a: &K, b: &K) -> Result<&V, Error>;

    /// Returns the value at `{a, b}`, or `None` if either key lies outside the
    /// domain. Never fails.
    fn try_get(&self, a: &K, b: &K) -> Option<&V>;

    /// Snapshot of every pair involving `key`, including `{key, key}`.
    ///
    /// Stands in for a `map[key]` row indexer: [`Index`](std::ops::Index)
    /// must return a reference, and a row is built by value.
    fn marginalize(&self, key: &K) -> Result<IndexMap<K, V>, Error>
    where
        K: Clone,
        V: Clone;

    /// The key domain.
    fn keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
    where
        K: 'a;

    /// One value per unordered pair, self-pairs included.
    fn values<'a>(&'a self) -> impl Iterator<Item = &'a V>
    where
        V: 'a;
}
