//! Maps addressed by an unordered key pair `{a, b}`.
//!
//! A single key domain is ranked; the pair `{a, b}` is stored once, in the
//! row of the key with the strictly greater rank. `get(a, b)` and
//! `get(b, a)` resolve to the same cell on every read and write. Self-pairs
//! `{a, a}` have their own cell, so a domain of `n` keys holds exactly
//! `n * (n + 1) / 2` values.
//!
//! - [`SealedSymmetricMap`]: domain fixed at construction.
//! - [`SymmetricMap`]: `set` with unseen keys admits them first (each with a
//!   defaulted cell against every key, itself included), then writes.
//!
//! # Thread safety
//!
//! No internal synchronization; mutation needs `&mut` access. Concurrent
//! writers must coordinate through an external lock.

use std::hash::Hash;
use std::ops::Index;

use indexmap::IndexMap;

use super::domain::KeyDomain;
use super::mapping::SymmetricMapping;
use super::triangle::TriangularGrid;
use crate::error::{Domain, Error};
use crate::rank::{HashRank, KeyRank};

/// A symmetric map whose key domain is fixed at construction.
///
/// # Examples
/// ```
/// use u_twokey::collections::SealedSymmetricMap;
///
/// let mut map: SealedSymmetricMap<&str, i32> = SealedSymmetricMap::new(["a", "b", "c"]).unwrap();
/// map.set(&"a", &"c", 3).unwrap();
///
/// assert_eq!(map.get(&"c", &"a"), Ok(&3));
/// assert_eq!(map.get(&"a", &"c"), Ok(&3));
/// assert_eq!(map.values().count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct SealedSymmetricMap<K, V> {
    grid: TriangularGrid<K, V>,
}

impl<K: Hash + Eq, V> SealedSymmetricMap<K, V> {
    /// Creates a map over `keys`, ranking them by hash.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys share a hash.
    pub fn new<I>(keys: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = K>,
        V: Default,
    {
        Self::with_rank(keys, &HashRank::new())
    }

    /// Creates a map over `keys` ordered by `ranker`.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys share a rank.
    pub fn with_rank<I, R>(keys: I, ranker: &R) -> Result<Self, Error>
    where
        I: IntoIterator<Item = K>,
        R: KeyRank<K> + ?Sized,
        V: Default,
    {
        let domain = KeyDomain::build(keys, ranker, Domain::Symmetric)?;
        tracing::debug!(keys = domain.len(), "built sealed symmetric map");
        Ok(Self {
            grid: TriangularGrid::new(domain),
        })
    }

    /// Returns the value at `{a, b}`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if either key is outside the domain.
    pub fn get(&self, a: &K, b: &K) -> Result<&V, Error> {
        self.grid.get(a, b)
    }

    /// Mutable access to the value at `{a, b}`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if either key is outside the domain.
    pub fn get_mut(&mut self, a: &K, b: &K) -> Result<&mut V, Error> {
        self.grid.get_mut(a, b)
    }

    /// Returns the value at `{a, b}`, or `None` if either key is unknown.
    pub fn try_get(&self, a: &K, b: &K) -> Option<&V> {
        self.grid.try_get(a, b)
    }

    /// Overwrites the value at `{a, b}`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if either key is outside the domain.
    pub fn set(&mut self, a: &K, b: &K, value: V) -> Result<(), Error> {
        *self.grid.get_mut(a, b)? = value;
        Ok(())
    }

    /// Returns `true` if both keys are in the domain.
    pub fn contains(&self, a: &K, b: &K) -> bool {
        self.grid.contains(a, b)
    }

    /// Snapshot of every pair `{key, j}` for `j` in the domain, `j == key`
    /// included.
    ///
    /// This is the single-key row lookup (`map[key]` in indexer terms).
    /// [`Index`] must hand out a reference into the map, and a row is
    /// assembled from cells spread across the triangle, so the row is
    /// returned by value here instead.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if `key` is outside the domain.
    pub fn marginalize(&self, key: &K) -> Result<IndexMap<K, V>, Error>
    where
        K: Clone,
        V: Clone,
    {
        self.grid.marginalize(key)
    }

    /// The key domain, in construction order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.grid.domain.keys()
    }

    /// One value per unordered pair, row-major by rank.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.grid.values()
    }

    /// Every stored cell with its keys, the greater-rank key first.
    pub fn iter(&self) -> impl Iterator<Item = ((&K, &K), &V)> + '_ {
        self.grid.iter()
    }

    /// Number of stored cells, `n * (n + 1) / 2` for `n` keys.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` if the domain has no keys.
    pub fn is_empty(&self) -> bool {
        self.grid.len() == 0
    }

    /// Number of keys in the domain.
    pub fn key_count(&self) -> usize {
        self.grid.domain.len()
    }
}

/// A symmetric map whose key domain grows on write.
///
/// # Examples
/// ```
/// use u_twokey::collections::SymmetricMap;
///
/// let mut map: SymmetricMap<&str, i32> = SymmetricMap::with_keys(["a", "b", "c"]).unwrap();
/// map.set("d", "a", 3).unwrap();
///
/// assert_eq!(map.get(&"a", &"d"), Ok(&3));
/// assert_eq!(map.get(&"d", &"d"), Ok(&0));
/// assert_eq!(map.values().count(), 4 * 5 / 2);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricMap<K, V, R = HashRank> {
    grid: TriangularGrid<K, V>,
    ranker: R,
}

impl<K: Hash + Eq, V> SymmetricMap<K, V> {
    /// Creates an empty map ranking keys by hash.
    pub fn new() -> Self {
        Self::with_rank(HashRank::new())
    }

    /// Creates a map over an initial domain, ranking keys by hash.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys share a hash.
    pub fn with_keys<I>(keys: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = K>,
        V: Default,
    {
        Self::with_keys_and_rank(keys, HashRank::new())
    }
}

impl<K: Hash + Eq, V> Default for SymmetricMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R> SymmetricMap<K, V, R>
where
    K: Hash + Eq,
    R: KeyRank<K>,
{
    /// Creates an empty map ordered by `ranker`.
    pub fn with_rank(ranker: R) -> Self {
        Self {
            grid: TriangularGrid::empty(KeyDomain::empty(Domain::Symmetric)),
            ranker,
        }
    }

    /// Creates a map over an initial domain ordered by `ranker`.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys share a rank.
    pub fn with_keys_and_rank<I>(keys: I, ranker: R) -> Result<Self, Error>
    where
        I: IntoIterator<Item = K>,
        V: Default,
    {
        let domain = KeyDomain::build(keys, &ranker, Domain::Symmetric)?;
        tracing::debug!(keys = domain.len(), "built symmetric map");
        Ok(Self {
            grid: TriangularGrid::new(domain),
            ranker,
        })
    }

    /// Writes `value` at `{a, b}`, admitting either key if it is new.
    ///
    /// Unseen keys are admitted in argument order, each with a defaulted cell
    /// against every key already present and against itself. When both keys
    /// are new, `b` is admitted after `a` and so also gets the `{a, b}` cell.
    /// The write happens only after both keys are in place.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if a new key's rank collides with the
    /// domain, or if two distinct new keys share a rank. All checks run before
    /// the map is touched.
    pub fn set(&mut self, a: K, b: K, value: V) -> Result<(), Error>
    where
        V: Default,
    {
        let slot_a = self.admission(&a)?;
        let slot_b = if a == b { slot_a } else { self.admission(&b)? };
        if let (Slot::New(ra), Slot::New(rb)) = (slot_a, slot_b) {
            if a != b && ra == rb {
                let len = self.grid.domain.len();
                return Err(Error::DuplicateKey {
                    domain: Domain::Symmetric,
                    unique: len + 1,
                    len: len + 2,
                });
            }
        }

        if let Slot::New(rank) = slot_a {
            tracing::trace!(rank, "growing symmetric key domain");
            self.grid.push_key(a, rank);
        }
        if let Slot::New(rank) = slot_b {
            if !self.grid.domain.contains(&b) {
                tracing::trace!(rank, "growing symmetric key domain");
                self.grid.push_key(b, rank);
            }
        }

        if let Some(cell) = self.grid.cell_mut(slot_a.rank(), slot_b.rank()) {
            *cell = value;
        }
        Ok(())
    }

    /// Rank of `key` if present, or its checked rank if it would be new.
    fn admission(&self, key: &K) -> Result<Slot, Error> {
        match self.grid.domain.rank_of(key) {
            Some(rank) => Ok(Slot::Present(rank)),
            None => {
                let rank = self.ranker.rank(key);
                self.grid.domain.check_admissible(rank)?;
                Ok(Slot::New(rank))
            }
        }
    }
}

impl<K, V, R> SymmetricMap<K, V, R>
where
    K: Hash + Eq,
{
    /// Returns the value at `{a, b}`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if either key has never been written.
    pub fn get(&self, a: &K, b: &K) -> Result<&V, Error> {
        self.grid.get(a, b)
    }

    /// Mutable access to an existing cell. Does not grow the domain.
    pub fn get_mut(&mut self, a: &K, b: &K) -> Result<&mut V, Error> {
        self.grid.get_mut(a, b)
    }

    /// Returns the value at `{a, b}`, or `None` if either key is unknown.
    pub fn try_get(&self, a: &K, b: &K) -> Option<&V> {
        self.grid.try_get(a, b)
    }

    /// Returns `true` if both keys are in the domain. Does not grow it.
    pub fn contains(&self, a: &K, b: &K) -> bool {
        self.grid.contains(a, b)
    }

    /// Snapshot of every pair `{key, j}` for `j` in the domain, `j == key`
    /// included.
    ///
    /// This is the single-key row lookup (`map[key]` in indexer terms).
    /// [`Index`] must hand out a reference into the map, and a row is
    /// assembled from cells spread across the triangle, so the row is
    /// returned by value here instead.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if `key` has never been written.
    pub fn marginalize(&self, key: &K) -> Result<IndexMap<K, V>, Error>
    where
        K: Clone,
        V: Clone,
    {
        self.grid.marginalize(key)
    }

    /// The key domain, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.grid.domain.keys()
    }

    /// One value per unordered pair, row-major by rank.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.grid.values()
    }

    /// Every stored cell with its keys, the greater-rank key first.
    pub fn iter(&self) -> impl Iterator<Item = ((&K, &K), &V)> + '_ {
        self.grid.iter()
    }

    /// Number of stored cells, `n * (n + 1) / 2` for `n` keys.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` if no key has been admitted yet.
    pub fn is_empty(&self) -> bool {
        self.grid.len() == 0
    }

    /// Number of keys in the domain.
    pub fn key_count(&self) -> usize {
        self.grid.domain.len()
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Present(u64),
    New(u64),
}

impl Slot {
    fn rank(self) -> u64 {
        match self {
            Slot::Present(rank) | Slot::New(rank) => rank,
        }
    }
}

macro_rules! impl_symmetric_mapping {
    ($ty:ident < $($param:ident),+ >) => {
        impl<$($param),+> SymmetricMapping<K, V> for $ty<$($param),+>
        where
            K: Hash + Eq,
        {
            fn get(&self, a: &K, b: &K) -> Result<&V, Error> {
                self.grid.get(a, b)
            }

            fn try_get(&self, a: &K, b: &K) -> Option<&V> {
                self.grid.try_get(a, b)
            }

            fn marginalize(&self, key: &K) -> Result<IndexMap<K, V>, Error>
            where
                K: Clone,
                V: Clone,
            {
                self.grid.marginalize(key)
            }

            fn keys<'a>(&'a self) -> impl Iterator<Item = &'a K>
            where
                K: 'a,
            {
                self.grid.domain.keys()
            }

            fn values<'a>(&'a self) -> impl Iterator<Item = &'a V>
            where
                V: 'a,
            {
                self.grid.values()
            }
        }

        impl<'k, $($param),+> Index<(&'k K, &'k K)> for $ty<$($param),+>
        where
            K: Hash + Eq,
        {
            type Output = V;

            /// # Panics
            /// Panics if either key is outside the domain.
            fn index(&self, (a, b): (&'k K, &'k K)) -> &V {
                match self.grid.get(a, b) {
                    Ok(v) => v,
                    Err(e) => panic!("{e}"),
                }
            }
        }
    };
}

impl_symmetric_mapping!(SealedSymmetricMap<K, V>);
impl_symmetric_mapping!(SymmetricMap<K, V, R>);

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 3] = ["a", "b", "c"];

    fn fill<F>(mut set: F)
    where
        F: FnMut(&'static str, &'static str, i32),
    {
        set("a", "a", 1);
        set("a", "b", 2);
        set("a", "c", 3);
        set("b", "b", 4);
        set("b", "c", 5);
        set("c", "c", 6);
    }

    fn sealed() -> SealedSymmetricMap<&'static str, i32> {
        let mut map = SealedSymmetricMap::new(KEYS).unwrap();
        fill(|a, b, v| map.set(&a, &b, v).unwrap());
        map
    }

    fn growable() -> SymmetricMap<&'static str, i32> {
        let mut map = SymmetricMap::with_keys(KEYS).unwrap();
        fill(|a, b, v| map.set(a, b, v).unwrap());
        map
    }

    fn first_letter(k: &&str) -> u64 {
        k.bytes().next().map_or(0, u64::from)
    }

    fn assert_filled<M: SymmetricMapping<&'static str, i32>>(map: &M) {
        assert_eq!(map.get(&"a", &"a"), Ok(&1));
        assert_eq!(map.get(&"b", &"a"), Ok(&2));
        assert_eq!(map.get(&"a", &"b"), Ok(&2));
        assert_eq!(map.get(&"a", &"c"), Ok(&3));
        assert_eq!(map.get(&"c", &"a"), Ok(&3));
        assert_eq!(map.get(&"b", &"b"), Ok(&4));
        assert_eq!(map.get(&"b", &"c"), Ok(&5));
        assert_eq!(map.get(&"c", &"b"), Ok(&5));
        assert_eq!(map.get(&"c", &"c"), Ok(&6));
    }

    // --- sealed ---

    #[test]
    fn test_sealed_getters_equal_setters() {
        assert_filled(&sealed());
    }

    #[test]
    fn test_sealed_marginalize() {
        let map = sealed();
        let expected: IndexMap<&str, i32> =
            [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(map.marginalize(&"a").unwrap(), expected);
        let expected: IndexMap<&str, i32> =
            [("a", 3), ("b", 5), ("c", 6)].into_iter().collect();
        assert_eq!(map.marginalize(&"c").unwrap(), expected);
    }

    #[test]
    fn test_sealed_triangular_completeness() {
        let map = sealed();
        assert_eq!(map.len(), 6);
        let mut values: Vec<_> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_sealed_unknown_keys() {
        let mut map = sealed();
        let not_found = Err(Error::KeyNotFound {
            domain: Domain::Symmetric,
        });
        assert_eq!(map.get(&"a", &"z"), not_found);
        assert_eq!(
            map.set(&"z", &"a", 1),
            Err(Error::KeyNotFound {
                domain: Domain::Symmetric
            })
        );
        assert_eq!(map.try_get(&"z", &"a"), None);
        assert_eq!(map.try_get(&"z", &"z"), None);
        assert!(map.marginalize(&"z").is_err());
        assert_eq!(map.key_count(), 3);
    }

    #[test]
    fn test_sealed_duplicate_rank_rejected() {
        let err = SealedSymmetricMap::<&str, i32>::with_rank(
            ["apple", "banana", "avocado"],
            &first_letter,
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                domain: Domain::Symmetric,
                unique: 2,
                len: 3
            }
        );
    }

    #[test]
    fn test_sealed_row_is_greater_rank() {
        // Ranks by first letter: "b" outranks "a".
        let mut map =
            SealedSymmetricMap::<&str, i32>::with_rank(["a", "b"], &first_letter).unwrap();
        map.set(&"a", &"b", 7).unwrap();
        let cells: Vec<_> = map.iter().map(|((x, y), v)| (*x, *y, *v)).collect();
        assert_eq!(cells, vec![("a", "a", 0), ("b", "a", 7), ("b", "b", 0)]);
    }

    #[test]
    #[should_panic(expected = "symmetric key domain")]
    fn test_sealed_index_panics_on_unknown_key() {
        let map = sealed();
        let _value: i32 = map[(&"a", &"z")];
    }

    #[test]
    fn test_sealed_index_is_symmetric() {
        let map = sealed();
        assert_eq!(map[(&"c", &"b")], map[(&"b", &"c")]);
    }

    // --- growable ---

    #[test]
    fn test_growable_getters_equal_setters() {
        assert_filled(&growable());
    }

    #[test]
    fn test_growable_add_index() {
        let mut map = growable();
        map.set("d", "a", 3).unwrap();
        assert_eq!(map.get(&"a", &"d"), Ok(&3));
        assert_eq!(map.get(&"b", &"d"), Ok(&0));
        assert_eq!(map.get(&"c", &"d"), Ok(&0));
        assert_eq!(map.get(&"d", &"d"), Ok(&0));
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn test_growable_add_two_indices() {
        let mut map = growable();
        map.set("d", "e", 5).unwrap();
        for other in KEYS {
            assert_eq!(map.get(&"d", &other), Ok(&0));
            assert_eq!(map.get(&"e", &other), Ok(&0));
        }
        assert_eq!(map.get(&"d", &"d"), Ok(&0));
        assert_eq!(map.get(&"e", &"e"), Ok(&0));
        assert_eq!(map.get(&"d", &"e"), Ok(&5));
        assert_eq!(map.get(&"e", &"d"), Ok(&5));
        assert_eq!(map.len(), 5 * 6 / 2);
        assert_filled(&map);
    }

    #[test]
    fn test_growable_self_pair_of_new_key() {
        let mut map: SymmetricMap<u8, i32> = SymmetricMap::new();
        map.set(9, 9, 1).unwrap();
        assert_eq!(map.key_count(), 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&9, &9), Ok(&1));
    }

    #[test]
    fn test_growable_marginalize_after_growth() {
        let mut map = growable();
        map.set("d", "b", 8).unwrap();
        let expected: IndexMap<&str, i32> =
            [("a", 2), ("b", 4), ("c", 5), ("d", 8)].into_iter().collect();
        assert_eq!(map.marginalize(&"b").unwrap(), expected);
    }

    #[test]
    fn test_growable_collision_with_domain_rejected() {
        let mut map: SymmetricMap<&str, i32, _> =
            SymmetricMap::with_keys_and_rank(["apple", "banana"], first_letter).unwrap();
        let err = map.set("cherry", "avocado", 1).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateKey {
                domain: Domain::Symmetric,
                ..
            }
        ));
        // "cherry" was admissible but must not have been added.
        assert_eq!(map.key_count(), 2);
        assert_eq!(map.len(), 3);
        assert_eq!(map.try_get(&"cherry", &"cherry"), None);
    }

    #[test]
    fn test_growable_collision_between_new_keys_rejected() {
        let mut map: SymmetricMap<&str, i32, _> = SymmetricMap::with_rank(first_letter);
        let err = map.set("cherry", "coconut", 1).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                domain: Domain::Symmetric,
                unique: 1,
                len: 2
            }
        );
        assert!(map.is_empty());
    }

    #[test]
    fn test_growable_collision_between_new_keys_counts_domain() {
        let mut map: SymmetricMap<&str, i32, _> =
            SymmetricMap::with_keys_and_rank(["apple", "banana"], first_letter).unwrap();
        let err = map.set("cherry", "coconut", 1).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateKey {
                domain: Domain::Symmetric,
                unique: 3,
                len: 4
            }
        );
        assert_eq!(map.key_count(), 2);
    }

    #[test]
    fn test_growable_reads_do_not_grow() {
        let mut map = growable();
        assert!(map.get(&"z", &"a").is_err());
        assert!(map.get_mut(&"z", &"a").is_err());
        assert!(!map.contains(&"z", &"a"));
        assert_eq!(map.keys().count(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = growable();
        let mut copy = original.clone();
        copy.set("a", "b", 20).unwrap();
        copy.set("x", "y", 1).unwrap();
        assert_eq!(original.get(&"a", &"b"), Ok(&2));
        assert_eq!(original.key_count(), 3);
        assert_eq!(copy.get(&"b", &"a"), Ok(&20));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn unordered(a: u16, b: u16) -> (u16, u16) {
        (a.max(b), a.min(b))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn symmetric_reads_agree(
            n in 1_u16..10,
            writes in proptest::collection::vec((0_u16..10, 0_u16..10, 1_i32..100), 0..40),
        ) {
            let mut map: SealedSymmetricMap<u16, i32> = SealedSymmetricMap::new(0..n).unwrap();
            for &(a, b, v) in &writes {
                if a < n && b < n {
                    map.set(&a, &b, v).unwrap();
                }
            }
            for a in 0..n {
                for b in 0..n {
                    prop_assert_eq!(map.get(&a, &b), map.get(&b, &a));
                }
            }
        }

        #[test]
        fn triangular_completeness(n in 0_usize..30) {
            let map: SealedSymmetricMap<usize, u8> = SealedSymmetricMap::new(0..n).unwrap();
            prop_assert_eq!(map.values().count(), n * (n + 1) / 2);
            prop_assert_eq!(map.len(), n * (n + 1) / 2);
        }

        #[test]
        fn try_get_none_iff_outside_domain(a in 0_u16..12, b in 0_u16..12) {
            let map: SealedSymmetricMap<u16, u8> = SealedSymmetricMap::new(2..8).unwrap();
            let inside = (2..8).contains(&a) && (2..8).contains(&b);
            prop_assert_eq!(map.try_get(&a, &b).is_some(), inside);
        }

        #[test]
        fn growth_preserves_earlier_writes(seed in any::<u64>()) {
            let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
            let mut map: SymmetricMap<u16, u32> = SymmetricMap::new();
            let mut model: HashMap<(u16, u16), u32> = HashMap::new();
            for _ in 0..60 {
                let a = rng.random_range(0..15_u16);
                let b = rng.random_range(0..15_u16);
                let v = rng.random_range(1..1000_u32);
                map.set(a, b, v).unwrap();
                model.insert(unordered(a, b), v);
                for (&(x, y), &expected) in &model {
                    prop_assert_eq!(map.get(&x, &y), Ok(&expected));
                    prop_assert_eq!(map.get(&y, &x), Ok(&expected));
                }
            }
            let n = map.key_count();
            prop_assert_eq!(map.len(), n * (n + 1) / 2);
            let written = map.values().filter(|v| **v != 0).count();
            prop_assert_eq!(written, model.len());
        }
    }
}
