//! Dense maps addressed by an ordered key pair `(K1, K2)`.
//!
//! Both variants pre-allocate the full Cartesian product of their two key
//! domains, so every `(k1, k2)` with `k1` and `k2` in their domains has a
//! value at all times (initially `V::default()`).
//!
//! - [`SealedTwoKeyMap`]: domains fixed at construction.
//! - [`TwoKeyMap`]: `set` with an unseen key grows its domain first, then
//!   writes. Growth adds the row, then the column, then sets the cell.
//!
//! # Thread safety
//!
//! The maps carry no internal synchronization. Shared reads are safe; writers
//! need `&mut` access, so sharing a map between threads that mutate it
//! requires an external lock.

use std::hash::Hash;
use std::ops::Index;

use indexmap::IndexMap;

use super::domain::KeyDomain;
use super::grid::DenseGrid;
use super::mapping::TwoKeyMapping;
use crate::error::{Domain, Error};
use crate::rank::{HashRank, KeyRank};

/// A dense two-key map whose key domains are fixed at construction.
///
/// # Examples
/// ```
/// use u_twokey::collections::SealedTwoKeyMap;
///
/// let mut map: SealedTwoKeyMap<&str, u32, i32> =
///     SealedTwoKeyMap::new(["a", "b"], [1, 2, 3]).unwrap();
/// map.set(&"b", &3, 6).unwrap();
///
/// assert_eq!(map.get(&"b", &3), Ok(&6));
/// assert_eq!(map.get(&"a", &3), Ok(&0));
/// assert_eq!(map.try_get(&"z", &3), None);
/// assert!(map.set(&"z", &3, 1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SealedTwoKeyMap<K1, K2, V> {
    grid: DenseGrid<K1, K2, V>,
}

impl<K1, K2, V> SealedTwoKeyMap<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    /// Creates a map over the given domains, ranking keys by hash.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys of one domain share a hash.
    pub fn new<I1, I2>(first_keys: I1, second_keys: I2) -> Result<Self, Error>
    where
        I1: IntoIterator<Item = K1>,
        I2: IntoIterator<Item = K2>,
        V: Default,
    {
        Self::with_rank(first_keys, second_keys, &HashRank::new())
    }

    /// Creates a map over the given domains using `ranker` as the key
    /// identity function.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys of one domain share a rank.
    pub fn with_rank<I1, I2, R>(first_keys: I1, second_keys: I2, ranker: &R) -> Result<Self, Error>
    where
        I1: IntoIterator<Item = K1>,
        I2: IntoIterator<Item = K2>,
        R: KeyRank<K1> + KeyRank<K2> + ?Sized,
        V: Default,
    {
        let first = KeyDomain::build(first_keys, ranker, Domain::First)?;
        let second = KeyDomain::build(second_keys, ranker, Domain::Second)?;
        tracing::debug!(
            first = first.len(),
            second = second.len(),
            "built sealed two-key map"
        );
        Ok(Self {
            grid: DenseGrid::new(first, second),
        })
    }

    /// Returns the value at `(k1, k2)`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if either key is outside its domain.
    pub fn get(&self, k1: &K1, k2: &K2) -> Result<&V, Error> {
        self.grid.get(k1, k2)
    }

    /// Looks up a value by key pair.
    pub fn get_pair(&self, pair: &(K1, K2)) -> Result<&V, Error> {
        self.grid.get(&pair.0, &pair.1)
    }

    /// Mutable access to the value at `(k1, k2)`.
    pub fn get_mut(&mut self, k1: &K1, k2: &K2) -> Result<&mut V, Error> {
        self.grid.get_mut(k1, k2)
    }

    /// Returns the value at `(k1, k2)`, or `None` if either key is unknown.
    pub fn try_get(&self, k1: &K1, k2: &K2) -> Option<&V> {
        self.grid.try_get(k1, k2)
    }

    /// Overwrites the value at `(k1, k2)`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if either key is outside its domain;
    /// the map is left unchanged.
    pub fn set(&mut self, k1: &K1, k2: &K2, value: V) -> Result<(), Error> {
        *self.grid.get_mut(k1, k2)? = value;
        Ok(())
    }

    /// Whether both keys belong to their domains.
    pub fn contains(&self, k1: &K1, k2: &K2) -> bool {
        self.grid.contains(k1, k2)
    }

    /// Snapshot of the row of `k1`, keyed by second key.
    pub fn marginalize_first(&self, k1: &K1) -> Result<IndexMap<K2, V>, Error>
    where
        K2: Clone,
        V: Clone,
    {
        self.grid.marginalize_first(k1)
    }

    /// Snapshot of the column of `k2`, keyed by first key.
    pub fn marginalize_second(&self, k2: &K2) -> Result<IndexMap<K1, V>, Error>
    where
        K1: Clone,
        V: Clone,
    {
        self.grid.marginalize_second(k2)
    }

    /// Borrowed view of the row of `k1`, in second-key order.
    pub fn row(&self, k1: &K1) -> Result<impl Iterator<Item = (&K2, &V)> + '_, Error> {
        self.grid.row(k1)
    }

    /// The first-key domain, in construction order.
    pub fn first_keys(&self) -> impl Iterator<Item = &K1> + '_ {
        self.grid.first.keys()
    }

    /// The second-key domain, in construction order.
    pub fn second_keys(&self) -> impl Iterator<Item = &K2> + '_ {
        self.grid.second.keys()
    }

    /// All key pairs of the Cartesian product, first-key major.
    pub fn keys(&self) -> impl Iterator<Item = (&K1, &K2)> + '_ {
        self.grid.keys()
    }

    /// All values, in the same order as [`keys`](Self::keys).
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.grid.values()
    }

    /// All cells with their key pairs, first-key major.
    pub fn iter(&self) -> impl Iterator<Item = ((&K1, &K2), &V)> + '_ {
        self.grid.iter()
    }

    /// Number of cells: `first_len() * second_len()`.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` if either domain is empty.
    pub fn is_empty(&self) -> bool {
        self.grid.len() == 0
    }

    /// Size of the first-key domain.
    pub fn first_len(&self) -> usize {
        self.grid.first.len()
    }

    /// Size of the second-key domain.
    pub fn second_len(&self) -> usize {
        self.grid.second.len()
    }
}

/// Where a key of a growable write lives: an existing position, or a rank
/// that was checked and is waiting to be admitted.
enum Slot {
    Existing(usize),
    New(u64),
}

/// A dense two-key map whose key domains grow on write.
///
/// Reads of unknown keys fail with [`Error::KeyNotFound`] (or return `None`
/// through [`try_get`](Self::try_get)); only [`set`](Self::set) admits keys.
///
/// # Examples
/// ```
/// use u_twokey::collections::TwoKeyMap;
///
/// let mut map: TwoKeyMap<&str, u32, f64> = TwoKeyMap::with_keys(["a", "b"], [1, 2, 3]).unwrap();
/// map.set("c", 0, 2.0).unwrap();
///
/// assert_eq!(map.get(&"c", &0), Ok(&2.0));
/// assert_eq!(map.get(&"a", &0), Ok(&0.0));
/// assert_eq!(map.get(&"c", &3), Ok(&0.0));
/// assert_eq!(map.len(), 3 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct TwoKeyMap<K1, K2, V, R = HashRank> {
    grid: DenseGrid<K1, K2, V>,
    ranker: R,
}

impl<K1, K2, V> TwoKeyMap<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    /// Creates an empty map ranking keys by hash.
    pub fn new() -> Self {
        Self::with_rank(HashRank::new())
    }

    /// Creates a map with initial domains, ranking keys by hash.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys of one domain share a hash.
    pub fn with_keys<I1, I2>(first_keys: I1, second_keys: I2) -> Result<Self, Error>
    where
        I1: IntoIterator<Item = K1>,
        I2: IntoIterator<Item = K2>,
        V: Default,
    {
        Self::with_keys_and_rank(first_keys, second_keys, HashRank::new())
    }
}

impl<K1, K2, V> Default for TwoKeyMap<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K1, K2, V, R> TwoKeyMap<K1, K2, V, R>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
    R: KeyRank<K1> + KeyRank<K2>,
{
    /// Creates an empty map using `ranker` as the key identity function.
    pub fn with_rank(ranker: R) -> Self {
        Self {
            grid: DenseGrid::empty(
                KeyDomain::empty(Domain::First),
                KeyDomain::empty(Domain::Second),
            ),
            ranker,
        }
    }

    /// Creates a map with initial domains using `ranker`.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if two keys of one domain share a rank.
    pub fn with_keys_and_rank<I1, I2>(
        first_keys: I1,
        second_keys: I2,
        ranker: R,
    ) -> Result<Self, Error>
    where
        I1: IntoIterator<Item = K1>,
        I2: IntoIterator<Item = K2>,
        V: Default,
    {
        let first = KeyDomain::build(first_keys, &ranker, Domain::First)?;
        let second = KeyDomain::build(second_keys, &ranker, Domain::Second)?;
        tracing::debug!(
            first = first.len(),
            second = second.len(),
            "built two-key map"
        );
        Ok(Self {
            grid: DenseGrid::new(first, second),
            ranker,
        })
    }

    /// Writes `value` at `(k1, k2)`, growing either domain if its key is new.
    ///
    /// A new first key adds a row defaulted across the second-key domain; a
    /// new second key then adds a column defaulted across every row,
    /// including one just added. Only afterwards is the cell written.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if a new key's rank collides with a key
    /// already in its domain. Both ranks are checked before anything grows,
    /// so a rejected call leaves the map unchanged.
    pub fn set(&mut self, k1: K1, k2: K2, value: V) -> Result<(), Error>
    where
        V: Default,
    {
        let row = match self.grid.first.position(&k1) {
            Some(i) => Slot::Existing(i),
            None => {
                let rank = KeyRank::<K1>::rank(&self.ranker, &k1);
                self.grid.first.check_admissible(rank)?;
                Slot::New(rank)
            }
        };
        let column = match self.grid.second.position(&k2) {
            Some(j) => Slot::Existing(j),
            None => {
                let rank = KeyRank::<K2>::rank(&self.ranker, &k2);
                self.grid.second.check_admissible(rank)?;
                Slot::New(rank)
            }
        };

        let row = match row {
            Slot::Existing(i) => i,
            Slot::New(rank) => {
                tracing::trace!(rank, "growing first-key domain");
                self.grid.push_row(k1, rank)
            }
        };
        let column = match column {
            Slot::Existing(j) => j,
            Slot::New(rank) => {
                tracing::trace!(rank, "growing second-key domain");
                self.grid.push_column(k2, rank)
            }
        };

        if let Some(cell) = self.grid.cell_mut(row, column) {
            *cell = value;
        }
        Ok(())
    }
}

impl<K1, K2, V, R> TwoKeyMap<K1, K2, V, R>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    /// Returns the value at `(k1, k2)`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotFound`] if either key has never been written.
    pub fn get(&self, k1: &K1, k2: &K2) -> Result<&V, Error> {
        self.grid.get(k1, k2)
    }

    /// Looks up a value by key pair.
    pub fn get_pair(&self, pair: &(K1, K2)) -> Result<&V, Error> {
        self.grid.get(&pair.0, &pair.1)
    }

    /// Mutable access to an existing cell. Does not grow the domains.
    pub fn get_mut(&mut self, k1: &K1, k2: &K2) -> Result<&mut V, Error> {
        self.grid.get_mut(k1, k2)
    }

    /// Returns the value at `(k1, k2)`, or `None` if either key is unknown.
    pub fn try_get(&self, k1: &K1, k2: &K2) -> Option<&V> {
        self.grid.try_get(k1, k2)
    }

    /// Whether both keys belong to their domains.
    pub fn contains(&self, k1: &K1, k2: &K2) -> bool {
        self.grid.contains(k1, k2)
    }

    /// Snapshot of the row of `k1`, keyed by second key.
    pub fn marginalize_first(&self, k1: &K1) -> Result<IndexMap<K2, V>, Error>
    where
        K2: Clone,
        V: Clone,
    {
        self.grid.marginalize_first(k1)
    }

    /// Snapshot of the column of `k2`, keyed by first key.
    pub fn marginalize_second(&self, k2: &K2) -> Result<IndexMap<K1, V>, Error>
    where
        K1: Clone,
        V: Clone,
    {
        self.grid.marginalize_second(k2)
    }

    /// Borrowed view of the row of `k1`, in second-key order.
    pub fn row(&self, k1: &K1) -> Result<impl Iterator<Item = (&K2, &V)> + '_, Error> {
        self.grid.row(k1)
    }

    /// The first-key domain, in insertion order.
    pub fn first_keys(&self) -> impl Iterator<Item = &K1> + '_ {
        self.grid.first.keys()
    }

    /// The second-key domain, in insertion order.
    pub fn second_keys(&self) -> impl Iterator<Item = &K2> + '_ {
        self.grid.second.keys()
    }

    /// All key pairs of the Cartesian product, first-key major.
    pub fn keys(&self) -> impl Iterator<Item = (&K1, &K2)> + '_ {
        self.grid.keys()
    }

    /// All values, in the same order as [`keys`](Self::keys).
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.grid.values()
    }

    /// All cells with their key pairs, first-key major.
    pub fn iter(&self) -> impl Iterator<Item = ((&K1, &K2), &V)> + '_ {
        self.grid.iter()
    }

    /// Number of cells, `first_len() * second_len()`.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Returns `true` if either domain is empty.
    pub fn is_empty(&self) -> bool {
        self.grid.len() == 0
    }

    /// Number of keys in the first domain.
    pub fn first_len(&self) -> usize {
        self.grid.first.len()
    }

    /// Number of keys in the second domain.
    pub fn second_len(&self) -> usize {
        self.grid.second.len()
    }
}

macro_rules! impl_two_key_mapping {
    ($ty:ident < $($param:ident),+ >) => {
        impl<$($param),+> TwoKeyMapping<K1, K2, V> for $ty<$($param),+>
        where
            K1: Hash + Eq,
            K2: Hash + Eq,
        {
            fn get(&self, k1: &K1, k2: &K2) -> Result<&V, Error> {
                self.grid.get(k1, k2)
            }

            fn try_get(&self, k1: &K1, k2: &K2) -> Option<&V> {
                self.grid.try_get(k1, k2)
            }

            fn marginalize_first(&self, k1: &K1) -> Result<IndexMap<K2, V>, Error>
            where
                K2: Clone,
                V: Clone,
            {
                self.grid.marginalize_first(k1)
            }

            fn marginalize_second(&self, k2: &K2) -> Result<IndexMap<K1, V>, Error>
            where
                K1: Clone,
                V: Clone,
            {
                self.grid.marginalize_second(k2)
            }

            fn keys<'a>(&'a self) -> impl Iterator<Item = (&'a K1, &'a K2)>
            where
                K1: 'a,
                K2: 'a,
            {
                self.grid.keys()
            }

            fn values<'a>(&'a self) -> impl Iterator<Item = &'a V>
            where
                V: 'a,
            {
                self.grid.values()
            }
        }

        impl<'k, $($param),+> Index<(&'k K1, &'k K2)> for $ty<$($param),+>
        where
            K1: Hash + Eq,
            K2: Hash + Eq,
        {
            type Output = V;

            /// # Panics
            /// Panics if either key is outside its domain, like
            /// `HashMap`'s `Index`.
            fn index(&self, (k1, k2): (&'k K1, &'k K2)) -> &V {
                match self.grid.get(k1, k2) {
                    Ok(v) => v,
                    Err(e) => panic!("{e}"),
                }
            }
        }
    };
}

impl_two_key_mapping!(SealedTwoKeyMap<K1, K2, V>);
impl_two_key_mapping!(TwoKeyMap<K1, K2, V, R>);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn sealed_set_then_get(
            n1 in 1_u32..8,
            n2 in 1_u32..8,
            writes in proptest::collection::vec((0_u32..8, 0_u32..8, -100_i32..100), 0..40),
        ) {
            let mut map: SealedTwoKeyMap<u32, u32, i32> =
                SealedTwoKeyMap::new(0..n1, 0..n2).unwrap();
            let mut model: HashMap<(u32, u32), i32> = HashMap::new();
            for &(k1, k2, v) in &writes {
                let result = map.set(&k1, &k2, v);
                if k1 < n1 && k2 < n2 {
                    prop_assert!(result.is_ok());
                    model.insert((k1, k2), v);
                } else {
                    prop_assert!(result.is_err());
                }
            }
            for k1 in 0..n1 {
                for k2 in 0..n2 {
                    let expected = model.get(&(k1, k2)).copied().unwrap_or_default();
                    prop_assert_eq!(map.get(&k1, &k2), Ok(&expected));
                }
            }
            prop_assert_eq!(map.values().count(), (n1 * n2) as usize);
        }

        #[test]
        fn try_get_none_iff_outside_domain(
            k1 in 0_u32..10,
            k2 in 0_u32..10,
        ) {
            let map: SealedTwoKeyMap<u32, u32, u8> =
                SealedTwoKeyMap::new(0..5, 3..8).unwrap();
            let inside = k1 < 5 && (3..8).contains(&k2);
            prop_assert_eq!(map.try_get(&k1, &k2).is_some(), inside);
        }

        #[test]
        fn growth_preserves_earlier_writes(seed in any::<u64>()) {
            let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
            let mut map: TwoKeyMap<u16, u16, u32> = TwoKeyMap::new();
            let mut model: HashMap<(u16, u16), u32> = HashMap::new();
            for _ in 0..60 {
                let k1 = rng.random_range(0..12_u16);
                let k2 = rng.random_range(0..12_u16);
                let v = rng.random_range(1..1000_u32);
                map.set(k1, k2, v).unwrap();
                model.insert((k1, k2), v);
                for (&(a, b), &expected) in &model {
                    prop_assert_eq!(map.get(&a, &b), Ok(&expected));
                }
            }
            prop_assert_eq!(map.len(), map.first_len() * map.second_len());
            let written = map.values().filter(|v| **v != 0).count();
            prop_assert_eq!(written, model.len());
        }
    }
}
