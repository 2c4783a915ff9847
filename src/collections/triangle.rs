//! Triangular storage shared by the symmetric maps.
//!
//! One cell exists per unordered key pair, self-pairs included. Cells live in
//! an arena keyed by `(max_rank, min_rank)`, so the cell of `{a, b}` is the
//! same whichever order the keys are given in, and iteration is row-major
//! over the rank-ordered triangle.

use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;

use super::domain::KeyDomain;
use crate::error::Error;

/// Orders two distinct-or-equal ranks as `(row, column)`: the strictly
/// greater rank addresses the row.
#[inline]
pub(crate) fn order(a: u64, b: u64) -> (u64, u64) {
    if a >= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TriangularGrid<K, V> {
    pub(crate) domain: KeyDomain<K>,
    cells: BTreeMap<(u64, u64), V>,
}

impl<K: Hash + Eq, V> TriangularGrid<K, V> {
    pub(crate) fn new(domain: KeyDomain<K>) -> Self
    where
        V: Default,
    {
        let ranks: Vec<u64> = domain.iter().map(|(_, r)| r).collect();
        let mut cells = BTreeMap::new();
        for &row in &ranks {
            for &column in ranks.iter().filter(|&&c| c <= row) {
                cells.insert((row, column), V::default());
            }
        }
        Self { domain, cells }
    }

    /// A grid over an empty domain.
    pub(crate) fn empty(domain: KeyDomain<K>) -> Self {
        debug_assert!(domain.len() == 0);
        Self {
            domain,
            cells: BTreeMap::new(),
        }
    }

    /// The cell of two ranks, in either order.
    pub(crate) fn cell_mut(&mut self, a: u64, b: u64) -> Option<&mut V> {
        self.cells.get_mut(&order(a, b))
    }

    fn cell_of(&self, a: &K, b: &K) -> Result<(u64, u64), Error> {
        let ra = self.domain.require_rank(a)?;
        let rb = self.domain.require_rank(b)?;
        Ok(order(ra, rb))
    }

    pub(crate) fn get(&self, a: &K, b: &K) -> Result<&V, Error> {
        let cell = self.cell_of(a, b)?;
        // Every ordered pair of domain ranks has a cell.
        self.cells.get(&cell).ok_or(Error::KeyNotFound {
            domain: self.domain.domain(),
        })
    }

    pub(crate) fn get_mut(&mut self, a: &K, b: &K) -> Result<&mut V, Error> {
        let cell = self.cell_of(a, b)?;
        let domain = self.domain.domain();
        self.cells
            .get_mut(&cell)
            .ok_or(Error::KeyNotFound { domain })
    }

    pub(crate) fn try_get(&self, a: &K, b: &K) -> Option<&V> {
        let ra = self.domain.rank_of(a)?;
        let rb = self.domain.rank_of(b)?;
        self.cells.get(&order(ra, rb))
    }

    pub(crate) fn contains(&self, a: &K, b: &K) -> bool {
        self.domain.contains(a) && self.domain.contains(b)
    }

    /// Adds a key whose rank was already checked for collisions, with one
    /// defaulted cell against every existing key and one against itself.
    pub(crate) fn push_key(&mut self, key: K, rank: u64)
    where
        V: Default,
    {
        let others: Vec<u64> = self.domain.iter().map(|(_, r)| r).collect();
        self.domain.push(key, rank);
        for other in others {
            self.cells.insert(order(rank, other), V::default());
        }
        self.cells.insert((rank, rank), V::default());
    }

    /// Snapshot of every cell involving `key`, in domain order.
    pub(crate) fn marginalize(&self, key: &K) -> Result<IndexMap<K, V>, Error>
    where
        K: Clone,
        V: Clone,
    {
        let rank = self.domain.require_rank(key)?;
        self.domain
            .iter()
            .map(|(other, other_rank)| {
                let value = self
                    .cells
                    .get(&order(rank, other_rank))
                    .ok_or(Error::KeyNotFound {
                        domain: self.domain.domain(),
                    })?;
                Ok((other.clone(), value.clone()))
            })
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.cells.values()
    }

    /// Every stored cell with its two keys, larger-rank key first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = ((&K, &K), &V)> + '_ {
        let by_rank: BTreeMap<u64, &K> = self.domain.iter().map(|(k, r)| (r, k)).collect();
        self.cells.iter().filter_map(move |((row, column), v)| {
            let a = *by_rank.get(row)?;
            let b = *by_rank.get(column)?;
            Some(((a, b), v))
        })
    }
}
