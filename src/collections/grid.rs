//! Dense row/column storage shared by the two-key maps.
//!
//! Rows follow the first-key domain positions, columns the second-key
//! domain positions. Every cell of the Cartesian product exists at all times.

use std::hash::Hash;
use std::iter;

use indexmap::IndexMap;

use super::domain::KeyDomain;
use crate::error::Error;

#[derive(Debug, Clone)]
pub(crate) struct DenseGrid<K1, K2, V> {
    pub(crate) first: KeyDomain<K1>,
    pub(crate) second: KeyDomain<K2>,
    rows: Vec<Vec<V>>,
}

impl<K1, K2, V> DenseGrid<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    /// A grid over domains of which at least one is empty, so no cell exists.
    pub(crate) fn empty(first: KeyDomain<K1>, second: KeyDomain<K2>) -> Self {
        debug_assert!(first.len() == 0 || second.len() == 0);
        Self {
            first,
            second,
            rows: Vec::new(),
        }
    }

    /// Allocates the full Cartesian product of both domains, every cell
    /// defaulted.
    pub(crate) fn new(first: KeyDomain<K1>, second: KeyDomain<K2>) -> Self
    where
        V: Default,
    {
        let columns = second.len();
        let rows = (0..first.len())
            .map(|_| iter::repeat_with(V::default).take(columns).collect())
            .collect();
        Self {
            first,
            second,
            rows,
        }
    }

    fn locate(&self, k1: &K1, k2: &K2) -> Result<(usize, usize), Error> {
        Ok((self.first.require(k1)?, self.second.require(k2)?))
    }

    pub(crate) fn get(&self, k1: &K1, k2: &K2) -> Result<&V, Error> {
        let (i, j) = self.locate(k1, k2)?;
        Ok(&self.rows[i][j])
    }

    pub(crate) fn get_mut(&mut self, k1: &K1, k2: &K2) -> Result<&mut V, Error> {
        let (i, j) = self.locate(k1, k2)?;
        Ok(&mut self.rows[i][j])
    }

    pub(crate) fn try_get(&self, k1: &K1, k2: &K2) -> Option<&V> {
        let i = self.first.position(k1)?;
        let j = self.second.position(k2)?;
        self.rows.get(i).and_then(|row| row.get(j))
    }

    pub(crate) fn contains(&self, k1: &K1, k2: &K2) -> bool {
        self.first.contains(k1) && self.second.contains(k2)
    }

    /// Appends a row for a new first key, defaulted across every column.
    /// Returns the row position.
    pub(crate) fn push_row(&mut self, key: K1, rank: u64) -> usize
    where
        V: Default,
    {
        let columns = self.second.len();
        self.rows
            .push(iter::repeat_with(V::default).take(columns).collect());
        self.first.push(key, rank)
    }

    /// Appends a column for a new second key, defaulted in every row.
    /// Returns the column position.
    pub(crate) fn push_column(&mut self, key: K2, rank: u64) -> usize
    where
        V: Default,
    {
        for row in &mut self.rows {
            row.push(V::default());
        }
        self.second.push(key, rank)
    }

    pub(crate) fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut V> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(column))
    }

    /// Borrowed view of one row, in second-key domain order.
    pub(crate) fn row(&self, k1: &K1) -> Result<impl Iterator<Item = (&K2, &V)> + '_, Error> {
        let i = self.first.require(k1)?;
        Ok(self.second.keys().zip(self.rows[i].iter()))
    }

    pub(crate) fn marginalize_first(&self, k1: &K1) -> Result<IndexMap<K2, V>, Error>
    where
        K2: Clone,
        V: Clone,
    {
        Ok(self
            .row(k1)?
            .map(|(k2, v)| (k2.clone(), v.clone()))
            .collect())
    }

    pub(crate) fn marginalize_second(&self, k2: &K2) -> Result<IndexMap<K1, V>, Error>
    where
        K1: Clone,
        V: Clone,
    {
        let j = self.second.require(k2)?;
        Ok(self
            .first
            .keys()
            .zip(self.rows.iter())
            .map(|(k1, row)| (k1.clone(), row[j].clone()))
            .collect())
    }

    pub(crate) fn len(&self) -> usize {
        self.first.len() * self.second.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = ((&K1, &K2), &V)> + '_ {
        self.first
            .keys()
            .zip(self.rows.iter())
            .flat_map(move |(k1, row)| {
                self.second
                    .keys()
                    .zip(row.iter())
                    .map(move |(k2, v)| ((k1, k2), v))
            })
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = (&K1, &K2)> + '_ {
        self.iter().map(|(pair, _)| pair)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.rows.iter().flatten()
    }
}
