//! Key domain: the ordered set of keys of one container axis.
//!
//! Each key is stored together with its rank. Positions are dense
//! (`0..len`) and follow insertion order, so dense grids can index rows and
//! columns by position.

use std::collections::HashSet;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::{Domain, Error};
use crate::rank::KeyRank;

#[derive(Debug, Clone)]
pub(crate) struct KeyDomain<K> {
    keys: IndexMap<K, u64>,
    ranks: HashSet<u64>,
    domain: Domain,
}

impl<K: Hash + Eq> KeyDomain<K> {
    pub(crate) fn empty(domain: Domain) -> Self {
        Self {
            keys: IndexMap::new(),
            ranks: HashSet::new(),
            domain,
        }
    }

    /// Builds a domain, failing if any two supplied keys share a rank.
    ///
    /// A key supplied twice also counts as a collision.
    pub(crate) fn build<I, R>(keys: I, ranker: &R, domain: Domain) -> Result<Self, Error>
    where
        I: IntoIterator<Item = K>,
        R: KeyRank<K> + ?Sized,
    {
        let ranked: Vec<(K, u64)> = keys
            .into_iter()
            .map(|k| {
                let rank = ranker.rank(&k);
                (k, rank)
            })
            .collect();

        let ranks: HashSet<u64> = ranked.iter().map(|(_, r)| *r).collect();
        if ranks.len() != ranked.len() {
            tracing::debug!(
                %domain,
                unique = ranks.len(),
                len = ranked.len(),
                "rejected key domain with colliding ranks"
            );
            return Err(Error::DuplicateKey {
                domain,
                unique: ranks.len(),
                len: ranked.len(),
            });
        }

        Ok(Self {
            keys: ranked.into_iter().collect(),
            ranks,
            domain,
        })
    }

    pub(crate) fn domain(&self) -> Domain {
        self.domain
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.keys.contains_key(key)
    }

    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    pub(crate) fn rank_of(&self, key: &K) -> Option<u64> {
        self.keys.get(key).copied()
    }

    /// Position of `key`, or `KeyNotFound` for this domain.
    pub(crate) fn require(&self, key: &K) -> Result<usize, Error> {
        self.position(key).ok_or(Error::KeyNotFound {
            domain: self.domain,
        })
    }

    /// Rank of `key`, or `KeyNotFound` for this domain.
    pub(crate) fn require_rank(&self, key: &K) -> Result<u64, Error> {
        self.rank_of(key).ok_or(Error::KeyNotFound {
            domain: self.domain,
        })
    }

    /// Checks that a new key with `rank` could join without a collision.
    pub(crate) fn check_admissible(&self, rank: u64) -> Result<(), Error> {
        if self.ranks.contains(&rank) {
            return Err(self.collision(1));
        }
        Ok(())
    }

    /// The error reported when `extra` new keys collide with the domain.
    pub(crate) fn collision(&self, extra: usize) -> Error {
        Error::DuplicateKey {
            domain: self.domain,
            unique: self.len(),
            len: self.len() + extra,
        }
    }

    /// Appends a key whose rank was already checked with
    /// [`check_admissible`](Self::check_admissible). Returns its position.
    pub(crate) fn push(&mut self, key: K, rank: u64) -> usize {
        debug_assert!(!self.ranks.contains(&rank));
        self.ranks.insert(rank);
        let (position, _) = self.keys.insert_full(key, rank);
        position
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.keys.iter().map(|(k, r)| (k, *r))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.keys.keys()
    }
}
