//! Key ranking: the identity and ordering function of a key domain.
//!
//! Every container assigns each key a `u64` rank when the key enters its
//! domain. Ranks serve two purposes:
//!
//! - **Identity**: two keys of one domain must never share a rank. A
//!   collision is reported as [`Error::DuplicateKey`](crate::Error) instead of
//!   being resolved silently.
//! - **Ordering**: symmetric maps store the unordered pair `{a, b}` once, in
//!   the row of the key with the strictly greater rank.
//!
//! The default ranker, [`HashRank`], hashes keys through a deterministic
//! `BuildHasher`. Any `Fn(&K) -> u64` is also a ranker, which makes it easy to
//! supply an explicit total order (e.g. an enum discriminant or a database id).

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

/// Produces the rank of a key.
///
/// Implementations must be deterministic: the same key must always produce
/// the same rank for the lifetime of a container.
pub trait KeyRank<K: ?Sized> {
    /// Returns the rank of `key`.
    fn rank(&self, key: &K) -> u64;
}

impl<K: ?Sized, F> KeyRank<K> for F
where
    F: Fn(&K) -> u64,
{
    fn rank(&self, key: &K) -> u64 {
        self(key)
    }
}

/// Ranks keys by their hash value.
///
/// With the default type parameter the hasher is SipHash with fixed keys, so
/// ranks are reproducible across containers within one build.
///
/// # Examples
/// ```
/// use u_twokey::rank::{HashRank, KeyRank};
/// let ranker = HashRank::new();
/// assert_eq!(ranker.rank("a"), ranker.rank("a"));
/// assert_ne!(ranker.rank("a"), ranker.rank("b"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HashRank<S = BuildHasherDefault<DefaultHasher>> {
    hasher: S,
}

impl HashRank {
    /// Creates a ranker backed by the default deterministic hasher.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> HashRank<S> {
    /// Creates a ranker backed by the given hasher builder.
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<K, S> KeyRank<K> for HashRank<S>
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    fn rank(&self, key: &K) -> u64 {
        self.hasher.hash_one(key)
    }
}
