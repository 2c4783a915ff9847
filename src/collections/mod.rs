//! Associative containers addressed by two keys.
//!
//! | Type | Key pair | Domain |
//! |---|---|---|
//! | [`SealedTwoKeyMap`] | ordered `(K1, K2)` | fixed |
//! | [`TwoKeyMap`] | ordered `(K1, K2)` | grows on `set` |
//! | [`SealedSymmetricMap`] | unordered `{K, K}` | fixed |
//! | [`SymmetricMap`] | unordered `{K, K}` | grows on `set` |
//!
//! Every valid key pair always has a value: cells start at `V::default()`.
//! Keys are identified by their rank (see [`crate::rank`]); two keys of one
//! domain with equal ranks are rejected with [`Error::DuplicateKey`].
//!
//! Marginals ([`TwoKeyMap::marginalize_first`],
//! [`SymmetricMap::marginalize`], ...) are snapshots: later writes to the
//! map are not visible through them.
//!
//! [`Error::DuplicateKey`]: crate::Error::DuplicateKey

mod domain;
mod grid;
mod mapping;
mod symmetric_map;
mod triangle;
mod two_key_map;

pub use mapping::{SymmetricMapping, TwoKeyMapping};
pub use symmetric_map::{SealedSymmetricMap, SymmetricMap};
pub use two_key_map::{SealedTwoKeyMap, TwoKeyMap};
