//! # u-twokey
//!
//! Associative containers addressed by two keys instead of one.
//!
//! The crate knows nothing about what the keys or values mean; it only
//! maintains the two-key structure: dense grids over two key domains and
//! triangular storage for unordered (symmetric) key pairs.
//!
//! ## Modules
//!
//! - [`collections`] — the four map variants and their read traits
//! - [`rank`] — the key identity/ordering function
//! - [`error`] — the error type shared by all maps
//!
//! ## Design Philosophy
//!
//! - **Explicit identity**: keys are ranked by an injectable [`rank::KeyRank`];
//!   rank collisions are always checked, never assumed away
//! - **No silent defaults on misuse**: strict accessors report unknown keys as
//!   [`Error::KeyNotFound`]; only `try_get` turns absence into `None`
//! - **Property-based testing**: symmetry, growth and completeness invariants
//!   verified via proptest
//!
//! ## Example
//!
//! ```
//! use u_twokey::collections::SymmetricMap;
//!
//! let mut distances: SymmetricMap<&str, u32> = SymmetricMap::new();
//! distances.set("paris", "berlin", 878).unwrap();
//! distances.set("berlin", "rome", 1181).unwrap();
//!
//! assert_eq!(distances.get(&"berlin", &"paris"), Ok(&878));
//! assert_eq!(distances.get(&"paris", &"rome"), Ok(&0));
//! assert_eq!(distances.try_get(&"paris", &"oslo"), None);
//! ```

pub mod collections;
pub mod error;
pub mod rank;

pub use error::{Domain, Error};
