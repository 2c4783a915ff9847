//! Error type shared by all two-key containers.

use std::fmt;

/// Identifies which key domain of a container an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// The first-key domain of a dense two-key map.
    First,
    /// The second-key domain of a dense two-key map.
    Second,
    /// The single key domain of a symmetric map.
    Symmetric,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::First => f.write_str("first"),
            Domain::Second => f.write_str("second"),
            Domain::Symmetric => f.write_str("symmetric"),
        }
    }
}

/// Errors reported by the two-key containers.
///
/// Both variants leave the container untouched: construction fails without
/// producing an instance, and a rejected `set` performs no partial growth.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two keys of one domain map to the same rank.
    #[error("{domain} keys only contain {unique} unique ranks but {len} elements")]
    DuplicateKey {
        domain: Domain,
        unique: usize,
        len: usize,
    },

    /// A strict accessor was called with a key outside the domain.
    #[error("key is not part of the {domain} key domain")]
    KeyNotFound { domain: Domain },
}
