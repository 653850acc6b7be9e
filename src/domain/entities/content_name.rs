//! Content-derived file names.

use std::fmt;

use sha2::{Digest, Sha256};

/// Deterministic file name derived from a resource locator.
///
/// The same locator always yields the same name, across runs and processes,
/// so repeated uploads of one image are recognizable on the destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentName(String);

impl ContentName {
    /// Length of the hex digest in characters.
    pub const LEN: usize = 64;

    /// Derives the name by hashing the locator with SHA-256.
    #[must_use]
    pub fn from_locator(locator: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(locator.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
