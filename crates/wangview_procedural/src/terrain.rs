//! # Terrain Labels and Seeds
//!
//! A terrain label is an opaque token naming a kind of ground ("g" for
//! grass, "s" for sand, ...). Labels carry no structure beyond equality,
//! hashing and a total order; the order only exists so that candidate sets
//! iterate the same way every run.
//!
//! ## Determinism Guarantee
//!
//! Given the same `MapSeed`, a map is generated **exactly** the same way on
//! any platform, any time.

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Opaque terrain label.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Terrain(String);

impl Terrain {
    /// Creates a label from any string-like value.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the label text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Terrain {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for Terrain {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generated row of terrain labels, left to right.
pub type Row = Vec<Terrain>;

/// Map seed for deterministic generation.
///
/// Every map of a session derives its random stream from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapSeed(u64);

impl MapSeed {
    /// Creates a new map seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., the n-th map).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Creates the random source for this seed.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for MapSeed {
    fn default() -> Self {
        Self(0xDEAD_BEEF_CAFE_BABE)
    }
}
