//! Seeded cell hash `H(a, b)`
//!
//! Maps a pair of integers to a reproducible pseudo-random `u64`. Placement takes
//! the result modulo the free span of a cell.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{GridConfig, SeedHash};

/// Multiplier of the legacy integer mixer
const LEGACY_MULTIPLIER: i64 = 0x45d9f3b;

/// Deterministic hash over integer pairs, keyed by the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHasher {
    kind: SeedHash,
    seed: u64,
    /// Row stride used by the legacy mixer to linearize `(a, b)`
    stride: i64,
}

impl CellHasher {
    /// Create the hasher selected by `config`
    pub fn new(config: &GridConfig) -> Self {
        Self {
            kind: config.hash,
            seed: config.hash_seed,
            stride: i64::from(config.domain_width),
        }
    }

    /// Hash an integer pair
    #[inline]
    pub fn hash(&self, a: i64, b: i64) -> u64 {
        match self.kind {
            SeedHash::ChaCha => chacha_hash(self.seed, a, b),
            SeedHash::Legacy => legacy_hash(self.seed, self.stride, a, b),
        }
    }

    /// Hash feeding the y offset, chained off the x offset `ox` of row `ny`
    ///
    /// The legacy mixer hashes `ox` alone, so equal x offsets share a y offset
    /// in every row.
    #[inline]
    pub fn offset_hash(&self, ox: i64, ny: i64) -> u64 {
        match self.kind {
            SeedHash::ChaCha => chacha_hash(self.seed, ox, ny),
            SeedHash::Legacy => legacy_hash(self.seed, self.stride, ox, 0),
        }
    }
}

/// First word of the ChaCha8 stream `(a, b)` under key `seed`
fn chacha_hash(seed: u64, a: i64, b: i64) -> u64 {
    let stream = (u64::from(a as u32) << 32) | u64::from(b as u32);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng.next_u64()
}

/// Multiply-xorshift mixer over the linearized pair, 64-bit wrapping
fn legacy_hash(seed: u64, stride: i64, a: i64, b: i64) -> u64 {
    let mut v = a.wrapping_add(b.wrapping_mul(stride)) ^ seed as i64;
    v = ((v >> 16) ^ v).wrapping_mul(LEGACY_MULTIPLIER);
    v = ((v >> 16) ^ v).wrapping_mul(LEGACY_MULTIPLIER);
    v = (v >> 16) ^ v;
    v.unsigned_abs()
}
