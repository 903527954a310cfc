//! Text hashing strategies for deterministic color derivation.
//!
//! A [`TextHasher`] maps arbitrary text to a 32-bit value over its UTF-8
//! bytes. The hash only feeds hue selection, so collision resistance does
//! not matter; stability across process runs does. Two implementations:
//!
//! - [`Fnv1a`] — FNV-1a 32-bit, the cheap default
//! - [`Murmur3`] — canonical Murmur3 x86 32-bit with a configurable seed,
//!   bit-for-bit compatible with other Murmur3 implementations

/// Strategy for mapping text to a deterministic 32-bit hash.
///
/// Implementations must be pure: the same text (and construction-time seed)
/// always produces the same value, including across process runs. Hashing is
/// total — every string, the empty string included, yields a valid value.
pub trait TextHasher {
    /// Hash the UTF-8 byte encoding of `text`.
    fn hash(&self, text: &str) -> u32;
}

// ============================================================================
// Fnv1a — default hasher
// ============================================================================

/// FNV-1a 32-bit hash. Fast, stable, and well distributed enough for
/// cosmetic color diversity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1a;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

impl TextHasher for Fnv1a {
    fn hash(&self, text: &str) -> u32 {
        let mut h = FNV_OFFSET_BASIS;
        for &b in text.as_bytes() {
            h ^= b as u32;
            h = h.wrapping_mul(FNV_PRIME);
        }
        h
    }
}

// ============================================================================
// Murmur3 — x86 32-bit variant
// ============================================================================

/// Murmur3 x86 32-bit hash, parameterized by a seed.
///
/// Reproduces the reference algorithm exactly (4-byte block mixing, 1–3 byte
/// tail handling, length xor, avalanche finalizer), so digests match any
/// other conforming Murmur3 x86 32-bit implementation given the same seed
/// and input bytes.
#[derive(Debug, Clone, Copy)]
pub struct Murmur3 {
    seed: u32,
}

impl Murmur3 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    /// Create a hasher with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// The configured seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    fn mix_k(mut k: u32) -> u32 {
        k = k.wrapping_mul(Self::C1);
        k = k.rotate_left(15);
        k.wrapping_mul(Self::C2)
    }

    #[inline]
    fn fmix(mut h: u32) -> u32 {
        h ^= h >> 16;
        h = h.wrapping_mul(0x85eb_ca6b);
        h ^= h >> 13;
        h = h.wrapping_mul(0xc2b2_ae35);
        h ^ (h >> 16)
    }
}

impl Default for Murmur3 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TextHasher for Murmur3 {
    fn hash(&self, text: &str) -> u32 {
        let data = text.as_bytes();
        let mut h = self.seed;

        let mut chunks = data.chunks_exact(4);
        for block in &mut chunks {
            let k = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
            h ^= Self::mix_k(k);
            h = h.rotate_left(13);
            h = h.wrapping_mul(5).wrapping_add(0xe654_6b64);
        }

        let tail = chunks.remainder();
        if !tail.is_empty() {
            let mut k = 0u32;
            for (i, &b) in tail.iter().enumerate() {
                k ^= (b as u32) << (8 * i);
            }
            h ^= Self::mix_k(k);
        }

        h ^= data.len() as u32;
        Self::fmix(h)
    }
}

// ============================================================================
// Tests
// ============================================================================
