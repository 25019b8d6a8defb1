//! Short random keys for points and triangles.
//!
//! A key is 30 random bits rendered as five characters of the URL-safe base-64
//! alphabet. Points and triangles of one mesh share the keyspace.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Number of characters in a rendered key
pub const KEY_LENGTH: usize = 5;

const BITS_PER_CHAR: u32 = 6;
const KEY_MASK: u32 = (1 << (KEY_LENGTH as u32 * BITS_PER_CHAR)) - 1;
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Stable identity of a point or triangle within one mesh
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshKey(u32);

impl MeshKey {
    /// Build a key from raw bits; bits above the key width are dropped
    pub const fn from_bits(bits: u32) -> Self {
        MeshKey(bits & KEY_MASK)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl Display for MeshKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars = [0u8; KEY_LENGTH];
        for (i, c) in chars.iter_mut().enumerate() {
            let shift = (KEY_LENGTH - 1 - i) as u32 * BITS_PER_CHAR;
            *c = ALPHABET[((self.0 >> shift) & 0x3f) as usize];
        }
        // ALPHABET is pure ASCII
        f.write_str(std::str::from_utf8(&chars).map_err(|_| std::fmt::Error)?)
    }
}

impl Debug for MeshKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MeshKey({self})")
    }
}

/// Error returned when a string is not a well-formed key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a five-character base-64 key")]
pub struct ParseKeyError(pub String);

impl FromStr for MeshKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != KEY_LENGTH {
            return Err(ParseKeyError(s.to_string()));
        }
        let mut bits = 0u32;
        for byte in s.bytes() {
            let digit = ALPHABET
                .iter()
                .position(|&c| c == byte)
                .ok_or_else(|| ParseKeyError(s.to_string()))?;
            bits = (bits << BITS_PER_CHAR) | digit as u32;
        }
        Ok(MeshKey(bits))
    }
}

impl Serialize for MeshKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MeshKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Deterministic source of candidate keys.
///
/// Seeded from the mesh id, so two meshes built by the same sequence of edits
/// hand out the same keys. Uniqueness is the caller's job: draw until the key
/// is unused.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    rng: ChaCha8Rng,
}

impl KeyGenerator {
    pub fn seeded(seed: u64) -> Self {
        KeyGenerator {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed derived from a mesh id (FNV-1a)
    pub fn for_mesh(mesh_id: &str) -> Self {
        let seed = mesh_id
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
                (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
            });
        Self::seeded(seed)
    }

    /// Draw a candidate key
    pub fn candidate(&mut self) -> MeshKey {
        MeshKey::from_bits(self.rng.r#gen::<u32>())
    }

    /// Draw candidates until one passes `is_used` as unused
    pub fn unused(&mut self, mut is_used: impl FnMut(MeshKey) -> bool) -> MeshKey {
        loop {
            let key = self.candidate();
            if !is_used(key) {
                return key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_renders_and_parses() {
        let key = MeshKey::from_bits(0x2ABC_DEF1);
        let text = key.to_string();
        assert_eq!(text.len(), KEY_LENGTH);
        assert_eq!(text.parse::<MeshKey>(), Ok(key));
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!("abc".parse::<MeshKey>().is_err());
        assert!("ab*de".parse::<MeshKey>().is_err());
        assert!("abcdef".parse::<MeshKey>().is_err());
    }

    #[test]
    fn unused_skips_taken_keys() {
        let mut first = KeyGenerator::seeded(7);
        let taken = first.candidate();
        let mut generator = KeyGenerator::seeded(7);
        let key = generator.unused(|k| k == taken);
        assert_ne!(key, taken);
    }

    #[test]
    fn same_mesh_id_same_sequence() {
        let mut a = KeyGenerator::for_mesh("harbor");
        let mut b = KeyGenerator::for_mesh("harbor");
        for _ in 0..8 {
            assert_eq!(a.candidate(), b.candidate());
        }
    }
}
