//! Hashing System - Seed Digests and Content Fingerprints
//!
//! Seed digests are fast, well-distributed and NOT cryptographically secure.
//! They only need to make similar seeds look different. SHA-256 is used for
//! fingerprinting rendered output, never for seeds.

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::{to_string, Value};
use sha2::{Digest as _, Sha256};

use crate::error::{IdenticonError, IdenticonResult};

const MIXED_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const MIXED_PRIME: u64 = 0x0100_0000_01b3;

const FNV128_OFFSET_BASIS: u128 = 0x6c62_272e_07bb_0142_62b8_2175_6295_c58d;
const FNV128_PRIME: u128 = 0x0000_0000_0100_0000_0000_0000_0000_013b;
const FNV128_BYTES: usize = 16;

/// Seed hashing algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// FNV-style multiply/xor with shift avalanche, any byte width.
    #[default]
    Mixed,
    /// Plain 128-bit FNV-1a over UTF-8 bytes.
    Fnv1a128,
}

/// Lowercase hexadecimal digest. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Digest {
    hex: String,
    #[serde(skip)]
    nibbles: Vec<u8>,
}

impl Digest {
    /// Parse a hex string; uppercase digits are normalized to lowercase.
    pub fn parse(hex: &str) -> IdenticonResult<Self> {
        if hex.is_empty() {
            return Err(IdenticonError::invalid_argument("digest must not be empty"));
        }
        let nibbles = hex
            .bytes()
            .enumerate()
            .map(|(i, b)| {
                hex_value(b).ok_or_else(|| {
                    IdenticonError::invalid_argument(format!(
                        "digest has non-hex character {:?} at index {}",
                        b as char, i
                    ))
                })
            })
            .collect::<IdenticonResult<Vec<u8>>>()?;
        Ok(Self {
            hex: hex.to_ascii_lowercase(),
            nibbles,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Number of hex characters.
    pub fn len(&self) -> usize {
        self.nibbles.len()
    }

    /// False for any parsed digest.
    pub fn is_empty(&self) -> bool {
        self.nibbles.is_empty()
    }

    /// Value (0-15) of the hex character at `index`, wrapping past the end.
    pub fn nibble(&self, index: usize) -> u8 {
        self.nibbles[index % self.nibbles.len()]
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Digest::parse(&hex).map_err(serde::de::Error::custom)
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Hash any displayable seed into a `size_bytes * 2` character digest.
///
/// Non-string seeds are hashed through their `Display` text, so `42` and
/// `"42"` produce the same digest.
pub fn generate_hash(seed: impl fmt::Display, size_bytes: usize) -> IdenticonResult<Digest> {
    generate_hash_with(HashAlgorithm::Mixed, seed, size_bytes)
}

pub fn generate_hash_with(
    algorithm: HashAlgorithm,
    seed: impl fmt::Display,
    size_bytes: usize,
) -> IdenticonResult<Digest> {
    if size_bytes == 0 {
        return Err(IdenticonError::invalid_argument("hash size must be > 0 bytes"));
    }
    let seed = seed.to_string();
    let hex = match algorithm {
        HashAlgorithm::Mixed => mixed_hex(&seed, size_bytes),
        HashAlgorithm::Fnv1a128 => {
            if size_bytes != FNV128_BYTES {
                return Err(IdenticonError::invalid_argument(format!(
                    "fnv1a128 produces {} bytes, requested {}",
                    FNV128_BYTES, size_bytes
                )));
            }
            fnv1a_128_hex(&seed)
        }
    };
    Digest::parse(&hex)
}

/// Arbitrary-width multiply/xor hash over UTF-16 code units.
///
/// All arithmetic wraps at `size_bytes * 8` bits.
fn mixed_hex(seed: &str, size_bytes: usize) -> String {
    let mask = (BigUint::from(1u8) << (size_bytes * 8)) - 1u8;
    let prime = BigUint::from(MIXED_PRIME);
    let mut state = BigUint::from(MIXED_OFFSET_BASIS) & &mask;

    for (i, unit) in seed.encode_utf16().enumerate() {
        state ^= BigUint::from(unit) + BigUint::from(i) * 31u8;
        state = (state * &prime) & &mask;
        let mix = (&state >> 13u32) ^ (&state << 7u32);
        state ^= mix;
        state &= &mask;
    }

    // final avalanche
    for _ in 0..4 {
        let mix = (&state >> 11u32) ^ (&state << 5u32);
        state ^= mix;
        state = (state * &prime) & &mask;
    }

    format!("{:0>width$}", state.to_str_radix(16), width = size_bytes * 2)
}

fn fnv1a_128_hex(seed: &str) -> String {
    let hash = seed.bytes().fold(FNV128_OFFSET_BASIS, |acc, b| {
        (acc ^ u128::from(b)).wrapping_mul(FNV128_PRIME)
    });
    format!("{:032x}", hash)
}

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// SHA-256 over the canonical JSON form of a manifest.
pub fn compute_manifest_hash<T: Serialize>(manifest: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(manifest)?;
    Ok(sha256_hex(canonical.as_bytes()))
}
