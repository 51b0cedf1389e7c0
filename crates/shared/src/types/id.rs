//! GnuCash-style identifiers.
//!
//! Every account, transaction and split in an exchange file is keyed by a
//! 32-character hex string encoding 16 raw bytes. [`Guid`] keeps the text
//! as read so that equality is exactly string equality, and decodes it once
//! on construction so [`Guid::to_bytes`] cannot fail afterwards.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ParseError, ParseResult};

/// Number of raw bytes behind a GUID.
pub const GUID_BYTES: usize = 16;

/// Unique identifier for an account, transaction or split.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Guid {
    text: String,
    bytes: [u8; GUID_BYTES],
}

impl Guid {
    /// Parses a 32-character hex identifier.
    pub fn parse(text: &str) -> ParseResult<Self> {
        if text.len() != GUID_BYTES * 2 {
            return Err(ParseError::guid(
                text,
                format!("expected {} hex digits, got {}", GUID_BYTES * 2, text.len()),
            ));
        }
        let mut bytes = [0u8; GUID_BYTES];
        hex::decode_to_slice(text, &mut bytes)
            .map_err(|e| ParseError::guid(text, e.to_string()))?;
        Ok(Self {
            text: text.to_string(),
            bytes,
        })
    }

    /// Returns the identifier as written in the source document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the 16 raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; GUID_BYTES] {
        self.bytes
    }

    fn from_bytes(bytes: [u8; GUID_BYTES]) -> Self {
        Self {
            text: hex::encode(bytes),
            bytes,
        }
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for Guid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Guid {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Guid> for String {
    fn from(value: Guid) -> Self {
        value.text
    }
}

/// Mints pseudo-unique identifiers.
///
/// Each generator is seeded once and then hashes its seed together with the
/// wall clock and a per-generator sequence number. A generator can be shared
/// between threads; the sequence counter is atomic.
#[derive(Debug)]
pub struct GuidGenerator {
    seed: [u8; GUID_BYTES],
    sequence: AtomicU64,
}

impl GuidGenerator {
    /// Creates a generator seeded from the thread-local CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        let mut seed = [0u8; GUID_BYTES];
        rand::rng().fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Creates a generator from a fixed seed.
    #[must_use]
    pub const fn from_seed(seed: [u8; GUID_BYTES]) -> Self {
        Self {
            seed,
            sequence: AtomicU64::new(0),
        }
    }

    /// Returns a fresh identifier.
    pub fn next_guid(&self) -> Guid {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(nanos.to_le_bytes());
        hasher.update(sequence.to_le_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; GUID_BYTES];
        bytes.copy_from_slice(&digest[..GUID_BYTES]);
        Guid::from_bytes(bytes)
    }
}

impl Default for GuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}
