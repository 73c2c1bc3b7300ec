//! Content-addressed blob identity.

use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// SHA-256 identity of a blob's exact byte content.
///
/// Stored as a 64-character lowercase hex string. Computing the hash is the
/// only way write paths obtain one, so a blob row can never carry a hash
/// that disagrees with its body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobHash {
    hex: String,
}

/// Errors when parsing a blob hash from a hex string.
#[derive(Debug, Error)]
pub enum BlobHashError {
    #[error("invalid blob hash: expected 64 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("invalid blob hash: non-hex character '{character}' at position {position}")]
    InvalidCharacter { position: usize, character: char },
}

impl BlobHash {
    /// Computes the SHA-256 hash of the given bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hex = format!("{:x}", hasher.finalize());
        Self { hex }
    }

    /// Parses a blob hash from a 64-character hex string, normalizing to
    /// lowercase.
    pub fn from_hex(hex: &str) -> Result<Self, BlobHashError> {
        if hex.len() != 64 {
            return Err(BlobHashError::InvalidLength(hex.len()));
        }

        for (i, c) in hex.chars().enumerate() {
            if !c.is_ascii_hexdigit() {
                return Err(BlobHashError::InvalidCharacter {
                    position: i,
                    character: c,
                });
            }
        }

        Ok(Self {
            hex: hex.to_ascii_lowercase(),
        })
    }

    /// Returns the hash as a lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Returns a short prefix of the hash for compact display.
    pub fn short(&self) -> &str {
        &self.hex[..8]
    }
}

impl fmt::Display for BlobHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}

impl serde::Serialize for BlobHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex)
    }
}
