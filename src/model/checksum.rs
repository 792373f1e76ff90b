//! Checksum values and the supported algorithm table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash algorithms accepted in checksum values.
///
/// Names follow the SPDX identifier set; lookup is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA224")]
    Sha224,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA384")]
    Sha384,
    #[serde(rename = "SHA512")]
    Sha512,
    #[serde(rename = "SHA3-256")]
    Sha3_256,
    #[serde(rename = "SHA3-384")]
    Sha3_384,
    #[serde(rename = "SHA3-512")]
    Sha3_512,
    #[serde(rename = "BLAKE2b-256")]
    Blake2b256,
    #[serde(rename = "BLAKE2b-384")]
    Blake2b384,
    #[serde(rename = "BLAKE2b-512")]
    Blake2b512,
    #[serde(rename = "BLAKE3")]
    Blake3,
    #[serde(rename = "MD2")]
    Md2,
    #[serde(rename = "MD4")]
    Md4,
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "MD6")]
    Md6,
    #[serde(rename = "ADLER32")]
    Adler32,
}

impl ChecksumAlgorithm {
    /// All supported algorithms, in SPDX listing order.
    pub const ALL: [Self; 17] = [
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Blake2b256,
        Self::Blake2b384,
        Self::Blake2b512,
        Self::Blake3,
        Self::Md2,
        Self::Md4,
        Self::Md5,
        Self::Md6,
        Self::Adler32,
    ];

    /// Canonical SPDX name for this algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
            Self::Md2 => "MD2",
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Md6 => "MD6",
            Self::Adler32 => "ADLER32",
        }
    }

    /// Resolve an algorithm name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|algo| algo.name().to_uppercase() == upper)
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single checksum: algorithm plus hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    /// Hash algorithm
    pub algorithm: ChecksumAlgorithm,
    /// Hash value (hex encoded)
    pub value: String,
}

impl Checksum {
    /// Create a new checksum
    #[must_use]
    pub const fn new(algorithm: ChecksumAlgorithm, value: String) -> Self {
        Self { algorithm, value }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.algorithm, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(
            ChecksumAlgorithm::from_name("sha1"),
            Some(ChecksumAlgorithm::Sha1)
        );
        assert_eq!(
            ChecksumAlgorithm::from_name("BLAKE2B-384"),
            Some(ChecksumAlgorithm::Blake2b384)
        );
        assert_eq!(
            ChecksumAlgorithm::from_name(" sha3-512 "),
            Some(ChecksumAlgorithm::Sha3_512)
        );
        assert_eq!(ChecksumAlgorithm::from_name("SHA3"), None);
        assert_eq!(ChecksumAlgorithm::from_name(""), None);
    }

    #[test]
    fn test_display_uses_canonical_names() {
        let checksum = Checksum::new(
            ChecksumAlgorithm::Sha1,
            "d6a770ba38583ed4bb4525bd96e50461655d2759".to_string(),
        );
        assert_eq!(
            checksum.to_string(),
            "SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759"
        );
        assert_eq!(ChecksumAlgorithm::Blake2b256.to_string(), "BLAKE2b-256");
    }
}
