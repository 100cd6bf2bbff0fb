//! Trait definitions for perceptual hashing.

use crate::core::decode::ImageDecoder;
use crate::error::ImageError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A computed perceptual hash that can be compared
pub trait PerceptualHash: Clone + Send + Sync {
    /// Compute the Hamming distance to another hash
    ///
    /// Returns the number of bits that differ between the two hashes.
    fn distance(&self, other: &Self) -> u32;

    /// Get the raw hash bytes
    fn as_bytes(&self) -> &[u8];

    /// Get the hash as a hexadecimal string
    fn to_hex(&self) -> String {
        self.as_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithmKind {
    /// Average Hash (aHash) - thresholds each pixel against mean brightness
    Average,
    /// Difference Hash (dHash) - compares brightness gradients between pixels
    Difference,
    /// Perceptual Hash (pHash) - DCT-based, robust to edits
    Perceptual,
}

impl std::fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithmKind::Average => write!(f, "aHash"),
            HashAlgorithmKind::Difference => write!(f, "dHash"),
            HashAlgorithmKind::Perceptual => write!(f, "pHash"),
        }
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Compute a hash from an already-loaded image
    fn hash_image(&self, image: &DynamicImage) -> Result<ImageHashValue, ImageError>;

    /// Compute a hash directly from a file path
    fn hash_file(&self, path: &Path) -> Result<ImageHashValue, ImageError> {
        let image = ImageDecoder::decode(path)?;
        self.hash_image(&image)
    }

    /// Get the algorithm kind
    fn kind(&self) -> HashAlgorithmKind;
}

/// Concrete hash value type
///
/// Duplicate detection groups by exact equality of (algorithm, bytes);
/// `distance` stays available for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHashValue {
    /// The raw hash bytes
    bytes: Vec<u8>,
    /// The algorithm that produced this hash
    algorithm: HashAlgorithmKind,
}

impl ImageHashValue {
    /// Create a new hash value
    pub fn new(bytes: Vec<u8>, algorithm: HashAlgorithmKind) -> Self {
        Self { bytes, algorithm }
    }

    /// Get the algorithm that produced this hash
    pub fn algorithm(&self) -> HashAlgorithmKind {
        self.algorithm
    }
}

impl PerceptualHash for ImageHashValue {
    fn distance(&self, other: &Self) -> u32 {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_hash(bytes: &[u8]) -> ImageHashValue {
        ImageHashValue::new(bytes.to_vec(), HashAlgorithmKind::Average)
    }

    #[test]
    fn distance_to_self_is_zero() {
        let hash = create_test_hash(&[0xFF, 0x00, 0xAA, 0x55]);
        assert_eq!(hash.distance(&hash), 0);
    }

    #[test]
    fn distance_counts_differing_bits() {
        let hash_a = create_test_hash(&[0b1111_1111]);
        let hash_b = create_test_hash(&[0b0000_0000]);

        assert_eq!(hash_a.distance(&hash_b), 8);
    }

    #[test]
    fn equal_hashes_compare_equal() {
        let hash_a = create_test_hash(&[0xDE, 0xAD]);
        let hash_b = create_test_hash(&[0xDE, 0xAD]);

        assert_eq!(hash_a, hash_b);
    }

    #[test]
    fn same_bytes_different_algorithm_are_not_equal() {
        let hash_a = ImageHashValue::new(vec![0x42], HashAlgorithmKind::Average);
        let hash_b = ImageHashValue::new(vec![0x42], HashAlgorithmKind::Difference);

        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn to_hex_produces_correct_string() {
        let hash = create_test_hash(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(hash.to_hex(), "deadbeef");
    }

    #[test]
    fn algorithm_kind_display() {
        assert_eq!(HashAlgorithmKind::Average.to_string(), "aHash");
        assert_eq!(HashAlgorithmKind::Difference.to_string(), "dHash");
        assert_eq!(HashAlgorithmKind::Perceptual.to_string(), "pHash");
    }
}
