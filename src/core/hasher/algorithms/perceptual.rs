//! Perceptual Hash (pHash) implementation.
//!
//! pHash extracts frequency information from the image, which makes it
//! robust to scaling, brightness changes and compression artifacts.
//! We use the image_hasher crate, which provides a well-tested
//! implementation.

use super::super::traits::{HashAlgorithm, HashAlgorithmKind, ImageHashValue};
use crate::error::ImageError;
use image::DynamicImage;
use image_hasher::{HashAlg, HasherConfig as ImageHasherConfig};

/// Perceptual Hash (pHash) implementation
pub struct PerceptualHasher {
    /// Internal hasher from image_hasher crate
    hasher: image_hasher::Hasher,
}

impl PerceptualHasher {
    /// Create a new pHash hasher
    pub fn new(hash_size: u32) -> Self {
        let hasher = ImageHasherConfig::new()
            .hash_size(hash_size, hash_size)
            .hash_alg(HashAlg::DoubleGradient)
            .to_hasher();

        Self { hasher }
    }
}

impl HashAlgorithm for PerceptualHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<ImageHashValue, ImageError> {
        let hash = self.hasher.hash_image(image);
        Ok(ImageHashValue::new(
            hash.as_bytes().to_vec(),
            HashAlgorithmKind::Perceptual,
        ))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Perceptual
    }
}
