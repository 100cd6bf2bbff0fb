//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Resizing the image to (hash_size+1) x hash_size
//! 2. Converting to grayscale
//! 3. Comparing each pixel to the one to its right
//! 4. If the left pixel is brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes.

use super::super::traits::{HashAlgorithm, HashAlgorithmKind, ImageHashValue};
use crate::error::ImageError;
use image::DynamicImage;

/// Difference Hash (dHash) implementation
pub struct DifferenceHasher {
    /// Size of the hash grid (width and height)
    hash_size: u32,
}

impl DifferenceHasher {
    /// Create a new dHash hasher
    pub fn new(hash_size: u32) -> Self {
        Self { hash_size }
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<ImageHashValue, ImageError> {
        // One extra column so every grid cell has a right-hand neighbour
        let resized = image.resize_exact(
            self.hash_size + 1,
            self.hash_size,
            image::imageops::FilterType::Lanczos3,
        );
        let gray = resized.to_luma8();

        let mut hash_bytes = Vec::with_capacity((self.hash_size * self.hash_size / 8) as usize + 1);
        let mut current_byte: u8 = 0;
        let mut bit_position = 0;

        for y in 0..self.hash_size {
            for x in 0..self.hash_size {
                let left = gray.get_pixel(x, y)[0];
                let right = gray.get_pixel(x + 1, y)[0];

                if left > right {
                    current_byte |= 1 << (7 - bit_position);
                }

                bit_position += 1;

                if bit_position == 8 {
                    hash_bytes.push(current_byte);
                    current_byte = 0;
                    bit_position = 0;
                }
            }
        }

        if bit_position > 0 {
            hash_bytes.push(current_byte);
        }

        Ok(ImageHashValue::new(
            hash_bytes,
            HashAlgorithmKind::Difference,
        ))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Difference
    }
}
