//! # Hasher Module
//!
//! Computes perceptual hashes for images.
//!
//! ## Supported Algorithms
//! - **aHash (Average Hash)** - Fastest; the default. Matches the exact-
//!   equality duplicate grouping this tool performs.
//! - **dHash (Difference Hash)** - Captures brightness gradients.
//! - **pHash (Perceptual Hash)** - Frequency-based, most robust to edits.
//!
//! ## How It Works
//! 1. Resize image to a small grid (8x8 by default)
//! 2. Convert to grayscale
//! 3. Compute hash bits from pixel relationships
//! 4. Group duplicates by exact hash equality
//!
//! ## Example
//! ```rust,ignore
//! use gallery_analyzer::core::hasher::{HasherConfig, HashAlgorithmKind};
//!
//! let hasher = HasherConfig::new()
//!     .algorithm(HashAlgorithmKind::Average)
//!     .build();
//!
//! let hash = hasher.hash_file(&path)?;
//! ```

mod algorithms;
mod traits;

pub use algorithms::{AverageHasher, DifferenceHasher, PerceptualHasher};
pub use traits::{HashAlgorithm, HashAlgorithmKind, ImageHashValue, PerceptualHash};

/// Configuration builder for hashers
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Hash grid size (8, 16, or 32)
    hash_size: u32,
    /// Algorithm to use
    algorithm: HashAlgorithmKind,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            hash_size: 8,
            algorithm: HashAlgorithmKind::Average,
        }
    }

    /// Set the hash grid size (8, 16, or 32)
    ///
    /// Larger sizes are more discriminating but slower.
    pub fn hash_size(mut self, size: u32) -> Self {
        self.hash_size = size;
        self
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Build the hasher
    pub fn build(self) -> Box<dyn HashAlgorithm> {
        match self.algorithm {
            HashAlgorithmKind::Average => Box::new(AverageHasher::new(self.hash_size)),
            HashAlgorithmKind::Difference => Box::new(DifferenceHasher::new(self.hash_size)),
            HashAlgorithmKind::Perceptual => Box::new(PerceptualHasher::new(self.hash_size)),
        }
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}
