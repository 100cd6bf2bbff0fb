//! # Duplicates Module
//!
//! Pairs images whose perceptual hashes are exactly equal.
//!
//! ## How It Works
//! Images are visited in list order while a map from hash to the first
//! path that produced it is maintained. An image whose hash is already in
//! the map is reported as a duplicate of that first path; otherwise it
//! claims the hash. Three identical images therefore yield two pairs, both
//! referencing the first image as the original.
//!
//! Near-match (Hamming-tolerant) grouping is deliberately not performed;
//! exact hash equality is the contract.

use crate::core::hasher::{ImageHashValue, PerceptualHash};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One duplicate finding: `duplicate` repeats the content of `original`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicatePair {
    /// The later image in list order
    pub duplicate: PathBuf,
    /// The first image that produced this hash
    pub original: PathBuf,
    /// Shared hash, hex-encoded
    pub hash: String,
}

/// Find duplicate pairs over hashes in list order.
///
/// The slice order is the list order; output pairs preserve it.
pub fn find_duplicate_pairs(hashes: &[(PathBuf, ImageHashValue)]) -> Vec<DuplicatePair> {
    let mut first_seen: HashMap<&ImageHashValue, &PathBuf> = HashMap::new();
    let mut pairs = Vec::new();

    for (path, hash) in hashes {
        match first_seen.get(hash) {
            Some(original) => {
                pairs.push(DuplicatePair {
                    duplicate: path.clone(),
                    original: (*original).clone(),
                    hash: hash.to_hex(),
                });
            }
            None => {
                first_seen.insert(hash, path);
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::HashAlgorithmKind;

    fn hash(byte: u8) -> ImageHashValue {
        ImageHashValue::new(vec![byte; 8], HashAlgorithmKind::Average)
    }

    fn entry(name: &str, byte: u8) -> (PathBuf, ImageHashValue) {
        (PathBuf::from(name), hash(byte))
    }

    #[test]
    fn no_images_no_pairs() {
        assert!(find_duplicate_pairs(&[]).is_empty());
    }

    #[test]
    fn distinct_hashes_produce_no_pairs() {
        let hashes = vec![entry("/a.jpg", 1), entry("/b.jpg", 2), entry("/c.jpg", 3)];
        assert!(find_duplicate_pairs(&hashes).is_empty());
    }

    #[test]
    fn two_identical_images_yield_one_pair() {
        let hashes = vec![entry("/a.jpg", 7), entry("/b.jpg", 7)];

        let pairs = find_duplicate_pairs(&hashes);

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].duplicate, PathBuf::from("/b.jpg"));
        assert_eq!(pairs[0].original, PathBuf::from("/a.jpg"));
    }

    #[test]
    fn three_identical_images_yield_two_pairs_against_first() {
        let hashes = vec![entry("/a.jpg", 7), entry("/b.jpg", 7), entry("/c.jpg", 7)];

        let pairs = find_duplicate_pairs(&hashes);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].duplicate, PathBuf::from("/b.jpg"));
        assert_eq!(pairs[0].original, PathBuf::from("/a.jpg"));
        assert_eq!(pairs[1].duplicate, PathBuf::from("/c.jpg"));
        assert_eq!(pairs[1].original, PathBuf::from("/a.jpg"));
    }

    #[test]
    fn pairs_come_back_in_list_order() {
        let hashes = vec![
            entry("/a.jpg", 1),
            entry("/b.jpg", 2),
            entry("/c.jpg", 1),
            entry("/d.jpg", 2),
        ];

        let pairs = find_duplicate_pairs(&hashes);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].duplicate, PathBuf::from("/c.jpg"));
        assert_eq!(pairs[1].duplicate, PathBuf::from("/d.jpg"));
    }

    #[test]
    fn near_matches_are_not_duplicates() {
        // One bit apart: close, but not exactly equal
        let hashes = vec![
            (PathBuf::from("/a.jpg"), hash(0b0000_0001)),
            (PathBuf::from("/b.jpg"), hash(0b0000_0011)),
        ];

        assert!(find_duplicate_pairs(&hashes).is_empty());
    }
}
