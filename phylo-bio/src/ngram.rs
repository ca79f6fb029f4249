//! N-gram indexing of sequences
//!
//! A sequence is reduced to the set of its contiguous substrings of a fixed
//! length. Repeated substrings collapse to a single entry, so the set only
//! records *which* n-grams occur, never how often.

use phylo_core::{PhyloError, PhyloResult};
use std::collections::HashSet;

/// Deduplicated set of fixed-length substrings of one sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramSet {
    n: usize,
    grams: HashSet<Box<[u8]>>,
}

impl NgramSet {
    /// Length of every n-gram in the set
    pub fn ngram_size(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    pub fn contains(&self, gram: &[u8]) -> bool {
        self.grams.contains(gram)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.grams.iter().map(|g| g.as_ref())
    }

    /// Number of n-grams present in both sets
    pub fn intersection_len(&self, other: &NgramSet) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.grams.iter().filter(|g| large.grams.contains(*g)).count()
    }

    /// Number of distinct n-grams present in either set
    pub fn union_len(&self, other: &NgramSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }
}

/// Build the n-gram set of `sequence`.
///
/// A sequence shorter than `n` yields an empty set. `n` must be at least 1.
pub fn ngrams(sequence: &[u8], n: usize) -> PhyloResult<NgramSet> {
    validate_ngram_size(n)?;

    let grams = if n > sequence.len() {
        HashSet::new()
    } else {
        sequence.windows(n).map(Box::from).collect()
    };

    Ok(NgramSet { n, grams })
}

pub(crate) fn validate_ngram_size(n: usize) -> PhyloResult<()> {
    if n == 0 {
        return Err(PhyloError::invalid_parameter(
            "ngram_size",
            "n-gram length must be a positive integer",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ngrams_collapse_duplicates() {
        let set = ngrams(b"AAAA", 2).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(b"AA"));

        let set = ngrams(b"AAAT", 2).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(b"AA"));
        assert!(set.contains(b"AT"));
        assert_eq!(set.ngram_size(), 2);
    }

    #[test]
    fn test_ngram_longer_than_sequence_is_empty() {
        let set = ngrams(b"AC", 5).unwrap();
        assert!(set.is_empty());

        let set = ngrams(b"", 1).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_ngram_equal_to_sequence_length() {
        let set = ngrams(b"ACGT", 4).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(b"ACGT"));
    }

    #[test]
    fn test_zero_ngram_size_rejected() {
        match ngrams(b"ACGT", 0) {
            Err(PhyloError::InvalidParameter { name, .. }) => assert_eq!(name, "ngram_size"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_intersection_and_union() {
        let a = ngrams(b"AAAA", 2).unwrap();
        let b = ngrams(b"AAAT", 2).unwrap();
        assert_eq!(a.intersection_len(&b), 1);
        assert_eq!(b.intersection_len(&a), 1);
        assert_eq!(a.union_len(&b), 2);
    }

    proptest! {
        #[test]
        fn prop_ngrams_idempotent(seq in "[ACGT]{0,64}", n in 1usize..8) {
            let first = ngrams(seq.as_bytes(), n).unwrap();
            let second = ngrams(seq.as_bytes(), n).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_ngram_count_bounded(seq in "[ACGT]{0,64}", n in 1usize..8) {
            let set = ngrams(seq.as_bytes(), n).unwrap();
            let windows = if n > seq.len() { 0 } else { seq.len() - n + 1 };
            prop_assert!(set.len() <= windows);
            prop_assert!(set.iter().all(|g| g.len() == n));
        }
    }
}
