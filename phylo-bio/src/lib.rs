//! Sequence clustering for Phylo
//!
//! Records are reduced to n-gram sets, compared pairwise with Jaccard
//! similarity and merged greedily into a binary tree.

pub mod clustering;
pub mod formats;
pub mod ngram;
pub mod sequence;
pub mod similarity;

// Re-export commonly used types
pub use clustering::{build_tree, AgglomerativeClusterer, ClusterNode, Clustering, MergeStep};
pub use formats::{parse_fasta, parse_fasta_from_bytes, parse_fasta_from_bytes_with, parse_fasta_with};
pub use ngram::{ngrams, NgramSet};
pub use sequence::{Record, RecordSet, Sequence, SequenceType};
pub use similarity::{jaccard, SimilarityMatrix};
