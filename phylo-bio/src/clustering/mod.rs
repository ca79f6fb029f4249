//! Hierarchical clustering of records by n-gram similarity

pub mod agglomerative;
pub mod tree;

pub use agglomerative::{AgglomerativeClusterer, Clustering, MergeStep};
pub use tree::{ClusterNode, NodeKind};

use phylo_core::{ClusteringConfig, PhyloResult};

/// Cluster `(identifier, sequence)` pairs into a single tree using n-grams
/// of length `ngram_size` and the default clustering settings.
///
/// ```
/// use phylo_bio::clustering::build_tree;
///
/// let root = build_tree(vec![("X", "AAAA"), ("Y", "AAAT")], 2).unwrap();
/// assert_eq!(root.canonical(), "(X, Y)");
/// ```
pub fn build_tree<I, K, S>(sequences: I, ngram_size: usize) -> PhyloResult<ClusterNode>
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: AsRef<[u8]>,
{
    let config = ClusteringConfig::default().with_ngram_size(ngram_size);
    AgglomerativeClusterer::new(config)
        .cluster_sequences(sequences)
        .map(Clustering::into_root)
}
