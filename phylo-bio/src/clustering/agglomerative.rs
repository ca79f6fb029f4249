//! Greedy maximum-similarity agglomeration
//!
//! Starting from one leaf per record, the two active clusters joined by the
//! strongest single leaf-to-leaf similarity are merged until one cluster
//! remains. Cluster-to-cluster similarity is single linkage: the maximum over
//! all leaf pairs spanning the two clusters.
//!
//! Ties are resolved deterministically. Among equal scores the leaf pair
//! `(i, j)` (with `i < j`) that sorts first wins; should two candidates still
//! tie, the pair of cluster canonical strings that sorts first wins.
//!
//! Instead of rescanning membership products every round, the best link
//! between each pair of active clusters is cached. Merging `X` and `Y` into
//! `Z` sets `link(Z, W)` to the better of `link(X, W)` and `link(Y, W)`,
//! which is exactly the brute-force maximum because the preference order is
//! total.

use super::tree::ClusterNode;
use crate::sequence::RecordSet;
use crate::similarity::SimilarityMatrix;
use phylo_core::{ClusteringConfig, PhyloError, PhyloResult};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Below this many active clusters the candidate search stays on one thread
const PARALLEL_SEARCH_THRESHOLD: usize = 64;

/// One merge performed during clustering
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    /// Canonical string of the new node's left child
    pub left: String,
    /// Canonical string of the new node's right child
    pub right: String,
    /// Single-linkage similarity between the two clusters
    pub score: f64,
    /// Leaf identifiers that realised `score`, smaller identifier first
    pub leaf_pair: (String, String),
}

/// Result of a clustering run: the root plus every merge in order
#[derive(Debug, Clone)]
pub struct Clustering {
    root: ClusterNode,
    merges: Vec<MergeStep>,
}

impl Clustering {
    pub fn root(&self) -> &ClusterNode {
        &self.root
    }

    pub fn merges(&self) -> &[MergeStep] {
        &self.merges
    }

    pub fn into_root(self) -> ClusterNode {
        self.root
    }
}

/// Best leaf-to-leaf link between two clusters; `lo` and `hi` are matrix
/// indices with `id(lo) < id(hi)`
#[derive(Debug, Clone, Copy)]
struct Link {
    score: f64,
    lo: usize,
    hi: usize,
}

impl Link {
    fn between(matrix: &SimilarityMatrix, i: usize, j: usize) -> Self {
        let (lo, hi) = if matrix.id(i) < matrix.id(j) { (i, j) } else { (j, i) };
        Self {
            score: matrix.score(i, j),
            lo,
            hi,
        }
    }
}

/// `Less` means `x` is preferred: higher score, then smaller leaf pair
fn link_order(x: &Link, y: &Link, matrix: &SimilarityMatrix) -> Ordering {
    y.score
        .partial_cmp(&x.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| matrix.id(x.lo).cmp(matrix.id(y.lo)))
        .then_with(|| matrix.id(x.hi).cmp(matrix.id(y.hi)))
}

fn better(x: Link, y: Link, matrix: &SimilarityMatrix) -> Link {
    match link_order(&x, &y, matrix) {
        Ordering::Greater => y,
        _ => x,
    }
}

/// Cached best link for every pair of cluster slots
struct LinkTable {
    n: usize,
    cells: Vec<Link>,
}

impl LinkTable {
    fn new(matrix: &SimilarityMatrix) -> Self {
        let n = matrix.len();
        let placeholder = Link {
            score: 0.0,
            lo: 0,
            hi: 0,
        };
        let mut cells = vec![placeholder; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                cells[i * n + j] = Link::between(matrix, i, j);
            }
        }
        Self { n, cells }
    }

    fn get(&self, a: usize, b: usize) -> Link {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.cells[lo * self.n + hi]
    }

    fn set(&mut self, a: usize, b: usize, link: Link) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        self.cells[lo * self.n + hi] = link;
    }
}

/// A pair of active cluster slots and the link joining them
#[derive(Debug, Clone, Copy)]
struct Candidate {
    a: usize,
    b: usize,
    link: Link,
}

/// Greedy single-linkage clusterer
pub struct AgglomerativeClusterer {
    config: ClusteringConfig,
}

impl Default for AgglomerativeClusterer {
    fn default() -> Self {
        Self::new(ClusteringConfig::default())
    }
}

impl AgglomerativeClusterer {
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Index `(identifier, sequence)` pairs with the configured n-gram size
    /// and cluster them.
    pub fn cluster_sequences<I, K, S>(&self, sequences: I) -> PhyloResult<Clustering>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: AsRef<[u8]>,
    {
        self.config.validate()?;
        let records = RecordSet::from_pairs(sequences, self.config.ngram_size)?;
        self.cluster(&records)
    }

    /// Cluster already indexed records. The records keep the n-gram size
    /// they were built with.
    pub fn cluster(&self, records: &RecordSet) -> PhyloResult<Clustering> {
        self.check_input(records.len())?;
        let matrix = SimilarityMatrix::from_records(records, self.config.parallel);
        self.cluster_matrix(&matrix)
    }

    /// Cluster from a precomputed similarity table
    pub fn cluster_matrix(&self, matrix: &SimilarityMatrix) -> PhyloResult<Clustering> {
        self.check_input(matrix.len())?;

        let n = matrix.len();
        let required = n - 1;
        info!("Clustering {} records ({} merges)", n, required);

        let mut slots: Vec<Option<ClusterNode>> = matrix
            .ids()
            .iter()
            .map(|id| Some(ClusterNode::leaf(id.clone())))
            .collect();
        let mut active: Vec<usize> = (0..n).collect();
        let mut links = LinkTable::new(matrix);
        let mut merges = Vec::with_capacity(required);

        while active.len() > 1 {
            let best = self
                .find_best_pair(&active, &slots, &links, matrix)
                .ok_or_else(|| PhyloError::Other("no merge candidate among active clusters".into()))?;

            let (Some(x), Some(y)) = (slots[best.a].take(), slots[best.b].take()) else {
                return Err(PhyloError::Other(format!(
                    "merge candidate ({}, {}) refers to an inactive cluster",
                    best.a, best.b
                )));
            };

            let node = ClusterNode::merge(x, y);
            if let Some((left, right)) = node.children() {
                debug!(
                    score = best.link.score,
                    "Merging {} and {} via ({}, {})",
                    left,
                    right,
                    matrix.id(best.link.lo),
                    matrix.id(best.link.hi)
                );
                merges.push(MergeStep {
                    left: left.canonical().to_string(),
                    right: right.canonical().to_string(),
                    score: best.link.score,
                    leaf_pair: (
                        matrix.id(best.link.lo).to_string(),
                        matrix.id(best.link.hi).to_string(),
                    ),
                });
            }

            // The merged cluster lives on in slot `a`; slot `b` retires.
            active.retain(|&slot| slot != best.b);
            for &c in &active {
                if c != best.a {
                    let merged = better(links.get(best.a, c), links.get(best.b, c), matrix);
                    links.set(best.a, c, merged);
                }
            }
            slots[best.a] = Some(node);
        }

        let root = active
            .first()
            .and_then(|&slot| slots[slot].take())
            .ok_or_else(|| PhyloError::Other("clustering finished without a root".into()))?;

        info!(
            "Clustering complete: {} leaves, height {}",
            root.leaf_count(),
            root.height()
        );
        Ok(Clustering { root, merges })
    }

    /// Empty input and the merge cap are rejected before any work is done.
    fn check_input(&self, records: usize) -> PhyloResult<()> {
        if records == 0 {
            return Err(PhyloError::EmptyInput);
        }
        if let Some(limit) = self.config.max_merges {
            let required = records - 1;
            if required > limit {
                return Err(PhyloError::MergeLimitExceeded { required, limit });
            }
        }
        Ok(())
    }

    fn find_best_pair(
        &self,
        active: &[usize],
        slots: &[Option<ClusterNode>],
        links: &LinkTable,
        matrix: &SimilarityMatrix,
    ) -> Option<Candidate> {
        let order = |x: &Candidate, y: &Candidate| candidate_order(x, y, slots, matrix);

        let best_in_row = |p: usize| -> Option<Candidate> {
            let a = active[p];
            active[p + 1..]
                .iter()
                .map(|&b| Candidate {
                    a,
                    b,
                    link: links.get(a, b),
                })
                .min_by(order)
        };

        if self.config.parallel && active.len() >= PARALLEL_SEARCH_THRESHOLD {
            (0..active.len())
                .into_par_iter()
                .filter_map(best_in_row)
                .min_by(order)
        } else {
            (0..active.len()).filter_map(best_in_row).min_by(order)
        }
    }
}

fn candidate_order(
    x: &Candidate,
    y: &Candidate,
    slots: &[Option<ClusterNode>],
    matrix: &SimilarityMatrix,
) -> Ordering {
    link_order(&x.link, &y.link, matrix)
        .then_with(|| canonical_pair(x, slots).cmp(&canonical_pair(y, slots)))
}

fn canonical_pair<'a>(c: &Candidate, slots: &'a [Option<ClusterNode>]) -> (&'a str, &'a str) {
    let name = |slot: usize| slots[slot].as_ref().map_or("", |node| node.canonical());
    let (a, b) = (name(c.a), name(c.b));
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sequential() -> AgglomerativeClusterer {
        AgglomerativeClusterer::new(ClusteringConfig::default().sequential())
    }

    fn cluster(pairs: Vec<(&str, &str)>, n: usize) -> PhyloResult<Clustering> {
        let records = RecordSet::from_pairs(pairs, n)?;
        sequential().cluster(&records)
    }

    #[test]
    fn test_two_records() {
        let result = cluster(vec![("X", "AAAA"), ("Y", "AAAT")], 2).unwrap();
        assert_eq!(result.root().canonical(), "(X, Y)");
        assert_eq!(result.merges().len(), 1);
        assert_eq!(result.merges()[0].score, 0.5);
        assert_eq!(
            result.merges()[0].leaf_pair,
            ("X".to_string(), "Y".to_string())
        );
    }

    #[test]
    fn test_single_record_is_root() {
        let result = cluster(vec![("Z", "ACGT")], 2).unwrap();
        assert!(result.root().is_leaf());
        assert_eq!(result.root().leaf_id(), Some("Z"));
        assert!(result.merges().is_empty());
    }

    #[test]
    fn test_zero_records_rejected() {
        assert!(matches!(cluster(vec![], 2), Err(PhyloError::EmptyInput)));

        let matrix = SimilarityMatrix::from_fn(Vec::new(), |_, _| 0.0).unwrap();
        assert!(matches!(
            sequential().cluster_matrix(&matrix),
            Err(PhyloError::EmptyInput)
        ));
    }

    #[test]
    fn test_identical_pair_merges_first() {
        let result = cluster(
            vec![("A", "ACGTACGTAC"), ("B", "ACGTACGTAC"), ("C", "TTTTGGGGTT")],
            3,
        )
        .unwrap();

        assert_eq!(result.merges()[0].left, "A");
        assert_eq!(result.merges()[0].right, "B");
        assert_eq!(result.merges()[0].score, 1.0);
        assert_eq!(result.root().canonical(), "((A, B), C)");
    }

    #[test]
    fn test_all_empty_ngram_sets_still_produce_tree() {
        let result = cluster(vec![("a", "AC"), ("b", "GT"), ("c", "T")], 5).unwrap();
        assert!(result.merges().iter().all(|m| m.score == 0.0));
        // Every score ties at zero, so the smallest identifier pair goes first
        assert_eq!(
            result.merges()[0].leaf_pair,
            ("a".to_string(), "b".to_string())
        );
        assert_eq!(result.root().canonical(), "((a, b), c)");
    }

    #[test]
    fn test_tie_break_prefers_smallest_leaf_pair() {
        let ids: Vec<String> = ["d", "c", "b", "a"].iter().map(|s| s.to_string()).collect();
        let matrix = SimilarityMatrix::from_fn(ids, |_, _| 0.7).unwrap();
        let result = sequential().cluster_matrix(&matrix).unwrap();

        assert_eq!(
            result.merges()[0].leaf_pair,
            ("a".to_string(), "b".to_string())
        );
        assert_eq!(
            result.merges()[1].leaf_pair,
            ("a".to_string(), "c".to_string())
        );
        assert_eq!(result.root().canonical(), "(((a, b), c), d)");
    }

    #[test]
    fn test_single_linkage_uses_maximum() {
        // a-b is the strongest link; c is close to b but far from a
        let ids: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let scores = |i: usize, j: usize| match (i, j) {
            (0, 1) => 0.9,
            (1, 2) => 0.8,
            (0, 2) => 0.1,
            (2, 3) => 0.3,
            _ => 0.0,
        };
        let matrix = SimilarityMatrix::from_fn(ids, scores).unwrap();
        let result = sequential().cluster_matrix(&matrix).unwrap();

        let steps: Vec<f64> = result.merges().iter().map(|m| m.score).collect();
        assert_eq!(steps, vec![0.9, 0.8, 0.3]);
        assert_eq!(result.root().canonical(), "(((a, b), c), d)");
    }

    #[test]
    fn test_merge_limit_checked_before_merging() {
        let clusterer = AgglomerativeClusterer::new(ClusteringConfig {
            max_merges: Some(1),
            ..ClusteringConfig::default()
        });
        let records =
            RecordSet::from_pairs(vec![("a", "ACGT"), ("b", "ACGA"), ("c", "TTTT")], 2).unwrap();

        match clusterer.cluster(&records) {
            Err(PhyloError::MergeLimitExceeded { required, limit }) => {
                assert_eq!(required, 2);
                assert_eq!(limit, 1);
            }
            other => panic!("Expected MergeLimitExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_cluster_sequences_validates_ngram_size() {
        let clusterer = AgglomerativeClusterer::new(ClusteringConfig::default().with_ngram_size(0));
        assert!(matches!(
            clusterer.cluster_sequences(vec![("a", "ACGT")]),
            Err(PhyloError::InvalidParameter { .. })
        ));
    }

    /// Replays `result` and checks every merge against an exhaustive scan of
    /// all leaf pairs across all active clusters.
    fn assert_matches_brute_force(matrix: &SimilarityMatrix, result: &Clustering) {
        let mut active: Vec<ClusterNode> =
            matrix.ids().iter().map(|id| ClusterNode::leaf(id.clone())).collect();

        for step in result.merges() {
            // (score, lo id, hi id, canon lo, canon hi, x, y)
            let mut best: Option<(f64, String, String, String, String, usize, usize)> = None;
            for x in 0..active.len() {
                for y in (x + 1)..active.len() {
                    for i in active[x].membership() {
                        for j in active[y].membership() {
                            let score = matrix.get(i, j).unwrap();
                            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                            let (cx, cy) = (active[x].canonical(), active[y].canonical());
                            let (clo, chi) = if cx <= cy { (cx, cy) } else { (cy, cx) };
                            let candidate = (
                                score,
                                lo.clone(),
                                hi.clone(),
                                clo.to_string(),
                                chi.to_string(),
                                x,
                                y,
                            );
                            let replace = match &best {
                                None => true,
                                Some(b) => {
                                    score > b.0
                                        || (score == b.0
                                            && (&candidate.1, &candidate.2, &candidate.3, &candidate.4)
                                                < (&b.1, &b.2, &b.3, &b.4))
                                }
                            };
                            if replace {
                                best = Some(candidate);
                            }
                        }
                    }
                }
            }

            let (score, lo, hi, clo, chi, x, y) = best.unwrap();
            assert_eq!(step.score, score);
            assert_eq!(step.leaf_pair, (lo, hi));
            assert_eq!((step.left.clone(), step.right.clone()), (clo, chi));

            let second = active.remove(y);
            let first = active.remove(x);
            active.push(ClusterNode::merge(first, second));
        }

        assert_eq!(active.len(), 1);
        assert_eq!(&active[0], result.root());
    }

    fn random_records(rng: &mut StdRng, count: usize, alphabet: &[u8], len: usize) -> RecordSet {
        let pairs: Vec<(String, Vec<u8>)> = (0..count)
            .map(|i| {
                let l = rng.gen_range(0..=len);
                let seq = (0..l).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect();
                (format!("r{:02}", i), seq)
            })
            .collect();
        RecordSet::from_pairs(pairs, 2).unwrap()
    }

    #[test]
    fn test_merges_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        for round in 0..20 {
            // Small alphabets and short sequences produce many ties
            let (alphabet, len): (&[u8], usize) = if round % 2 == 0 {
                (b"AC", 4)
            } else {
                (b"ACGT", 24)
            };
            let records = random_records(&mut rng, 2 + round % 9, alphabet, len);
            let matrix = SimilarityMatrix::from_records(&records, false);
            let result = sequential().cluster_matrix(&matrix).unwrap();

            assert_eq!(result.merges().len(), records.len() - 1);
            assert_matches_brute_force(&matrix, &result);
        }
    }

    #[test]
    fn test_parallel_search_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(11);
        let records = random_records(&mut rng, PARALLEL_SEARCH_THRESHOLD + 16, b"ACGT", 12);
        let matrix = SimilarityMatrix::from_records(&records, true);

        let parallel = AgglomerativeClusterer::default().cluster_matrix(&matrix).unwrap();
        let serial = sequential().cluster_matrix(&matrix).unwrap();

        assert_eq!(parallel.merges(), serial.merges());
        assert_eq!(parallel.root(), serial.root());
    }
}
