//! Pairwise Jaccard similarity between records
//!
//! The matrix stores one score per unordered pair of distinct records in a
//! condensed upper-triangle layout (`n * (n - 1) / 2` entries, row-major).
//! Lookups accept the two identifiers in either order.

use crate::ngram::NgramSet;
use crate::sequence::RecordSet;
use indicatif::{ProgressBar, ProgressStyle};
use phylo_core::{PhyloError, PhyloResult};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets share no evidence, so their similarity is 0.0.
pub fn jaccard(a: &NgramSet, b: &NgramSet) -> f64 {
    let union = a.union_len(b);
    if union == 0 {
        return 0.0;
    }
    a.intersection_len(b) as f64 / union as f64
}

/// Read-only table of similarities between every two distinct records
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities of `records`.
    ///
    /// Rows are computed on the rayon pool when `parallel` is set; the result
    /// is identical either way.
    pub fn from_records(records: &RecordSet, parallel: bool) -> Self {
        let ids: Vec<String> = records.ids().map(str::to_string).collect();
        let sets: Vec<&NgramSet> = records.iter().map(|r| r.ngrams()).collect();
        let n = sets.len();
        trace!("Computing {} pairwise similarities", pair_count(n));

        let pb = progress_bar(n);
        let row = |i: usize| -> Vec<f64> {
            let scores = ((i + 1)..n).map(|j| jaccard(sets[i], sets[j])).collect();
            if let Some(ref pb) = pb {
                pb.inc((n - i - 1) as u64);
            }
            scores
        };

        let rows: Vec<Vec<f64>> = if parallel {
            (0..n).into_par_iter().map(row).collect()
        } else {
            (0..n).map(row).collect()
        };

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let scores = rows.into_iter().flatten().collect();
        debug!("Similarity matrix ready for {} records", n);
        Self::assemble(ids, scores)
    }

    /// Build a matrix from explicit scores, `score(i, j)` being called once
    /// per pair with `i < j`. Identifiers must be unique and scores must lie
    /// in `[0, 1]`.
    pub fn from_fn<F>(ids: Vec<String>, mut score: F) -> PhyloResult<Self>
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(PhyloError::DuplicateIdentifier(id.clone()));
            }
        }

        let n = ids.len();
        let mut scores = Vec::with_capacity(pair_count(n));
        for i in 0..n {
            for j in (i + 1)..n {
                let s = score(i, j);
                if !(0.0..=1.0).contains(&s) {
                    return Err(PhyloError::invalid_parameter(
                        "similarity",
                        format!(
                            "score for ({}, {}) is {}, expected a value in [0, 1]",
                            ids[i], ids[j], s
                        ),
                    ));
                }
                scores.push(s);
            }
        }

        Ok(Self::assemble(ids, scores))
    }

    fn assemble(ids: Vec<String>, scores: Vec<f64>) -> Self {
        let index = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        Self { ids, index, scores }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Similarity of two distinct records, in either order.
    ///
    /// Returns `None` for unknown identifiers or when `a == b`.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        if i == j {
            return None;
        }
        Some(self.score(i, j))
    }

    /// Similarity by record index; `i` and `j` must differ.
    pub fn score(&self, i: usize, j: usize) -> f64 {
        debug_assert_ne!(i, j, "similarity is only defined for distinct records");
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.scores[condensed_index(self.len(), lo, hi)]
    }

    /// Every unordered pair once, as `(a, b, score)` with `a` at the lower
    /// matrix index. Record-built matrices are indexed in identifier order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| {
            ((i + 1)..n).map(move |j| (self.id(i), self.id(j), self.score(i, j)))
        })
    }
}

fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

fn progress_bar(n: usize) -> Option<ProgressBar> {
    let pairs = pair_count(n);
    if pairs < 500_000 || std::env::var("PHYLO_SILENT").is_ok() {
        return None;
    }

    let pb = ProgressBar::new(pairs as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pairs ({per_sec}, ETA: {eta})")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.set_message("Computing similarities...");
    Some(pb)
}
