pub mod similarity;
pub mod tree;

use anyhow::{Context, Result};
use phylo_bio::formats::fasta::parse_fasta_with;
use phylo_bio::sequence::RecordSet;
use phylo_core::{ClusteringConfig, Config};
use std::path::Path;
use tracing::{debug, info};

/// Clustering settings from the config file with command-line overrides applied
pub fn clustering_config(config: &Config, ngram_size: Option<usize>) -> Result<ClusteringConfig> {
    let mut clustering = config.clustering.clone();
    if let Some(n) = ngram_size {
        clustering.ngram_size = n;
    }
    clustering.validate()?;
    Ok(clustering)
}

/// Load a FASTA file and index its records with n-grams of length `ngram_size`
pub fn load_records(path: &Path, config: &Config, ngram_size: usize) -> Result<RecordSet> {
    let sequences = parse_fasta_with(path, &config.loader)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    info!("Loaded {} sequences from {}", sequences.len(), path.display());
    if let Some(first) = sequences.iter().find(|s| !s.is_empty()) {
        debug!("Input looks like {} ({})", first.detect_type(), first.id);
    }

    let records = RecordSet::from_sequences(sequences, ngram_size)
        .with_context(|| format!("Invalid records in {}", path.display()))?;
    Ok(records)
}
