pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "phylo",
    version,
    about = "Cluster sequences into a binary tree by n-gram similarity",
    long_about = "Phylo reduces every sequence to its set of n-grams, scores each pair by \
                  Jaccard similarity and repeatedly merges the two most similar clusters \
                  (single linkage) until a single tree remains."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of threads to use (0 = all available)
    #[arg(short = 'j', long, default_value = "0", global = true)]
    pub threads: usize,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true, env = "PHYLO_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster a FASTA file and print the resulting tree
    Tree(commands::tree::TreeArgs),

    /// Print the pairwise similarity of every two records
    Similarity(commands::similarity::SimilarityArgs),
}
