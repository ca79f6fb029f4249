use anyhow::Result;
use clap::Args;
use phylo_bio::clustering::AgglomerativeClusterer;
use phylo_core::{Config, TreeStyle};
use std::path::PathBuf;

use super::{clustering_config, load_records};
use crate::cli::output::{merge_scores, merge_table, render_tree, section_header};

#[derive(Args)]
pub struct TreeArgs {
    /// Input FASTA file (.gz is decompressed transparently)
    #[arg(value_name = "FASTA")]
    pub input: PathBuf,

    /// N-gram length (overrides the config file)
    #[arg(short = 'n', long)]
    pub ngram_size: Option<usize>,

    /// Output style: canonical or tree
    #[arg(long, value_name = "STYLE")]
    pub style: Option<TreeStyle>,

    /// Also print the similarity behind every merge
    #[arg(long)]
    pub scores: bool,
}

pub fn run(args: TreeArgs, config: &Config) -> Result<()> {
    let clustering = clustering_config(config, args.ngram_size)?;
    let records = load_records(&args.input, config, clustering.ngram_size)?;

    let result = AgglomerativeClusterer::new(clustering).cluster(&records)?;
    let show_scores = args.scores || config.output.show_scores;

    match args.style.unwrap_or(config.output.style) {
        TreeStyle::Canonical => println!("{}", result.root()),
        TreeStyle::Tree => {
            let scores = show_scores.then(|| merge_scores(result.merges()));
            print!("{}", render_tree(result.root(), scores.as_ref()));
        }
    }

    if show_scores && !result.merges().is_empty() {
        section_header("Merge history");
        println!("{}", merge_table(result.merges()));
    }

    Ok(())
}
