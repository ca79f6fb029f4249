use anyhow::Result;
use clap::Args;
use phylo_bio::similarity::SimilarityMatrix;
use phylo_core::Config;
use std::path::PathBuf;

use super::{clustering_config, load_records};
use crate::cli::output::{create_standard_table, format_score, header_cell, section_header};

#[derive(Args)]
pub struct SimilarityArgs {
    /// Input FASTA file (.gz is decompressed transparently)
    #[arg(value_name = "FASTA")]
    pub input: PathBuf,

    /// N-gram length (overrides the config file)
    #[arg(short = 'n', long)]
    pub ngram_size: Option<usize>,

    /// Only show pairs scoring at least this much
    #[arg(long, value_name = "SCORE", default_value = "0.0")]
    pub min_score: f64,

    /// Tab-separated output instead of a table
    #[arg(long)]
    pub tsv: bool,
}

pub fn run(args: SimilarityArgs, config: &Config) -> Result<()> {
    let clustering = clustering_config(config, args.ngram_size)?;
    let records = load_records(&args.input, config, clustering.ngram_size)?;
    let matrix = SimilarityMatrix::from_records(&records, clustering.parallel);

    let pairs: Vec<(&str, &str, f64)> = matrix
        .pairs()
        .filter(|&(_, _, score)| score >= args.min_score)
        .collect();

    if args.tsv {
        for (a, b, score) in &pairs {
            println!("{}\t{}\t{}", a, b, format_score(*score));
        }
        return Ok(());
    }

    section_header(&format!(
        "Pairwise similarity ({} records, n = {})",
        matrix.len(),
        clustering.ngram_size
    ));

    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("Record A"),
        header_cell("Record B"),
        header_cell("Jaccard"),
    ]);
    for (a, b, score) in &pairs {
        table.add_row(vec![a.to_string(), b.to_string(), format_score(*score)]);
    }
    println!("{}", table);

    Ok(())
}
