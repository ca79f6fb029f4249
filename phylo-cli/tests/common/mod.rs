#![allow(dead_code)]

use assert_cmd::Command;
use phylo_test::{TestEnvironment, TestSequence};
use std::path::PathBuf;

/// Helper to run the phylo CLI command
pub fn phylo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("phylo").unwrap();
    cmd.env("PHYLO_SILENT", "1").env_remove("PHYLO_LOG");
    cmd
}

/// Three records: `A` and `B` identical, `C` unrelated
pub fn identical_pair_fasta(env: &TestEnvironment) -> PathBuf {
    env.write_fasta("pair.fa", &phylo_test::identical_pair_fixture())
        .unwrap()
}

/// `X` and `Y` share one of two 2-grams
pub fn half_similar_fasta(env: &TestEnvironment) -> PathBuf {
    env.write_fasta(
        "half.fa",
        &[TestSequence::new("X", "AAAA"), TestSequence::new("Y", "AAAT")],
    )
    .unwrap()
}

/// Write raw FASTA text
pub fn raw_fasta(env: &TestEnvironment, name: &str, content: &str) -> PathBuf {
    env.write_file(name, content.as_bytes()).unwrap()
}
