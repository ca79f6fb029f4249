//! Test environment management
//!
//! Provides isolated scratch directories with automatic cleanup using RAII.

use crate::fixtures::{create_test_fasta, TestSequence};
use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use phylo_core::{save_config, Config};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with automatic cleanup
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir =
            TempDir::with_prefix("phylo-test").context("Failed to create temporary directory")?;
        Ok(Self { temp_dir })
    }

    /// Get the root path of the test environment
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file in the test environment, creating parent directories
    pub fn write_file(&self, path: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Write sequences as a plain FASTA file
    pub fn write_fasta(&self, name: &str, sequences: &[TestSequence]) -> Result<PathBuf> {
        self.write_file(name, create_test_fasta(sequences).as_bytes())
    }

    /// Write sequences as a gzip-compressed FASTA file
    pub fn write_gz_fasta(&self, name: &str, sequences: &[TestSequence]) -> Result<PathBuf> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(create_test_fasta(sequences).as_bytes())?;
        let compressed = encoder.finish()?;
        self.write_file(name, &compressed)
    }

    /// Save a configuration file
    pub fn write_config(&self, name: &str, config: &Config) -> Result<PathBuf> {
        let path = self.root().join(name);
        save_config(&path, config)?;
        Ok(path)
    }

    /// Read a file from the test environment
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let full_path = self.root().join(path);
        Ok(std::fs::read(full_path)?)
    }
}
