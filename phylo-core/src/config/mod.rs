//! Configuration types for phylo

use crate::PhyloError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Length of the substrings compared between sequences
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,
    /// Compute the similarity table and candidate search on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Refuse inputs that would need more merges than this
    #[serde(default)]
    pub max_merges: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Fold residues to upper case while loading
    #[serde(default = "default_uppercase")]
    pub uppercase: bool,
    /// Keep records whose sequence has no residues
    #[serde(default = "default_keep_empty")]
    pub keep_empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TreeStyle {
    /// Nested parentheses, e.g. `((A, B), C)`
    #[default]
    Canonical,
    /// One node per line with box-drawing guides
    Tree,
}

impl std::str::FromStr for TreeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canonical" | "parens" => Ok(TreeStyle::Canonical),
            "tree" | "ascii" => Ok(TreeStyle::Tree),
            _ => Err(format!("Unknown tree style: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub style: TreeStyle,
    #[serde(default = "default_show_scores")]
    pub show_scores: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_json")]
    pub json: bool,
}

// Default value functions
fn default_ngram_size() -> usize { 4 }
fn default_parallel() -> bool { true }
fn default_uppercase() -> bool { false }
fn default_keep_empty() -> bool { true }
fn default_show_scores() -> bool { false }
fn default_log_level() -> String { "warn".to_string() }
fn default_log_json() -> bool { false }

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            ngram_size: default_ngram_size(),
            parallel: default_parallel(),
            max_merges: None,
        }
    }
}

impl ClusteringConfig {
    /// Reject settings the clusterer cannot run with
    pub fn validate(&self) -> Result<(), PhyloError> {
        if self.ngram_size == 0 {
            return Err(PhyloError::invalid_parameter(
                "ngram_size",
                "n-gram length must be a positive integer",
            ));
        }
        Ok(())
    }

    pub fn with_ngram_size(mut self, ngram_size: usize) -> Self {
        self.ngram_size = ngram_size;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            uppercase: default_uppercase(),
            keep_empty: default_keep_empty(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_scores: default_show_scores(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_log_json(),
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, PhyloError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| PhyloError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), PhyloError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| PhyloError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
