//! Core error types for phylo

use thiserror::Error;

/// Main error type for phylo operations
#[derive(Error, Debug)]
pub enum PhyloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Parsing error: {0}")]
    Parse(String),

    /// A caller-supplied parameter is out of range (e.g. an n-gram length of zero)
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// Clustering was asked to build a tree from zero records
    #[error("Empty input: at least one record is required")]
    EmptyInput,

    /// Two records share the same identifier
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// The input needs more merges than the configured cap allows
    #[error("Merge limit exceeded: {required} merges required, limit is {limit}")]
    MergeLimitExceeded { required: usize, limit: usize },

    #[error("Other error: {0}")]
    Other(String),
}

impl PhyloError {
    /// Shorthand for an [`PhyloError::InvalidParameter`]
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        PhyloError::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Result type alias for phylo operations
pub type PhyloResult<T> = Result<T, PhyloError>;

impl From<serde_json::Error> for PhyloError {
    fn from(err: serde_json::Error) -> Self {
        PhyloError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for PhyloError {
    fn from(err: anyhow::Error) -> Self {
        PhyloError::Other(err.to_string())
    }
}
