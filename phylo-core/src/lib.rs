//! Core utilities and types shared across all phylo crates

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use config::{
    load_config, save_config, ClusteringConfig, Config, LoaderConfig, LoggingConfig, OutputConfig,
    TreeStyle,
};
pub use error::{PhyloError, PhyloResult};
pub use logging::init_logging;
pub use types::SequenceType;

/// Version information for the phylo project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
