//! Logging initialisation shared by the binaries

use crate::{PhyloError, PhyloResult};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV_VAR: &str = "PHYLO_LOG";

/// Build the filter: `PHYLO_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global tracing subscriber. Logs go to stderr so that rendered
/// trees on stdout stay machine-readable.
pub fn init_logging(level: &str, json: bool) -> PhyloResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| PhyloError::Other(format!("Failed to initialise logging: {}", e)))
}
