//! Test utilities for the phylo workspace
//!
//! Common fixtures, isolated file environments and assertions shared by the
//! integration tests of the other crates.
//!
//! # Features
//!
//! - **Test Environment**: temporary directories with FASTA and config writers
//! - **Fixtures**: deterministic sequence generators and FASTA content
//! - **Assertions**: checks on FASTA text and canonical tree strings

pub mod assertions;
pub mod environment;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::{assert_canonical_tree, assert_valid_fasta, canonical_leaves};
pub use environment::TestEnvironment;
pub use fixtures::{
    create_test_fasta, generate_family, generate_sequences, identical_pair_fixture, TestSequence,
};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (safe to call from every test)
///
/// Output goes through the libtest capture, so it only shows for failing
/// tests or with `--nocapture`. `PHYLO_LOG` selects the level.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(phylo_core::logging::build_filter("debug"))
        .with_test_writer()
        .try_init();
}

/// Run a test inside a fresh [`TestEnvironment`]
///
/// # Example
/// ```rust
/// use phylo_test::{with_test_env, TestSequence};
///
/// with_test_env(|env| {
///     let path = env.write_fasta("input.fa", &[TestSequence::new("a", "ACGT")])?;
///     assert!(path.exists());
///     Ok(())
/// })
/// .unwrap();
/// ```
pub fn with_test_env<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::new()?;
    f(&env)
}
