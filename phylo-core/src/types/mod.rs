//! Types shared across phylo crates

pub mod sequence;

pub use sequence::SequenceType;
