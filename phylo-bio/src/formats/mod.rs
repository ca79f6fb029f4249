pub mod fasta;

// Re-export commonly used functions
pub use fasta::{parse_fasta, parse_fasta_from_bytes, parse_fasta_from_bytes_with, parse_fasta_with};
