//! Test fixtures and data generators
//!
//! Every generator is seeded, so the same call always yields the same data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt::Write;

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Test sequence with an optional description
#[derive(Debug, Clone)]
pub struct TestSequence {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl TestSequence {
    /// Create a simple test sequence
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            sequence: sequence.into(),
        }
    }

    /// Set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    fn header(&self) -> String {
        let mut header = format!(">{}", self.id);
        if !self.description.is_empty() {
            let _ = write!(&mut header, " {}", self.description);
        }
        header
    }

    /// Convert to FASTA format, sequence on a single line
    pub fn to_fasta(&self) -> String {
        format!("{}\n{}\n", self.header(), self.sequence)
    }

    /// Convert to FASTA format with the sequence wrapped at `width` residues
    pub fn to_fasta_wrapped(&self, width: usize) -> String {
        let mut out = self.header();
        out.push('\n');
        let residues: Vec<char> = self.sequence.chars().collect();
        for line in residues.chunks(width.max(1)) {
            out.extend(line);
            out.push('\n');
        }
        out
    }
}

fn random_dna(rng: &mut StdRng, length: usize) -> String {
    (0..length).map(|_| BASES[rng.gen_range(0..4)]).collect()
}

/// Generate random DNA sequences named `seq_0`, `seq_1`, ...
pub fn generate_sequences(count: usize, length: usize) -> Vec<TestSequence> {
    let mut rng = StdRng::seed_from_u64(42); // Deterministic for tests

    (0..count)
        .map(|i| TestSequence::new(format!("seq_{}", i), random_dna(&mut rng, length)))
        .collect()
}

/// Generate a family of related sequences: a random reference
/// `<prefix>_0` plus `count - 1` copies carrying point substitutions, each
/// copy sharing `similarity` of its positions with the reference.
///
/// Different seeds give unrelated families.
pub fn generate_family(
    prefix: &str,
    count: usize,
    length: usize,
    similarity: f64,
    seed: u64,
) -> Vec<TestSequence> {
    let mut rng = StdRng::seed_from_u64(seed);
    let reference = random_dna(&mut rng, length);
    let mutations = ((1.0 - similarity) * length as f64) as usize;

    let mut family = vec![TestSequence::new(format!("{}_0", prefix), reference.clone())];

    for i in 1..count {
        let mut seq: Vec<char> = reference.chars().collect();
        let mut mutated = HashSet::new();

        while mutated.len() < mutations.min(length) {
            let pos = rng.gen_range(0..length);
            if mutated.insert(pos) {
                // Pick a different base than the current one
                let current = seq[pos];
                let mut base = BASES[rng.gen_range(0..4)];
                while base == current {
                    base = BASES[rng.gen_range(0..4)];
                }
                seq[pos] = base;
            }
        }

        family.push(TestSequence::new(
            format!("{}_{}", prefix, i),
            seq.into_iter().collect::<String>(),
        ));
    }

    family
}

/// Create a test FASTA file content
pub fn create_test_fasta(sequences: &[TestSequence]) -> String {
    sequences.iter().map(|s| s.to_fasta()).collect()
}

/// The three-record example used throughout the docs: `A` and `B` are
/// identical, `C` shares nothing with them.
pub fn identical_pair_fixture() -> Vec<TestSequence> {
    vec![
        TestSequence::new("A", "ACGTACGTAC"),
        TestSequence::new("B", "ACGTACGTAC"),
        TestSequence::new("C", "TTTTGGGGTT"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_generation() {
        let sequences = generate_sequences(10, 100);
        assert_eq!(sequences.len(), 10);
        assert_eq!(sequences[0].sequence.len(), 100);

        // Should be deterministic
        let sequences2 = generate_sequences(10, 100);
        assert_eq!(sequences[0].sequence, sequences2[0].sequence);
    }

    #[test]
    fn test_family_similarity() {
        let family = generate_family("fam", 5, 100, 0.9, 7);
        assert_eq!(family.len(), 5);
        assert_eq!(family[0].id, "fam_0");

        let reference = &family[0].sequence;
        for seq in &family[1..] {
            let matches = reference
                .chars()
                .zip(seq.sequence.chars())
                .filter(|(a, b)| a == b)
                .count();
            assert_eq!(matches, 90);
        }
    }

    #[test]
    fn test_fasta_generation() {
        let sequences = vec![TestSequence::new("x", "ACGTAC").with_description("first record")];
        let fasta = create_test_fasta(&sequences);
        assert_eq!(fasta, ">x first record\nACGTAC\n");
        assert_eq!(sequences[0].to_fasta_wrapped(4), ">x first record\nACGT\nAC\n");
    }
}
