//! Residue alphabet classification

use serde::{Deserialize, Serialize};

/// Alphabet a sequence is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SequenceType {
    DNA,
    RNA,
    Protein,
    /// No residues to classify
    #[default]
    Unknown,
}

const NUCLEOTIDE_RESIDUES: &[u8] = b"ACGTUN";

impl SequenceType {
    /// Classify residues: more than 90% nucleotide symbols means DNA (or RNA
    /// when a `U` is present), anything else is treated as protein.
    pub fn detect(residues: &[u8]) -> Self {
        if residues.is_empty() {
            return Self::Unknown;
        }

        let nucleotide_count = residues
            .iter()
            .filter(|c| NUCLEOTIDE_RESIDUES.contains(&c.to_ascii_uppercase()))
            .count();

        if nucleotide_count as f32 / residues.len() as f32 > 0.9 {
            if residues.iter().any(|c| c.eq_ignore_ascii_case(&b'U')) {
                Self::RNA
            } else {
                Self::DNA
            }
        } else {
            Self::Protein
        }
    }
}

impl std::fmt::Display for SequenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DNA => write!(f, "DNA"),
            Self::RNA => write!(f, "RNA"),
            Self::Protein => write!(f, "Protein"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(SequenceType::detect(b"ACGTACGTNN"), SequenceType::DNA);
        assert_eq!(SequenceType::detect(b"acguacgu"), SequenceType::RNA);
        assert_eq!(SequenceType::detect(b"MKVLAAGIEF"), SequenceType::Protein);
        assert_eq!(SequenceType::detect(b""), SequenceType::Unknown);
    }
}
