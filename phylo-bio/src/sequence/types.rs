use serde::{Deserialize, Serialize};
use std::fmt;

pub use phylo_core::SequenceType;

/// A sequence as read by the loader, before n-gram indexing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub sequence: Vec<u8>,
}

impl Sequence {
    pub fn new(id: String, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description: None,
            sequence,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn detect_type(&self) -> SequenceType {
        SequenceType::detect(&self.sequence)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_construction() {
        let seq = Sequence::new("test_id".to_string(), b"ATGC".to_vec());
        assert_eq!(seq.id, "test_id");
        assert_eq!(seq.sequence, b"ATGC");
        assert!(seq.description.is_none());
        assert_eq!(seq.len(), 4);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_sequence_type_detection() {
        let dna = Sequence::new("dna".to_string(), b"ATGCNNNNATGC".to_vec());
        assert_eq!(dna.detect_type(), SequenceType::DNA);

        let protein = Sequence::new("prot".to_string(), b"ACDEFGHIKLMNPQRSTVWY".to_vec());
        assert_eq!(protein.detect_type(), SequenceType::Protein);

        let empty = Sequence::new("empty".to_string(), Vec::new());
        assert_eq!(empty.detect_type(), SequenceType::Unknown);
        assert_eq!(empty.to_string(), "");
    }
}
