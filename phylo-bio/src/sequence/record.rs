//! Validated, n-gram indexed records ready for clustering

use super::types::Sequence;
use crate::ngram::{ngrams, validate_ngram_size, NgramSet};
use phylo_core::{PhyloError, PhyloResult};
use std::collections::btree_map::{BTreeMap, Entry};

/// One input sequence together with its n-gram set
#[derive(Debug, Clone)]
pub struct Record {
    id: String,
    sequence: Vec<u8>,
    ngrams: NgramSet,
}

impl Record {
    pub fn new(id: impl Into<String>, sequence: impl Into<Vec<u8>>, n: usize) -> PhyloResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(PhyloError::invalid_parameter(
                "id",
                "record identifiers must be non-empty",
            ));
        }
        let sequence = sequence.into();
        let ngrams = ngrams(&sequence, n)?;
        Ok(Self {
            id,
            sequence,
            ngrams,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn ngrams(&self) -> &NgramSet {
        &self.ngrams
    }
}

/// Records keyed by identifier.
///
/// Iteration is always in identifier order, which keeps every downstream
/// step independent of input order.
#[derive(Debug, Clone)]
pub struct RecordSet {
    ngram_size: usize,
    records: BTreeMap<String, Record>,
}

impl RecordSet {
    pub fn new(ngram_size: usize) -> PhyloResult<Self> {
        validate_ngram_size(ngram_size)?;
        Ok(Self {
            ngram_size,
            records: BTreeMap::new(),
        })
    }

    /// Build from `(identifier, sequence)` pairs, e.g. a `HashMap<String, String>`.
    pub fn from_pairs<I, K, S>(pairs: I, ngram_size: usize) -> PhyloResult<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: AsRef<[u8]>,
    {
        let mut set = Self::new(ngram_size)?;
        for (id, sequence) in pairs {
            set.insert(id, sequence.as_ref().to_vec())?;
        }
        Ok(set)
    }

    /// Build from loader output
    pub fn from_sequences(sequences: Vec<Sequence>, ngram_size: usize) -> PhyloResult<Self> {
        let mut set = Self::new(ngram_size)?;
        for seq in sequences {
            set.insert(seq.id, seq.sequence)?;
        }
        Ok(set)
    }

    /// Index and add one record. A repeated identifier is rejected rather
    /// than overwriting the earlier record.
    pub fn insert(&mut self, id: impl Into<String>, sequence: Vec<u8>) -> PhyloResult<()> {
        let record = Record::new(id, sequence, self.ngram_size)?;
        match self.records.entry(record.id.clone()) {
            Entry::Occupied(entry) => Err(PhyloError::DuplicateIdentifier(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}
