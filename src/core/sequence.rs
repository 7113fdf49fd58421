use serde::{Deserialize, Serialize};

/// A single named sequence from an assembly.
///
/// Bases are stored as uppercase ASCII. Normalisation happens in the loader
/// (see [`crate::parsing::fasta`]); the scanner does not case-fold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Sequence name (FASTA header up to the first whitespace)
    pub id: String,

    /// Uppercase bases
    #[serde(skip)]
    pub bases: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, bases: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            bases: bases.into(),
        }
    }

    /// Build a record, upper-casing the bases on the way in.
    pub fn normalized(id: impl Into<String>, bases: &[u8]) -> Self {
        Self::new(id, bases.to_ascii_uppercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }
}
