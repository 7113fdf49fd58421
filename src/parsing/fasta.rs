//! Reader for FASTA assemblies using noodles.
//!
//! Loads every record of a FASTA file as an uppercase [`SequenceRecord`].
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna`, `.fas`, `.fsa` (uncompressed)
//! - any of the above followed by `.gz` or `.bgz` (compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::warn;

use crate::core::sequence::SequenceRecord;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

const FASTA_EXTENSIONS: [&str; 5] = ["fa", "fasta", "fna", "fas", "fsa"];

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_ascii_lowercase();

    // Check for compressed FASTA
    let stripped = path_str
        .strip_suffix(".gz")
        .or_else(|| path_str.strip_suffix(".bgz"));
    if let Some(inner) = stripped {
        return FASTA_EXTENSIONS
            .iter()
            .any(|ext| inner.ends_with(&format!(".{ext}")));
    }

    // Check for uncompressed FASTA
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .is_some_and(|ext| FASTA_EXTENSIONS.contains(&ext.as_str()))
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Strain name for an assembly file: the file name without its FASTA and
/// compression extensions (`data/S288C.fasta.gz` -> `S288C`).
pub fn strain_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lower = name.to_ascii_lowercase();

    let mut cut = name.len();
    if let Some(ext) = [".gz", ".bgz"].iter().find(|ext| lower.ends_with(*ext)) {
        cut -= ext.len();
    }
    let base = &name[..cut];

    match base.rfind('.') {
        Some(dot) if dot > 0 => base[..dot].to_string(),
        _ => base.to_string(),
    }
}

/// Read every sequence in a FASTA file.
///
/// Bases are upper-cased. Records are returned in file order.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, or `ParseError::InvalidFormat` if no sequences are found.
pub fn read_fasta_file(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        let decoder = MultiGzDecoder::new(file);
        read_fasta(BufReader::new(decoder))
    } else {
        read_fasta(BufReader::new(file))
    }
}

/// Read every sequence from any buffered FASTA source
///
/// # Errors
///
/// Returns `ParseError::Noodles` if parsing fails or
/// `ParseError::InvalidFormat` if no sequences are found.
pub fn read_fasta<R: BufRead>(reader: R) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut fasta_reader = fasta::io::Reader::new(reader);
    let mut records = Vec::new();

    for result in fasta_reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        let name = String::from_utf8_lossy(record.name()).to_string();
        let bases: &[u8] = record.sequence().as_ref();

        if bases.is_empty() {
            warn!(sequence = %name, "FASTA record has no bases");
        }

        records.push(SequenceRecord::normalized(name, bases));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}
