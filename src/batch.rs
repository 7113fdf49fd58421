//! Scanning whole assemblies and directories of assemblies.
//!
//! Each sequence is an independent scan, so sequences of a file are scanned in
//! parallel on a rayon pool. Files are processed one after another; results
//! keep the input order and are tagged with the strain they came from.
//!
//! A sequence that fails to scan (for example an empty record) is logged and
//! recorded as a [`SequenceFailure`]; it never stops the rest of the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::parsing::fasta::{is_fasta_file, read_fasta_file, strain_name, ParseError};
use crate::scanning::engine::TelomereScanner;
use crate::scanning::result::ScanResult;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to read {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No FASTA files found in {0}")]
    NoInputs(PathBuf),

    #[error("Failed to initialize thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A sequence whose scan returned an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceFailure {
    pub strain: String,
    pub sequence: String,
    pub message: String,
}

/// All results for one assembly file
#[derive(Debug, Clone, Serialize)]
pub struct FileScan {
    pub strain: String,
    pub path: PathBuf,
    pub results: Vec<ScanResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<SequenceFailure>,
}

/// Expand an input path into the FASTA files to scan.
///
/// A file is returned as-is. A directory yields every FASTA file directly
/// inside it, sorted by path.
///
/// # Errors
///
/// Returns `BatchError::Io` if the path cannot be read and
/// `BatchError::NoInputs` if a directory holds no FASTA file.
pub fn collect_fasta_inputs(path: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_file() && is_fasta_file(&entry_path) {
            inputs.push(entry_path);
        }
    }

    if inputs.is_empty() {
        return Err(BatchError::NoInputs(path.to_path_buf()));
    }

    inputs.sort();
    Ok(inputs)
}

/// Scan every sequence of one FASTA file on the current rayon pool
///
/// # Errors
///
/// Returns `BatchError::Parse` if the file cannot be loaded. Per-sequence
/// errors are reported in [`FileScan::failures`].
pub fn scan_file(scanner: &TelomereScanner, path: &Path) -> Result<FileScan, BatchError> {
    let strain = strain_name(path);
    info!(strain = %strain, path = %path.display(), "Scanning assembly");

    let records = read_fasta_file(path).map_err(|source| BatchError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let outcomes: Vec<_> = records
        .par_iter()
        .map(|record| (record.id.as_str(), scanner.scan(record)))
        .collect();

    let mut results = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                debug!(strain = %strain, sequence = %id, "Sequence done");
                results.push(result);
            }
            Err(e) => {
                warn!(strain = %strain, sequence = %id, error = %e, "Skipping sequence");
                failures.push(SequenceFailure {
                    strain: strain.clone(),
                    sequence: id.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        strain = %strain,
        sequences = results.len(),
        failed = failures.len(),
        "Assembly done"
    );

    Ok(FileScan {
        strain,
        path: path.to_path_buf(),
        results,
        failures,
    })
}

/// Scan a list of FASTA files on a dedicated pool of `threads` workers
/// (`None` lets rayon pick one per core).
///
/// # Errors
///
/// Returns `BatchError::ThreadPool` if the pool cannot be built, or the
/// first file-level `BatchError`.
pub fn scan_inputs(
    scanner: &TelomereScanner,
    inputs: &[PathBuf],
    threads: Option<usize>,
) -> Result<Vec<FileScan>, BatchError> {
    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("telo-scan-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder.build()?;
    debug!(threads = pool.current_num_threads(), "Thread pool ready");

    pool.install(|| {
        inputs
            .iter()
            .map(|path| scan_file(scanner, path))
            .collect()
    })
}
