//! Writers for scan results.
//!
//! - **CSV tables** ([`table`]): one row per telomere call, one row per merged
//!   call, and the optional per-window metrics table
//! - **BED** ([`bed`]): present and merged telomere intervals for genome
//!   browsers
//! - **JSON** ([`write_json`]): the full results, tagged by strain
//!
//! [`write_results`] puts all of them in an output directory under fixed
//! file names.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::batch::FileScan;

pub mod bed;
pub mod table;

/// One row per chromosome end and internal call
pub const INTERVALS_FILE: &str = "telom.csv";

/// Present telomere intervals in BED format
pub const BED_FILE: &str = "telom.bed";

/// Full results as JSON
pub const JSON_FILE: &str = "telom.json";

/// Calls after joining nearby intervals
pub const MERGED_INTERVALS_FILE: &str = "telom_merged.csv";

/// Merged calls in BED format
pub const MERGED_BED_FILE: &str = "telom_merged.bed";

/// Per-window metrics, only written on request
pub const WINDOWS_FILE: &str = "windows.csv";

const RESULT_FILES: [&str; 6] = [
    INTERVALS_FILE,
    BED_FILE,
    MERGED_INTERVALS_FILE,
    MERGED_BED_FILE,
    JSON_FILE,
    WINDOWS_FILE,
];

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

/// Create `dir` if needed and make sure no earlier results would be
/// overwritten.
///
/// # Errors
///
/// Returns `OutputError::AlreadyExists` for the first existing result file
/// when `force` is false, or `OutputError::Io` if the directory cannot be
/// created.
pub fn prepare_output_dir(dir: &Path, force: bool) -> Result<(), OutputError> {
    std::fs::create_dir_all(dir)?;
    if force {
        return Ok(());
    }
    match RESULT_FILES.iter().map(|name| dir.join(name)).find(|p| p.exists()) {
        Some(existing) => Err(OutputError::AlreadyExists(existing)),
        None => Ok(()),
    }
}

/// Write every scan as one pretty-printed JSON array
///
/// # Errors
///
/// Returns `OutputError::Json` if serialization or the write fails.
pub fn write_json<W: Write>(writer: W, scans: &[FileScan]) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(writer, scans)?;
    Ok(())
}

/// Write the interval tables, BED files and JSON results into `dir`, plus the
/// window table when `windows` is set.
///
/// `motifs` is the motif list the scan ran with; it names the dominant motif
/// of each window.
///
/// # Errors
///
/// Returns the first `OutputError` raised while creating or writing a file.
pub fn write_results(
    dir: &Path,
    scans: &[FileScan],
    motifs: &[String],
    windows: bool,
) -> Result<(), OutputError> {
    table::write_intervals_csv(create(dir, INTERVALS_FILE)?, scans)?;
    bed::write_bed(create(dir, BED_FILE)?, scans)?;
    table::write_merged_csv(create(dir, MERGED_INTERVALS_FILE)?, scans)?;
    bed::write_merged_bed(create(dir, MERGED_BED_FILE)?, scans)?;

    let mut json = create(dir, JSON_FILE)?;
    write_json(&mut json, scans)?;
    json.flush()?;

    if windows {
        table::write_windows_csv(create(dir, WINDOWS_FILE)?, scans, motifs)?;
    }

    info!(dir = %dir.display(), "Results written");
    Ok(())
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>, OutputError> {
    Ok(BufWriter::new(File::create(dir.join(name))?))
}
