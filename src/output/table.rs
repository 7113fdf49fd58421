//! CSV tables of telomere calls and window metrics.

use std::io::Write;

use csv::WriterBuilder;
use serde::Serialize;

use crate::batch::FileScan;
use crate::core::types::{Side, Span, TelomereType};
use crate::output::OutputError;
use crate::scanning::result::ScanResult;

const INTERVAL_HEADER: [&str; 8] = [
    "strain",
    "chrom",
    "side",
    "type",
    "start",
    "end",
    "len",
    "chrom_size",
];

const WINDOW_HEADER: [&str; 13] = [
    "strain",
    "chrom",
    "start",
    "end",
    "entropy",
    "polynuc",
    "dominant_motif",
    "a",
    "c",
    "g",
    "t",
    "ambiguous",
    "telomeric",
];

#[derive(Serialize)]
struct IntervalRow<'a> {
    strain: &'a str,
    chrom: &'a str,
    side: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    start: Option<usize>,
    end: Option<usize>,
    len: Option<usize>,
    chrom_size: usize,
}

#[derive(Serialize)]
struct WindowRow<'a> {
    strain: &'a str,
    chrom: &'a str,
    start: usize,
    end: usize,
    entropy: f64,
    polynuc: u32,
    dominant_motif: Option<&'a str>,
    a: f64,
    c: f64,
    g: f64,
    t: f64,
    ambiguous: usize,
    telomeric: bool,
}

/// Write one row per chromosome end and per internal call.
///
/// Ends without a telomere keep their row with empty `start`, `end` and
/// `len` so every sequence shows up in the table.
///
/// # Errors
///
/// Returns `OutputError::Csv` if a row cannot be written.
pub fn write_intervals_csv<W: Write>(writer: W, scans: &[FileScan]) -> Result<(), OutputError> {
    write_interval_rows(writer, scans, ScanResult::calls)
}

/// Write one row per merged call. Sequences without any call have no row.
///
/// # Errors
///
/// Returns `OutputError::Csv` if a row cannot be written.
pub fn write_merged_csv<W: Write>(writer: W, scans: &[FileScan]) -> Result<(), OutputError> {
    write_interval_rows(writer, scans, |result: &ScanResult| {
        result
            .merged
            .iter()
            .map(|call| (call.side, call.kind, Some(call.span)))
            .collect()
    })
}

fn write_interval_rows<W, F>(writer: W, scans: &[FileScan], calls: F) -> Result<(), OutputError>
where
    W: Write,
    F: Fn(&ScanResult) -> Vec<(Side, TelomereType, Option<Span>)>,
{
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(INTERVAL_HEADER)?;

    for scan in scans {
        for result in &scan.results {
            for (side, kind, span) in calls(result) {
                wtr.serialize(IntervalRow {
                    strain: &scan.strain,
                    chrom: &result.id,
                    side: side.as_str(),
                    kind: kind.as_str(),
                    start: span.map(|s| s.start),
                    end: span.map(|s| s.end),
                    len: span.map(|s| s.len()),
                    chrom_size: result.length,
                })?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write the retained per-window table of every sequence.
///
/// Sequences scanned without window retention contribute no rows.
///
/// # Errors
///
/// Returns `OutputError::Csv` if a row cannot be written.
pub fn write_windows_csv<W: Write>(
    writer: W,
    scans: &[FileScan],
    motifs: &[String],
) -> Result<(), OutputError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(WINDOW_HEADER)?;

    for scan in scans {
        for result in &scan.results {
            for window in result.windows.iter().flatten() {
                let metrics = &window.metrics;
                wtr.serialize(WindowRow {
                    strain: &scan.strain,
                    chrom: &result.id,
                    start: window.start,
                    end: window.end,
                    entropy: metrics.entropy,
                    polynuc: metrics.polynuc_count,
                    dominant_motif: metrics
                        .dominant_motif
                        .and_then(|i| motifs.get(i))
                        .map(String::as_str),
                    a: metrics.composition.a,
                    c: metrics.composition.c,
                    g: metrics.composition.g,
                    t: metrics.composition.t,
                    ambiguous: metrics.composition.ambiguous,
                    telomeric: window.telomeric,
                })?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
