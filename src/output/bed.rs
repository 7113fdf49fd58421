//! BED output for telomere calls.
//!
//! Four tab-separated columns, no header: `chrom start end label`, with
//! 0-based half-open coordinates. The label joins the side and the call type,
//! e.g. `left_term` or `right_intern`. Merged calls use the same layout.

use std::io::Write;

use csv::WriterBuilder;

use crate::batch::FileScan;
use crate::core::types::{Side, Span, TelomereType};
use crate::output::OutputError;
use crate::scanning::result::ScanResult;

#[must_use]
pub fn bed_label(side: Side, kind: TelomereType) -> String {
    format!("{}_{}", side.as_str(), kind.as_str())
}

/// Write every present telomere interval as a BED record
///
/// # Errors
///
/// Returns `OutputError::Csv` if a record cannot be written.
pub fn write_bed<W: Write>(writer: W, scans: &[FileScan]) -> Result<(), OutputError> {
    write_records(writer, scans, ScanResult::present_calls)
}

/// Write every merged call as a BED record
///
/// # Errors
///
/// Returns `OutputError::Csv` if a record cannot be written.
pub fn write_merged_bed<W: Write>(writer: W, scans: &[FileScan]) -> Result<(), OutputError> {
    write_records(writer, scans, |result: &ScanResult| {
        result
            .merged
            .iter()
            .map(|call| (call.side, call.kind, call.span))
            .collect()
    })
}

fn write_records<W, F>(writer: W, scans: &[FileScan], calls: F) -> Result<(), OutputError>
where
    W: Write,
    F: Fn(&ScanResult) -> Vec<(Side, TelomereType, Span)>,
{
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    for scan in scans {
        for result in &scan.results {
            for (side, kind, span) in calls(result) {
                wtr.serialize((&result.id, span.start, span.end, bed_label(side, kind)))?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
