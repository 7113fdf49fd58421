//! Windows command - dump the per-window metrics of one assembly.
//!
//! The table has one row per window with its entropy, motif count and label,
//! which is what is needed to plot a telomere profile along a sequence.

use std::path::PathBuf;

use clap::Args;

use crate::batch::{scan_file, FileScan};
use crate::cli::{OutputFormat, ScanOptions};
use crate::scanning::engine::TelomereScanner;

#[derive(Args)]
pub struct WindowsArgs {
    /// FASTA file (optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub options: ScanOptions,
}

/// Execute the windows command
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the input cannot be
/// read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: WindowsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut config = args.options.to_config()?;
    config.retain_windows = true;
    let scanner = TelomereScanner::new(config)?;

    let scan = scan_file(&scanner, &args.input)?;
    if verbose {
        eprintln!(
            "{}: {} sequence(s), {} failed",
            scan.strain,
            scan.results.len(),
            scan.failures.len()
        );
    }

    match format {
        OutputFormat::Json => print_json(&scan)?,
        // Text and TSV are the same table
        OutputFormat::Text | OutputFormat::Tsv => print_tsv(&scan, &scanner.config().motifs),
    }

    Ok(())
}

fn print_json(scan: &FileScan) -> anyhow::Result<()> {
    let sequences: Vec<_> = scan
        .results
        .iter()
        .map(|result| {
            serde_json::json!({
                "chrom": result.id,
                "length": result.length,
                "windows": result.windows.as_deref().unwrap_or_default(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "strain": scan.strain,
        "sequences": sequences,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(scan: &FileScan, motifs: &[String]) {
    println!("chrom\tstart\tend\tentropy\tpolynuc\tdominant_motif\ttelomeric");

    for result in &scan.results {
        for window in result.windows.iter().flatten() {
            let metrics = &window.metrics;
            let motif = metrics
                .dominant_motif
                .and_then(|i| motifs.get(i))
                .map_or("", String::as_str);
            println!(
                "{}\t{}\t{}\t{:.4}\t{}\t{}\t{}",
                result.id,
                window.start,
                window.end,
                metrics.entropy,
                metrics.polynuc_count,
                motif,
                u8::from(window.telomeric),
            );
        }
    }
}
