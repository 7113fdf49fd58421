//! Scan command - call telomeres in one or more FASTA assemblies.

use std::path::PathBuf;

use clap::Args;

use crate::batch::{collect_fasta_inputs, scan_inputs, FileScan};
use crate::cli::{or_blank, OutputFormat, ScanOptions};
use crate::core::types::TelomereInterval;
use crate::output::{prepare_output_dir, write_results};
use crate::scanning::engine::TelomereScanner;

#[derive(Args)]
pub struct ScanArgs {
    /// FASTA file, or directory of FASTA files (.fa, .fasta, .fna, .fas,
    /// .fsa, optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub options: ScanOptions,

    /// Number of worker threads (default: one per core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Write telom.csv, telom.bed, their merged versions and telom.json to
    /// this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write the per-window table (windows.csv) to the output directory
    #[arg(long, requires = "output_dir")]
    pub raw: bool,

    /// Overwrite result files left by an earlier run
    #[arg(long)]
    pub force: bool,
}

/// Execute the scan command
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be read,
/// or results cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut config = args.options.to_config()?;
    config.retain_windows = args.raw;
    let scanner = TelomereScanner::new(config)?;

    if verbose {
        let config = scanner.config();
        eprintln!(
            "Window {} bp, step {} bp, entropy <= {}, repeats >= {}, motifs {}",
            config.window_size,
            config.step_size,
            config.entropy_threshold,
            config.polynuc_threshold,
            config.motifs.join(","),
        );
    }

    let inputs = collect_fasta_inputs(&args.input)?;
    if verbose {
        eprintln!("Found {} assembly file(s)", inputs.len());
    }

    // Check the output directory before the (possibly long) scan
    if let Some(dir) = &args.output_dir {
        prepare_output_dir(dir, args.force)?;
    }

    let scans = scan_inputs(&scanner, &inputs, args.threads)?;

    match format {
        OutputFormat::Text => print_text(&scans),
        OutputFormat::Json => print_json(&scans)?,
        OutputFormat::Tsv => print_tsv(&scans),
    }

    if let Some(dir) = &args.output_dir {
        write_results(dir, &scans, &scanner.config().motifs, args.raw)?;
        if verbose {
            eprintln!("Results written to {}", dir.display());
        }
    }

    let failed: usize = scans.iter().map(|s| s.failures.len()).sum();
    let scanned: usize = scans.iter().map(|s| s.results.len()).sum();
    if scanned == 0 && failed > 0 {
        anyhow::bail!("All {failed} sequence(s) failed to scan");
    }

    Ok(())
}

fn describe(interval: &TelomereInterval) -> String {
    match interval.span {
        Some(span) => format!("{span} ({} bp)", span.len()),
        None => "-".to_string(),
    }
}

fn print_text(scans: &[FileScan]) {
    for scan in scans {
        let found: usize = scan.results.iter().map(|r| r.terminal_count()).sum();
        println!(
            "\n{} ({}): {} sequence(s), {}/{} ends with a telomere",
            scan.strain,
            scan.path.display(),
            scan.results.len(),
            found,
            scan.results.len() * 2,
        );

        let width = scan.results.iter().map(|r| r.id.len()).max().unwrap_or(0);
        for result in &scan.results {
            println!(
                "   {:<width$}  {:>10} bp   left: {:<22} right: {}",
                result.id,
                result.length,
                describe(&result.left),
                describe(&result.right),
            );
            for span in &result.internal {
                println!("   {:<width$}  internal: {span} ({} bp)", "", span.len());
            }
        }

        for failure in &scan.failures {
            println!("   {}: FAILED ({})", failure.sequence, failure.message);
        }
    }
}

fn print_json(scans: &[FileScan]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(scans)?);
    Ok(())
}

fn print_tsv(scans: &[FileScan]) {
    println!("strain\tchrom\tside\ttype\tstart\tend\tlen\tchrom_size");

    for scan in scans {
        for result in &scan.results {
            for (side, kind, span) in result.calls() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    scan.strain,
                    result.id,
                    side.as_str(),
                    kind.as_str(),
                    or_blank(span.map(|s| s.start)),
                    or_blank(span.map(|s| s.end)),
                    or_blank(span.map(|s| s.len())),
                    result.length,
                );
            }
        }
    }
}
