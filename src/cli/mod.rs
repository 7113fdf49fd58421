//! Command-line interface for telo-scan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **scan**: Call telomeres at both ends of every sequence in one or more
//!   assemblies
//! - **windows**: Print the per-window metrics of one assembly for plotting
//!
//! ## Usage
//!
//! ```text
//! # Scan one assembly
//! telo-scan scan S288C.fasta
//!
//! # Scan a directory of assemblies on 8 threads and keep the result files
//! telo-scan scan assemblies/ --threads 8 --output-dir results/
//!
//! # Yeast telomeric repeats, both strands
//! telo-scan scan S288C.fasta --motif TGTGGG --motif TGGGTG --revcomp
//!
//! # Window table for one assembly
//! telo-scan windows S288C.fasta > windows.tsv
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::scanning::config::{AlphabetPolicy, MotifCounting, ScanConfig};

pub mod scan;
pub mod windows;

#[derive(Parser)]
#[command(name = "telo-scan")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Detect telomeric repeats at the ends of assembled sequences")]
#[command(
    long_about = "telo-scan slides a fixed-size window along each sequence of a FASTA assembly.\n\nA window is telomeric when its base composition is simple (low Shannon entropy) and it holds enough tandem copies of a telomeric motif. Runs of telomeric windows touching a sequence end are reported as that end's telomere."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call telomeres in a FASTA file or a directory of FASTA files
    Scan(scan::ScanArgs),

    /// Print per-window metrics for every sequence of a FASTA file
    Windows(windows::WindowsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Scan parameters shared by every command.
///
/// Values given on the command line override those of `--config`, which in
/// turn override the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ScanOptions {
    /// JSON file with scan parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window length in bp (default 100)
    #[arg(short = 'w', long)]
    pub window_size: Option<usize>,

    /// Distance between window starts in bp (default 50)
    #[arg(short = 's', long)]
    pub step_size: Option<usize>,

    /// Maximum Shannon entropy (bits) of a telomeric window (default 1.6)
    #[arg(short = 'e', long)]
    pub entropy_threshold: Option<f64>,

    /// Minimum motif repeat count of a telomeric window (default 3)
    #[arg(short = 'p', long)]
    pub polynuc_threshold: Option<u32>,

    /// Telomeric motif; repeat to give several, in priority order
    /// (default TTAGGG and CCCTAA)
    #[arg(short = 'm', long = "motif")]
    pub motifs: Vec<String>,

    /// Add the reverse complement of every motif
    #[arg(long)]
    pub revcomp: bool,

    /// How motif copies are counted in a window
    #[arg(long, value_enum)]
    pub counting: Option<MotifCounting>,

    /// Fail on symbols other than A, C, G, T and N
    #[arg(long)]
    pub strict_alphabet: bool,

    /// Only scan this many bp at each sequence end
    #[arg(long)]
    pub scan_limit: Option<usize>,

    /// Also report telomeric stretches away from the sequence ends
    #[arg(long)]
    pub internal: bool,

    /// Join calls at most this many bp apart in the merged output
    /// (default: the window size)
    #[arg(long)]
    pub merge_distance: Option<usize>,
}

impl ScanOptions {
    /// Build the scan configuration. Validation is left to the scanner.
    ///
    /// # Errors
    ///
    /// Returns an error if the `--config` file cannot be read or parsed.
    pub fn to_config(&self) -> anyhow::Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ScanConfig::default(),
        };

        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
        }
        if let Some(step_size) = self.step_size {
            config.step_size = step_size;
        }
        if let Some(entropy) = self.entropy_threshold {
            config.entropy_threshold = entropy;
        }
        if let Some(polynuc) = self.polynuc_threshold {
            config.polynuc_threshold = polynuc;
        }
        if !self.motifs.is_empty() {
            config.motifs.clone_from(&self.motifs);
        }
        if let Some(counting) = self.counting {
            config.counting = counting;
        }
        if self.strict_alphabet {
            config.alphabet = AlphabetPolicy::Strict;
        }
        if self.scan_limit.is_some() {
            config.scan_limit = self.scan_limit;
        }
        if self.internal {
            config.report_internal = true;
        }
        if self.merge_distance.is_some() {
            config.merge_distance = self.merge_distance;
        }

        if self.revcomp {
            config = config.with_reverse_complements();
        }
        Ok(config)
    }
}

/// Empty string for a missing value, as in the CSV and TSV tables
pub(crate) fn or_blank(value: Option<usize>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_flags() {
        let config = ScanOptions::default().to_config().unwrap();
        assert_eq!(config, ScanConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, r#"{{"window_size": 200, "step_size": 100, "motifs": ["TGTGGG"]}}"#).unwrap();
        file.flush().unwrap();

        let options = ScanOptions {
            config: Some(file.path().to_path_buf()),
            step_size: Some(20),
            internal: true,
            merge_distance: Some(30),
            ..ScanOptions::default()
        };
        let config = options.to_config().unwrap();
        assert_eq!(config.window_size, 200);
        assert_eq!(config.step_size, 20);
        assert_eq!(config.motifs, vec!["TGTGGG"]);
        assert!(config.report_internal);
        assert_eq!(config.merge_distance(), 30);
    }

    #[test]
    fn test_motifs_with_revcomp() {
        let options = ScanOptions {
            motifs: vec!["tgtggg".to_string()],
            revcomp: true,
            strict_alphabet: true,
            ..ScanOptions::default()
        };
        let config = options.to_config().unwrap();
        assert_eq!(config.motifs, vec!["TGTGGG", "CCCACA"]);
        assert_eq!(config.alphabet, AlphabetPolicy::Strict);
    }

    #[test]
    fn test_missing_config_file() {
        let options = ScanOptions {
            config: Some(PathBuf::from("/nonexistent/telo.json")),
            ..ScanOptions::default()
        };
        assert!(options.to_config().is_err());
    }

    #[test]
    fn test_cli_parses_scan_command() {
        let cli = Cli::try_parse_from([
            "telo-scan",
            "scan",
            "genome.fa",
            "--motif",
            "TTAGGG",
            "--motif",
            "TTGGGG",
            "--counting",
            "non-overlapping",
            "--threads",
            "4",
            "--merge-distance",
            "20",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.options.motifs, vec!["TTAGGG", "TTGGGG"]);
                assert_eq!(args.options.counting, Some(MotifCounting::NonOverlapping));
                assert_eq!(args.threads, Some(4));
                assert_eq!(args.options.merge_distance, Some(20));
            }
            Commands::Windows(_) => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_or_blank() {
        assert_eq!(or_blank(Some(12)), "12");
        assert_eq!(or_blank(None), "");
    }
}
