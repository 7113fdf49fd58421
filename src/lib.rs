//! # telo-scan
//!
//! A library for finding telomeres at the ends of assembled sequences.
//!
//! Telomeres are long tandem arrays of a short motif (`TTAGGG` in vertebrates,
//! `TG1-3` variants in yeasts). Assemblies rarely annotate them, and whether a
//! contig end reaches into its telomere says a lot about how complete the
//! assembly is.
//!
//! `telo-scan` slides a fixed-size window along each sequence and labels a
//! window telomeric when it is both low-complexity and rich in motif copies.
//! Runs of telomeric windows touching a sequence end are that end's telomere.
//!
//! ## Features
//!
//! - **Two-criterion windows**: Shannon entropy ceiling plus motif repeat floor
//! - **Configurable motifs**: any number of motifs, optional reverse complements
//! - **End-only scanning**: restrict the scan to a fixed distance from each end
//! - **Internal calls**: optionally report telomeric stretches away from the ends
//! - **Parallel batches**: whole directories of assemblies on a rayon pool
//! - **Several outputs**: CSV, BED and JSON, plus the per-window table
//!
//! ## Example
//!
//! ```rust
//! use telo_scan::{ScanConfig, SequenceRecord, TelomereScanner};
//!
//! let config = ScanConfig {
//!     window_size: 60,
//!     step_size: 30,
//!     ..ScanConfig::default()
//! };
//! let scanner = TelomereScanner::new(config).unwrap();
//!
//! let mut bases = b"ACGTTGCAAGCTTCGAGATC".repeat(10);
//! bases.extend(b"TTAGGG".repeat(20));
//! let result = scanner.scan(&SequenceRecord::new("chr1", bases)).unwrap();
//!
//! assert!(!result.left.is_present());
//! assert_eq!(result.right.end(), Some(320));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequences, spans and telomere intervals
//! - [`scanning`]: Windows, metrics, classification, merging and the scanner
//! - [`parsing`]: FASTA loading
//! - [`batch`]: Parallel scanning of files and directories
//! - [`output`]: CSV, BED and JSON writers
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Motif validation helpers

pub mod batch;
pub mod cli;
pub mod core;
pub mod output;
pub mod parsing;
pub mod scanning;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::sequence::SequenceRecord;
pub use core::types::*;
pub use scanning::config::{ConfigError, ScanConfig};
pub use scanning::engine::{ScanError, TelomereScanner};
pub use scanning::result::ScanResult;
