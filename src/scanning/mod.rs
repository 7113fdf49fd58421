//! Sliding-window telomere scanning.
//!
//! A scan runs in four steps over one sequence:
//!
//! 1. **Windows** ([`window`]): fixed-size windows at a fixed step, trailing
//!    partial windows dropped
//! 2. **Metrics** ([`metrics`]): Shannon entropy, motif repeat count and base
//!    composition per window
//! 3. **Classification** ([`classify`]): a window is telomeric when its entropy
//!    is low enough and its motif count high enough
//! 4. **Merging** ([`merge`]): consecutive windows with the same label are
//!    grouped, and the groups touching each sequence end become the telomere
//!    calls
//!
//! [`engine::TelomereScanner`] drives the steps and returns a
//! [`result::ScanResult`].
//!
//! ## Example
//!
//! ```rust
//! use telo_scan::{ScanConfig, SequenceRecord, TelomereScanner};
//!
//! let scanner = TelomereScanner::new(ScanConfig::default()).unwrap();
//!
//! let mut bases = b"CCCTAA".repeat(50);
//! bases.extend(b"ACGTTGCAAGCTTCGAGATC".repeat(50));
//! let record = SequenceRecord::new("chr1", bases);
//!
//! let result = scanner.scan(&record).unwrap();
//! assert!(result.left.is_present());
//! assert!(!result.right.is_present());
//! ```

pub mod classify;
pub mod config;
pub mod engine;
pub mod merge;
pub mod metrics;
pub mod result;
pub mod window;
