//! Core data types for telomere detection.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`SequenceRecord`]: A named, uppercase nucleotide sequence (one chromosome or contig)
//! - [`Span`]: A half-open, 0-based base-pair interval
//! - [`TelomereInterval`]: The telomere call for one chromosome end
//! - [`Side`], [`TelomereType`]: Result classification types
//!
//! ## Coordinates
//!
//! All coordinates are 0-based and half-open, the same convention BED files use:
//!
//! | Sequence | Telomere | `start` | `end` | `len` |
//! |----------|----------|---------|-------|-------|
//! | 1000 bp  | first 300 bp | 0 | 300 | 300 |
//! | 1000 bp  | last 120 bp  | 880 | 1000 | 120 |

pub mod sequence;
pub mod types;

pub use sequence::SequenceRecord;
pub use types::{Side, Span, TelomereInterval, TelomereType};
