//! Loaders for assembly sequences.
//!
//! - **FASTA files** ([`fasta`]): plain or gzip/bgzip compressed, one
//!   [`SequenceRecord`](crate::core::sequence::SequenceRecord) per record
//!
//! ## Example
//!
//! ```rust,no_run
//! use telo_scan::parsing::fasta::{read_fasta_file, strain_name};
//! use std::path::Path;
//!
//! let path = Path::new("assemblies/S288C.fasta");
//! let records = read_fasta_file(path).unwrap();
//! println!("{}: {} sequences", strain_name(path), records.len());
//! ```
//!
//! Sequences are upper-cased on load; the scanner expects uppercase input.

pub mod fasta;
