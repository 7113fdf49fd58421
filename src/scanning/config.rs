use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::utils::validation::{is_valid_motif, normalize_motif, reverse_complement};

/// Default window length in bp
pub const DEFAULT_WINDOW_SIZE: usize = 100;

/// Default distance between consecutive window starts in bp
pub const DEFAULT_STEP_SIZE: usize = 50;

/// Default maximum entropy (bits) for a telomeric window
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 1.6;

/// Default minimum repeat count for a telomeric window
pub const DEFAULT_POLYNUC_THRESHOLD: u32 = 3;

/// Canonical vertebrate telomeric repeat followed by its reverse complement
pub const DEFAULT_MOTIFS: [&str; 2] = ["TTAGGG", "CCCTAA"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Window size must be greater than zero")]
    ZeroWindowSize,

    #[error("Step size must be greater than zero")]
    ZeroStepSize,

    #[error("Motif list is empty")]
    EmptyMotifList,

    #[error("Invalid motif '{0}': motifs must be non-empty and contain only A, C, G, T")]
    InvalidMotif(String),

    #[error("Polynucleotide threshold must be at least 1")]
    ZeroPolynucThreshold,

    #[error("Entropy threshold must be a finite, non-negative number of bits (got {0})")]
    InvalidEntropyThreshold(f64),

    #[error("Scan limit must be greater than zero")]
    ZeroScanLimit,

    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// How motif occurrences inside a window are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MotifCounting {
    /// Longest run of back-to-back copies (TTAGGGTTAGGG... counts 2, 3, ...)
    #[default]
    Tandem,
    /// All non-overlapping copies, found by a greedy left-to-right scan
    NonOverlapping,
}

/// What to do with symbols outside A, C, G, T
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetPolicy {
    /// Unknown symbols match no motif and are left out of the entropy
    #[default]
    Tolerant,
    /// Anything other than A, C, G, T or N makes the window invalid
    Strict,
}

/// Classification thresholds for a single window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Maximum Shannon entropy in bits
    pub entropy: f64,
    /// Minimum motif count
    pub polynuc: u32,
}

/// Configuration for a telomere scan.
///
/// All values are plain inputs to the scanner; [`ScanConfig::default`] is the
/// only place defaults are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Window length in bp
    pub window_size: usize,

    /// Distance between consecutive window starts. Smaller than
    /// `window_size` gives overlapping windows.
    pub step_size: usize,

    /// A window is telomeric only if its entropy is at most this value
    pub entropy_threshold: f64,

    /// A window is telomeric only if its motif count is at least this value
    pub polynuc_threshold: u32,

    /// Candidate repeat motifs, in priority order.
    ///
    /// When two motifs reach the same count in a window, the one listed first
    /// is reported as the window's dominant motif.
    pub motifs: Vec<String>,

    pub counting: MotifCounting,

    pub alphabet: AlphabetPolicy,

    /// Only scan this many bp at each end of a sequence. `None` scans the
    /// whole sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_limit: Option<usize>,

    /// Also report telomeric stretches that do not touch a sequence end
    pub report_internal: bool,

    /// Keep the per-window metrics table in each result
    pub retain_windows: bool,

    /// Largest gap in bp bridged when merging nearby calls. Merged calls
    /// starting or ending this close to a sequence end count as terminal.
    /// `None` uses the window size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_distance: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            step_size: DEFAULT_STEP_SIZE,
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            polynuc_threshold: DEFAULT_POLYNUC_THRESHOLD,
            motifs: DEFAULT_MOTIFS.iter().map(|m| (*m).to_string()).collect(),
            counting: MotifCounting::default(),
            alphabet: AlphabetPolicy::default(),
            scan_limit: None,
            report_internal: false,
            retain_windows: false,
            merge_distance: None,
        }
    }
}

impl ScanConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read or
    /// `ConfigError::ParseError` if it is not a valid configuration.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            entropy: self.entropy_threshold,
            polynuc: self.polynuc_threshold,
        }
    }

    /// Gap bridged by the merge pass, defaulting to one window
    #[must_use]
    pub fn merge_distance(&self) -> usize {
        self.merge_distance.unwrap_or(self.window_size)
    }

    /// Upper-case every motif and append the reverse complement of each motif
    /// that is not already listed. Existing order is kept.
    #[must_use]
    pub fn with_reverse_complements(mut self) -> Self {
        let mut motifs: Vec<String> = Vec::with_capacity(self.motifs.len() * 2);
        for motif in &self.motifs {
            let upper = motif.to_ascii_uppercase();
            if !motifs.contains(&upper) {
                motifs.push(upper);
            }
        }
        let forward = motifs.clone();
        for motif in forward {
            let rc = String::from_utf8_lossy(&reverse_complement(motif.as_bytes())).into_owned();
            if !motifs.contains(&rc) {
                motifs.push(rc);
            }
        }
        self.motifs = motifs;
        self
    }

    /// Check every value before any scanning starts
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.step_size == 0 {
            return Err(ConfigError::ZeroStepSize);
        }
        if self.motifs.is_empty() {
            return Err(ConfigError::EmptyMotifList);
        }
        if let Some(bad) = self.motifs.iter().find(|m| !is_valid_motif(m)) {
            return Err(ConfigError::InvalidMotif(bad.clone()));
        }
        if self.polynuc_threshold == 0 {
            return Err(ConfigError::ZeroPolynucThreshold);
        }
        if !self.entropy_threshold.is_finite() || self.entropy_threshold < 0.0 {
            return Err(ConfigError::InvalidEntropyThreshold(self.entropy_threshold));
        }
        if self.scan_limit == Some(0) {
            return Err(ConfigError::ZeroScanLimit);
        }
        Ok(())
    }

    /// Motifs as uppercase byte strings, in configured order.
    ///
    /// Call after [`ScanConfig::validate`]; invalid motifs are skipped.
    #[must_use]
    pub fn motif_bytes(&self) -> Vec<Vec<u8>> {
        self.motifs
            .iter()
            .filter_map(|m| normalize_motif(m))
            .map(String::into_bytes)
            .collect()
    }
}
