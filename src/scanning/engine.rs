use std::ops::Range;

use thiserror::Error;
use tracing::debug;

use crate::core::sequence::SequenceRecord;
use crate::core::types::{Side, TelomereInterval};
use crate::scanning::config::{ConfigError, ScanConfig};
use crate::scanning::merge::{
    consecutive_groups, end_intervals, interior_groups, left_interval, merge_calls,
    right_interval, telomeric_spans, ConsecutiveGroup, LabeledWindow,
};
use crate::scanning::metrics::{MotifSet, WindowMetrics};
use crate::scanning::result::{ScanResult, WindowRecord};
use crate::scanning::window::{
    left_anchored_windows, right_anchored_windows, sliding_windows, Windows,
};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Sequence '{id}' is empty")]
    EmptySequence { id: String },

    #[error("Invalid window at offset {offset}: {reason}")]
    InvalidWindow { offset: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Which parts of a sequence get scanned
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanPlan {
    /// One left-to-right pass over the whole sequence
    Full,
    /// Separate passes over the first and last bases only
    Ends {
        left: Range<usize>,
        right: Range<usize>,
    },
}

impl ScanPlan {
    fn new(seq_len: usize, scan_limit: Option<usize>) -> Self {
        match scan_limit {
            Some(limit) if limit.saturating_mul(2) < seq_len => Self::Ends {
                left: 0..limit,
                right: seq_len - limit..seq_len,
            },
            _ => Self::Full,
        }
    }
}

/// Scans single sequences for terminal telomeres.
///
/// Holds only immutable configuration, so one scanner can be shared across
/// threads and reused for any number of sequences.
#[derive(Debug, Clone)]
pub struct TelomereScanner {
    config: ScanConfig,
    motifs: MotifSet,
}

impl TelomereScanner {
    /// Create a scanner, validating the configuration first
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` reported by [`ScanConfig::validate`].
    pub fn new(config: ScanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let motifs = MotifSet::from_config(&config);
        Ok(Self { config, motifs })
    }

    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan one sequence.
    ///
    /// Sequences shorter than the window size are not an error: both ends are
    /// reported absent.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::EmptySequence` for a zero-length sequence and
    /// `ScanError::InvalidWindow` if a window is rejected by the alphabet
    /// policy.
    pub fn scan(&self, record: &SequenceRecord) -> Result<ScanResult, ScanError> {
        if record.is_empty() {
            return Err(ScanError::EmptySequence {
                id: record.id.clone(),
            });
        }

        let seq = record.as_bytes();
        let len = seq.len();
        let size = self.config.window_size;
        let step = self.config.step_size;

        let mut result = ScanResult::absent(&record.id, len);
        let mut table = self.config.retain_windows.then(Vec::new);

        match ScanPlan::new(len, self.config.scan_limit) {
            ScanPlan::Full => {
                let windows = self.label_windows(sliding_windows(seq, size, step), table.as_mut())?;
                let groups = groups_of(&windows);
                let ends = end_intervals(&windows, &groups, size, len);
                result.left = TelomereInterval::from_span(Side::Left, ends.left);
                result.right = TelomereInterval::from_span(Side::Right, ends.right);

                if self.config.report_internal {
                    result.internal = telomeric_spans(&windows, interior_groups(&groups), size);
                }
            }
            ScanPlan::Ends { left, right } => {
                let left_windows = self.label_windows(
                    left_anchored_windows(seq, left, size, step),
                    table.as_mut(),
                )?;
                let left_groups = groups_of(&left_windows);
                result.left = TelomereInterval::from_span(
                    Side::Left,
                    left_interval(&left_windows, &left_groups, size),
                );

                let right_windows = self.label_windows(
                    right_anchored_windows(seq, right, size, step),
                    table.as_mut(),
                )?;
                let right_groups = groups_of(&right_windows);
                result.right = TelomereInterval::from_span(
                    Side::Right,
                    right_interval(&right_windows, &right_groups, len),
                );

                if self.config.report_internal {
                    // Everything but the group anchored at each end
                    let left_rest = left_groups.get(1..).unwrap_or_default();
                    let right_rest = &right_groups[..right_groups.len().saturating_sub(1)];
                    result.internal = telomeric_spans(&left_windows, left_rest, size);
                    result
                        .internal
                        .extend(telomeric_spans(&right_windows, right_rest, size));
                }
            }
        }

        result.merged = merge_calls(&result.present_calls(), self.config.merge_distance(), len);
        result.windows = table;

        debug!(
            sequence = %record.id,
            length = len,
            left = ?result.left.span,
            right = ?result.right.span,
            merged = result.merged.len(),
            "Sequence scanned"
        );

        Ok(result)
    }

    /// Measure and classify every window, optionally recording the full table
    fn label_windows(
        &self,
        windows: Windows<'_>,
        mut table: Option<&mut Vec<WindowRecord>>,
    ) -> Result<Vec<LabeledWindow>, ScanError> {
        let thresholds = self.config.thresholds();
        let mut labeled = Vec::with_capacity(windows.len());

        for window in windows {
            let metrics = WindowMetrics::calculate(&window, &self.motifs, self.config.alphabet)?;
            let telomeric = thresholds.classify(&metrics);

            if let Some(table) = table.as_mut() {
                table.push(WindowRecord {
                    start: window.start,
                    end: window.end(),
                    metrics,
                    telomeric,
                });
            }
            labeled.push(LabeledWindow {
                start: window.start,
                telomeric,
            });
        }

        Ok(labeled)
    }
}

fn groups_of(windows: &[LabeledWindow]) -> Vec<ConsecutiveGroup> {
    consecutive_groups(windows.iter().map(|w| w.telomeric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Span, TelomereType};
    use crate::scanning::config::MotifCounting;

    fn scanner(config: ScanConfig) -> TelomereScanner {
        TelomereScanner::new(config).unwrap()
    }

    fn small_config() -> ScanConfig {
        ScanConfig {
            window_size: 12,
            step_size: 6,
            entropy_threshold: 1.6,
            polynuc_threshold: 2,
            ..ScanConfig::default()
        }
    }

    /// Non-repetitive, high-entropy filler
    fn filler(len: usize) -> Vec<u8> {
        b"ACGTTGCAAGCTTCGAGATC".iter().copied().cycle().take(len).collect()
    }

    #[test]
    fn test_scan_plan() {
        assert_eq!(ScanPlan::new(1000, None), ScanPlan::Full);
        assert_eq!(ScanPlan::new(1000, Some(500)), ScanPlan::Full);
        assert_eq!(
            ScanPlan::new(1000, Some(200)),
            ScanPlan::Ends {
                left: 0..200,
                right: 800..1000
            }
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ScanConfig {
            motifs: Vec::new(),
            ..ScanConfig::default()
        };
        assert!(matches!(
            TelomereScanner::new(config),
            Err(ConfigError::EmptyMotifList)
        ));
    }

    #[test]
    fn test_empty_sequence_is_error() {
        let result = scanner(small_config()).scan(&SequenceRecord::new("chr1", Vec::new()));
        match result {
            Err(ScanError::EmptySequence { id }) => assert_eq!(id, "chr1"),
            other => panic!("expected EmptySequence, got {other:?}"),
        }
    }

    #[test]
    fn test_short_sequence_absent() {
        let result = scanner(small_config())
            .scan(&SequenceRecord::new("ctg", b"TTAGGGTTAG".to_vec()))
            .unwrap();
        assert_eq!(result, ScanResult::absent("ctg", 10));
    }

    #[test]
    fn test_left_and_right_telomeres() {
        let mut bases = b"CCCTAA".repeat(5);
        bases.extend(filler(60));
        bases.extend(b"TTAGGG".repeat(5));
        let record = SequenceRecord::new("chr1", bases);

        let result = scanner(small_config()).scan(&record).unwrap();
        assert_eq!(result.length, 120);
        let left = result.left.span.unwrap();
        assert_eq!(left.start, 0);
        assert!(left.end >= 30 && left.end <= 42, "left end {}", left.end);
        let right = result.right.span.unwrap();
        assert_eq!(right.end, 120);
        assert!(right.start >= 78 && right.start <= 90, "right start {}", right.start);
        assert!(result.internal.is_empty());
        assert!(result.windows.is_none());
    }

    #[test]
    fn test_internal_reporting() {
        let mut bases = filler(60);
        bases.extend(b"TTAGGG".repeat(6));
        bases.extend(filler(60));
        let record = SequenceRecord::new("chr2", bases);

        let config = ScanConfig {
            report_internal: true,
            ..small_config()
        };
        let result = scanner(config).scan(&record).unwrap();
        assert!(!result.left.is_present());
        assert!(!result.right.is_present());
        assert_eq!(result.internal.len(), 1);
        let span = result.internal[0];
        assert!(span.start >= 54 && span.end <= 102, "internal {span}");
    }

    #[test]
    fn test_retained_windows_match_labels() {
        let bases = b"TTAGGG".repeat(10);
        let config = ScanConfig {
            retain_windows: true,
            ..small_config()
        };
        let result = scanner(config).scan(&SequenceRecord::new("t", bases)).unwrap();
        let table = result.windows.unwrap();
        assert_eq!(table.len(), 9);
        assert!(table.iter().all(|w| w.telomeric));
        assert!(table.windows(2).all(|p| p[0].start < p[1].start));
        assert_eq!(table[8].end, 60);
    }

    #[test]
    fn test_scan_limit_uses_end_regions() {
        let mut bases = b"CCCTAA".repeat(5);
        bases.extend(filler(200));
        bases.extend(b"TTAGGG".repeat(6));
        let len = bases.len();
        let record = SequenceRecord::new("chr3", bases);

        let config = ScanConfig {
            scan_limit: Some(60),
            retain_windows: true,
            ..small_config()
        };
        let result = scanner(config).scan(&record).unwrap();
        assert!(result.left.is_present());
        assert_eq!(result.right.end(), Some(len));
        let table = result.windows.unwrap();
        // 9 windows in each 60 bp region
        assert_eq!(table.len(), 18);
        assert!(table.iter().all(|w| w.end <= 60 || w.start >= len - 60));
        assert_eq!(table.last().unwrap().end, len);
    }

    #[test]
    fn test_whole_sequence_telomeric() {
        let record = SequenceRecord::new("ctg", b"TTAGGG".repeat(10));
        let result = scanner(small_config()).scan(&record).unwrap();
        assert_eq!(result.left.span, Some(Span::new(0, 60)));
        assert_eq!(result.right.span, Some(Span::new(0, 60)));
    }

    #[test]
    fn test_counting_mode_changes_labels() {
        // Scattered copies: no tandem pair, but several non-overlapping hits
        let bases = b"TTAGGGCATTAGGGCATTAGGGCA".repeat(3);
        let tandem = scanner(ScanConfig {
            window_size: 24,
            step_size: 24,
            entropy_threshold: 2.0,
            polynuc_threshold: 2,
            ..ScanConfig::default()
        });
        let result = tandem.scan(&SequenceRecord::new("s", bases.clone())).unwrap();
        assert!(!result.left.is_present());

        let spread = scanner(ScanConfig {
            counting: MotifCounting::NonOverlapping,
            ..tandem.config().clone()
        });
        let result = spread.scan(&SequenceRecord::new("s", bases)).unwrap();
        assert!(result.left.is_present());
    }

    #[test]
    fn test_scan_limit_reports_internal() {
        let mut bases = filler(30);
        bases.extend(b"TTAGGG".repeat(6));
        bases.extend(filler(400));
        bases.extend(b"TTAGGG".repeat(6));
        bases.extend(filler(30));
        assert_eq!(bases.len(), 532);

        let config = ScanConfig {
            scan_limit: Some(120),
            report_internal: true,
            ..small_config()
        };
        let result = scanner(config)
            .scan(&SequenceRecord::new("chr4", bases))
            .unwrap();
        assert!(!result.left.is_present());
        assert!(!result.right.is_present());
        // One stretch from the left region, one from the right region
        assert_eq!(result.internal, vec![Span::new(30, 66), Span::new(466, 502)]);
        assert_eq!(result.merged.len(), 2);
        assert!(result.merged.iter().all(|c| c.kind == TelomereType::Internal));
    }

    fn broken_telomere() -> SequenceRecord {
        let mut bases = b"TTAGGG".repeat(100);
        bases.extend(b"ACGTTGCAAGCT");
        bases.extend(b"TTAGGG".repeat(100));
        SequenceRecord::new("chrV", bases)
    }

    #[test]
    fn test_merged_calls_bridge_broken_telomere() {
        let config = ScanConfig {
            report_internal: true,
            ..ScanConfig::default()
        };
        let result = scanner(config).scan(&broken_telomere()).unwrap();

        // The break splits the raw calls
        assert!(result.left.span.unwrap().end < 1212);
        assert!(result.present_calls().len() >= 2);

        assert_eq!(result.merged.len(), 1);
        let merged = result.merged[0];
        assert_eq!(merged.span.start, 0);
        assert!(merged.span.end >= 1200, "merged {}", merged.span);
        assert_eq!(merged.kind, TelomereType::Terminal);
        assert_eq!(merged.side, Side::Left);
    }

    #[test]
    fn test_zero_merge_distance_keeps_calls_split() {
        let config = ScanConfig {
            report_internal: true,
            merge_distance: Some(0),
            ..ScanConfig::default()
        };
        let result = scanner(config).scan(&broken_telomere()).unwrap();
        assert!(result.merged.len() >= 2);
        assert_eq!(result.merged[0].span.start, 0);
        assert_eq!(result.merged[0].kind, TelomereType::Terminal);
    }
}
