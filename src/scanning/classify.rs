use crate::scanning::config::Thresholds;
use crate::scanning::metrics::WindowMetrics;

/// A window is telomeric iff its entropy is at most `entropy_threshold` and
/// its motif count is at least `polynuc_threshold`.
///
/// Total over all inputs: a NaN entropy never classifies as telomeric.
#[must_use]
#[inline]
pub fn is_telomeric(
    entropy: f64,
    polynuc_count: u32,
    entropy_threshold: f64,
    polynuc_threshold: u32,
) -> bool {
    entropy <= entropy_threshold && polynuc_count >= polynuc_threshold
}

impl Thresholds {
    /// Classify a measured window
    #[must_use]
    pub fn classify(&self, metrics: &WindowMetrics) -> bool {
        is_telomeric(
            metrics.entropy,
            metrics.polynuc_count,
            self.entropy,
            self.polynuc,
        )
    }
}
