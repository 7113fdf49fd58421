use serde::{Deserialize, Serialize};

use crate::core::types::{Side, Span, TelomereInterval, TelomereType};
use crate::scanning::merge::MergedCall;
use crate::scanning::metrics::WindowMetrics;

/// One row of the per-window table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub start: usize,
    pub end: usize,
    pub metrics: WindowMetrics,
    pub telomeric: bool,
}

/// Outcome of scanning one sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Sequence identifier
    pub id: String,

    /// Sequence length in bp
    pub length: usize,

    pub left: TelomereInterval,

    pub right: TelomereInterval,

    /// Telomeric stretches away from the ends, ordered by start.
    /// Only filled when internal reporting is enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal: Vec<Span>,

    /// Every present call after joining calls separated by small gaps,
    /// ordered by start
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merged: Vec<MergedCall>,

    /// Per-window metrics and labels, in offset order.
    /// Only filled when window retention is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<WindowRecord>>,
}

impl ScanResult {
    /// Result with no telomere at either end
    #[must_use]
    pub fn absent(id: impl Into<String>, length: usize) -> Self {
        Self {
            id: id.into(),
            length,
            left: TelomereInterval::absent(Side::Left),
            right: TelomereInterval::absent(Side::Right),
            internal: Vec::new(),
            merged: Vec::new(),
            windows: None,
        }
    }

    #[must_use]
    pub fn end(&self, side: Side) -> &TelomereInterval {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Number of chromosome ends with a terminal telomere (0, 1 or 2)
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        usize::from(self.left.is_present()) + usize::from(self.right.is_present())
    }

    /// Every call as (side, type, span): both ends first, present or not,
    /// then internal stretches attributed to their nearest end.
    #[must_use]
    pub fn calls(&self) -> Vec<(Side, TelomereType, Option<Span>)> {
        let mut calls = vec![
            (Side::Left, TelomereType::Terminal, self.left.span),
            (Side::Right, TelomereType::Terminal, self.right.span),
        ];
        for span in &self.internal {
            let side = if span.midpoint() < self.length / 2 {
                Side::Left
            } else {
                Side::Right
            };
            calls.push((side, TelomereType::Internal, Some(*span)));
        }
        calls
    }

    /// The calls of [`ScanResult::calls`] that have a span
    #[must_use]
    pub fn present_calls(&self) -> Vec<(Side, TelomereType, Span)> {
        self.calls()
            .into_iter()
            .filter_map(|(side, kind, span)| span.map(|span| (side, kind, span)))
            .collect()
    }
}
