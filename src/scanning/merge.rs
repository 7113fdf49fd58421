//! Grouping of consecutive window labels into telomere intervals.
//!
//! Windows are grouped into maximal runs sharing a label. Only the runs that
//! touch a sequence end become terminal telomeres; the left interval ends at
//! the last window of the first run, the right interval starts at the first
//! window of the last run and extends to the sequence end.

use serde::{Deserialize, Serialize};

use crate::core::types::{Side, Span, TelomereType};

/// Window offset and its label, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledWindow {
    pub start: usize,
    pub telomeric: bool,
}

/// Maximal run of windows with the same label. Indices are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveGroup {
    pub first: usize,
    pub last: usize,
    pub telomeric: bool,
}

impl ConsecutiveGroup {
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.last - self.first + 1
    }

    /// Base-pair span from the first window's start to the last window's end
    #[must_use]
    pub fn span(&self, windows: &[LabeledWindow], window_size: usize) -> Span {
        Span::new(
            windows[self.first].start,
            windows[self.last].start + window_size,
        )
    }
}

/// Run-length grouping of labels in a single pass.
///
/// Adjacent groups always differ in label and together cover every index.
#[must_use]
pub fn consecutive_groups<I>(labels: I) -> Vec<ConsecutiveGroup>
where
    I: IntoIterator<Item = bool>,
{
    let mut groups: Vec<ConsecutiveGroup> = Vec::new();
    for (index, telomeric) in labels.into_iter().enumerate() {
        match groups.last_mut() {
            Some(group) if group.telomeric == telomeric => group.last = index,
            _ => groups.push(ConsecutiveGroup {
                first: index,
                last: index,
                telomeric,
            }),
        }
    }
    groups
}

/// Telomere spans found at the two sequence ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndIntervals {
    pub left: Option<Span>,
    pub right: Option<Span>,
}

/// Left telomere: `[0, end of first group)` when the first group is telomeric
#[must_use]
pub fn left_interval(
    windows: &[LabeledWindow],
    groups: &[ConsecutiveGroup],
    window_size: usize,
) -> Option<Span> {
    let first = groups.first().filter(|g| g.telomeric)?;
    let end = windows[first.last].start + window_size;
    Some(Span::new(0, end))
}

/// Right telomere: `[start of last group, seq_len)` when the last group is
/// telomeric
#[must_use]
pub fn right_interval(
    windows: &[LabeledWindow],
    groups: &[ConsecutiveGroup],
    seq_len: usize,
) -> Option<Span> {
    let last = groups.last().filter(|g| g.telomeric)?;
    Some(Span::new(windows[last.first].start, seq_len))
}

/// Terminal telomeres over a full-length scan.
///
/// A sequence that is telomeric from its first window to its last reports the
/// whole sequence at both ends; the two calls are kept separate because they
/// describe different chromosome ends.
#[must_use]
pub fn end_intervals(
    windows: &[LabeledWindow],
    groups: &[ConsecutiveGroup],
    window_size: usize,
    seq_len: usize,
) -> EndIntervals {
    if let [only] = groups {
        if only.telomeric {
            let whole = Span::new(0, seq_len);
            return EndIntervals {
                left: Some(whole),
                right: Some(whole),
            };
        }
    }
    EndIntervals {
        left: left_interval(windows, groups, window_size),
        right: right_interval(windows, groups, seq_len),
    }
}

/// Spans of every telomeric group in `groups`, in order
#[must_use]
pub fn telomeric_spans(
    windows: &[LabeledWindow],
    groups: &[ConsecutiveGroup],
    window_size: usize,
) -> Vec<Span> {
    groups
        .iter()
        .filter(|g| g.telomeric)
        .map(|g| g.span(windows, window_size))
        .collect()
}

/// Groups strictly between the first and the last, i.e. the ones that can
/// never be terminal
#[must_use]
pub fn interior_groups(groups: &[ConsecutiveGroup]) -> &[ConsecutiveGroup] {
    if groups.len() <= 2 {
        &[]
    } else {
        &groups[1..groups.len() - 1]
    }
}

/// A telomere call after nearby calls of one sequence have been joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedCall {
    pub side: Side,
    #[serde(rename = "type")]
    pub kind: TelomereType,
    #[serde(flatten)]
    pub span: Span,
}

/// Join calls that overlap, touch, or are at most `distance` bp apart.
///
/// Each merged call keeps the side and type of its leftmost member, except
/// that it becomes terminal when any member is terminal or when it starts
/// within `distance` of 0 (left) or ends within `distance` of `seq_len`
/// (right). Output is ordered by start.
#[must_use]
pub fn merge_calls(
    calls: &[(Side, TelomereType, Span)],
    distance: usize,
    seq_len: usize,
) -> Vec<MergedCall> {
    let mut sorted = calls.to_vec();
    sorted.sort_by_key(|&(_, _, span)| (span.start, span.end));

    let mut merged: Vec<MergedCall> = Vec::with_capacity(sorted.len());
    for (side, kind, span) in sorted {
        match merged.last_mut() {
            Some(last) if span.start <= last.span.end.saturating_add(distance) => {
                last.span.end = last.span.end.max(span.end);
                if kind == TelomereType::Terminal && last.kind == TelomereType::Internal {
                    last.side = side;
                    last.kind = kind;
                }
            }
            _ => merged.push(MergedCall { side, kind, span }),
        }
    }

    for call in merged.iter_mut().filter(|c| c.kind == TelomereType::Internal) {
        if call.span.start < distance {
            call.side = Side::Left;
            call.kind = TelomereType::Terminal;
        } else if call.span.end.saturating_add(distance) > seq_len {
            call.side = Side::Right;
            call.kind = TelomereType::Terminal;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(labels: &[bool], step: usize) -> Vec<LabeledWindow> {
        labels
            .iter()
            .enumerate()
            .map(|(i, &telomeric)| LabeledWindow {
                start: i * step,
                telomeric,
            })
            .collect()
    }

    const T: bool = true;
    const F: bool = false;

    #[test]
    fn test_consecutive_groups() {
        let groups = consecutive_groups([T, T, T, F, F, T, T]);
        assert_eq!(
            groups,
            vec![
                ConsecutiveGroup {
                    first: 0,
                    last: 2,
                    telomeric: T
                },
                ConsecutiveGroup {
                    first: 3,
                    last: 4,
                    telomeric: F
                },
                ConsecutiveGroup {
                    first: 5,
                    last: 6,
                    telomeric: T
                },
            ]
        );
        assert_eq!(groups[0].window_count(), 3);
    }

    #[test]
    fn test_groups_alternate_and_cover() {
        let labels = [F, T, T, F, T, F, F, F, T];
        let groups = consecutive_groups(labels);
        assert_eq!(groups.first().unwrap().first, 0);
        assert_eq!(groups.last().unwrap().last, labels.len() - 1);
        for pair in groups.windows(2) {
            assert_ne!(pair[0].telomeric, pair[1].telomeric);
            assert_eq!(pair[0].last + 1, pair[1].first);
        }
    }

    #[test]
    fn test_empty_labels() {
        assert!(consecutive_groups(std::iter::empty()).is_empty());
        let ends = end_intervals(&[], &[], 100, 50);
        assert_eq!(ends, EndIntervals::default());
    }

    #[test]
    fn test_both_ends_middle_ignored() {
        // window 10, step 10, sequence 70
        let windows = labeled(&[T, T, T, F, F, T, T], 10);
        let groups = consecutive_groups(windows.iter().map(|w| w.telomeric));
        let ends = end_intervals(&windows, &groups, 10, 70);
        assert_eq!(ends.left, Some(Span::new(0, 30)));
        assert_eq!(ends.right, Some(Span::new(50, 70)));
    }

    #[test]
    fn test_overlapping_window_coordinates() {
        // window 100, step 50: windows 0..=2 telomeric -> last start 100, end 200
        let windows = labeled(&[T, T, T, F, F, F], 50);
        let groups = consecutive_groups(windows.iter().map(|w| w.telomeric));
        let ends = end_intervals(&windows, &groups, 100, 350);
        assert_eq!(ends.left, Some(Span::new(0, 200)));
        assert_eq!(ends.right, None);
    }

    #[test]
    fn test_right_extends_to_sequence_end() {
        // Last window ends at 90 but the sequence is 95 bp long
        let windows = labeled(&[F, F, T, T], 20);
        let groups = consecutive_groups(windows.iter().map(|w| w.telomeric));
        let ends = end_intervals(&windows, &groups, 30, 95);
        assert_eq!(ends.left, None);
        assert_eq!(ends.right, Some(Span::new(40, 95)));
    }

    #[test]
    fn test_all_telomeric_reports_both_ends() {
        let windows = labeled(&[T, T, T], 10);
        let groups = consecutive_groups(windows.iter().map(|w| w.telomeric));
        let ends = end_intervals(&windows, &groups, 20, 45);
        assert_eq!(ends.left, Some(Span::new(0, 45)));
        assert_eq!(ends.right, Some(Span::new(0, 45)));
    }

    #[test]
    fn test_no_telomere() {
        let windows = labeled(&[F, F, F], 10);
        let groups = consecutive_groups(windows.iter().map(|w| w.telomeric));
        assert_eq!(end_intervals(&windows, &groups, 10, 30), EndIntervals::default());
    }

    #[test]
    fn test_interior_spans() {
        let windows = labeled(&[T, F, T, T, F, T, F], 10);
        let groups = consecutive_groups(windows.iter().map(|w| w.telomeric));
        let spans = telomeric_spans(&windows, interior_groups(&groups), 10);
        assert_eq!(spans, vec![Span::new(20, 40), Span::new(50, 60)]);
        assert!(interior_groups(&groups[..2]).is_empty());
    }

    fn call(
        side: Side,
        kind: TelomereType,
        start: usize,
        end: usize,
    ) -> (Side, TelomereType, Span) {
        (side, kind, Span::new(start, end))
    }

    #[test]
    fn test_merge_bridges_small_gap() {
        let calls = [
            call(Side::Left, TelomereType::Terminal, 0, 600),
            call(Side::Right, TelomereType::Internal, 650, 1200),
        ];
        let merged = merge_calls(&calls, 100, 5000);
        assert_eq!(
            merged,
            vec![MergedCall {
                side: Side::Left,
                kind: TelomereType::Terminal,
                span: Span::new(0, 1200),
            }]
        );
    }

    #[test]
    fn test_merge_keeps_distant_calls_apart() {
        let calls = [
            call(Side::Right, TelomereType::Terminal, 4800, 5000),
            call(Side::Left, TelomereType::Terminal, 0, 300),
            call(Side::Left, TelomereType::Internal, 1000, 1100),
        ];
        let merged = merge_calls(&calls, 20, 5000);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].span, Span::new(0, 300));
        assert_eq!(merged[1].kind, TelomereType::Internal);
        assert_eq!(merged[2].side, Side::Right);
    }

    #[test]
    fn test_merge_adjacent_and_duplicate_spans() {
        // Whole-sequence telomere reported at both ends collapses to one call
        let calls = [
            call(Side::Left, TelomereType::Terminal, 0, 45),
            call(Side::Right, TelomereType::Terminal, 0, 45),
        ];
        let merged = merge_calls(&calls, 0, 45);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].side, Side::Left);

        let calls = [
            call(Side::Left, TelomereType::Internal, 100, 200),
            call(Side::Left, TelomereType::Internal, 200, 300),
        ];
        assert_eq!(merge_calls(&calls, 0, 1000)[0].span, Span::new(100, 300));
    }

    #[test]
    fn test_merge_promotes_calls_near_ends() {
        let calls = [
            call(Side::Left, TelomereType::Internal, 15, 200),
            call(Side::Right, TelomereType::Internal, 700, 990),
        ];
        let merged = merge_calls(&calls, 20, 1000);
        assert_eq!(merged[0].side, Side::Left);
        assert_eq!(merged[0].kind, TelomereType::Terminal);
        assert_eq!(merged[1].side, Side::Right);
        assert_eq!(merged[1].kind, TelomereType::Terminal);

        // Too far from either end to be promoted
        let calls = [call(Side::Left, TelomereType::Internal, 20, 200)];
        assert_eq!(merge_calls(&calls, 20, 1000)[0].kind, TelomereType::Internal);
    }

    #[test]
    fn test_internal_merged_into_right_end() {
        let calls = [
            call(Side::Right, TelomereType::Internal, 700, 850),
            call(Side::Right, TelomereType::Terminal, 870, 1000),
        ];
        let merged = merge_calls(&calls, 20, 1000);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].side, Side::Right);
        assert_eq!(merged[0].kind, TelomereType::Terminal);
        assert_eq!(merged[0].span, Span::new(700, 1000));
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_calls(&[], 20, 1000).is_empty());
    }
}
