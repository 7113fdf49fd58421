//! Fixed-size, fixed-step windows over a sequence.
//!
//! Windows never run past the end of their region: a trailing stretch shorter
//! than the window size is dropped rather than padded.

use std::iter::FusedIterator;
use std::ops::Range;

/// A window of bases and where it starts in the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    /// 0-based offset of the first base
    pub start: usize,
    pub bases: &'a [u8],
}

impl Window<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Exclusive end offset
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.bases.len()
    }
}

/// Lazy iterator over windows, yielded in increasing offset order.
///
/// Cheap to rebuild, so a scan can be repeated by calling
/// [`sliding_windows`] again; `clone` forks at the current position.
#[derive(Debug, Clone)]
pub struct Windows<'a> {
    sequence: &'a [u8],
    size: usize,
    step: usize,
    next: usize,
    end: usize,
}

impl<'a> Windows<'a> {
    fn new(sequence: &'a [u8], region: Range<usize>, size: usize, step: usize) -> Self {
        let end = region.end.min(sequence.len());
        let start = region.start.min(end);
        // Zero sizes yield nothing instead of looping forever
        let next = if size == 0 || step == 0 { end } else { start };
        Self {
            sequence,
            size: size.max(1),
            step: step.max(1),
            next,
            end,
        }
    }

    fn remaining(&self) -> usize {
        match self.next.checked_add(self.size) {
            Some(last_end) if last_end <= self.end => (self.end - last_end) / self.step + 1,
            _ => 0,
        }
    }
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        let start = self.next;
        self.next = self.next.saturating_add(self.step);
        Some(Window {
            start,
            bases: &self.sequence[start..start + self.size],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Windows<'_> {}

impl FusedIterator for Windows<'_> {}

/// Windows at offsets 0, step, 2*step, ... while `offset + size <= len`.
///
/// Produces nothing when the sequence is shorter than `size`, or when `size`
/// or `step` is zero.
#[must_use]
pub fn sliding_windows(sequence: &[u8], size: usize, step: usize) -> Windows<'_> {
    Windows::new(sequence, 0..sequence.len(), size, step)
}

/// Windows confined to `region`, the first one starting at `region.start`.
#[must_use]
pub fn left_anchored_windows(
    sequence: &[u8],
    region: Range<usize>,
    size: usize,
    step: usize,
) -> Windows<'_> {
    Windows::new(sequence, region, size, step)
}

/// Windows confined to `region`, the last one ending exactly at `region.end`.
///
/// Offsets are `region.end - size`, `region.end - size - step`, ... down to
/// `region.start`; they are still yielded in increasing order.
#[must_use]
pub fn right_anchored_windows(
    sequence: &[u8],
    region: Range<usize>,
    size: usize,
    step: usize,
) -> Windows<'_> {
    let end = region.end.min(sequence.len());
    let start = region.start.min(end);
    let span = end - start;
    if size == 0 || step == 0 || span < size {
        return Windows::new(sequence, end..end, size, step);
    }
    let shift = (span - size) % step;
    Windows::new(sequence, start + shift..end, size, step)
}
