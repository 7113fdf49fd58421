use serde::{Deserialize, Serialize};

use crate::scanning::config::{AlphabetPolicy, MotifCounting, ScanConfig};
use crate::scanning::engine::ScanError;
use crate::scanning::window::Window;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Per-base counts for one window. Index 0..4 is A, C, G, T.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCounts {
    pub canonical: [usize; 4],
    /// N and any other symbol
    pub other: usize,
}

impl BaseCounts {
    #[must_use]
    pub fn tally(bases: &[u8]) -> Self {
        let mut counts = Self::default();
        for &b in bases {
            match b {
                b'A' => counts.canonical[0] += 1,
                b'C' => counts.canonical[1] += 1,
                b'G' => counts.canonical[2] += 1,
                b'T' => counts.canonical[3] += 1,
                _ => counts.other += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn canonical_total(&self) -> usize {
        self.canonical.iter().sum()
    }
}

/// Shannon entropy in bits over the four canonical bases.
///
/// Unrecognized symbols carry no probability mass. A window without any
/// canonical base has entropy 0.
#[must_use]
pub fn shannon_entropy(counts: &BaseCounts) -> f64 {
    let total = counts.canonical_total();
    if total == 0 {
        return 0.0;
    }
    let total = count_to_f64(total);
    counts
        .canonical
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = count_to_f64(c) / total;
            -p * p.log2()
        })
        .sum()
}

/// Base proportions over recognized bases (A + C + G + T = 1.0)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseComposition {
    pub a: f64,
    pub c: f64,
    pub g: f64,
    pub t: f64,
    /// Number of N/unknown symbols in the window
    pub ambiguous: usize,
}

impl BaseComposition {
    #[must_use]
    pub fn from_counts(counts: &BaseCounts) -> Self {
        let total = counts.canonical_total();
        let fraction = |n: usize| {
            if total == 0 {
                0.0
            } else {
                count_to_f64(n) / count_to_f64(total)
            }
        };
        Self {
            a: fraction(counts.canonical[0]),
            c: fraction(counts.canonical[1]),
            g: fraction(counts.canonical[2]),
            t: fraction(counts.canonical[3]),
            ambiguous: counts.other,
        }
    }
}

/// Longest run of back-to-back copies of `motif` in `bases`.
///
/// `TTAGGGTTAGGGxTTAGGG` gives 2.
#[must_use]
pub fn longest_tandem_run(bases: &[u8], motif: &[u8]) -> u32 {
    let k = motif.len();
    if k == 0 || bases.len() < k {
        return 0;
    }
    let starts = bases.len() - k + 1;
    // runs[i] = copies chained from position i
    let mut runs = vec![0u32; starts];
    let mut best = 0;
    for i in (0..starts).rev() {
        if &bases[i..i + k] == motif {
            let chained = runs.get(i + k).copied().unwrap_or(0);
            runs[i] = chained + 1;
            best = best.max(runs[i]);
        }
    }
    best
}

/// Number of non-overlapping copies of `motif`, scanning left to right.
#[must_use]
pub fn non_overlapping_count(bases: &[u8], motif: &[u8]) -> u32 {
    let k = motif.len();
    if k == 0 {
        return 0;
    }
    let mut count = 0;
    let mut i = 0;
    while i + k <= bases.len() {
        if &bases[i..i + k] == motif {
            count += 1;
            i += k;
        } else {
            i += 1;
        }
    }
    count
}

/// Ordered set of uppercase repeat motifs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifSet {
    motifs: Vec<Vec<u8>>,
    counting: MotifCounting,
}

impl MotifSet {
    #[must_use]
    pub fn new(motifs: Vec<Vec<u8>>, counting: MotifCounting) -> Self {
        Self { motifs, counting }
    }

    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.motif_bytes(), config.counting)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.motifs.get(index).map(Vec::as_slice)
    }

    fn count(&self, bases: &[u8], motif: &[u8]) -> u32 {
        match self.counting {
            MotifCounting::Tandem => longest_tandem_run(bases, motif),
            MotifCounting::NonOverlapping => non_overlapping_count(bases, motif),
        }
    }

    /// Highest count over all motifs and the index of the motif that reached
    /// it. Ties go to the motif listed first; a zero count has no dominant
    /// motif.
    #[must_use]
    pub fn best_count(&self, bases: &[u8]) -> (u32, Option<usize>) {
        let mut best = (0, None);
        for (index, motif) in self.motifs.iter().enumerate() {
            let count = self.count(bases, motif);
            // Strictly greater keeps the earlier motif on ties
            if count > best.0 {
                best = (count, Some(index));
            }
        }
        best
    }
}

/// Everything measured on one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowMetrics {
    /// Shannon entropy in bits
    pub entropy: f64,
    /// Highest motif count across the configured motifs
    pub polynuc_count: u32,
    /// Index into the configured motif list of the motif behind `polynuc_count`
    pub dominant_motif: Option<usize>,
    pub composition: BaseComposition,
}

impl WindowMetrics {
    /// Measure one window
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidWindow` if the window is empty, or under
    /// [`AlphabetPolicy::Strict`] if it holds a symbol other than A, C, G, T, N.
    pub fn calculate(
        window: &Window<'_>,
        motifs: &MotifSet,
        alphabet: AlphabetPolicy,
    ) -> Result<Self, ScanError> {
        if window.is_empty() {
            return Err(ScanError::InvalidWindow {
                offset: window.start,
                reason: "empty window".to_string(),
            });
        }
        if alphabet == AlphabetPolicy::Strict {
            if let Some(pos) = window
                .bases
                .iter()
                .position(|b| !matches!(b, b'A' | b'C' | b'G' | b'T' | b'N'))
            {
                return Err(ScanError::InvalidWindow {
                    offset: window.start,
                    reason: format!(
                        "unexpected symbol '{}' at position {}",
                        char::from(window.bases[pos]).escape_default(),
                        window.start + pos
                    ),
                });
            }
        }

        let counts = BaseCounts::tally(window.bases);
        let (polynuc_count, dominant_motif) = motifs.best_count(window.bases);

        Ok(Self {
            entropy: shannon_entropy(&counts),
            polynuc_count,
            dominant_motif,
            composition: BaseComposition::from_counts(&counts),
        })
    }
}
