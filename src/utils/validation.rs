//! Centralized validation and helper functions.

/// Longest motif accepted in a configuration
pub const MAX_MOTIF_LENGTH: usize = 64;

/// Bases that count towards entropy and can appear in motifs
pub const CANONICAL_BASES: [u8; 4] = *b"ACGT";

/// Check whether a byte is one of A, C, G, T (uppercase only)
#[must_use]
#[inline]
pub fn is_canonical_base(base: u8) -> bool {
    CANONICAL_BASES.contains(&base)
}

/// Validate that a string is a usable repeat motif: 1 to
/// [`MAX_MOTIF_LENGTH`] characters, A/C/G/T only, case-insensitive.
///
/// # Examples
///
/// ```
/// use telo_scan::utils::validation::is_valid_motif;
///
/// assert!(is_valid_motif("TTAGGG"));
/// assert!(is_valid_motif("ccctaa"));
/// assert!(!is_valid_motif(""));
/// assert!(!is_valid_motif("TTNGGG"));
/// ```
#[must_use]
pub fn is_valid_motif(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_MOTIF_LENGTH
        && s.bytes().all(|b| is_canonical_base(b.to_ascii_uppercase()))
}

/// Normalize a motif to uppercase.
/// Returns None if the input is not a valid motif.
#[must_use]
pub fn normalize_motif(s: &str) -> Option<String> {
    if is_valid_motif(s) {
        Some(s.to_ascii_uppercase())
    } else {
        None
    }
}

/// Reverse complement of an uppercase nucleotide string.
/// Anything other than A, C, G, T becomes N.
#[must_use]
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|b| match b {
            b'A' => b'T',
            b'T' => b'A',
            b'C' => b'G',
            b'G' => b'C',
            _ => b'N',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_motif() {
        assert!(is_valid_motif("A"));
        assert!(is_valid_motif("TTAGGG"));
        assert!(is_valid_motif("ttaggg"));
        assert!(!is_valid_motif(""));
        assert!(!is_valid_motif("TTAGGN"));
        assert!(!is_valid_motif("TTA GGG"));
        assert!(!is_valid_motif(&"A".repeat(MAX_MOTIF_LENGTH + 1)));
    }

    #[test]
    fn test_normalize_motif() {
        assert_eq!(normalize_motif("ccctaa"), Some("CCCTAA".to_string()));
        assert_eq!(normalize_motif("CCCTAAX"), None);
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"TTAGGG"), b"CCCTAA");
        assert_eq!(reverse_complement(b"ACGTN"), b"NACGT");
        assert!(reverse_complement(b"").is_empty());
    }

    #[test]
    fn test_is_canonical_base() {
        for b in CANONICAL_BASES {
            assert!(is_canonical_base(b));
        }
        assert!(!is_canonical_base(b'N'));
        assert!(!is_canonical_base(b'a'));
    }
}
