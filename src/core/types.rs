use serde::{Deserialize, Serialize};

/// Chromosome end a telomere call refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Start of the sequence (coordinate 0)
    Left,
    /// End of the sequence (coordinate L)
    Right,
}

impl Side {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a telomeric interval is anchored at a sequence end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelomereType {
    /// Touches a chromosome end
    #[serde(rename = "term")]
    Terminal,
    /// Telomeric repeats away from the ends (e.g. a misassembly or fusion)
    #[serde(rename = "intern")]
    Internal,
}

impl TelomereType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terminal => "term",
            Self::Internal => "intern",
        }
    }
}

impl std::fmt::Display for TelomereType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open, 0-based base-pair interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Midpoint, used to attribute internal telomeres to the nearest end
    #[must_use]
    pub fn midpoint(&self) -> usize {
        self.start + self.len() / 2
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Telomere call for one chromosome end.
///
/// `span` is `None` when no telomere was found at that end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelomereInterval {
    pub side: Side,
    #[serde(flatten)]
    pub span: Option<Span>,
}

impl TelomereInterval {
    #[must_use]
    pub fn absent(side: Side) -> Self {
        Self { side, span: None }
    }

    #[must_use]
    pub fn present(side: Side, span: Span) -> Self {
        Self {
            side,
            span: Some(span),
        }
    }

    #[must_use]
    pub fn from_span(side: Side, span: Option<Span>) -> Self {
        Self { side, span }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.span.is_some()
    }

    #[must_use]
    pub fn start(&self) -> Option<usize> {
        self.span.map(|s| s.start)
    }

    #[must_use]
    pub fn end(&self) -> Option<usize> {
        self.span.map(|s| s.end)
    }

    /// Telomere length in base pairs, `None` when absent
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        self.span.map(|s| s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(880, 1000);
        assert_eq!(span.len(), 120);
        assert!(!span.is_empty());
        assert_eq!(span.midpoint(), 940);
        assert_eq!(span.to_string(), "880-1000");
    }

    #[test]
    fn test_interval_accessors() {
        let absent = TelomereInterval::absent(Side::Left);
        assert!(!absent.is_present());
        assert_eq!(absent.start(), None);
        assert_eq!(absent.length(), None);

        let present = TelomereInterval::present(Side::Right, Span::new(700, 1000));
        assert!(present.is_present());
        assert_eq!(present.start(), Some(700));
        assert_eq!(present.end(), Some(1000));
        assert_eq!(present.length(), Some(300));
    }

    #[test]
    fn test_interval_json_shape() {
        let present = TelomereInterval::present(Side::Left, Span::new(0, 300));
        let json = serde_json::to_value(present).unwrap();
        assert_eq!(json["side"], "left");
        assert_eq!(json["start"], 0);
        assert_eq!(json["end"], 300);

        let absent = serde_json::to_value(TelomereInterval::absent(Side::Right)).unwrap();
        assert_eq!(absent["side"], "right");
        assert!(absent.get("start").is_none());
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(TelomereType::Terminal.to_string(), "term");
        assert_eq!(TelomereType::Internal.as_str(), "intern");
        assert_eq!(Side::Left.as_str(), "left");
        assert_eq!(Side::Right.to_string(), "right");
    }
}
