/// A byte range `[start, end)` into the answer text.
///
/// Slicing the answer with a line's span reproduces that line exactly
/// (without its terminating newline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Slices `text` with this span.
    ///
    /// Returns `None` when the span is out of bounds or does not fall on
    /// character boundaries.
    pub fn slice(self, text: &str) -> Option<&str> {
        text.get(self.start..self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_saturates_on_inverted_span() {
        let sp = Span { start: 5, end: 2 };
        assert_eq!(sp.len(), 0);
        assert!(sp.is_empty());
    }

    #[test]
    fn slice_returns_exact_text() {
        let sp = Span { start: 3, end: 6 };
        assert_eq!(sp.slice("1. var"), Some("var"));
    }

    #[test]
    fn slice_out_of_bounds_is_none() {
        let sp = Span { start: 3, end: 60 };
        assert_eq!(sp.slice("1. var"), None);
    }
}
