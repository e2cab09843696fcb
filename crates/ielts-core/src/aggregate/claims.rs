use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

/// Why a candidate lost to an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    Number(u32),
    Span(Range<usize>),
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Number(n) => write!(f, "question {} already claimed", n),
            Conflict::Span(r) => write!(f, "text {}..{} already claimed", r.start, r.end),
        }
    }
}

/// Question numbers and text spans owned by accepted candidates.
///
/// Accepted spans never overlap, so they stay sorted by both start and end.
#[derive(Debug, Default, Clone)]
pub struct ClaimRegistry {
    numbers: BTreeSet<u32>,
    spans: Vec<Range<usize>>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first conflict with what is already claimed, if any.
    pub fn conflict(
        &self,
        numbers: &BTreeSet<u32>,
        span: Option<&Range<usize>>,
    ) -> Option<Conflict> {
        if let Some(n) = numbers.intersection(&self.numbers).next() {
            return Some(Conflict::Number(*n));
        }
        let span = span?;
        if span.is_empty() {
            return None;
        }
        let idx = self.spans.partition_point(|r| r.end <= span.start);
        self.spans
            .get(idx)
            .filter(|r| r.start < span.end)
            .map(|r| Conflict::Span(r.clone()))
    }

    /// Record a claim. Callers check [`ClaimRegistry::conflict`] first.
    pub fn claim(&mut self, numbers: &BTreeSet<u32>, span: Option<&Range<usize>>) {
        self.numbers.extend(numbers.iter().copied());
        if let Some(span) = span.filter(|s| !s.is_empty()) {
            let idx = self.spans.partition_point(|r| r.start < span.start);
            self.spans.insert(idx, span.clone());
        }
    }

    pub fn numbers(&self) -> &BTreeSet<u32> {
        &self.numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(numbers: &[u32]) -> BTreeSet<u32> {
        numbers.iter().copied().collect()
    }

    #[test]
    fn test_number_conflict() {
        let mut claims = ClaimRegistry::new();
        claims.claim(&set(&[1, 2, 3]), None);
        assert_eq!(claims.conflict(&set(&[3, 4]), None), Some(Conflict::Number(3)));
        assert_eq!(claims.conflict(&set(&[4, 5]), None), None);
    }

    #[test]
    fn test_half_open_overlap() {
        let mut claims = ClaimRegistry::new();
        claims.claim(&set(&[]), Some(&(10..20)));
        claims.claim(&set(&[]), Some(&(30..40)));

        assert_eq!(claims.conflict(&set(&[]), Some(&(20..30))), None);
        assert_eq!(claims.conflict(&set(&[]), Some(&(0..10))), None);
        assert_eq!(claims.conflict(&set(&[]), Some(&(40..50))), None);
        assert_eq!(
            claims.conflict(&set(&[]), Some(&(19..21))),
            Some(Conflict::Span(10..20))
        );
        assert_eq!(
            claims.conflict(&set(&[]), Some(&(25..35))),
            Some(Conflict::Span(30..40))
        );
        assert_eq!(
            claims.conflict(&set(&[]), Some(&(0..100))),
            Some(Conflict::Span(10..20))
        );
    }

    #[test]
    fn test_empty_span_never_conflicts() {
        let mut claims = ClaimRegistry::new();
        claims.claim(&set(&[]), Some(&(5..5)));
        claims.claim(&set(&[]), Some(&(0..10)));
        assert_eq!(claims.conflict(&set(&[]), Some(&(5..5))), None);
        assert_eq!(claims.conflict(&set(&[]), Some(&(2..3))), Some(Conflict::Span(0..10)));
    }
}
