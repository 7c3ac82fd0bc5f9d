//! Year-range filter values and range reconciliation.

use std::fmt;

use portal_core::Bucket;

/// An inclusive year range, serialized as `"<min>-<max>"`.
///
/// Ranges built with [`YearRange::new`] may be crossed (`low > high`) until
/// passed through [`adjust_value`]; parsed ranges never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    #[must_use]
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Parse `"<min>-<max>"`. Non-numeric or inverted ranges yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (low, high) = value.trim().split_once('-')?;
        let low = low.trim().parse().ok()?;
        let high = high.trim().parse().ok()?;
        (low <= high).then_some(Self { low, high })
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.low <= year && year <= self.high
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Which endpoint the user just changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Low,
    High,
}

/// Reconcile a candidate range with the selectable bounds.
///
/// Both endpoints are clamped into `bounds`. If the edited endpoint crossed
/// the other one, the other one follows it; with no edited endpoint a crossed
/// pair collapses onto the low endpoint. The result always satisfies
/// `bounds.low <= low <= high <= bounds.high`.
#[must_use]
pub fn adjust_value(candidate: YearRange, edited: Option<Endpoint>, bounds: YearRange) -> YearRange {
    let (min, max) = if bounds.low <= bounds.high {
        (bounds.low, bounds.high)
    } else {
        (bounds.high, bounds.low)
    };
    let mut low = candidate.low.clamp(min, max);
    let mut high = candidate.high.clamp(min, max);
    if low > high {
        match edited {
            Some(Endpoint::High) => low = high,
            Some(Endpoint::Low) | None => high = low,
        }
    }
    YearRange { low, high }
}

/// Selectable bounds of a year axis: smallest and largest numeric bucket
/// value. Non-numeric buckets are ignored.
#[must_use]
pub fn bounds_from_buckets(buckets: &[Bucket]) -> Option<YearRange> {
    let mut years = buckets.iter().filter_map(|b| b.value.trim().parse::<i32>().ok());
    let first = years.next()?;
    let (low, high) = years.fold((first, first), |(low, high), y| (low.min(y), high.max(y)));
    Some(YearRange { low, high })
}
