//! Price windows

use std::fmt;

/// Inclusive price interval `[min_price, max_price]` fetched as one request.
///
/// `partial` marks windows produced by bisection. Only non-partial windows
/// advance the forward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub min_price: u64,
    pub max_price: u64,
    pub partial: bool,
}

impl Window {
    pub fn new(min_price: u64, max_price: u64, partial: bool) -> Self {
        debug_assert!(min_price <= max_price, "window bounds inverted");
        Self {
            min_price,
            max_price,
            partial,
        }
    }

    /// First window of a scan: `[0, page_size]`
    pub fn initial(page_size: u64) -> Self {
        Self::new(0, page_size, false)
    }

    /// Forward window following this one: `[max + 1, max + page_size]`
    pub fn next(&self, page_size: u64) -> Self {
        let min = self.max_price.saturating_add(1);
        let max = self.max_price.saturating_add(page_size).max(min);
        Self::new(min, max, false)
    }

    /// Split into `[min, mid]` and `[mid + 1, max]` with `mid = floor((min + max) / 2)`.
    ///
    /// Both halves are partial, disjoint, and together cover this window
    /// exactly. A single-point window cannot be split.
    pub fn split(&self) -> Option<(Self, Self)> {
        if self.is_single_point() {
            return None;
        }
        let mid = self.min_price + (self.max_price - self.min_price) / 2;
        Some((
            Self::new(self.min_price, mid, true),
            Self::new(mid + 1, self.max_price, true),
        ))
    }

    /// Number of distinct prices covered
    pub fn width(&self) -> u64 {
        (self.max_price - self.min_price).saturating_add(1)
    }

    pub fn is_single_point(&self) -> bool {
        self.min_price == self.max_price
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min_price, self.max_price)
    }
}
