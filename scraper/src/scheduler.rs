//! Sequential range scheduler
//!
//! Walks `[0, price_limit]` in windows of `page_size` prices. Each dequeued
//! non-partial window first schedules its successor, then is fetched; a
//! truncated window is bisected into two partial halves that go to the back
//! of the queue, an untruncated one contributes its records. The queue is
//! strictly FIFO.

use crate::error::ScrapeError;
use crate::page::Page;
use crate::source::PageSource;
use crate::stats::RunStats;
use crate::window::Window;
use crate::Result;
use chrono::Utc;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, info};

/// Scan parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Records the source returns per request; also the forward window width
    pub page_size: u64,
    /// Inclusive upper bound of the price domain
    pub price_limit: u64,
}

impl SchedulerConfig {
    pub fn new(page_size: u64, price_limit: u64) -> Self {
        Self {
            page_size,
            price_limit,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ScrapeError::InvalidConfig(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Forward window to schedule after `window`, if any.
    ///
    /// Partial windows never advance the scan, and the window covering the
    /// price limit is the last one.
    pub(crate) fn forward(&self, window: &Window) -> Option<Window> {
        if window.partial || window.max_price >= self.price_limit {
            None
        } else {
            Some(window.next(self.page_size))
        }
    }
}

/// What to do with a fetched window
#[derive(Debug)]
pub(crate) enum Resolution<T> {
    /// Complete result set for the window
    Accept(Vec<T>),
    /// Truncated; fetch both halves instead
    Split(Window, Window),
}

/// Accept an untruncated page or bisect a truncated one.
///
/// Items of a truncated page are dropped: they are a strict subset of what
/// the halves will return.
pub(crate) fn resolve<T>(window: Window, page: Page<T>) -> Result<Resolution<T>> {
    if !page.is_truncated() {
        return Ok(Resolution::Accept(page.items));
    }

    match window.split() {
        Some((left, right)) => {
            debug!(
                "Window {} truncated ({} of {}), splitting into {} and {}",
                window,
                page.returned(),
                page.total,
                left,
                right
            );
            Ok(Resolution::Split(left, right))
        }
        None => Err(ScrapeError::UnsplittableWindow {
            price: window.min_price,
            total: page.total,
            returned: page.returned(),
        }),
    }
}

/// Records and diagnostics of a completed run
#[derive(Debug, Clone)]
pub struct ScrapeOutcome<T> {
    pub items: Vec<T>,
    pub stats: RunStats,
}

/// Single-task scheduler: one request in flight at a time.
pub struct RangeScheduler<S> {
    source: S,
    config: SchedulerConfig,
}

impl<S: PageSource> RangeScheduler<S> {
    pub fn new(source: S, config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every record in `[0, price_limit]` exactly once.
    ///
    /// Any fetch failure aborts the run and discards accumulated records.
    pub async fn run(&self) -> Result<ScrapeOutcome<S::Item>> {
        let started = Instant::now();
        let mut stats = RunStats::new(Utc::now());
        let mut queue = VecDeque::from([Window::initial(self.config.page_size)]);
        let mut items = Vec::new();

        info!(
            "Starting scan of [0, {}] with page size {}",
            self.config.price_limit, self.config.page_size
        );

        while let Some(window) = queue.pop_front() {
            let page = self
                .source
                .fetch_page(window.min_price, window.max_price)
                .await
                .map_err(|e| ScrapeError::fetch(window, e))?;
            stats.requests += 1;
            debug!(
                "Fetched {} (partial={}): total={} returned={}",
                window,
                window.partial,
                page.total,
                page.returned()
            );

            match self.config.forward(&window) {
                Some(next) => queue.push_back(next),
                None if !window.partial => {
                    info!("Price limit {} reached at {}", self.config.price_limit, window);
                }
                None => {}
            }

            match resolve(window, page)? {
                Resolution::Split(left, right) => {
                    stats.splits += 1;
                    queue.push_back(left);
                    queue.push_back(right);
                }
                Resolution::Accept(page_items) => items.extend(page_items),
            }
        }

        stats.records = items.len();
        stats.elapsed = started.elapsed();
        info!(
            "Scan complete: {} records, {} requests, {} splits",
            stats.records, stats.requests, stats.splits
        );

        Ok(ScrapeOutcome { items, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_stops_at_limit() {
        let config = SchedulerConfig::new(1000, 100_000);

        let next = config.forward(&Window::new(1001, 2000, false)).unwrap();
        assert_eq!(next, Window::new(2001, 3000, false));
        assert!(config.forward(&Window::new(99_001, 100_000, false)).is_none());
        assert!(config.forward(&Window::new(0, 500, true)).is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = SchedulerConfig::new(0, 10).validate().unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidConfig(_)));
    }

    #[test]
    fn test_resolve_accepts_complete_page() {
        let resolution = resolve(Window::new(0, 10, false), Page::new(2, vec![1, 2])).unwrap();
        assert!(matches!(resolution, Resolution::Accept(items) if items == vec![1, 2]));
    }

    #[test]
    fn test_resolve_splits_truncated_page() {
        let page = Page::new(1500, vec![0u8; 1000]);
        let resolution = resolve(Window::new(0, 1000, false), page).unwrap();

        match resolution {
            Resolution::Split(left, right) => {
                assert_eq!(left, Window::new(0, 500, true));
                assert_eq!(right, Window::new(501, 1000, true));
            }
            Resolution::Accept(_) => panic!("truncated page must not be accepted"),
        }
    }

    #[test]
    fn test_resolve_rejects_truncated_single_price() {
        let err = resolve(Window::new(7, 7, true), Page::new(1001, vec![0u8; 1000])).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::UnsplittableWindow { price: 7, total: 1001, returned: 1000 }
        ));
    }
}
