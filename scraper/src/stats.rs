//! Run diagnostics

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Counters collected during one scrape run
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Time from first request to completion
    pub elapsed: Duration,
    /// Fetch requests issued
    pub requests: u64,
    /// Truncated windows that were bisected
    pub splits: u64,
    /// Records accumulated
    pub records: usize,
}

impl RunStats {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            elapsed: Duration::ZERO,
            requests: 0,
            splits: 0,
            records: 0,
        }
    }

    /// Human-readable status lines
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("took {}ms", self.elapsed.as_millis()),
            format!("Done with {} requests", self.requests),
            format!("{} items scraped", self.records),
        ]
    }
}
