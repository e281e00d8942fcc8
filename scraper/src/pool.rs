//! Bounded worker pool running the range scan concurrently
//!
//! Workers share one FIFO queue. A forward window is scheduled as soon as
//! its predecessor is dequeued, so up to `workers` windows are fetched at
//! once. Bisection halves go to the back of the same queue.
//!
//! Output order differs from the sequential scheduler: resolved windows are
//! sorted by their lower bound before flattening, which yields records in
//! ascending price-window order.

use crate::error::ScrapeError;
use crate::scheduler::{resolve, Resolution, SchedulerConfig, ScrapeOutcome};
use crate::source::PageSource;
use crate::stats::RunStats;
use crate::window::Window;
use crate::Result;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

#[derive(Debug)]
struct WorkQueue {
    pending: VecDeque<Window>,
    in_flight: usize,
    failed: bool,
}

enum Next {
    Fetch(Window),
    Wait,
    Done,
}

/// State shared by all workers of one run
struct RunContext<T> {
    config: SchedulerConfig,
    queue: Mutex<WorkQueue>,
    notify: Notify,
    limit_reached: AtomicBool,
    requests: AtomicU64,
    splits: AtomicU64,
    resolved: Mutex<Vec<(Window, Vec<T>)>>,
}

impl<T> RunContext<T> {
    fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            queue: Mutex::new(WorkQueue {
                pending: VecDeque::from([Window::initial(config.page_size)]),
                in_flight: 0,
                failed: false,
            }),
            notify: Notify::new(),
            limit_reached: AtomicBool::new(false),
            requests: AtomicU64::new(0),
            splits: AtomicU64::new(0),
            resolved: Mutex::new(Vec::new()),
        }
    }

    /// Dequeue the next window and schedule its forward successor.
    async fn next(&self) -> Next {
        let mut queue = self.queue.lock().await;
        if queue.failed {
            return Next::Done;
        }

        let Some(window) = queue.pending.pop_front() else {
            return if queue.in_flight == 0 {
                Next::Done
            } else {
                Next::Wait
            };
        };
        queue.in_flight += 1;

        if !window.partial && window.max_price >= self.config.price_limit {
            if !self.limit_reached.swap(true, Ordering::AcqRel) {
                info!("Price limit {} reached at {}", self.config.price_limit, window);
            }
        } else if !self.limit_reached.load(Ordering::Acquire) {
            if let Some(next) = self.config.forward(&window) {
                queue.pending.push_back(next);
                drop(queue);
                self.notify.notify_waiters();
            }
        }

        Next::Fetch(window)
    }

    /// Record the outcome of one fetched window and wake idle workers.
    async fn complete(&self, window: Window, resolution: Result<Resolution<T>>) -> Result<()> {
        let outcome = match resolution {
            Ok(Resolution::Split(left, right)) => {
                self.splits.fetch_add(1, Ordering::Relaxed);
                let mut queue = self.queue.lock().await;
                queue.pending.push_back(left);
                queue.pending.push_back(right);
                queue.in_flight -= 1;
                Ok(())
            }
            Ok(Resolution::Accept(items)) => {
                self.resolved.lock().await.push((window, items));
                self.queue.lock().await.in_flight -= 1;
                Ok(())
            }
            Err(e) => {
                let mut queue = self.queue.lock().await;
                queue.failed = true;
                queue.in_flight -= 1;
                Err(e)
            }
        };
        self.notify.notify_waiters();
        outcome
    }

    async fn fail(&self) {
        self.queue.lock().await.failed = true;
        self.notify.notify_waiters();
    }
}

/// Range scheduler running on `workers` concurrent tokio tasks.
pub struct ConcurrentScheduler<S> {
    source: Arc<S>,
    config: SchedulerConfig,
    workers: usize,
}

impl<S> ConcurrentScheduler<S>
where
    S: PageSource + 'static,
{
    pub fn new(source: S, config: SchedulerConfig, workers: usize) -> Result<Self> {
        config.validate()?;
        if workers == 0 {
            return Err(ScrapeError::InvalidConfig(
                "worker count must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            source: Arc::new(source),
            config,
            workers,
        })
    }

    /// Fetch every record in `[0, price_limit]` exactly once.
    ///
    /// The first failure stops all workers; records gathered so far are
    /// discarded.
    pub async fn run(&self) -> Result<ScrapeOutcome<S::Item>> {
        let started = Instant::now();
        let mut stats = RunStats::new(Utc::now());
        let ctx = Arc::new(RunContext::new(self.config));

        info!(
            "Starting scan of [0, {}] with page size {} on {} workers",
            self.config.price_limit, self.config.page_size, self.workers
        );

        let mut tasks = JoinSet::new();
        for id in 0..self.workers {
            tasks.spawn(worker(id, self.source.clone(), ctx.clone()));
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) if e.is_cancelled() => continue,
                Err(e) => Err(ScrapeError::from(e)),
            };
            if let Err(e) = result {
                if first_error.is_none() {
                    error!("Aborting scan: {}", e);
                    ctx.fail().await;
                    tasks.abort_all();
                    first_error = Some(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        let mut resolved = std::mem::take(&mut *ctx.resolved.lock().await);
        resolved.sort_by_key(|(window, _)| window.min_price);
        let items: Vec<S::Item> = resolved.into_iter().flat_map(|(_, items)| items).collect();

        stats.requests = ctx.requests.load(Ordering::Relaxed);
        stats.splits = ctx.splits.load(Ordering::Relaxed);
        stats.records = items.len();
        stats.elapsed = started.elapsed();
        info!(
            "Scan complete: {} records, {} requests, {} splits",
            stats.records, stats.requests, stats.splits
        );

        Ok(ScrapeOutcome { items, stats })
    }
}

async fn worker<S: PageSource>(
    id: usize,
    source: Arc<S>,
    ctx: Arc<RunContext<S::Item>>,
) -> Result<()> {
    loop {
        // Registered before inspecting the queue so a wakeup between the
        // check and the await is not lost.
        let notified = ctx.notify.notified();

        let window = match ctx.next().await {
            Next::Fetch(window) => window,
            Next::Wait => {
                notified.await;
                continue;
            }
            Next::Done => {
                debug!("Worker {} finished", id);
                return Ok(());
            }
        };

        let resolution = match source.fetch_page(window.min_price, window.max_price).await {
            Ok(page) => {
                ctx.requests.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Worker {} fetched {} (partial={}): total={} returned={}",
                    id,
                    window,
                    window.partial,
                    page.total,
                    page.returned()
                );
                resolve(window, page)
            }
            Err(e) => Err(ScrapeError::fetch(window, e)),
        };

        ctx.complete(window, resolution).await?;
    }
}
