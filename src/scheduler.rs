//! Fixed-period fetch-and-render loop.
//!
//! The scheduler fires one cycle immediately and then one per
//! [`REFRESH_PERIOD`]. Each tick spawns its cycle as an independent task
//! and the ticker never waits for it, so a slow fetch can overlap with the
//! cycles that follow it. Whichever render completes last determines what
//! is on screen.
//!
//! ```text
//! tick ──spawn──▶ fetch ──Ok──▶ lock targets ─▶ render ─▶ unlock
//!   │                    └─Err─▶ warn!, display left stale
//!   ▼ (+1000 ms)
//! tick ──spawn──▶ ...
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::render::{render, DisplayTargets};
use crate::source::SnapshotFetcher;

/// Time between cycle triggers.
pub const REFRESH_PERIOD: Duration = Duration::from_millis(1000);

/// Display targets shared between cycles and the UI.
pub type SharedTargets<T> = Arc<Mutex<T>>;

/// Result of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The snapshot was fetched and rendered.
    Rendered,
    /// The fetch failed; nothing was written.
    Skipped,
}

/// Running totals of cycle outcomes.
#[derive(Debug, Default)]
pub struct CycleStats {
    started: AtomicU64,
    rendered: AtomicU64,
    failed: AtomicU64,
}

/// A point-in-time copy of [`CycleStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleCounts {
    pub started: u64,
    pub rendered: u64,
    pub failed: u64,
}

impl CycleCounts {
    /// Cycles whose fetch has not completed yet.
    pub fn in_flight(&self) -> u64 {
        self.started.saturating_sub(self.rendered + self.failed)
    }
}

impl CycleStats {
    pub fn counts(&self) -> CycleCounts {
        CycleCounts {
            started: self.started.load(Ordering::Relaxed),
            rendered: self.rendered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Run one fetch-then-render cycle.
///
/// The fetch is the only suspension point. On success the targets are
/// locked once for the whole render, so a render never interleaves with
/// another. On failure the error is logged and the targets are untouched.
pub async fn run_cycle<T>(
    fetcher: &dyn SnapshotFetcher,
    targets: &Mutex<T>,
    stats: &CycleStats,
) -> CycleOutcome
where
    T: DisplayTargets + ?Sized,
{
    stats.started.fetch_add(1, Ordering::Relaxed);

    match fetcher.fetch().await {
        Ok(snapshot) => {
            {
                // A poisoned board is still safe to overwrite: render
                // replaces every target and every row.
                let mut guard = targets.lock().unwrap_or_else(PoisonError::into_inner);
                render(&snapshot, &mut *guard);
            }
            stats.rendered.fetch_add(1, Ordering::Relaxed);
            debug!(
                source = fetcher.description(),
                rows = snapshot.join_watermarks.len(),
                "rendered metrics snapshot"
            );
            CycleOutcome::Rendered
        }
        Err(err) => {
            stats.failed.fetch_add(1, Ordering::Relaxed);
            warn!(source = fetcher.description(), error = %err, "failed to load metrics");
            CycleOutcome::Skipped
        }
    }
}

/// Drives cycles for one fetcher and one set of display targets.
pub struct Scheduler<T> {
    fetcher: Arc<dyn SnapshotFetcher>,
    targets: SharedTargets<T>,
}

impl<T> Scheduler<T>
where
    T: DisplayTargets + Send + 'static,
{
    pub fn new(fetcher: Arc<dyn SnapshotFetcher>, targets: SharedTargets<T>) -> Self {
        Self { fetcher, targets }
    }

    /// Start the periodic loop on the current tokio runtime.
    ///
    /// The first cycle is triggered immediately. Dropping the returned
    /// handle detaches the loop; call [`SchedulerHandle::stop`] to end it.
    pub fn start(self) -> SchedulerHandle {
        let stats = Arc::new(CycleStats::default());
        let ticker_stats = stats.clone();

        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(REFRESH_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(source = self.fetcher.description(), "polling metrics");

            loop {
                interval.tick().await;

                let fetcher = self.fetcher.clone();
                let targets = self.targets.clone();
                let stats = ticker_stats.clone();
                tokio::spawn(async move {
                    run_cycle(fetcher.as_ref(), &*targets, &stats).await;
                });
            }
        });

        SchedulerHandle { ticker, stats }
    }
}

/// Handle to a running scheduler.
#[derive(Debug)]
pub struct SchedulerHandle {
    ticker: JoinHandle<()>,
    stats: Arc<CycleStats>,
}

impl SchedulerHandle {
    /// Stop triggering new cycles.
    ///
    /// Cycles already in flight are not cancelled; they complete and render.
    pub fn stop(&self) {
        self.ticker.abort();
    }

    /// True once the ticker task has ended.
    pub fn is_stopped(&self) -> bool {
        self.ticker.is_finished()
    }

    /// Shared cycle statistics, updated by every cycle.
    pub fn stats(&self) -> Arc<CycleStats> {
        self.stats.clone()
    }

    pub fn counts(&self) -> CycleCounts {
        self.stats.counts()
    }
}
