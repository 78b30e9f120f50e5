//! Trailing-edge debouncing with generation tracking.
//!
//! Each `schedule` call bumps the generation, aborts whatever was pending
//! and spawns a task that waits out the quiet period before running the
//! job. An aborted job stops at its next await point. Jobs check their
//! [`Ticket`] right before publishing so a superseded result is dropped.

use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Identifies one scheduled job.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl Ticket {
    /// Generation number this job was scheduled with.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true while no newer job has been scheduled.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// Delays jobs until input has been quiet for a fixed interval.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    latest: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            latest: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Latest generation handed out (0 before the first schedule).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Schedules `job` to run after the quiet period, superseding any
    /// pending job. Must be called from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, job: F) -> Ticket
    where
        F: FnOnce(Ticket) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.invalidate();
        let quiet = self.quiet;
        let job_ticket = ticket.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            if job_ticket.is_current() {
                job(job_ticket).await;
            }
        });

        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
        ticket
    }

    /// Bumps the generation and aborts the pending job without scheduling
    /// a new one. Returns the ticket for the new generation.
    pub fn invalidate(&self) -> Ticket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_pending();
        Ticket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Aborts the pending job, if any.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.abort_pending();
    }

    fn abort_pending(&self) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
