//! Deferred execution for timer expiry.
//!
//! Each timer owns one single-shot scheduled job. The [`Scheduler`] trait
//! abstracts the underlying primitive so the registry can run on tokio in
//! production and on a deterministic mock in tests:
//! - `schedule(delay, job)` returns a [`CancelHandle`]
//! - `CancelHandle::cancel()` aborts the pending job, best-effort

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

/// A deferred job: the body that runs once the delay elapses.
pub type TimerJob = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

// ============================================================================
// Scheduler
// ============================================================================

/// Single-shot deferred execution.
pub trait Scheduler: Send + Sync {
    /// Queues `job` to run once after `delay`.
    ///
    /// The returned handle is the only way to abort the pending run.
    fn schedule(&self, delay: Duration, job: TimerJob) -> CancelHandle;
}

/// Backend-specific cancellation of one scheduled job.
pub trait CancelToken: Send + Sync {
    /// Aborts the pending job.
    ///
    /// Returns false if the job already ran (or already started running);
    /// cancellation is best-effort past that point.
    fn cancel(&self) -> bool;
}

/// Owning handle to one scheduled job's cancellation.
pub struct CancelHandle(Box<dyn CancelToken>);

impl CancelHandle {
    /// Wraps a backend token.
    pub fn new(token: impl CancelToken + 'static) -> Self {
        Self(Box::new(token))
    }

    /// Aborts the pending job, best-effort.
    pub fn cancel(&self) -> bool {
        self.0.cancel()
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CancelHandle")
    }
}

// ============================================================================
// TokioScheduler
// ============================================================================

/// Production scheduler: one tokio task per timer, sleeping until expiry.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl TokioScheduler {
    /// Creates a new tokio-backed scheduler.
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, job: TimerJob) -> CancelHandle {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job.await;
        });
        CancelHandle::new(TokioCancelToken {
            handle: handle.abort_handle(),
        })
    }
}

struct TokioCancelToken {
    handle: AbortHandle,
}

impl CancelToken for TokioCancelToken {
    fn cancel(&self) -> bool {
        let finished = self.handle.is_finished();
        self.handle.abort();
        !finished
    }
}

// ============================================================================
// MockScheduler
// ============================================================================

/// Deterministic scheduler for tests: jobs run only when `fire` is called.
#[derive(Debug, Default)]
pub struct MockScheduler {
    jobs: Arc<Mutex<Vec<MockJob>>>,
}

struct MockJob {
    delay: Duration,
    job: Option<TimerJob>,
    cancelled: bool,
}

impl fmt::Debug for MockJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockJob")
            .field("delay", &self.delay)
            .field("pending", &self.job.is_some())
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

impl MockScheduler {
    /// Creates a shared mock scheduler.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<MockJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Total number of jobs ever scheduled.
    pub fn scheduled_count(&self) -> usize {
        self.lock().len()
    }

    /// Number of jobs still pending (not fired, not cancelled).
    pub fn pending_count(&self) -> usize {
        self.lock().iter().filter(|j| j.job.is_some()).count()
    }

    /// The delay the job at `index` was scheduled with.
    pub fn delay_of(&self, index: usize) -> Option<Duration> {
        self.lock().get(index).map(|j| j.delay)
    }

    /// Whether the job at `index` was cancelled.
    pub fn was_cancelled(&self, index: usize) -> bool {
        self.lock().get(index).is_some_and(|j| j.cancelled)
    }

    /// Runs the job at `index` now, as if its delay had elapsed.
    ///
    /// Returns false if the job was already fired or cancelled.
    pub async fn fire(&self, index: usize) -> bool {
        let job = {
            let mut jobs = self.lock();
            jobs.get_mut(index).and_then(|j| j.job.take())
        };
        match job {
            Some(job) => {
                job.await;
                true
            }
            None => false,
        }
    }
}

impl Scheduler for MockScheduler {
    fn schedule(&self, delay: Duration, job: TimerJob) -> CancelHandle {
        let mut jobs = self.lock();
        let index = jobs.len();
        jobs.push(MockJob {
            delay,
            job: Some(job),
            cancelled: false,
        });
        CancelHandle::new(MockCancelToken {
            jobs: Arc::clone(&self.jobs),
            index,
        })
    }
}

struct MockCancelToken {
    jobs: Arc<Mutex<Vec<MockJob>>>,
    index: usize,
}

impl CancelToken for MockCancelToken {
    fn cancel(&self) -> bool {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        match jobs.get_mut(self.index) {
            Some(slot) if slot.job.is_some() => {
                slot.job = None;
                slot.cancelled = true;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
