//! Timer registry: the scheduling core.
//!
//! The registry owns every in-flight timer: a map from id to entry,
//! guarded by one coarse lock, with one scheduled expiry job per entry.
//! Cancellation and expiry race on the same entry; whichever removes it
//! under the lock first wins, so a timer notifies at most once and a
//! cancelled timer never notifies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::notification::Dispatcher;
use crate::types::{DurationSpec, TimerInfo};

use super::scheduler::{CancelHandle, Scheduler, TimerJob};

// ============================================================================
// TimerEntry
// ============================================================================

/// One registered timer: its record plus the handle to its expiry job.
struct TimerEntry {
    /// Immutable timer record
    info: TimerInfo,
    /// Exclusively owned abort handle for the pending expiry
    cancel: CancelHandle,
}

// ============================================================================
// TimerRegistry
// ============================================================================

/// Concurrent owner of all active timers.
pub struct TimerRegistry {
    /// Self-handle captured by expiry jobs; set once at construction
    me: Weak<TimerRegistry>,
    /// Active timers; the single shared mutable resource
    timers: Mutex<HashMap<Uuid, TimerEntry>>,
    /// Deferred-execution backend
    scheduler: Arc<dyn Scheduler>,
    /// Notification sink, invoked once per natural expiry
    dispatcher: Arc<Dispatcher>,
}

impl TimerRegistry {
    /// Creates a registry on the given scheduler and dispatcher.
    pub fn new(scheduler: Arc<dyn Scheduler>, dispatcher: Arc<Dispatcher>) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            timers: Mutex::new(HashMap::new()),
            scheduler,
            dispatcher,
        })
    }

    /// Locks the timer table, recovering from a poisoned lock: a panicked
    /// expiry job must not wedge every later registry operation.
    fn table(&self) -> MutexGuard<'_, HashMap<Uuid, TimerEntry>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new timer and schedules its expiry.
    ///
    /// The caller guarantees a non-zero, in-bounds duration. Returns the
    /// immutable record; the id is the handle for later cancellation.
    /// Non-blocking: the expiry runs on its own scheduler worker.
    pub fn add_timer(&self, duration: DurationSpec, message: String) -> TimerInfo {
        let info = TimerInfo::new(duration, message);
        let id = info.id;

        // The job holds a weak handle; if the registry itself is gone by
        // fire time (daemon shutdown), the expiry is dropped silently.
        let registry = self.me.clone();
        let job: TimerJob = Box::pin(async move {
            if let Some(registry) = registry.upgrade() {
                registry.on_expire(id).await;
            }
        });

        // Scheduling and insertion share the critical section, so an
        // expiry job can never observe a not-yet-registered id.
        let mut table = self.table();
        let cancel = self.scheduler.schedule(duration.to_duration(), job);
        table.insert(
            id,
            TimerEntry {
                info: info.clone(),
                cancel,
            },
        );
        drop(table);

        debug!("timer {} registered for {}", info.short_id(), duration);
        info
    }

    /// Point-in-time snapshot of all active timers, soonest first.
    pub fn list_active(&self) -> Vec<TimerInfo> {
        let table = self.table();
        let mut timers: Vec<TimerInfo> = table.values().map(|entry| entry.info.clone()).collect();
        drop(table);
        timers.sort_by_key(|info| info.fires_at);
        timers
    }

    /// Cancels a timer by id.
    ///
    /// Returns true if an entry was removed. An unknown or already-fired
    /// id is a no-op, never an error.
    pub fn cancel_timer(&self, id: Uuid) -> bool {
        let mut table = self.table();
        match table.remove(&id) {
            Some(entry) => {
                entry.cancel.cancel();
                debug!("timer {} cancelled", entry.info.short_id());
                true
            }
            None => {
                debug!("cancel requested for unknown timer {}", id);
                false
            }
        }
    }

    /// Number of active timers.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Returns true if no timers are active.
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Expiry path, run by the scheduler when a timer's delay elapses.
    ///
    /// The entry is captured and removed under the lock; the notification
    /// is dispatched after the lock is released so network I/O never
    /// blocks registry operations. An absent entry means a cancellation
    /// won the race: logged, no notification.
    async fn on_expire(&self, id: Uuid) {
        let removed = self.table().remove(&id);

        let Some(entry) = removed else {
            warn!("timer {} missing at expiry, a cancellation won the race", id);
            return;
        };

        info!("timer {} fired", entry.info.short_id());
        let message = entry.info.notification_message();
        self.dispatcher.notify(&message).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
