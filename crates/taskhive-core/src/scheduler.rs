use chrono::{DateTime, Timelike, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Time source injected into the series manager so tests can pin "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The instant a timer should fire for an occurrence: the occurrence's
/// calendar day at a fixed hour UTC.
pub fn fire_instant(occurrence: DateTime<Utc>, hour_utc: u32) -> DateTime<Utc> {
    occurrence
        .with_hour(hour_utc)
        .and_then(|dt| dt.with_minute(0))
        .and_then(|dt| dt.with_second(0))
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(occurrence)
}

/// TimerRegistry: owns the per-series materialization timers.
///
/// An explicit component injected into the series manager, keyed by the
/// template task id. Registering a timer for a task that already has one
/// replaces (and aborts) the old registration; cancellation aborts the
/// spawned timer task synchronously, so no further fires can race a
/// subsequent delete of the series.
#[derive(Default)]
pub struct TimerRegistry {
    timers: Mutex<HashMap<Uuid, JoinHandle<()>>>,
    sweep: Mutex<Option<JoinHandle<()>>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, task_id: Uuid, handle: JoinHandle<()>) {
        let mut timers = self.timers.lock().expect("timer registry poisoned");
        if let Some(old) = timers.insert(task_id, handle) {
            old.abort();
        }
        debug!(task_id = %task_id, "registered series timer");
    }

    /// Cancels the timer for a series. Returns false when none was
    /// registered, which is not an error (ensure-cancelled semantics).
    pub fn cancel(&self, task_id: Uuid) -> bool {
        let mut timers = self.timers.lock().expect("timer registry poisoned");
        match timers.remove(&task_id) {
            Some(handle) => {
                handle.abort();
                debug!(task_id = %task_id, "cancelled series timer");
                true
            }
            None => false,
        }
    }

    pub fn is_scheduled(&self, task_id: Uuid) -> bool {
        self.timers
            .lock()
            .expect("timer registry poisoned")
            .contains_key(&task_id)
    }

    pub fn len(&self) -> usize {
        self.timers.lock().expect("timer registry poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers the periodic backfill sweep, replacing any previous one.
    pub fn register_sweep(&self, handle: JoinHandle<()>) {
        let mut sweep = self.sweep.lock().expect("timer registry poisoned");
        if let Some(old) = sweep.replace(handle) {
            old.abort();
        }
    }

    /// Aborts every registered timer and the sweep.
    pub fn shutdown(&self) {
        let mut timers = self.timers.lock().expect("timer registry poisoned");
        for (_, handle) in timers.drain() {
            handle.abort();
        }
        if let Some(handle) = self.sweep.lock().expect("timer registry poisoned").take() {
            handle.abort();
        }
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fire_instant_pins_hour_on_occurrence_day() {
        let occurrence = Utc.with_ymd_and_hms(2025, 6, 3, 14, 30, 45).unwrap();
        let fire = fire_instant(occurrence, 9);
        assert_eq!(fire, Utc.with_ymd_and_hms(2025, 6, 3, 9, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn register_and_cancel() {
        let registry = TimerRegistry::new();
        let task_id = Uuid::now_v7();

        registry.register(task_id, tokio::spawn(std::future::pending()));
        assert!(registry.is_scheduled(task_id));
        assert_eq!(registry.len(), 1);

        assert!(registry.cancel(task_id));
        assert!(!registry.is_scheduled(task_id));
        assert!(!registry.cancel(task_id));
    }

    #[tokio::test]
    async fn re_registration_replaces_previous_timer() {
        let registry = TimerRegistry::new();
        let task_id = Uuid::now_v7();

        let first = tokio::spawn(std::future::pending());
        registry.register(task_id, first);
        registry.register(task_id, tokio::spawn(std::future::pending()));
        assert_eq!(registry.len(), 1);
    }
}
