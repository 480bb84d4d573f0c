use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::stats::{TickStats, TickWindow};
use crate::timer::Timer;

#[derive(Debug, Default)]
struct VirtualClock {
    now: Duration,
    sleeps: Vec<Duration>,
}

/// Deterministic timer: `sleep` returns immediately after advancing a
/// virtual clock shared by all clones, and every requested delay is logged.
#[derive(Debug, Clone, Default)]
pub struct MockTimer {
    clock: Arc<Mutex<VirtualClock>>,
    ticks: TickWindow,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves virtual time forward without logging a sleep.
    pub fn advance(&self, d: Duration) {
        self.clock().now += d;
    }

    /// Virtual time since creation.
    pub fn virtual_now(&self) -> Duration {
        self.clock().now
    }

    /// Every duration passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.clock().sleeps.clone()
    }

    pub fn total_slept(&self) -> Duration {
        self.clock().sleeps.iter().sum()
    }

    pub fn clear_sleeps(&self) {
        self.clock().sleeps.clear();
    }

    fn clock(&self) -> MutexGuard<'_, VirtualClock> {
        // A panic while holding the guard only happens inside a failing test.
        self.clock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Timer for MockTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.clock().now.as_nanos() as u64
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn sleep(&self, d: Duration) {
        let mut clock = self.clock();
        clock.now += d;
        clock.sleeps.push(d);
    }
    fn record_tick(&mut self, d: Duration) {
        self.ticks.record(d);
    }
    fn tick_stats(&self) -> TickStats {
        self.ticks.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_advances_shared_clock() {
        let timer = MockTimer::new();
        let clone = timer.clone();
        let start = timer.now();
        clone.sleep(Duration::from_millis(1800));
        clone.sleep(Duration::from_millis(500));
        assert_eq!(timer.elapsed(start), Duration::from_millis(2300));
        assert_eq!(
            timer.sleeps(),
            vec![Duration::from_millis(1800), Duration::from_millis(500)]
        );
    }

    #[test]
    fn advance_does_not_log_a_sleep() {
        let timer = MockTimer::new();
        timer.advance(Duration::from_secs(1));
        assert_eq!(timer.virtual_now(), Duration::from_secs(1));
        assert!(timer.sleeps().is_empty());
        assert_eq!(timer.total_slept(), Duration::ZERO);
    }
}
