// Update scheduler - Running/Paused state machine with a single pending-cycle slot
use crate::domain::dashboard::ScheduleState;
use std::time::{Duration, Instant};

pub const MIN_INTERVAL_MILLIS: u64 = 100;
pub const MAX_INTERVAL_MILLIS: u64 = 10_000;
pub const DEFAULT_INTERVAL_MILLIS: u64 = 1_500;

pub fn clamp_interval(millis: u64) -> u64 {
    millis.clamp(MIN_INTERVAL_MILLIS, MAX_INTERVAL_MILLIS)
}

/// Decides when the next cycle is due.
///
/// The scheduler never runs a cycle itself: the owner runs one whenever
/// [`UpdateScheduler::take_due`] or [`UpdateScheduler::resume`] says so, then
/// calls [`UpdateScheduler::cycle_completed`] to arm the next deadline. At most
/// one deadline is pending at any time.
#[derive(Debug, Clone)]
pub struct UpdateScheduler {
    state: ScheduleState,
    pending: Option<Instant>,
}

impl UpdateScheduler {
    pub fn new(interval_millis: u64, running: bool) -> Self {
        Self {
            state: ScheduleState {
                running,
                interval_millis: clamp_interval(interval_millis),
            },
            pending: None,
        }
    }

    pub fn state(&self) -> ScheduleState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.state.interval_millis)
    }

    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Stop scheduling. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        self.pending = None;
        true
    }

    /// Start scheduling again. Returns true when the caller must run a cycle now.
    pub fn resume(&mut self) -> bool {
        if self.state.running {
            return false;
        }
        self.state.running = true;
        true
    }

    /// Store a new interval for future scheduling; a pending deadline is left alone.
    /// Returns the clamped value actually stored.
    pub fn set_interval(&mut self, millis: u64) -> u64 {
        self.state.interval_millis = clamp_interval(millis);
        self.state.interval_millis
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.state.running && self.pending.is_some_and(|deadline| now >= deadline)
    }

    /// Consume the pending deadline if it has elapsed
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Arm the next deadline, reading the interval as it is right now
    pub fn cycle_completed(&mut self, now: Instant) {
        if self.state.running {
            self.pending = Some(now + self.interval());
        }
    }
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MILLIS, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_clamp_interval() {
        assert_eq!(clamp_interval(0), MIN_INTERVAL_MILLIS);
        assert_eq!(clamp_interval(99), 100);
        assert_eq!(clamp_interval(1500), 1500);
        assert_eq!(clamp_interval(60_000), MAX_INTERVAL_MILLIS);
        assert_eq!(UpdateScheduler::new(5, true).state().interval_millis, 100);
    }

    #[test]
    fn test_cycle_arms_single_deadline() {
        let start = Instant::now();
        let mut scheduler = UpdateScheduler::default();

        scheduler.cycle_completed(start);
        assert_eq!(scheduler.pending_deadline(), Some(start + ms(1500)));
        assert!(!scheduler.is_due(start + ms(1499)));
        assert!(scheduler.take_due(start + ms(1500)));
        assert_eq!(scheduler.pending_deadline(), None);
        assert!(!scheduler.take_due(start + ms(1501)));
    }

    #[test]
    fn test_pause_then_resume_runs_one_cycle() {
        let start = Instant::now();
        let mut scheduler = UpdateScheduler::new(1500, true);
        scheduler.cycle_completed(start);

        assert!(scheduler.pause());
        assert!(!scheduler.pause());
        assert_eq!(scheduler.pending_deadline(), None);
        for t in [1500, 3000, 10_000] {
            assert!(!scheduler.take_due(start + ms(t)));
        }

        let resumed_at = start + ms(10_000);
        assert!(scheduler.resume());
        assert!(!scheduler.resume());
        scheduler.cycle_completed(resumed_at);
        assert_eq!(scheduler.pending_deadline(), Some(resumed_at + ms(1500)));
    }

    #[test]
    fn test_set_interval_applies_to_next_cycle_only() {
        let start = Instant::now();
        let mut scheduler = UpdateScheduler::new(1500, true);
        scheduler.cycle_completed(start);

        assert_eq!(scheduler.set_interval(500), 500);
        assert!(!scheduler.take_due(start + ms(500)));
        assert!(!scheduler.take_due(start + ms(1499)));
        assert!(scheduler.take_due(start + ms(1500)));

        scheduler.cycle_completed(start + ms(1500));
        assert_eq!(scheduler.pending_deadline(), Some(start + ms(2000)));
    }

    #[test]
    fn test_paused_scheduler_does_not_arm() {
        let start = Instant::now();
        let mut scheduler = UpdateScheduler::new(1500, false);
        scheduler.cycle_completed(start);
        assert_eq!(scheduler.pending_deadline(), None);
        assert!(!scheduler.is_running());
    }
}
