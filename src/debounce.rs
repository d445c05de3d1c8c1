//! Single-slot debounce timer.

use std::time::{Duration, Instant};

/// Holds at most one pending value.
///
/// Scheduling a new value drops the pending one and restarts the quiet period.
/// The owner polls with the current time; nothing runs in the background.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: None }
    }

    /// Replace the pending value; it fires once `quiet` elapses from `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.schedule("a", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(499)), None);
        assert_eq!(debouncer.poll(start + QUIET), Some("a"));
        assert_eq!(debouncer.poll(start + QUIET * 2), None);
    }

    #[test]
    fn test_rapid_schedules_keep_last() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        let mut fired = Vec::new();

        for (i, text) in ["g", "ge", "ges", "gest"].into_iter().enumerate() {
            let now = start + Duration::from_millis(100 * i as u64);
            debouncer.schedule(text, now);
            fired.extend(debouncer.poll(now));
        }

        let last = start + Duration::from_millis(300);
        fired.extend(debouncer.poll(last + Duration::from_millis(400)));
        fired.extend(debouncer.poll(last + QUIET));
        fired.extend(debouncer.poll(last + QUIET * 3));

        assert_eq!(fired, vec!["gest"]);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.schedule(1, start);
        debouncer.cancel();

        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + QUIET), None);
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        assert_eq!(debouncer.remaining(start), None);

        debouncer.schedule((), start);
        assert_eq!(debouncer.remaining(start + Duration::from_millis(200)), Some(Duration::from_millis(300)));
        assert_eq!(debouncer.remaining(start + QUIET * 2), Some(Duration::ZERO));
    }
}
