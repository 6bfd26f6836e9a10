//! Fixed-interval tick clock.
//!
//! Time is fed in by the caller (`advance(elapsed_ms)`) instead of being read
//! from the system clock, which keeps the session deterministic and testable.

/// Counts elapsed time and reports how many fixed-interval ticks fell due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimer {
    interval_ms: u64,
    accumulated_ms: u64,
    running: bool,
}

impl TickTimer {
    /// A stopped timer. `interval_ms` is clamped to at least 1.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            accumulated_ms: 0,
            running: false,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or restart) counting from zero
    pub fn start(&mut self) {
        self.running = true;
        self.accumulated_ms = 0;
    }

    /// Stop counting; pending partial time is discarded
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated_ms = 0;
    }

    /// Add elapsed time and return the number of ticks now due.
    /// A stopped timer never produces ticks.
    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        if !self.running {
            return 0;
        }
        self.accumulated_ms += elapsed_ms;
        let due = self.accumulated_ms / self.interval_ms;
        self.accumulated_ms %= self.interval_ms;
        due
    }

    /// Milliseconds until the next tick, `None` while stopped
    pub fn until_next_tick_ms(&self) -> Option<u64> {
        self.running
            .then(|| self.interval_ms - self.accumulated_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_ticks() {
        let mut t = TickTimer::new(500);
        assert_eq!(t.advance(10_000), 0);
        assert_eq!(t.until_next_tick_ms(), None);
    }

    #[test]
    fn test_ticks_accumulate() {
        let mut t = TickTimer::new(500);
        t.start();
        assert_eq!(t.advance(499), 0);
        assert_eq!(t.until_next_tick_ms(), Some(1));
        assert_eq!(t.advance(1), 1);
        assert_eq!(t.advance(1250), 2);
        assert_eq!(t.until_next_tick_ms(), Some(250));
    }

    #[test]
    fn test_stop_discards_partial_interval() {
        let mut t = TickTimer::new(500);
        t.start();
        t.advance(400);
        t.stop();
        t.start();
        assert_eq!(t.advance(400), 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut t = TickTimer::new(0);
        t.start();
        assert_eq!(t.interval_ms(), 1);
        assert_eq!(t.advance(3), 3);
    }
}
