//! Microsecond delays
//!
//! `thread::sleep` alone overshoots by tens of microseconds on a stock
//! kernel, which is enough to push short pulses outside a receiver's
//! tolerance. [`HostDelay`] sleeps for the bulk of a hold and busy-waits the
//! tail.

use std::time::{Duration, Instant};

/// Default busy-wait window at the end of each hold
pub const DEFAULT_SPIN_THRESHOLD_US: u64 = 200;

/// Source of blocking microsecond delays
pub trait Delay {
    /// Block for `us` microseconds; zero returns immediately
    fn delay_us(&mut self, us: u64);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay_us(&mut self, us: u64) {
        (**self).delay_us(us)
    }
}

/// Delay backed by the host's monotonic clock
#[derive(Debug, Clone)]
pub struct HostDelay {
    spin_threshold: Duration,
}

impl HostDelay {
    /// Create with the default busy-wait window
    pub fn new() -> Self {
        Self::with_spin_threshold(DEFAULT_SPIN_THRESHOLD_US)
    }

    /// Create with a custom busy-wait window in microseconds
    ///
    /// A window of 0 sleeps for the whole hold.
    pub fn with_spin_threshold(spin_threshold_us: u64) -> Self {
        Self {
            spin_threshold: Duration::from_micros(spin_threshold_us),
        }
    }

    /// The busy-wait window
    pub fn spin_threshold(&self) -> Duration {
        self.spin_threshold
    }
}

impl Default for HostDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for HostDelay {
    fn delay_us(&mut self, us: u64) {
        if us == 0 {
            return;
        }

        let target = Duration::from_micros(us);
        let start = Instant::now();

        if target > self.spin_threshold {
            std::thread::sleep(target - self.spin_threshold);
        }

        while start.elapsed() < target {
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_returns_immediately() {
        let mut delay = HostDelay::new();
        let start = Instant::now();
        delay.delay_us(0);
        assert!(start.elapsed() < Duration::from_millis(5));
    }

    #[test]
    fn test_delay_never_undershoots() {
        let mut delay = HostDelay::new();
        for us in [50, 350, 1050, 5000] {
            let start = Instant::now();
            delay.delay_us(us);
            assert!(start.elapsed() >= Duration::from_micros(us));
        }
    }

    #[test]
    fn test_sleep_only_mode() {
        let mut delay = HostDelay::with_spin_threshold(0);
        assert_eq!(delay.spin_threshold(), Duration::ZERO);
        let start = Instant::now();
        delay.delay_us(1000);
        assert!(start.elapsed() >= Duration::from_micros(1000));
    }
}
