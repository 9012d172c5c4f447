//! Virtual clock

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rf_gpio::Delay;

/// Simulated microsecond clock
///
/// Clones share the same time, so one clone can be handed to a transmitter
/// as its [`Delay`] while another timestamps pin writes.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now_us: Arc<AtomicU64>,
}

impl VirtualClock {
    /// Create a clock starting at zero
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a clock starting at `us`
    pub fn starting_at(us: u64) -> Self {
        Self {
            now_us: Arc::new(AtomicU64::new(us)),
        }
    }

    /// Current time in microseconds
    pub fn now_us(&self) -> u64 {
        self.now_us.load(Ordering::Relaxed)
    }

    /// Advance time by `us` microseconds
    pub fn advance(&self, us: u64) {
        self.now_us.fetch_add(us, Ordering::Relaxed);
    }
}

impl Delay for VirtualClock {
    fn delay_us(&mut self, us: u64) {
        self.advance(us);
    }
}
