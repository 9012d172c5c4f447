//! Virtual output pin
//!
//! Records every write with the virtual clock's timestamp so tests can check
//! both the order of levels and the hold time of each phase.

use std::collections::{HashMap, HashSet};
use std::io;

use rf_gpio::{GpioError, Level, PinDriver};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::VirtualClock;

/// One recorded pin write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinEvent {
    /// Virtual time of the write
    pub at_us: u64,
    /// Pin written
    pub pin: u8,
    /// Level written
    pub level: Level,
}

/// A level and how long it was held before the next write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPhase {
    pub level: Level,
    pub hold_us: u64,
}

/// Two consecutive phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPulse {
    pub first: RecordedPhase,
    pub second: RecordedPhase,
}

/// Configuration for creating a virtual pin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualPinConfig {
    /// Highest pin number accepted by `configure_output`
    pub max_pin: u8,
    /// Fail every write once this many writes have succeeded
    #[serde(default)]
    pub fail_after_writes: Option<usize>,
    /// Starting time of the clock created by [`VirtualPin::with_config`]
    #[serde(default)]
    pub initial_clock_us: u64,
}

impl Default for VirtualPinConfig {
    fn default() -> Self {
        Self {
            // BCM numbering on a Raspberry Pi header
            max_pin: 53,
            fail_after_writes: None,
            initial_clock_us: 0,
        }
    }
}

/// A simulated pin driver that records writes
#[derive(Debug)]
pub struct VirtualPin {
    config: VirtualPinConfig,
    clock: VirtualClock,
    configured: HashSet<u8>,
    levels: HashMap<u8, Level>,
    events: Vec<PinEvent>,
    /// Per pin, the number of its events recorded at each `configure_output`
    sessions: HashMap<u8, Vec<usize>>,
    /// Write attempts so far, including failed ones
    attempts: usize,
    /// Write attempt index that fails once
    fail_once_at: Option<usize>,
    close_count: usize,
}

impl VirtualPin {
    /// Create a virtual pin with default settings
    pub fn new(clock: VirtualClock) -> Self {
        Self::from_config(VirtualPinConfig::default(), clock)
    }

    /// Create a virtual pin with its own clock starting at
    /// `config.initial_clock_us`
    ///
    /// Clone [`VirtualPin::clock`] to get the matching delay source.
    pub fn with_config(config: VirtualPinConfig) -> Self {
        let clock = VirtualClock::starting_at(config.initial_clock_us);
        Self::from_config(config, clock)
    }

    /// Create a virtual pin from configuration sharing an existing clock
    pub fn from_config(config: VirtualPinConfig, clock: VirtualClock) -> Self {
        Self {
            config,
            clock,
            configured: HashSet::new(),
            levels: HashMap::new(),
            events: Vec::new(),
            sessions: HashMap::new(),
            attempts: 0,
            fail_once_at: None,
            close_count: 0,
        }
    }

    /// The clock used to timestamp writes
    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    /// Make the write attempt with 0-based index `attempt` fail once
    pub fn fail_once_at(&mut self, attempt: usize) {
        self.fail_once_at = Some(attempt);
    }

    /// Make every write fail once `writes` writes have succeeded
    pub fn fail_after_writes(&mut self, writes: usize) {
        self.config.fail_after_writes = Some(writes);
    }

    /// All recorded writes in order
    pub fn events(&self) -> &[PinEvent] {
        &self.events
    }

    /// Recorded writes for one pin
    pub fn events_for(&self, pin: u8) -> impl Iterator<Item = &PinEvent> {
        self.events.iter().filter(move |e| e.pin == pin)
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.events.len()
    }

    /// Last level written to a pin
    pub fn last_level(&self, pin: u8) -> Option<Level> {
        self.levels.get(&pin).copied()
    }

    /// Whether a pin is currently configured as an output
    pub fn is_configured(&self, pin: u8) -> bool {
        self.configured.contains(&pin)
    }

    /// Number of times `close` has been called
    pub fn close_count(&self) -> usize {
        self.close_count
    }

    /// Levels written to a pin with the time each was held
    ///
    /// The last phase is held until the clock's current time.
    pub fn phases(&self, pin: u8) -> Vec<RecordedPhase> {
        let events: Vec<&PinEvent> = self.events_for(pin).collect();
        let now = self.clock.now_us();

        events
            .iter()
            .enumerate()
            .map(|(i, event)| {
                let until = events.get(i + 1).map_or(now, |next| next.at_us);
                RecordedPhase {
                    level: event.level,
                    hold_us: until - event.at_us,
                }
            })
            .collect()
    }

    /// Phases grouped into pairs
    ///
    /// Pairing restarts at every `configure_output` on the pin, so each
    /// session is paired on its own and a trailing unpaired phase in a
    /// session (such as the final return to low) is dropped.
    pub fn pulses(&self, pin: u8) -> Vec<RecordedPulse> {
        let phases = self.phases(pin);
        let mut bounds: Vec<usize> = self.sessions.get(&pin).cloned().unwrap_or_default();
        bounds.push(phases.len());

        let mut start = 0;
        let mut pulses = Vec::new();
        for end in bounds {
            if end > start {
                pulses.extend(phases[start..end].chunks_exact(2).map(|pair| RecordedPulse {
                    first: pair[0],
                    second: pair[1],
                }));
            }
            start = start.max(end);
        }
        pulses
    }

    /// Time from the first write on a pin to the clock's current time
    pub fn airtime_us(&self, pin: u8) -> u64 {
        self.events_for(pin)
            .next()
            .map_or(0, |first| self.clock.now_us() - first.at_us)
    }

    fn injected_failure(&mut self, pin: u8) -> Option<GpioError> {
        let attempt = self.attempts;
        self.attempts += 1;

        let once = self.fail_once_at == Some(attempt);
        if once {
            self.fail_once_at = None;
        }
        let persistent = self
            .config
            .fail_after_writes
            .is_some_and(|limit| self.events.len() >= limit);

        (once || persistent).then(|| GpioError::Io {
            pin,
            source: io::Error::other("injected write failure"),
        })
    }
}

impl PinDriver for VirtualPin {
    fn configure_output(&mut self, pin: u8) -> Result<(), GpioError> {
        if pin > self.config.max_pin {
            return Err(GpioError::InvalidPin(pin));
        }
        self.configured.insert(pin);
        let recorded = self.events_for(pin).count();
        self.sessions.entry(pin).or_default().push(recorded);
        debug!("Virtual pin {} configured as output", pin);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        if !self.configured.contains(&pin) {
            return Err(GpioError::NotConfigured(pin));
        }
        if let Some(err) = self.injected_failure(pin) {
            return Err(err);
        }

        self.events.push(PinEvent {
            at_us: self.clock.now_us(),
            pin,
            level,
        });
        self.levels.insert(pin, level);
        Ok(())
    }

    fn close(&mut self) -> Result<(), GpioError> {
        self.configured.clear();
        self.close_count += 1;
        Ok(())
    }
}
