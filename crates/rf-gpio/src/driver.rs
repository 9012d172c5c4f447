//! Pin driver interface

use serde::{Deserialize, Serialize};

use crate::error::GpioError;

/// Logic level of an output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Level for a boolean "is high" flag
    pub fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// The opposite level
    pub fn inverse(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Value written to a sysfs `value` file
    pub fn as_sysfs(self) -> &'static [u8] {
        match self {
            Level::Low => b"0",
            Level::High => b"1",
        }
    }
}

/// Output pin capability
///
/// # Invariants
///
/// - A pin must be configured as an output before it is written
/// - Only one writer per pin; implementations are not shared between threads
/// - `close` releases every claimed pin and may be called more than once
pub trait PinDriver {
    /// Claim a pin and configure it as an output
    ///
    /// # Errors
    ///
    /// Returns [`GpioError::InvalidPin`] if the pin does not exist, or
    /// [`GpioError::Io`] if it cannot be configured.
    fn configure_output(&mut self, pin: u8) -> Result<(), GpioError>;

    /// Drive a configured pin to a level
    ///
    /// # Errors
    ///
    /// Returns [`GpioError::NotConfigured`] for a pin that was never
    /// configured, or [`GpioError::Io`] on hardware failure.
    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError>;

    /// Release all claimed pins
    fn close(&mut self) -> Result<(), GpioError>;
}

impl<T: PinDriver + ?Sized> PinDriver for &mut T {
    fn configure_output(&mut self, pin: u8) -> Result<(), GpioError> {
        (**self).configure_output(pin)
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        (**self).write(pin, level)
    }

    fn close(&mut self) -> Result<(), GpioError> {
        (**self).close()
    }
}
