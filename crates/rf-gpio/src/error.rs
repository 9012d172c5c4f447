//! Error types for pin access

use thiserror::Error;

/// Errors that can occur while driving an output pin
#[derive(Debug, Error)]
pub enum GpioError {
    /// GPIO subsystem unavailable (missing or insufficient privilege)
    #[error("cannot access GPIO at {path}: {reason}")]
    Access { path: String, reason: String },

    /// Pin outside the range supported by the hardware
    #[error("invalid pin {0}")]
    InvalidPin(u8),

    /// Pin was written before being configured as an output
    #[error("pin {0} is not configured as an output")]
    NotConfigured(u8),

    /// Hardware access failed while configuring or writing a pin
    #[error("I/O error on pin {pin}: {source}")]
    Io {
        pin: u8,
        #[source]
        source: std::io::Error,
    },
}
