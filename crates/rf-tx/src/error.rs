//! Error types for the transmitter

use thiserror::Error;

/// Errors that can occur during a transmission
#[derive(Debug, Error)]
pub enum TxError {
    /// Pin driver failure; the transmission stopped at this point
    #[error("transmission aborted after {pulses_sent} pulses: {source}")]
    Aborted {
        /// Pulses completely emitted before the failure
        pulses_sent: u64,
        #[source]
        source: rf_gpio::GpioError,
    },

    /// Pin could not be configured before transmitting
    #[error("pin setup failed: {0}")]
    Setup(#[from] rf_gpio::GpioError),
}

impl TxError {
    /// The underlying pin driver error
    pub fn gpio_error(&self) -> &rf_gpio::GpioError {
        match self {
            TxError::Aborted { source, .. } => source,
            TxError::Setup(e) => e,
        }
    }
}
