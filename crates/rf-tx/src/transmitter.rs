//! Pulse-train transmitter
//!
//! Frames are emitted back to back with no gap beyond the sync pulse's own
//! low phase. All timing comes from the [`Delay`] source; the only work
//! between two pin writes is the level computation, so nothing here may log
//! above `trace` level inside the frame loop.

use rf_gpio::{Delay, GpioError, Level, PinDriver};
use rf_protocol::{frame_symbols, HighLow, Protocol, Pulse};
use tracing::{debug, info, trace, warn};

use crate::error::TxError;
use crate::request::TransmissionRequest;

/// Summary of a completed transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmissionReport {
    /// Frames sent
    pub frames: u32,
    /// Pulses sent, sync pulses included
    pub pulses: u64,
    /// Sum of all scheduled hold times in microseconds
    pub scheduled_us: u64,
}

/// Emit one pulse: write the first level, hold, write the second level, hold
///
/// Non-inverted protocols go high then low; inverted protocols go low then
/// high. A zero ratio still writes its level, with no hold.
pub fn transmit_pulse<P, D>(
    protocol: &Protocol,
    ratio: HighLow,
    driver: &mut P,
    delay: &mut D,
    pin: u8,
) -> Result<(), GpioError>
where
    P: PinDriver + ?Sized,
    D: Delay + ?Sized,
{
    for phase in Pulse::new(protocol, ratio).phases() {
        driver.write(pin, Level::from_high(phase.high))?;
        delay.delay_us(phase.hold_us);
    }
    Ok(())
}

/// Drives transmission requests onto a pin
///
/// The transmitter holds the pin driver exclusively for as long as it
/// exists. Pass `&mut driver` to keep ownership with the caller.
pub struct Transmitter<P, D> {
    driver: P,
    delay: D,
}

impl<P: PinDriver, D: Delay> Transmitter<P, D> {
    /// Create a transmitter from a pin driver and a delay source
    pub fn new(driver: P, delay: D) -> Self {
        Self { driver, delay }
    }

    /// Get the pin driver
    pub fn driver(&self) -> &P {
        &self.driver
    }

    /// Take back the pin driver and delay source
    pub fn into_parts(self) -> (P, D) {
        (self.driver, self.delay)
    }

    /// Send every frame of a request, then leave the pin low
    ///
    /// Blocks for the whole transmission. On a pin driver failure the
    /// transmission stops at that point; one attempt is made to drive the
    /// pin low before the original error is returned.
    pub fn send(&mut self, request: &TransmissionRequest) -> Result<TransmissionReport, TxError> {
        let pin = request.pin;
        self.driver.configure_output(pin)?;

        let frames = request.repeat_count.get();
        info!(
            "Sending code {} ({} bits) on pin {} using {}: {} frames, pulse unit {}us",
            request.code,
            request.bit_length,
            pin,
            request.protocol.name,
            frames,
            request.protocol.pulse_unit
        );

        let mut pulses_sent = 0u64;
        let result = self
            .emit_frames(request, &mut pulses_sent)
            .and_then(|()| self.driver.write(pin, Level::Low));

        match result {
            Ok(()) => {
                let report = TransmissionReport {
                    frames,
                    pulses: pulses_sent,
                    scheduled_us: request.total_duration_us(),
                };
                debug!(
                    "Transmission complete: {} pulses, {}us scheduled",
                    report.pulses, report.scheduled_us
                );
                Ok(report)
            }
            Err(source) => {
                self.force_low(pin);
                Err(TxError::Aborted {
                    pulses_sent,
                    source,
                })
            }
        }
    }

    fn emit_frames(
        &mut self,
        request: &TransmissionRequest,
        pulses_sent: &mut u64,
    ) -> Result<(), GpioError> {
        let protocol = &request.protocol;

        for frame in 0..request.repeat_count.get() {
            for symbol in frame_symbols(request.code, request.bit_length) {
                transmit_pulse(
                    protocol,
                    protocol.ratio(symbol),
                    &mut self.driver,
                    &mut self.delay,
                    request.pin,
                )?;
                *pulses_sent += 1;
            }
            trace!("Frame {} sent", frame);
        }
        Ok(())
    }

    fn force_low(&mut self, pin: u8) {
        if let Err(e) = self.driver.write(pin, Level::Low) {
            warn!("Could not drive pin {} low after failure: {}", pin, e);
        }
    }
}
