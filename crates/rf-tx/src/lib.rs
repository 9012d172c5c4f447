//! RF Transmitter
//!
//! This crate turns a code into the pulse train of an RF remote-control
//! protocol and drives it onto an output pin.
//!
//! # Architecture
//!
//! A [`TransmissionRequest`] carries everything one transmission needs: the
//! pin, the code and its bit length, the effective protocol (after any pulse
//! unit override) and a [`RepeatCount`]. A [`Transmitter`] owns a pin driver
//! and a delay source for the duration of one call to [`Transmitter::send`],
//! which blocks until every frame has been emitted and the pin is back low.
//!
//! # Example
//!
//! ```rust
//! use rf_protocol::ProtocolCatalog;
//! use rf_sim::{VirtualClock, VirtualPin};
//! use rf_tx::{RepeatCount, TransmissionRequest, Transmitter};
//!
//! let clock = VirtualClock::new();
//! let mut pin = VirtualPin::new(clock.clone());
//!
//! let request = TransmissionRequest {
//!     pin: 17,
//!     code: 0b101,
//!     bit_length: 3,
//!     protocol: ProtocolCatalog::get(1).unwrap(),
//!     repeat_count: RepeatCount::from_requested(1),
//! };
//!
//! let report = Transmitter::new(&mut pin, clock).send(&request).unwrap();
//! assert_eq!(report.pulses, 4);
//! ```

pub mod error;
pub mod request;
pub mod transmitter;

pub use error::TxError;
pub use request::{RepeatCount, TransmissionRequest, DEFAULT_REPEAT_COUNT};
pub use transmitter::{transmit_pulse, TransmissionReport, Transmitter};
