//! RF Remote Protocol Library
//!
//! This crate provides the timing tables and frame encoding for the
//! on-off-keyed 433 MHz protocols spoken by remote-controlled mains
//! switches, doorbells and similar receivers (the "rc-switch" family).
//!
//! # Architecture
//!
//! - [`ProtocolCatalog`]: the twelve known protocols, selectable by 1-based index
//! - [`Protocol`]: a pulse unit plus three [`HighLow`] ratio pairs (zero, one, sync)
//!   and an inversion flag
//! - [`frame_symbols`]: turns a code into the symbol sequence of one frame,
//!   most-significant bit first, terminated by a sync symbol
//! - [`Pulse`]: a symbol resolved to microsecond hold times under a protocol
//!
//! A frame for code `0b101` with three bits looks like this:
//!
//! ```text
//! One Zero One Sync
//! ```
//!
//! # Example
//!
//! ```rust
//! use rf_protocol::{frame_symbols, ProtocolCatalog, Symbol};
//!
//! let protocol = ProtocolCatalog::get(1).unwrap().with_pulse_unit_override(300);
//! assert_eq!(protocol.pulse_unit, 300);
//!
//! let symbols: Vec<Symbol> = frame_symbols(0b101, 3).collect();
//! assert_eq!(symbols, vec![Symbol::One, Symbol::Zero, Symbol::One, Symbol::Sync]);
//!
//! let pulse = protocol.pulse(Symbol::One);
//! assert_eq!(pulse.high_us, 900);
//! assert_eq!(pulse.low_us, 300);
//! ```

pub mod catalog;
pub mod error;
pub mod frame;
pub mod protocol;

pub use catalog::ProtocolCatalog;
pub use error::ProtocolError;
pub use frame::{frame_symbols, FrameSymbols};
pub use protocol::{apply_override, HighLow, Phase, Protocol, Pulse, Symbol};
