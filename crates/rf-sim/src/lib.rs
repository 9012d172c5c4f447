//! RF Simulation Library
//!
//! This crate provides a simulation layer for exercising transmissions
//! without a transmitter module attached. It includes:
//!
//! - **VirtualClock**: a microsecond counter that advances only when delayed
//! - **VirtualPin**: a pin driver that records every level change against
//!   the clock, with optional fault injection
//!
//! # Example
//!
//! ```rust
//! use rf_gpio::{Delay, Level, PinDriver};
//! use rf_sim::{VirtualClock, VirtualPin};
//!
//! let clock = VirtualClock::new();
//! let mut pin = VirtualPin::new(clock.clone());
//! let mut delay = clock.clone();
//!
//! pin.configure_output(17).unwrap();
//! pin.write(17, Level::High).unwrap();
//! delay.delay_us(1050);
//! pin.write(17, Level::Low).unwrap();
//! delay.delay_us(350);
//!
//! let phases = pin.phases(17);
//! assert_eq!(phases[0].hold_us, 1050);
//! assert_eq!(phases[1].hold_us, 350);
//! ```

pub mod clock;
pub mod pin;

pub use clock::VirtualClock;
pub use pin::{PinEvent, RecordedPhase, RecordedPulse, VirtualPin, VirtualPinConfig};
