//! RF GPIO Library
//!
//! Output pin access for the data line of a 433 MHz transmitter module.
//!
//! - [`PinDriver`]: the capability the transmitter needs (configure, write, close)
//! - [`SysfsGpio`]: Linux implementation on top of the sysfs GPIO class
//! - [`Delay`] / [`HostDelay`]: microsecond hold times between pin writes
//!
//! # Example
//!
//! ```rust,no_run
//! use rf_gpio::{Delay, HostDelay, Level, PinDriver, SysfsGpio};
//!
//! let mut gpio = SysfsGpio::open().unwrap();
//! let mut delay = HostDelay::new();
//!
//! gpio.configure_output(17).unwrap();
//! gpio.write(17, Level::High).unwrap();
//! delay.delay_us(350);
//! gpio.write(17, Level::Low).unwrap();
//! gpio.close().unwrap();
//! ```

pub mod delay;
pub mod driver;
pub mod error;
pub mod sysfs;

pub use delay::{Delay, HostDelay, DEFAULT_SPIN_THRESHOLD_US};
pub use driver::{Level, PinDriver};
pub use error::GpioError;
pub use sysfs::{SysfsGpio, DEFAULT_GPIO_ROOT};
