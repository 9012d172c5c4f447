//! Linux sysfs GPIO driver
//!
//! Pins are claimed through `<root>/export`, configured through
//! `<root>/gpioN/direction` and driven through `<root>/gpioN/value`. The
//! value file is kept open so each write is a single seek and write.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::driver::{Level, PinDriver};
use crate::error::GpioError;

/// Default location of the sysfs GPIO class
pub const DEFAULT_GPIO_ROOT: &str = "/sys/class/gpio";

/// Number of times to retry opening `direction` after export
const EXPORT_POLL_ATTEMPTS: u32 = 50;

/// Interval between retries while udev applies permissions
const EXPORT_POLL_INTERVAL: Duration = Duration::from_millis(2);

const EINVAL: i32 = 22;
const EBUSY: i32 = 16;

/// Handle on the sysfs GPIO class
///
/// Pins exported by this handle are unexported on [`PinDriver::close`] and
/// when the handle is dropped.
#[derive(Debug)]
pub struct SysfsGpio {
    root: PathBuf,
    /// Open `value` files for configured pins
    values: HashMap<u8, File>,
    /// Pins this handle exported (and must unexport)
    exported: Vec<u8>,
}

impl SysfsGpio {
    /// Open the GPIO class at [`DEFAULT_GPIO_ROOT`]
    pub fn open() -> Result<Self, GpioError> {
        Self::open_at(DEFAULT_GPIO_ROOT)
    }

    /// Open a GPIO class rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns [`GpioError::Access`] if the directory is missing or its
    /// `export` file cannot be opened for writing.
    pub fn open_at(root: impl Into<PathBuf>) -> Result<Self, GpioError> {
        let root = root.into();

        if !root.is_dir() {
            return Err(GpioError::Access {
                path: root.display().to_string(),
                reason: "GPIO class directory not found".to_string(),
            });
        }

        let export = root.join("export");
        OpenOptions::new()
            .write(true)
            .open(&export)
            .map_err(|e| GpioError::Access {
                path: export.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Opened GPIO at {}", root.display());

        Ok(Self {
            root,
            values: HashMap::new(),
            exported: Vec::new(),
        })
    }

    /// Root directory of this handle
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pins currently configured as outputs
    pub fn configured_pins(&self) -> impl Iterator<Item = u8> + '_ {
        self.values.keys().copied()
    }

    fn pin_dir(&self, pin: u8) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    fn export(&mut self, pin: u8) -> Result<(), GpioError> {
        match fs::write(self.root.join("export"), pin.to_string()) {
            Ok(()) => {
                debug!("Exported pin {}", pin);
                self.exported.push(pin);
                Ok(())
            }
            Err(e) if e.raw_os_error() == Some(EBUSY) => {
                debug!("Pin {} already exported", pin);
                Ok(())
            }
            Err(e) if e.raw_os_error() == Some(EINVAL) => Err(GpioError::InvalidPin(pin)),
            Err(source) => Err(GpioError::Io { pin, source }),
        }
    }

    /// Write `out` to the pin's direction file, waiting for udev if needed
    fn set_direction_out(&self, pin: u8) -> Result<(), GpioError> {
        let direction = self.pin_dir(pin).join("direction");
        let mut attempt = 0;

        loop {
            match OpenOptions::new().write(true).open(&direction) {
                Ok(mut file) => {
                    return file
                        .write_all(b"out")
                        .map_err(|source| GpioError::Io { pin, source });
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                    ) && attempt < EXPORT_POLL_ATTEMPTS =>
                {
                    attempt += 1;
                    std::thread::sleep(EXPORT_POLL_INTERVAL);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(GpioError::InvalidPin(pin));
                }
                Err(source) => return Err(GpioError::Io { pin, source }),
            }
        }
    }
}

impl PinDriver for SysfsGpio {
    fn configure_output(&mut self, pin: u8) -> Result<(), GpioError> {
        if self.values.contains_key(&pin) {
            return Ok(());
        }

        self.export(pin)?;
        self.set_direction_out(pin)?;

        let value = OpenOptions::new()
            .write(true)
            .open(self.pin_dir(pin).join("value"))
            .map_err(|source| GpioError::Io { pin, source })?;
        self.values.insert(pin, value);

        info!("Configured pin {} as output", pin);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        let file = self
            .values
            .get_mut(&pin)
            .ok_or(GpioError::NotConfigured(pin))?;

        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.write_all(level.as_sysfs()))
            .map_err(|source| GpioError::Io { pin, source })
    }

    fn close(&mut self) -> Result<(), GpioError> {
        self.values.clear();

        let mut first_error = None;
        for pin in self.exported.drain(..) {
            match fs::write(self.root.join("unexport"), pin.to_string()) {
                Ok(()) => debug!("Unexported pin {}", pin),
                Err(source) => {
                    warn!("Failed to unexport pin {}: {}", pin, source);
                    first_error.get_or_insert(GpioError::Io { pin, source });
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for SysfsGpio {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Error releasing GPIO on drop: {}", e);
        }
    }
}
