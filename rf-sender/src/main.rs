//! RF Remote Sender
//!
//! Sends a code to an RF remote-controlled switch through a 433 MHz
//! transmitter module wired to a GPIO pin.
//!
//! ```text
//! rfsend <pin> <code> <length> <protocol> <pulse_length> <repeat_transmit>
//! ```

mod args;
mod settings;

use std::process::ExitCode;

use anyhow::Context;
use args::{Args, ArgsError, USAGE};
use rf_gpio::{GpioError, HostDelay, PinDriver, SysfsGpio};
use rf_sim::VirtualPin;
use rf_tx::Transmitter;
use settings::{DriverKind, Settings};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let (settings, settings_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(e) = settings_error {
        warn!("Using default settings: {}", e);
    }

    let opened = run_with(std::env::args().skip(1), &settings, |settings| {
        SysfsGpio::open_at(&settings.gpio_root)
    });

    match opened {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Invalid(e)) => {
            eprintln!("{}", e);
            if matches!(e, ArgsError::WrongCount(_)) {
                eprintln!("{}", USAGE);
            }
            ExitCode::from(2)
        }
        Err(RunError::Failed(e)) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Why a run did not complete
#[derive(Debug)]
enum RunError {
    /// The arguments were rejected; no hardware was touched
    Invalid(ArgsError),
    /// Opening the driver or transmitting failed
    Failed(anyhow::Error),
}

/// Validate `argv`, then open the configured driver and send
///
/// `open_hardware` is only called for the sysfs driver, and only once the
/// arguments are valid.
fn run_with<I, S, O, P>(argv: I, settings: &Settings, open_hardware: O) -> Result<(), RunError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    O: FnOnce(&Settings) -> Result<P, GpioError>,
    P: PinDriver,
{
    // Validate everything before any hardware is claimed
    let args = Args::parse(argv).map_err(RunError::Invalid)?;
    transmit(&args, settings, open_hardware).map_err(RunError::Failed)
}

fn transmit<O, P>(args: &Args, settings: &Settings, open_hardware: O) -> anyhow::Result<()>
where
    O: FnOnce(&Settings) -> Result<P, GpioError>,
    P: PinDriver,
{
    let request = args.request();

    info!("Pin: {}", request.pin);
    info!("Code: {}", request.code);
    info!("Length: {}", request.bit_length);
    info!("Protocol: {} ({})", args.protocol_index, request.protocol.name);
    info!("Pulselength: {}", request.protocol.pulse_unit);
    info!("InvertedSignal: {}", request.protocol.inverted_signal);
    info!("RepeatTransmit: {}", request.repeat_count.get());
    debug!(
        "Effective protocol: {}",
        serde_json::to_string(&request.protocol)?
    );

    match settings.driver {
        DriverKind::Sysfs => {
            let mut gpio = open_hardware(settings).context("failed to open GPIO")?;
            let delay = HostDelay::with_spin_threshold(settings.spin_threshold_us);

            let result = Transmitter::new(&mut gpio, delay).send(&request);
            // Release the pin whether or not the transmission succeeded
            let closed = gpio.close();

            let report = result.context("transmission failed")?;
            closed.context("failed to release GPIO")?;
            info!(
                "Sent {} frames ({} pulses, {}us)",
                report.frames, report.pulses, report.scheduled_us
            );
        }
        DriverKind::Simulated => {
            let mut pin = VirtualPin::with_config(settings.simulated_pin.clone());
            let clock = pin.clock().clone();

            let report = Transmitter::new(&mut pin, clock)
                .send(&request)
                .context("simulated transmission failed")?;
            pin.close()?;

            info!(
                "Simulated {} frames: {} pin writes, {}us airtime",
                report.frames,
                pin.write_count(),
                pin.airtime_us(request.pin)
            );
            debug!("Timeline: {}", serde_json::to_string(pin.events())?);
        }
    }

    Ok(())
}
