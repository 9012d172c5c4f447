//! Command-line arguments
//!
//! Six positional, non-negative integers:
//! `<pin> <code> <length> <protocol> <pulse_length> <repeat_transmit>`.
//! Everything is validated here, before any hardware is touched.

use rf_protocol::{apply_override, Protocol, ProtocolCatalog, ProtocolError};
use rf_tx::{RepeatCount, TransmissionRequest};
use thiserror::Error;

/// Usage line printed on a wrong argument count
pub const USAGE: &str = "Syntax: <pin> <code> <length> <protocol> <pulse_length> <repeat_transmit>";

/// Longest code that can be sent
pub const MAX_BIT_LENGTH: u32 = 64;

const ARG_NAMES: [&str; 6] = [
    "pin",
    "code",
    "length",
    "protocol",
    "pulse_length",
    "repeat_transmit",
];

/// Errors in the command-line arguments
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// Wrong number of positional arguments
    #[error("expected {expected} arguments, got {0}", expected = ARG_NAMES.len())]
    WrongCount(usize),

    /// Argument is not an integer
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },

    /// Argument is negative
    #[error("{name} must not be negative")]
    Negative { name: &'static str },

    /// Argument exceeds what the field can hold
    #[error("{name} too large: {value} (max {max})")]
    TooLarge {
        name: &'static str,
        value: String,
        max: String,
    },

    /// Protocol index not in the catalog
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Validated arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Args {
    pub pin: u8,
    pub code: u64,
    pub bit_length: u32,
    /// 1-based catalog index as given
    pub protocol_index: usize,
    /// Catalog protocol with the pulse unit override applied
    pub protocol: Protocol,
    pub repeat_count: RepeatCount,
}

impl Args {
    /// Parse and validate the positional arguments (program name excluded)
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<S> = args.into_iter().collect();
        if raw.len() != ARG_NAMES.len() {
            return Err(ArgsError::WrongCount(raw.len()));
        }

        let values = raw
            .iter()
            .zip(ARG_NAMES)
            .map(|(value, name)| parse_non_negative(name, value.as_ref()))
            .collect::<Result<Vec<u128>, _>>()?;

        let pin = narrow::<u8>(ARG_NAMES[0], values[0])?;
        let code = narrow::<u64>(ARG_NAMES[1], values[1])?;
        let bit_length = narrow::<u32>(ARG_NAMES[2], values[2])?;
        if bit_length > MAX_BIT_LENGTH {
            return Err(ArgsError::TooLarge {
                name: ARG_NAMES[2],
                value: bit_length.to_string(),
                max: MAX_BIT_LENGTH.to_string(),
            });
        }
        let protocol_index = narrow::<usize>(ARG_NAMES[3], values[3])?;
        let pulse_unit = narrow::<u32>(ARG_NAMES[4], values[4])?;
        let repeats = narrow::<u32>(ARG_NAMES[5], values[5])?;

        let protocol = apply_override(ProtocolCatalog::get(protocol_index)?, pulse_unit);

        Ok(Self {
            pin,
            code,
            bit_length,
            protocol_index,
            protocol,
            repeat_count: RepeatCount::from_requested(i64::from(repeats)),
        })
    }

    /// The transmission these arguments describe
    pub fn request(&self) -> TransmissionRequest {
        TransmissionRequest {
            pin: self.pin,
            code: self.code,
            bit_length: self.bit_length,
            protocol: self.protocol,
            repeat_count: self.repeat_count,
        }
    }
}

fn parse_non_negative(name: &'static str, value: &str) -> Result<u128, ArgsError> {
    let trimmed = value.trim();
    match trimmed.parse::<i128>() {
        Ok(n) if n < 0 => Err(ArgsError::Negative { name }),
        Ok(n) => Ok(n as u128),
        // Too many digits for i128 but still numeric
        Err(_) if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) => {
            Err(ArgsError::TooLarge {
                name,
                value: trimmed.to_string(),
                max: u64::MAX.to_string(),
            })
        }
        Err(_) => Err(ArgsError::NotANumber {
            name,
            value: value.to_string(),
        }),
    }
}

fn narrow<T>(name: &'static str, value: u128) -> Result<T, ArgsError>
where
    T: TryFrom<u128> + Bounded,
{
    T::try_from(value).map_err(|_| ArgsError::TooLarge {
        name,
        value: value.to_string(),
        max: T::max_display(),
    })
}

/// Upper bound of an argument type, for error messages
trait Bounded {
    fn max_display() -> String;
}

macro_rules! impl_bounded {
    ($($ty:ty),*) => {
        $(impl Bounded for $ty {
            fn max_display() -> String {
                <$ty>::MAX.to_string()
            }
        })*
    };
}

impl_bounded!(u8, u32, u64, usize);
