//! Transmission request

use rf_protocol::Protocol;

/// Repeat count used when the caller asks for fewer than one repeat
pub const DEFAULT_REPEAT_COUNT: u32 = 10;

/// Number of frames to send; always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatCount(u32);

impl RepeatCount {
    /// Coerce a caller-supplied repeat count
    ///
    /// Values below 1 become [`DEFAULT_REPEAT_COUNT`]; values beyond `u32`
    /// saturate.
    pub fn from_requested(requested: i64) -> Self {
        if requested < 1 {
            Self(DEFAULT_REPEAT_COUNT)
        } else {
            Self(u32::try_from(requested).unwrap_or(u32::MAX))
        }
    }

    /// The count as a number
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self(DEFAULT_REPEAT_COUNT)
    }
}

/// Everything needed for one call to [`crate::Transmitter::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmissionRequest {
    /// Output pin connected to the transmitter's data line
    pub pin: u8,
    /// Code to send
    pub code: u64,
    /// Number of low-order bits of `code` to send, most significant first
    pub bit_length: u32,
    /// Effective protocol, with any pulse unit override already applied
    pub protocol: Protocol,
    /// Number of frames
    pub repeat_count: RepeatCount,
}

impl TransmissionRequest {
    /// Scheduled hold time of the whole transmission in microseconds
    pub fn total_duration_us(&self) -> u64 {
        self.protocol
            .frame_duration_us(self.code, self.bit_length)
            .saturating_mul(u64::from(self.repeat_count.get()))
    }
}
