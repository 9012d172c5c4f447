//! Protocol timing model
//!
//! A protocol is described by a base pulse unit in microseconds and three
//! ratio pairs. Every symbol is sent as two phases: the "high" phase held for
//! `high * pulse_unit` microseconds, then the "low" phase held for
//! `low * pulse_unit` microseconds. Inverted protocols swap the physical
//! levels of the two phases.

/// Ratio pair describing the two phases of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighLow {
    /// Multiplier for the first (nominally high) phase
    pub high: u32,
    /// Multiplier for the second (nominally low) phase
    pub low: u32,
}

impl HighLow {
    /// Create a ratio pair
    pub const fn new(high: u32, low: u32) -> Self {
        Self { high, low }
    }
}

/// The three kinds of pulse a frame is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    /// Binary 0
    Zero,
    /// Binary 1
    One,
    /// End-of-frame synchronization pulse
    Sync,
}

impl Symbol {
    /// Symbol for a single bit value
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }
}

/// Timing specification for one family of RF receivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Protocol {
    /// Descriptive label (chip or product family)
    pub name: &'static str,
    /// Base time unit in microseconds
    pub pulse_unit: u32,
    /// Synchronization pulse ratios
    pub sync: HighLow,
    /// Ratios for a binary 0
    pub zero: HighLow,
    /// Ratios for a binary 1
    pub one: HighLow,
    /// Swap the physical levels of both phases
    pub inverted_signal: bool,
}

impl Protocol {
    /// Ratio pair used for a symbol
    pub fn ratio(&self, symbol: Symbol) -> HighLow {
        match symbol {
            Symbol::Zero => self.zero,
            Symbol::One => self.one,
            Symbol::Sync => self.sync,
        }
    }

    /// Resolve a symbol to microsecond hold times
    pub fn pulse(&self, symbol: Symbol) -> Pulse {
        Pulse::new(self, self.ratio(symbol))
    }

    /// Copy of this protocol with the pulse unit overridden
    ///
    /// Overrides of 0 and 1 mean "keep the protocol's own pulse unit".
    pub fn with_pulse_unit_override(self, pulse_unit: u32) -> Self {
        apply_override(self, pulse_unit)
    }

    /// Total hold time of one frame (all bits plus sync) in microseconds
    pub fn frame_duration_us(&self, code: u64, bit_length: u32) -> u64 {
        crate::frame_symbols(code, bit_length)
            .map(|symbol| self.pulse(symbol).duration_us())
            .sum()
    }
}

/// Apply a pulse unit override to a protocol
///
/// Returns `base` unchanged unless `pulse_unit` is strictly greater than 1.
pub fn apply_override(base: Protocol, pulse_unit: u32) -> Protocol {
    if pulse_unit > 1 {
        tracing::debug!(
            "Overriding pulse unit of {}: {}us -> {}us",
            base.name,
            base.pulse_unit,
            pulse_unit
        );
        Protocol { pulse_unit, ..base }
    } else {
        base
    }
}

/// One phase of a pulse: a pin level and how long to hold it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// Whether the pin is driven high during this phase
    pub high: bool,
    /// Hold time in microseconds
    pub hold_us: u64,
}

/// A symbol resolved against a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Duration of the nominally high phase in microseconds
    pub high_us: u64,
    /// Duration of the nominally low phase in microseconds
    pub low_us: u64,
    /// Physical levels are swapped
    pub inverted: bool,
}

impl Pulse {
    /// Resolve a ratio pair under a protocol
    pub fn new(protocol: &Protocol, ratio: HighLow) -> Self {
        let unit = u64::from(protocol.pulse_unit);
        Self {
            high_us: unit * u64::from(ratio.high),
            low_us: unit * u64::from(ratio.low),
            inverted: protocol.inverted_signal,
        }
    }

    /// The two phases in emission order
    ///
    /// Non-inverted pulses go high then low; inverted pulses go low then high.
    /// Hold times follow the ratio order regardless of inversion.
    pub fn phases(&self) -> [Phase; 2] {
        [
            Phase {
                high: !self.inverted,
                hold_us: self.high_us,
            },
            Phase {
                high: self.inverted,
                hold_us: self.low_us,
            },
        ]
    }

    /// Total hold time of both phases
    pub fn duration_us(&self) -> u64 {
        self.high_us + self.low_us
    }
}
