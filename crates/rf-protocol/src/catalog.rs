//! Protocol catalog
//!
//! The timing values below must match existing receivers exactly. Index 1 is
//! the first rc-switch protocol; the higher indices cover specific encoder
//! chips and products.

use crate::error::ProtocolError;
use crate::protocol::{HighLow, Protocol};

const fn protocol(
    name: &'static str,
    pulse_unit: u32,
    sync: (u32, u32),
    zero: (u32, u32),
    one: (u32, u32),
    inverted_signal: bool,
) -> Protocol {
    Protocol {
        name,
        pulse_unit,
        sync: HighLow::new(sync.0, sync.1),
        zero: HighLow::new(zero.0, zero.1),
        one: HighLow::new(one.0, one.1),
        inverted_signal,
    }
}

static PROTOCOLS: [Protocol; 12] = [
    protocol("rc-switch protocol 1", 350, (1, 31), (1, 3), (3, 1), false),
    protocol("rc-switch protocol 2", 650, (1, 10), (1, 2), (2, 1), false),
    protocol("rc-switch protocol 3", 100, (30, 71), (4, 11), (9, 6), false),
    protocol("rc-switch protocol 4", 380, (1, 6), (1, 3), (3, 1), false),
    protocol("rc-switch protocol 5", 500, (6, 14), (1, 2), (2, 1), false),
    protocol("HT6P20B", 450, (23, 1), (1, 2), (2, 1), true),
    protocol("HS2303-PT (Aukey remote)", 150, (2, 62), (1, 6), (6, 1), false),
    protocol("Conrad RS-200 RX", 200, (3, 130), (7, 16), (3, 16), false),
    protocol("Conrad RS-200 TX", 200, (130, 7), (16, 7), (16, 3), true),
    protocol("1ByOne doorbell", 365, (18, 1), (3, 1), (1, 3), true),
    protocol("HT12E", 270, (36, 1), (1, 2), (2, 1), true),
    protocol("SM5212", 320, (36, 1), (1, 2), (2, 1), true),
];

/// Catalog of known protocols
pub struct ProtocolCatalog;

impl ProtocolCatalog {
    /// Look up a protocol by its 1-based index
    pub fn get(index: usize) -> Result<Protocol, ProtocolError> {
        index
            .checked_sub(1)
            .and_then(|i| PROTOCOLS.get(i))
            .copied()
            .ok_or(ProtocolError::OutOfRange {
                index,
                size: PROTOCOLS.len(),
            })
    }

    /// Number of protocols in the catalog
    pub fn len() -> usize {
        PROTOCOLS.len()
    }

    /// All protocols with their 1-based indices
    pub fn iter() -> impl Iterator<Item = (usize, Protocol)> {
        PROTOCOLS.iter().enumerate().map(|(i, p)| (i + 1, *p))
    }
}
