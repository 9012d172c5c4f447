//! Integration tests for the RF transmitter
//!
//! These tests drive complete transmissions into a virtual pin and check:
//! - Bit order and sync placement for every repeat
//! - Phase levels for normal and inverted protocols
//! - Hold times derived from the pulse unit and ratios
//! - Pulse unit overrides and repeat count coercion
//! - Pin state after success and after failure

use rf_gpio::Level;
use rf_protocol::{apply_override, frame_symbols, Protocol, ProtocolCatalog, Symbol};
use rf_sim::{RecordedPulse, VirtualClock, VirtualPin};
use rf_tx::{RepeatCount, TransmissionRequest, Transmitter, TxError};

const PIN: u8 = 17;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    pub fn request(
        code: u64,
        bit_length: u32,
        protocol: Protocol,
        repeats: i64,
    ) -> TransmissionRequest {
        TransmissionRequest {
            pin: PIN,
            code,
            bit_length,
            protocol,
            repeat_count: RepeatCount::from_requested(repeats),
        }
    }

    /// Run a request against a fresh virtual pin
    pub fn run(request: &TransmissionRequest) -> VirtualPin {
        let clock = VirtualClock::new();
        let mut pin = VirtualPin::new(clock.clone());
        Transmitter::new(&mut pin, clock)
            .send(request)
            .expect("transmission should succeed");
        pin
    }

    /// Map recorded pulses back to symbols by matching hold times
    pub fn decode(protocol: &Protocol, pulses: &[RecordedPulse]) -> Vec<Symbol> {
        pulses
            .iter()
            .map(|p| {
                let holds = (p.first.hold_us, p.second.hold_us);
                [Symbol::One, Symbol::Zero, Symbol::Sync]
                    .into_iter()
                    .find(|s| {
                        let pulse = protocol.pulse(*s);
                        (pulse.high_us, pulse.low_us) == holds
                    })
                    .expect("pulse matches a symbol")
            })
            .collect()
    }
}

// ============================================================================
// Frame Structure
// ============================================================================

#[test]
fn test_code_five_single_repeat() {
    let protocol = ProtocolCatalog::get(1).unwrap();
    let pin = helpers::run(&helpers::request(5, 3, protocol, 1));

    assert_eq!(
        helpers::decode(&protocol, &pin.pulses(PIN)),
        vec![Symbol::One, Symbol::Zero, Symbol::One, Symbol::Sync]
    );
}

#[test]
fn test_sync_ends_every_repeat() {
    let protocol = ProtocolCatalog::get(4).unwrap();
    let pin = helpers::run(&helpers::request(0b10, 2, protocol, 3));

    let symbols = helpers::decode(&protocol, &pin.pulses(PIN));
    assert_eq!(symbols.len(), 9);
    for frame in symbols.chunks(3) {
        assert_eq!(frame, &[Symbol::One, Symbol::Zero, Symbol::Sync]);
    }
}

#[test]
fn test_zero_length_sends_only_sync() {
    let protocol = ProtocolCatalog::get(1).unwrap();
    let pin = helpers::run(&helpers::request(0xFF, 0, protocol, 2));

    assert_eq!(
        helpers::decode(&protocol, &pin.pulses(PIN)),
        vec![Symbol::Sync, Symbol::Sync]
    );
}

#[test]
fn test_default_repeat_count() {
    let protocol = ProtocolCatalog::get(1).unwrap();

    for requested in [0, -1, -100] {
        let pin = helpers::run(&helpers::request(1, 1, protocol, requested));
        let syncs = helpers::decode(&protocol, &pin.pulses(PIN))
            .into_iter()
            .filter(|s| *s == Symbol::Sync)
            .count();
        assert_eq!(syncs, 10, "requested {requested}");
    }
}

// ============================================================================
// Levels and Timing
// ============================================================================

#[test]
fn test_one_pulse_hold_times() {
    let protocol = ProtocolCatalog::get(1).unwrap();
    let pin = helpers::run(&helpers::request(1, 1, protocol, 1));

    let one = pin.pulses(PIN)[0];
    assert_eq!(one.first.level, Level::High);
    assert_eq!(one.first.hold_us, 1050);
    assert_eq!(one.second.level, Level::Low);
    assert_eq!(one.second.hold_us, 350);
}

#[test]
fn test_levels_for_every_protocol() {
    for (index, protocol) in ProtocolCatalog::iter() {
        let pin = helpers::run(&helpers::request(0b1100, 4, protocol, 2));
        let (first, second) = if protocol.inverted_signal {
            (Level::Low, Level::High)
        } else {
            (Level::High, Level::Low)
        };

        let pulses = pin.pulses(PIN);
        assert_eq!(pulses.len(), 10, "protocol {index}");
        for pulse in pulses {
            assert_eq!(pulse.first.level, first, "protocol {index}");
            assert_eq!(pulse.second.level, second, "protocol {index}");
        }
        assert_eq!(pin.last_level(PIN), Some(Level::Low), "protocol {index}");
    }
}

#[test]
fn test_inverted_protocol_ends_low() {
    // The last phase of an inverted pulse is high, so the final write matters
    let protocol = ProtocolCatalog::get(11).unwrap();
    let pin = helpers::run(&helpers::request(0b1, 1, protocol, 1));

    let phases = pin.phases(PIN);
    assert_eq!(phases[phases.len() - 2].level, Level::High);
    assert_eq!(phases[phases.len() - 1].level, Level::Low);
}

#[test]
fn test_airtime_matches_schedule() {
    let protocol = ProtocolCatalog::get(3).unwrap();
    let request = helpers::request(0xABCD, 16, protocol, 4);
    let pin = helpers::run(&request);

    assert_eq!(pin.airtime_us(PIN), request.total_duration_us());
}

// ============================================================================
// Pulse Unit Override
// ============================================================================

#[test]
fn test_override_changes_hold_times() {
    let protocol = apply_override(ProtocolCatalog::get(1).unwrap(), 500);
    let pin = helpers::run(&helpers::request(1, 1, protocol, 1));

    let one = pin.pulses(PIN)[0];
    assert_eq!(one.first.hold_us, 1500);
    assert_eq!(one.second.hold_us, 500);
}

#[test]
fn test_small_override_ignored() {
    let base = ProtocolCatalog::get(2).unwrap();
    for value in [0, 1] {
        let protocol = apply_override(base, value);
        let pin = helpers::run(&helpers::request(0, 0, protocol, 1));
        let sync = pin.pulses(PIN)[0];
        assert_eq!(sync.first.hold_us, 650);
        assert_eq!(sync.second.hold_us, 6500);
    }
}

// ============================================================================
// Failure Handling
// ============================================================================

#[test]
fn test_failure_stops_transmission() {
    let clock = VirtualClock::new();
    let mut pin = VirtualPin::new(clock.clone());
    pin.fail_once_at(7);

    let protocol = ProtocolCatalog::get(1).unwrap();
    let result = Transmitter::new(&mut pin, clock).send(&helpers::request(0xF, 4, protocol, 5));

    assert!(matches!(result, Err(TxError::Aborted { pulses_sent: 3, .. })));
    // Seven successful writes before the failure, then the forced low
    assert_eq!(pin.write_count(), 8);
    assert_eq!(pin.last_level(PIN), Some(Level::Low));
}

#[test]
fn test_driver_borrowed_not_consumed() {
    let clock = VirtualClock::new();
    let mut pin = VirtualPin::new(clock.clone());
    let protocol = ProtocolCatalog::get(1).unwrap();

    Transmitter::new(&mut pin, clock.clone())
        .send(&helpers::request(1, 1, protocol, 1))
        .unwrap();
    Transmitter::new(&mut pin, clock)
        .send(&helpers::request(0, 1, protocol, 1))
        .unwrap();

    // Two phases per bit and sync, plus the closing low, for each send
    assert_eq!(pin.write_count(), 10);
    let pulses = pin.pulses(PIN);
    assert_eq!(pulses.len(), 4);
    assert!(pulses.iter().all(|p| p.first.level == Level::High));
    assert_eq!(pulses[3].first.hold_us, 350);
    assert_eq!(pulses[3].second.hold_us, 31 * 350);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn protocol() -> impl Strategy<Value = Protocol> {
        (1usize..=12).prop_map(|i| ProtocolCatalog::get(i).unwrap())
    }

    proptest! {
        #[test]
        fn pulses_follow_frame_symbols(
            code: u64,
            bit_length in 0u32..=64,
            protocol in protocol(),
            repeats in 1i64..4
        ) {
            let pin = helpers::run(&helpers::request(code, bit_length, protocol, repeats));
            let pulses = pin.pulses(PIN);

            let expected: Vec<_> = (0..repeats)
                .flat_map(|_| frame_symbols(code, bit_length))
                .map(|s| protocol.pulse(s))
                .collect();

            prop_assert_eq!(pulses.len(), expected.len());
            for (recorded, pulse) in pulses.iter().zip(&expected) {
                prop_assert_eq!(recorded.first.hold_us, pulse.high_us);
                prop_assert_eq!(recorded.second.hold_us, pulse.low_us);
            }
            prop_assert_eq!(pin.last_level(PIN), Some(Level::Low));
        }

        #[test]
        fn override_scales_airtime(
            code: u64,
            bit_length in 0u32..=32,
            unit in 2u32..1000
        ) {
            let protocol = apply_override(ProtocolCatalog::get(1).unwrap(), unit);
            let request = helpers::request(code, bit_length, protocol, 1);
            let pin = helpers::run(&request);

            prop_assert_eq!(pin.airtime_us(PIN) % u64::from(unit), 0);
            prop_assert_eq!(pin.airtime_us(PIN), request.total_duration_us());
        }
    }
}
