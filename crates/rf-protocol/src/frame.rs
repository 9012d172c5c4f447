//! Frame encoding
//!
//! A frame is every bit of the code, most-significant first, followed by a
//! single sync symbol.

use crate::protocol::Symbol;

/// Iterator over the symbols of one frame
///
/// Created by [`frame_symbols`].
#[derive(Debug, Clone)]
pub struct FrameSymbols {
    code: u64,
    /// Bits still to emit; the next bit index is `remaining - 1`
    remaining: u32,
    sync_sent: bool,
}

/// Encode `bit_length` bits of `code` as a frame
///
/// Bit positions at or beyond 64 have no counterpart in `code` and are sent
/// as zeros.
pub fn frame_symbols(code: u64, bit_length: u32) -> FrameSymbols {
    FrameSymbols {
        code,
        remaining: bit_length,
        sync_sent: false,
    }
}

impl FrameSymbols {
    fn bit(&self, index: u32) -> bool {
        self.code.checked_shr(index).unwrap_or(0) & 1 == 1
    }
}

impl Iterator for FrameSymbols {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if self.remaining > 0 {
            self.remaining -= 1;
            Some(Symbol::from_bit(self.bit(self.remaining)))
        } else if !self.sync_sent {
            self.sync_sent = true;
            Some(Symbol::Sync)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize + usize::from(!self.sync_sent);
        (len, Some(len))
    }
}

impl ExactSizeIterator for FrameSymbols {}

impl std::iter::FusedIterator for FrameSymbols {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_msb_first() {
        let symbols: Vec<_> = frame_symbols(5, 3).collect();
        assert_eq!(
            symbols,
            vec![Symbol::One, Symbol::Zero, Symbol::One, Symbol::Sync]
        );
    }

    #[test]
    fn test_zero_length_is_sync_only() {
        let symbols: Vec<_> = frame_symbols(0xFFFF, 0).collect();
        assert_eq!(symbols, vec![Symbol::Sync]);
    }

    #[test]
    fn test_leading_zeros_are_sent() {
        let symbols: Vec<_> = frame_symbols(1, 4).collect();
        assert_eq!(
            symbols,
            vec![
                Symbol::Zero,
                Symbol::Zero,
                Symbol::Zero,
                Symbol::One,
                Symbol::Sync
            ]
        );
    }

    #[test]
    fn test_bits_above_length_ignored() {
        // Only the low two bits of 0b1110 are sent
        let symbols: Vec<_> = frame_symbols(0b1110, 2).collect();
        assert_eq!(symbols, vec![Symbol::One, Symbol::Zero, Symbol::Sync]);
    }

    #[test]
    fn test_full_width_code() {
        let symbols: Vec<_> = frame_symbols(u64::MAX, 64).collect();
        assert_eq!(symbols.len(), 65);
        assert!(symbols[..64].iter().all(|s| *s == Symbol::One));
        assert_eq!(symbols[64], Symbol::Sync);
    }

    #[test]
    fn test_length_beyond_64_pads_with_zeros() {
        let symbols: Vec<_> = frame_symbols(u64::MAX, 66).collect();
        assert_eq!(symbols.len(), 67);
        assert_eq!(symbols[0], Symbol::Zero);
        assert_eq!(symbols[1], Symbol::Zero);
        assert!(symbols[2..66].iter().all(|s| *s == Symbol::One));
    }

    #[test]
    fn test_exact_size() {
        let mut iter = frame_symbols(0b11, 2);
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }

    proptest! {
        #[test]
        fn frame_decodes_back_to_code(code: u64, bit_length in 0u32..=64) {
            let symbols: Vec<_> = frame_symbols(code, bit_length).collect();
            prop_assert_eq!(symbols.len(), bit_length as usize + 1);
            prop_assert_eq!(*symbols.last().unwrap(), Symbol::Sync);

            let decoded = symbols[..bit_length as usize]
                .iter()
                .fold(0u64, |acc, s| (acc << 1) | u64::from(*s == Symbol::One));
            let mask = if bit_length == 64 { u64::MAX } else { (1u64 << bit_length) - 1 };
            prop_assert_eq!(decoded, code & mask);
        }

        #[test]
        fn sync_appears_exactly_once(code: u64, bit_length in 0u32..=80) {
            let syncs = frame_symbols(code, bit_length).filter(|s| *s == Symbol::Sync).count();
            prop_assert_eq!(syncs, 1);
        }
    }
}
