//! Storage words for packed grids.
//!
//! A [`Word`] is the fixed-width unsigned integer that a
//! [`PackedGrid`](crate::PackedGrid) stores its cells in. Each word holds
//! [`Word::BITS`] cells; bit `0` is the least significant bit.
//!
//! # Examples
//!
//! ```
//! use bitgrid_core::Word;
//!
//! let word = 0u8.with_bit(0, true).with_bit(3, true);
//! assert_eq!(word, 0b0000_1001);
//! assert!(word.test_bit(3));
//! assert!(!word.test_bit(1));
//! assert_eq!(<u64 as Word>::BITS, 64);
//! ```

use std::fmt::Debug;

mod private {
    pub trait Sealed {}
}

/// A fixed-width unsigned integer used as the atomic storage unit of a packed grid.
///
/// This trait is sealed and implemented for `u8`, `u16`, `u32`, `u64` and `u128`.
/// The number of cells per word is derived from the integer's bit width.
pub trait Word: private::Sealed + Copy + Eq + Debug + Default + Send + Sync + 'static {
    /// Number of bits (and therefore cells) held by one word.
    const BITS: usize;

    /// The word with every bit cleared.
    const ZERO: Self;

    /// Returns `true` if the bit at `pos` is set.
    ///
    /// `pos` must be less than [`Self::BITS`].
    #[must_use]
    fn test_bit(self, pos: usize) -> bool;

    /// Returns a copy of this word with the bit at `pos` set to `value`.
    ///
    /// `pos` must be less than [`Self::BITS`].
    #[must_use]
    fn with_bit(self, pos: usize, value: bool) -> Self;

    /// Returns the number of set bits.
    #[must_use]
    fn count_ones(self) -> u32;
}

macro_rules! impl_word {
    ($($ty:ty),* $(,)?) => {
        $(
            impl private::Sealed for $ty {}

            impl Word for $ty {
                const BITS: usize = <$ty>::BITS as usize;
                const ZERO: Self = 0;

                #[inline]
                fn test_bit(self, pos: usize) -> bool {
                    debug_assert!(pos < <Self as Word>::BITS);
                    self & (1 << pos) != 0
                }

                #[inline]
                fn with_bit(self, pos: usize, value: bool) -> Self {
                    debug_assert!(pos < <Self as Word>::BITS);
                    let mask: $ty = 1 << pos;
                    if value { self | mask } else { self & !mask }
                }

                #[inline]
                fn count_ones(self) -> u32 {
                    <$ty>::count_ones(self)
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64, u128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_follow_type_width() {
        assert_eq!(<u8 as Word>::BITS, 8);
        assert_eq!(<u16 as Word>::BITS, 16);
        assert_eq!(<u32 as Word>::BITS, 32);
        assert_eq!(<u64 as Word>::BITS, 64);
        assert_eq!(<u128 as Word>::BITS, 128);
    }

    fn assert_every_bit_addressable<W: Word>() {
        for pos in 0..W::BITS {
            let word = W::ZERO.with_bit(pos, true);
            assert!(word.test_bit(pos), "bit {pos} of {}-bit word", W::BITS);
            assert_eq!(word.count_ones(), 1);
            assert_eq!(word.with_bit(pos, false), W::ZERO);
        }
    }

    #[test]
    fn test_every_width_addresses_all_bits() {
        assert_every_bit_addressable::<u8>();
        assert_every_bit_addressable::<u16>();
        assert_every_bit_addressable::<u32>();
        assert_every_bit_addressable::<u64>();
        assert_every_bit_addressable::<u128>();
    }

    #[test]
    fn test_set_and_clear() {
        let word = u32::ZERO.with_bit(31, true).with_bit(0, true);
        assert_eq!(word, 0x8000_0001);
        assert_eq!(Word::count_ones(word), 2);

        let word = word.with_bit(31, false);
        assert_eq!(word, 1);
        assert!(word.test_bit(0));
        assert!(!word.test_bit(31));
    }

    #[test]
    fn test_setting_twice_is_idempotent() {
        let word = 0u64.with_bit(40, true);
        assert_eq!(word.with_bit(40, true), word);
        assert_eq!(0u64.with_bit(40, false), 0);
    }
}
