use std::marker::PhantomData;

use super::{LayoutPolicy, sealed::Sealed};
use crate::Word;

/// Row-major bit packing: one word holds `W::BITS` consecutive cells of a single row.
///
/// The cell `(x, y)` lives in word `y * ceil(width / W::BITS) + x / W::BITS` at bit
/// `x % W::BITS`. When `width` is not a multiple of `W::BITS` the last word of each row is
/// only partially used; those trailing bits never correspond to a live cell.
///
/// # Examples
///
/// ```
/// use bitgrid_core::layout::{LayoutPolicy, RowWise};
///
/// let policy = RowWise::<u8>::new();
/// assert_eq!(policy.tile_width(), 8);
/// assert_eq!(policy.tile_height(), 1);
///
/// // A 10-wide row needs two bytes
/// assert_eq!(policy.word_index(9, 0, 10, 1), 1);
/// assert_eq!(policy.word_index(0, 1, 10, 2), 2);
/// assert_eq!(policy.bit_position(9, 0, 10, 1), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWise<W> {
    _word: PhantomData<W>,
}

impl<W: Word> RowWise<W> {
    /// Creates the row-wise policy for words of type `W`.
    #[must_use]
    pub const fn new() -> Self {
        Self { _word: PhantomData }
    }
}

impl<W: Word> Default for RowWise<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Sealed for RowWise<W> {}

impl<W: Word> LayoutPolicy for RowWise<W> {
    type Word = W;

    #[inline]
    fn tile_width(&self) -> usize {
        W::BITS
    }

    #[inline]
    fn tile_height(&self) -> usize {
        1
    }

    #[inline]
    fn word_index(&self, x: usize, y: usize, width: usize, _height: usize) -> usize {
        row_word_index(x, y, width, W::BITS)
    }

    #[inline]
    fn bit_position(&self, x: usize, _y: usize, _width: usize, _height: usize) -> usize {
        x % W::BITS
    }
}

#[inline]
pub(super) fn row_word_index(x: usize, y: usize, width: usize, bits_per_word: usize) -> usize {
    let row_words = width.div_ceil(bits_per_word);
    y * row_words + x / bits_per_word
}
