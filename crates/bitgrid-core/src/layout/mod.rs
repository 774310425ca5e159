//! Layout policies for packed grids.
//!
//! A layout policy maps a cell coordinate `(x, y)` in a `width × height` grid to a
//! `(word index, bit position)` pair inside a packed word buffer. Policies carry no
//! cell state; they are pure arithmetic over the coordinates.
//!
//! # Policies
//!
//! - [`RowWise`] - each word holds `W::BITS` consecutive cells of one row
//! - [`Tile`] - each word holds one `TW × TH` rectangle, fixed at compile time
//! - [`DynLayout`] - either of the above, chosen at runtime from tile extents
//!
//! The word order is part of the memory layout contract: words are laid out in
//! tile-row-major order, so the word for tile `(tx, ty)` is at index
//! `ty * mem_width + tx`, and inside a word bit `ly * tile_width + lx` holds the cell at
//! local offset `(lx, ly)`. External kernels index the buffer using exactly this
//! arithmetic.
//!
//! # Examples
//!
//! ```
//! use bitgrid_core::layout::{LayoutPolicy, RowWise, Tile};
//!
//! // A 64-wide grid of 32-bit words: two words per row
//! let row = RowWise::<u32>::new();
//! assert_eq!(row.locate(33, 2, 64, 4), (5, 1));
//!
//! // 8x4 tiles in 32-bit words
//! let tile = Tile::<u32, 8, 4>::new();
//! assert_eq!(tile.locate(9, 5, 16, 8), (3, 9));
//! ```

use std::fmt::Debug;

use crate::{GridError, Word};

pub use self::{
    dynamic::{DynLayout, LayoutKind},
    row_wise::RowWise,
    tile::Tile,
};

mod dynamic;
mod row_wise;
mod tile;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Strategy mapping 2D cell coordinates to positions in a packed word buffer.
///
/// The set of policies is closed ([`RowWise`], [`Tile`], [`DynLayout`]); this trait is
/// sealed so the word order documented in the [module docs](self) holds for every
/// implementation.
///
/// For every policy, the cells of one tile map bijectively onto the bit positions
/// `0..bits_per_word()` of a single word, and distinct tiles map to distinct words.
pub trait LayoutPolicy: sealed::Sealed + Copy + Debug + Send + Sync {
    /// Storage word of grids using this policy.
    type Word: Word;

    /// Width of the rectangle of cells stored in one word.
    fn tile_width(&self) -> usize;

    /// Height of the rectangle of cells stored in one word.
    fn tile_height(&self) -> usize;

    /// Index of the word holding the cell `(x, y)`.
    ///
    /// The result is only meaningful for `x < width` and `y < height`.
    fn word_index(&self, x: usize, y: usize, width: usize, height: usize) -> usize;

    /// Bit position of the cell `(x, y)` inside its word, in `0..bits_per_word()`.
    fn bit_position(&self, x: usize, y: usize, width: usize, height: usize) -> usize;

    /// Number of cells held by one word.
    #[inline]
    fn bits_per_word(&self) -> usize {
        <Self::Word as Word>::BITS
    }

    /// Returns `(word_index, bit_position)` for the cell `(x, y)`.
    #[inline]
    fn locate(&self, x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
        (
            self.word_index(x, y, width, height),
            self.bit_position(x, y, width, height),
        )
    }

    /// Number of words per tile row for a grid of the given width.
    #[inline]
    fn mem_width(&self, width: usize) -> usize {
        width.div_ceil(self.tile_width())
    }

    /// Number of tile rows for a grid of the given height.
    #[inline]
    fn mem_height(&self, height: usize) -> usize {
        height.div_ceil(self.tile_height())
    }

    /// Checks that a `width × height` grid can be stored with this policy.
    ///
    /// # Errors
    ///
    /// - [`GridError::TileMismatch`] if the tile does not fill exactly one word
    /// - [`GridError::UnalignedExtent`] if `width` or `height` is not a multiple of the
    ///   tile extents
    fn check_extents(&self, width: usize, height: usize) -> Result<(), GridError> {
        let (tile_width, tile_height) = (self.tile_width(), self.tile_height());
        let bits_per_word = self.bits_per_word();
        if tile_width.checked_mul(tile_height) != Some(bits_per_word) {
            return Err(GridError::TileMismatch {
                tile_width,
                tile_height,
                bits_per_word,
            });
        }
        if width % tile_width != 0 || height % tile_height != 0 {
            return Err(GridError::UnalignedExtent {
                width,
                height,
                tile_width,
                tile_height,
            });
        }
        Ok(())
    }

    /// Validates grid extents against this policy and returns the number of words needed.
    ///
    /// # Errors
    ///
    /// - any error of [`check_extents`](Self::check_extents)
    /// - [`GridError::ExtentOverflow`] if `width * height` overflows
    fn word_count(&self, width: usize, height: usize) -> Result<usize, GridError> {
        self.check_extents(width, height)?;
        let cells = width
            .checked_mul(height)
            .ok_or(GridError::ExtentOverflow { width, height })?;
        Ok(cells / self.bits_per_word())
    }
}
