use std::{
    fmt::{self, Display},
    marker::PhantomData,
};

use super::{
    LayoutPolicy,
    row_wise::row_word_index,
    sealed::Sealed,
    tile::{tile_bit_position, tile_word_index},
};
use crate::{GridError, Word};

/// The layout variant selected by a [`DynLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// One word holds consecutive cells of a single row.
    RowWise,
    /// One word holds a `width × height` rectangle.
    Tile {
        /// Tile width in cells.
        width: usize,
        /// Tile height in cells.
        height: usize,
    },
}

impl Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::RowWise => f.write_str("row-wise"),
            LayoutKind::Tile { width, height } => write!(f, "tile {width}x{height}"),
        }
    }
}

/// A layout policy chosen at runtime from tile extents.
///
/// `DynLayout` produces exactly the same word buffer as the static
/// [`RowWise`](super::RowWise) or [`Tile`](super::Tile) policy it stands for, at the
/// cost of a branch per lookup.
///
/// # Examples
///
/// ```
/// use bitgrid_core::layout::{DynLayout, LayoutKind, LayoutPolicy};
///
/// // A full-width, one-row tile selects the row-wise layout
/// let row = DynLayout::<u32>::new(32, 1)?;
/// assert_eq!(row.kind(), LayoutKind::RowWise);
///
/// let tile = DynLayout::<u64>::new(8, 8)?;
/// assert_eq!(tile.kind(), LayoutKind::Tile { width: 8, height: 8 });
/// assert_eq!(tile.locate(9, 9, 16, 16), (3, 9));
///
/// // Tiles must fill exactly one word
/// assert!(DynLayout::<u32>::new(8, 8).is_err());
/// # Ok::<(), bitgrid_core::GridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynLayout<W> {
    kind: LayoutKind,
    _word: PhantomData<W>,
}

impl<W: Word> DynLayout<W> {
    /// Selects a layout from tile extents.
    ///
    /// `(W::BITS, 1)` selects [`LayoutKind::RowWise`]; any other pair whose product is
    /// `W::BITS` selects [`LayoutKind::Tile`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TileMismatch`] if `tile_width * tile_height != W::BITS`.
    pub fn new(tile_width: usize, tile_height: usize) -> Result<Self, GridError> {
        if tile_width.checked_mul(tile_height) != Some(W::BITS) {
            return Err(GridError::TileMismatch {
                tile_width,
                tile_height,
                bits_per_word: W::BITS,
            });
        }
        let kind = if tile_width == W::BITS && tile_height == 1 {
            LayoutKind::RowWise
        } else {
            LayoutKind::Tile {
                width: tile_width,
                height: tile_height,
            }
        };
        Ok(Self {
            kind,
            _word: PhantomData,
        })
    }

    /// Returns the row-wise layout.
    #[must_use]
    pub const fn row_wise() -> Self {
        Self {
            kind: LayoutKind::RowWise,
            _word: PhantomData,
        }
    }

    /// Returns the selected variant.
    #[must_use]
    pub const fn kind(&self) -> LayoutKind {
        self.kind
    }
}

impl<W> Sealed for DynLayout<W> {}

impl<W: Word> LayoutPolicy for DynLayout<W> {
    type Word = W;

    #[inline]
    fn tile_width(&self) -> usize {
        match self.kind {
            LayoutKind::RowWise => W::BITS,
            LayoutKind::Tile { width, .. } => width,
        }
    }

    #[inline]
    fn tile_height(&self) -> usize {
        match self.kind {
            LayoutKind::RowWise => 1,
            LayoutKind::Tile { height, .. } => height,
        }
    }

    #[inline]
    fn word_index(&self, x: usize, y: usize, width: usize, _height: usize) -> usize {
        match self.kind {
            LayoutKind::RowWise => row_word_index(x, y, width, W::BITS),
            LayoutKind::Tile {
                width: tile_width,
                height: tile_height,
            } => tile_word_index(x, y, width, tile_width, tile_height),
        }
    }

    #[inline]
    fn bit_position(&self, x: usize, y: usize, _width: usize, _height: usize) -> usize {
        match self.kind {
            LayoutKind::RowWise => x % W::BITS,
            LayoutKind::Tile {
                width: tile_width,
                height: tile_height,
            } => tile_bit_position(x, y, tile_width, tile_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{RowWise, Tile};

    #[test]
    fn test_rejects_tiles_that_do_not_fill_a_word() {
        assert_eq!(
            DynLayout::<u32>::new(8, 8),
            Err(GridError::TileMismatch {
                tile_width: 8,
                tile_height: 8,
                bits_per_word: 32,
            })
        );
        assert!(DynLayout::<u8>::new(0, 8).is_err());
        assert!(DynLayout::<u8>::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_one_row_tile_narrower_than_word_is_a_tile() {
        assert!(DynLayout::<u8>::new(4, 1).is_err());
        let layout = DynLayout::<u8>::new(1, 8).unwrap();
        assert_eq!(layout.kind(), LayoutKind::Tile { width: 1, height: 8 });
    }

    #[test]
    fn test_matches_static_policies() {
        let dyn_row = DynLayout::<u16>::new(16, 1).unwrap();
        let row = RowWise::<u16>::new();
        let dyn_tile = DynLayout::<u32>::new(8, 4).unwrap();
        let tile = Tile::<u32, 8, 4>::new();
        let (width, height) = (64, 16);
        for y in 0..height {
            for x in 0..width {
                assert_eq!(
                    dyn_row.locate(x, y, width, height),
                    row.locate(x, y, width, height)
                );
                assert_eq!(
                    dyn_tile.locate(x, y, width, height),
                    tile.locate(x, y, width, height)
                );
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DynLayout::<u64>::row_wise().kind().to_string(), "row-wise");
        assert_eq!(
            DynLayout::<u64>::new(16, 4).unwrap().kind().to_string(),
            "tile 16x4"
        );
    }
}
