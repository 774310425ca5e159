//! Bit-packed grids.
//!
//! A [`PackedGrid`] stores one bit per cell in a flat buffer of [`Word`]s, arranged by
//! a [`LayoutPolicy`]. The buffer is exposed through [`PackedGrid::words`] so that
//! simulation kernels can index it directly using the policy's arithmetic.
//!
//! # Examples
//!
//! ```
//! use bitgrid_core::{DenseGrid, PackedGrid, layout::Tile};
//!
//! let dense: DenseGrid = "
//!     #.......
//!     ........
//!     ........
//!     .......#
//! ".parse()?;
//!
//! let packed = PackedGrid::<Tile<u8, 4, 2>>::from_dense(&dense)?;
//! assert_eq!(packed.words(), &[0b0000_0001, 0, 0, 0b1000_0000]);
//! assert!(packed.get(7, 3));
//! assert!(!packed.get(8, 3)); // outside the grid: dead
//!
//! assert_eq!(packed.to_dense::<u8>(), dense);
//! # Ok::<(), bitgrid_core::GridError>(())
//! ```

use std::mem;

use crate::{
    CellValue, DenseGrid, GridError, Word,
    layout::{DynLayout, LayoutPolicy, RowWise, Tile},
};

/// Row-wise packed grid with words of type `W`.
pub type RowWiseGrid<W> = PackedGrid<RowWise<W>>;

/// Packed grid of 8×4 tiles in 32-bit words.
pub type Tile8x4Grid = PackedGrid<Tile<u32, 8, 4>>;

/// Packed grid of 8×8 tiles in 64-bit words.
pub type Tile8x8Grid = PackedGrid<Tile<u64, 8, 8>>;

/// Packed grid whose layout is chosen at runtime.
pub type DynGrid<W> = PackedGrid<DynLayout<W>>;

/// A grid storing one bit per cell, laid out by the policy `P`.
///
/// The extents are always multiples of the policy's tile extents, so the buffer holds
/// exactly `width * height / bits_per_word` words and every bit is a live cell.
///
/// Coordinates outside the grid are not errors: [`get`](Self::get) reports them as
/// dead and [`set`](Self::set) ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedGrid<P: LayoutPolicy> {
    width: usize,
    height: usize,
    policy: P,
    words: Vec<P::Word>,
}

impl<P: LayoutPolicy + Default> PackedGrid<P> {
    /// Creates an all-dead grid.
    ///
    /// # Errors
    ///
    /// - [`GridError::UnalignedExtent`] if the extents are not multiples of the tile
    /// - [`GridError::ExtentOverflow`] if `width * height` overflows
    /// - [`GridError::Allocation`] if the word buffer cannot be allocated
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::with_policy(P::default(), width, height)
    }

    /// Packs a dense grid. Nonzero cells become set bits.
    ///
    /// # Errors
    ///
    /// Fails like [`new`](Self::new) if the dense grid's extents don't fit the policy.
    pub fn from_dense<T: CellValue>(dense: &DenseGrid<T>) -> Result<Self, GridError> {
        Self::from_dense_with(P::default(), dense)
    }
}

impl<P: LayoutPolicy> PackedGrid<P> {
    /// Creates an all-dead grid using the given policy value.
    ///
    /// # Errors
    ///
    /// - [`GridError::TileMismatch`] if the policy's tile does not fill a word
    /// - [`GridError::UnalignedExtent`] if the extents are not multiples of the tile
    /// - [`GridError::ExtentOverflow`] if `width * height` overflows
    /// - [`GridError::Allocation`] if the word buffer cannot be allocated
    pub fn with_policy(policy: P, width: usize, height: usize) -> Result<Self, GridError> {
        let count = policy.word_count(width, height)?;
        let mut words = Vec::new();
        words
            .try_reserve_exact(count)
            .map_err(|_| GridError::Allocation { words: count })?;
        words.resize(count, <P::Word as Word>::ZERO);
        log::trace!(
            "allocated {width}x{height} packed grid: {count} words of {} bits",
            policy.bits_per_word()
        );
        Ok(Self {
            width,
            height,
            policy,
            words,
        })
    }

    /// Wraps a word buffer produced elsewhere, such as by a simulation kernel.
    ///
    /// # Errors
    ///
    /// Fails like [`with_policy`](Self::with_policy), or with
    /// [`GridError::WordCountMismatch`] if `words` has the wrong length.
    pub fn from_words(
        policy: P,
        width: usize,
        height: usize,
        words: Vec<P::Word>,
    ) -> Result<Self, GridError> {
        let expected = policy.word_count(width, height)?;
        if words.len() != expected {
            return Err(GridError::WordCountMismatch {
                expected,
                actual: words.len(),
            });
        }
        Ok(Self {
            width,
            height,
            policy,
            words,
        })
    }

    /// Packs a dense grid using the given policy value.
    ///
    /// Only whether a cell is alive is kept; magnitudes are not.
    ///
    /// # Errors
    ///
    /// Fails like [`with_policy`](Self::with_policy) if the dense grid's extents don't
    /// fit the policy.
    pub fn from_dense_with<T: CellValue>(policy: P, dense: &DenseGrid<T>) -> Result<Self, GridError> {
        let mut grid = Self::with_policy(policy, dense.width(), dense.height())?;
        for (y, row) in dense.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                grid.set(x, y, cell.is_alive());
            }
        }
        log::debug!(
            "packed {}x{} grid into {} words",
            grid.width,
            grid.height,
            grid.words.len()
        );
        Ok(grid)
    }

    /// Unpacks into a dense grid with `1` for set bits and `0` otherwise.
    #[must_use]
    pub fn to_dense<T: CellValue>(&self) -> DenseGrid<T> {
        let mut dense = DenseGrid::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                dense.set(x, y, T::from_alive(self.get(x, y)));
            }
        }
        dense
    }

    /// Returns the width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of words per tile row.
    #[must_use]
    pub fn mem_width(&self) -> usize {
        self.policy.mem_width(self.width)
    }

    /// Returns the number of tile rows.
    #[must_use]
    pub fn mem_height(&self) -> usize {
        self.policy.mem_height(self.height)
    }

    /// Returns the layout policy.
    #[must_use]
    pub fn policy(&self) -> P {
        self.policy
    }

    /// Returns the word buffer in layout order.
    #[must_use]
    pub fn words(&self) -> &[P::Word] {
        &self.words
    }

    /// Returns the word buffer in layout order, mutably.
    #[must_use]
    pub fn words_mut(&mut self) -> &mut [P::Word] {
        &mut self.words
    }

    /// Consumes the grid and returns its word buffer.
    #[must_use]
    pub fn into_words(self) -> Vec<P::Word> {
        self.words
    }

    /// Returns the size of the word buffer in bytes.
    #[must_use]
    pub fn memory_size(&self) -> usize {
        self.words.len() * mem::size_of::<P::Word>()
    }

    /// Returns `true` if the cell at `(x, y)` is alive.
    ///
    /// Cells outside the grid are reported as dead.
    #[must_use]
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (word, bit) = self.policy.locate(x, y, self.width, self.height);
        self.words[word].test_bit(bit)
    }

    /// Sets the cell at `(x, y)` alive or dead.
    ///
    /// Writes outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (word, bit) = self.policy.locate(x, y, self.width, self.height);
        let slot = &mut self.words[word];
        *slot = slot.with_bit(bit, value);
    }

    /// Returns the number of alive cells.
    #[must_use]
    pub fn count_alive(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Marks every cell dead.
    pub fn clear(&mut self) {
        self.words.fill(<P::Word as Word>::ZERO);
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;

    use super::PackedGrid;
    use crate::{CellValue, DenseGrid, GridError, Word, layout::LayoutPolicy};

    impl<P: LayoutPolicy + Default> PackedGrid<P> {
        /// Packs a dense grid on the rayon thread pool.
        ///
        /// Produces the same buffer as [`from_dense`](Self::from_dense).
        ///
        /// # Errors
        ///
        /// Fails like [`from_dense`](Self::from_dense).
        pub fn par_from_dense<T: CellValue>(dense: &DenseGrid<T>) -> Result<Self, GridError> {
            Self::par_from_dense_with(P::default(), dense)
        }
    }

    impl<P: LayoutPolicy> PackedGrid<P> {
        /// Packs a dense grid on the rayon thread pool using the given policy value.
        ///
        /// Each task assembles one tile row of words, so every word is written once.
        ///
        /// # Errors
        ///
        /// Fails like [`from_dense_with`](Self::from_dense_with).
        pub fn par_from_dense_with<T: CellValue>(
            policy: P,
            dense: &DenseGrid<T>,
        ) -> Result<Self, GridError> {
            let mut grid = Self::with_policy(policy, dense.width(), dense.height())?;
            let (width, height) = (grid.width, grid.height);
            let mem_width = grid.mem_width();
            if mem_width == 0 {
                return Ok(grid);
            }
            let (tile_width, tile_height) = (policy.tile_width(), policy.tile_height());
            grid.words
                .par_chunks_mut(mem_width)
                .enumerate()
                .for_each(|(tile_y, band)| {
                    for (tile_x, word) in band.iter_mut().enumerate() {
                        let mut packed = <P::Word as Word>::ZERO;
                        for y in tile_y * tile_height..(tile_y + 1) * tile_height {
                            for x in tile_x * tile_width..(tile_x + 1) * tile_width {
                                debug_assert_eq!(
                                    policy.word_index(x, y, width, height),
                                    tile_y * mem_width + tile_x
                                );
                                let bit = policy.bit_position(x, y, width, height);
                                packed = packed.with_bit(bit, dense.at(x, y).is_alive());
                            }
                        }
                        *word = packed;
                    }
                });
            Ok(grid)
        }

        /// Unpacks on the rayon thread pool.
        ///
        /// Produces the same grid as [`to_dense`](Self::to_dense). Each task fills the
        /// cells of one tile row.
        #[must_use]
        pub fn par_to_dense<T: CellValue>(&self) -> DenseGrid<T> {
            let mut dense = DenseGrid::new(self.width, self.height);
            if self.width == 0 || self.height == 0 {
                return dense;
            }
            let width = self.width;
            let tile_height = self.policy.tile_height();
            dense
                .as_mut_slice()
                .par_chunks_mut(width * tile_height)
                .enumerate()
                .for_each(|(tile_y, band)| {
                    for (i, cell) in band.iter_mut().enumerate() {
                        let (x, y) = (i % width, tile_y * tile_height + i / width);
                        *cell = T::from_alive(self.get(x, y));
                    }
                });
            dense
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Binary dense grids whose extents are 1-4 tiles in each direction.
    fn binary_grid(tile_width: usize, tile_height: usize) -> impl Strategy<Value = DenseGrid> {
        (1usize..=4, 1usize..=4).prop_flat_map(move |(tiles_x, tiles_y)| {
            let (width, height) = (tiles_x * tile_width, tiles_y * tile_height);
            prop::collection::vec(0u8..=1, width * height)
                .prop_map(move |cells| DenseGrid::from_cells(width, height, cells).unwrap())
        })
    }

    #[test]
    fn test_row_of_eight_packs_into_one_byte() {
        let dense = DenseGrid::from_cells(8, 1, vec![1u8, 0, 1, 1, 0, 0, 1, 0]).unwrap();
        let packed = RowWiseGrid::<u8>::from_dense(&dense).unwrap();
        assert_eq!(packed.words(), &[0b0100_1101]);
        assert_eq!(packed.to_dense::<u8>().as_slice(), &[1, 0, 1, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_four_tile_grid() {
        // 8x4 grid of 4x2 tiles in bytes: two tiles per row, two tile rows
        let mut grid = PackedGrid::<Tile<u8, 4, 2>>::new(8, 4).unwrap();
        assert_eq!(grid.words().len(), 4);
        grid.set(7, 3, true);
        assert!(grid.get(7, 3));
        assert!(!grid.get(0, 0));
        assert_eq!(grid.words(), &[0, 0, 0, 0b1000_0000]);
    }

    #[test]
    fn test_new_rejects_incompatible_extents() {
        assert_eq!(
            Tile8x8Grid::new(16, 12),
            Err(GridError::UnalignedExtent {
                width: 16,
                height: 12,
                tile_width: 8,
                tile_height: 8,
            })
        );
        assert!(RowWiseGrid::<u32>::new(40, 2).is_err());
        assert!(RowWiseGrid::<u32>::new(64, 3).is_ok());
    }

    #[test]
    fn test_out_of_range_access_is_safe() {
        let mut grid = Tile8x4Grid::new(16, 8).unwrap();
        grid.words_mut().fill(u32::MAX);
        let before = grid.words().to_vec();

        for (x, y) in [(16, 0), (0, 8), (116, 108), (usize::MAX, 0)] {
            assert!(!grid.get(x, y));
            grid.set(x, y, false);
        }
        assert_eq!(grid.words(), &before[..]);

        grid.clear();
        for (x, y) in [(16, 0), (0, 8), (116, 108)] {
            grid.set(x, y, true);
        }
        assert_eq!(grid.count_alive(), 0);
    }

    #[test]
    fn test_set_does_not_touch_neighbors() {
        let mut grid = RowWiseGrid::<u64>::new(128, 2).unwrap();
        grid.set(63, 0, true);
        grid.set(64, 0, true);
        assert_eq!(grid.words(), &[1u64 << 63, 1, 0, 0]);
        grid.set(63, 0, false);
        assert_eq!(grid.words(), &[0, 1, 0, 0]);
        assert_eq!(grid.count_alive(), 1);
    }

    #[test]
    fn test_memory_accessors() {
        let grid = Tile8x8Grid::new(64, 32).unwrap();
        assert_eq!(grid.mem_width(), 8);
        assert_eq!(grid.mem_height(), 4);
        assert_eq!(grid.words().len(), 32);
        assert_eq!(grid.memory_size(), 32 * 8);

        let grid = RowWiseGrid::<u16>::new(48, 5).unwrap();
        assert_eq!(grid.mem_width(), 3);
        assert_eq!(grid.mem_height(), 5);
        assert_eq!(grid.memory_size(), 30);
    }

    #[test]
    fn test_from_words() {
        let layout = DynLayout::<u8>::new(4, 2).unwrap();
        let grid = DynGrid::from_words(layout, 4, 4, vec![0b0010_0000, 0b0000_0001]).unwrap();
        assert!(grid.get(1, 1));
        assert!(grid.get(0, 2));
        assert_eq!(grid.count_alive(), 2);

        assert_eq!(
            DynGrid::from_words(layout, 4, 4, vec![0]),
            Err(GridError::WordCountMismatch {
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_only_liveness_survives_packing() {
        let dense = DenseGrid::from_cells(8, 1, vec![0u32, 2, 0, 300, 0, 0, 0, 1]).unwrap();
        let packed = RowWiseGrid::<u8>::from_dense(&dense).unwrap();
        assert_eq!(
            packed.to_dense::<u32>().as_slice(),
            &[0, 1, 0, 1, 0, 0, 0, 1]
        );
        assert_eq!(
            packed.to_dense::<bool>().as_slice(),
            &[false, true, false, true, false, false, false, true]
        );
    }

    #[test]
    fn test_empty_grid() {
        let dense = DenseGrid::<u8>::new(0, 0);
        let packed = Tile8x4Grid::from_dense(&dense).unwrap();
        assert!(packed.words().is_empty());
        assert_eq!(packed.to_dense::<u8>(), dense);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_unpack_of_zero_height_grid() {
        let dense = DenseGrid::<u8>::new((usize::MAX / 8) * 8, 0);
        let packed = Tile8x8Grid::from_dense(&dense).unwrap();
        assert!(packed.words().is_empty());
        assert_eq!(packed.par_to_dense::<u8>(), packed.to_dense::<u8>());
        assert!(Tile8x8Grid::par_from_dense(&dense).unwrap().words().is_empty());
    }

    #[test]
    fn test_dyn_layout_matches_static_buffer() {
        let dense = DenseGrid::<u8>::random(32, 16, 0.4, 3).unwrap();
        let fixed = Tile8x4Grid::from_dense(&dense).unwrap();
        let dynamic =
            DynGrid::from_dense_with(DynLayout::<u32>::new(8, 4).unwrap(), &dense).unwrap();
        assert_eq!(fixed.words(), dynamic.words());
    }

    proptest! {
        #[test]
        fn prop_row_wise_round_trip(dense in binary_grid(8, 1)) {
            let packed = RowWiseGrid::<u8>::from_dense(&dense).unwrap();
            prop_assert_eq!(packed.count_alive(), dense.count_alive());
            prop_assert_eq!(packed.to_dense::<u8>(), dense);
        }

        #[test]
        fn prop_wide_row_wise_round_trip(dense in binary_grid(64, 1)) {
            let packed = RowWiseGrid::<u64>::from_dense(&dense).unwrap();
            prop_assert_eq!(packed.to_dense::<u8>(), dense);
        }

        #[test]
        fn prop_tile_8x4_round_trip(dense in binary_grid(8, 4)) {
            let packed = Tile8x4Grid::from_dense(&dense).unwrap();
            prop_assert_eq!(packed.to_dense::<u8>(), dense);
        }

        #[test]
        fn prop_tile_8x8_round_trip(dense in binary_grid(8, 8)) {
            let packed = Tile8x8Grid::from_dense(&dense).unwrap();
            prop_assert_eq!(packed.to_dense::<u8>(), dense);
        }

        #[test]
        fn prop_get_matches_dense(dense in binary_grid(4, 2)) {
            let packed = PackedGrid::<Tile<u8, 4, 2>>::from_dense(&dense).unwrap();
            for y in 0..dense.height() {
                for x in 0..dense.width() {
                    prop_assert_eq!(packed.get(x, y), dense.at(x, y) == 1);
                }
            }
        }
    }

    #[cfg(feature = "parallel")]
    proptest! {
        #[test]
        fn prop_parallel_matches_sequential(dense in binary_grid(8, 8)) {
            let sequential = Tile8x8Grid::from_dense(&dense).unwrap();
            let parallel = Tile8x8Grid::par_from_dense(&dense).unwrap();
            prop_assert_eq!(parallel.words(), sequential.words());
            prop_assert_eq!(parallel.par_to_dense::<u8>(), dense);
        }

        #[test]
        fn prop_parallel_row_wise_matches_sequential(dense in binary_grid(16, 1)) {
            let sequential = RowWiseGrid::<u16>::from_dense(&dense).unwrap();
            let parallel = RowWiseGrid::<u16>::par_from_dense(&dense).unwrap();
            prop_assert_eq!(parallel.words(), sequential.words());
            prop_assert_eq!(parallel.par_to_dense::<u8>(), dense);
        }
    }
}
