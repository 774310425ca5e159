//! Zero-filled borders (halos) around dense grids.
//!
//! Padding a `w × h` grid by `(height_padding, width_padding)` produces a
//! `(w + 2 * width_padding) × (h + 2 * height_padding)` grid with the original content
//! centered and every border cell dead. The fill value is always the cell type's
//! default.
//!
//! Choosing the padding so that the padded extents are multiples of a layout's tile
//! extents lets the result be packed directly.
//!
//! # Examples
//!
//! ```
//! use bitgrid_core::{DenseGrid, Tile8x8Grid, padding};
//!
//! let grid: DenseGrid = "
//!     .#....
//!     ..#...
//!     111...
//!     ......
//!     ......
//!     ......
//! ".parse()?;
//!
//! // 6x6 with a one-cell halo is 8x8: exactly one 8x8 tile
//! let grid = padding::transform(grid, 1, 1);
//! assert_eq!((grid.width(), grid.height()), (8, 8));
//! assert_eq!(grid.at(2, 1), 1);
//!
//! let packed = Tile8x8Grid::from_dense(&grid)?;
//! assert_eq!(packed.count_alive(), 5);
//! # Ok::<(), bitgrid_core::GridError>(())
//! ```

use crate::{CellValue, DenseGrid, GridError};

/// Returns a copy of `grid` surrounded by a dead border.
///
/// `height_padding` rows are added above and below, `width_padding` columns to the
/// left and right.
///
/// # Panics
///
/// Panics if the padded extents overflow `usize`.
#[must_use]
pub fn padded<T: CellValue>(
    grid: &DenseGrid<T>,
    height_padding: usize,
    width_padding: usize,
) -> DenseGrid<T> {
    let (width, height) = (grid.width(), grid.height());
    let (new_width, new_height) = padded_extent(width, width_padding)
        .zip(padded_extent(height, height_padding))
        .unwrap_or_else(|| panic!("grid {width}x{height} overflows the address space"));
    let mut result = DenseGrid::new(new_width, new_height);
    let cells = result.as_mut_slice();
    for (y, row) in grid.rows().enumerate() {
        let start = (y + height_padding) * new_width + width_padding;
        cells[start..start + width].copy_from_slice(row);
    }
    log::debug!("padded {width}x{height} grid to {new_width}x{new_height}");
    result
}

fn padded_extent(extent: usize, padding: usize) -> Option<usize> {
    padding.checked_mul(2)?.checked_add(extent)
}

/// Replaces `grid` with its padded version.
///
/// The old grid is consumed; callers rebind their handle to the returned grid:
///
/// ```
/// use bitgrid_core::{DenseGrid, padding};
///
/// let mut grid = DenseGrid::<u8>::new(2, 2);
/// grid = padding::transform(grid, 3, 1);
/// assert_eq!((grid.width(), grid.height()), (4, 8));
/// ```
///
/// # Panics
///
/// Panics if the padded extents overflow `usize`.
#[must_use]
pub fn transform<T: CellValue>(
    grid: DenseGrid<T>,
    height_padding: usize,
    width_padding: usize,
) -> DenseGrid<T> {
    padded(&grid, height_padding, width_padding)
}

/// Removes a border from `grid`, returning the centered interior.
///
/// This is the inverse of [`padded`] for the same padding.
///
/// # Errors
///
/// Returns [`GridError::PaddingTooLarge`] if the border is wider or taller than the grid.
pub fn strip<T: CellValue>(
    grid: &DenseGrid<T>,
    height_padding: usize,
    width_padding: usize,
) -> Result<DenseGrid<T>, GridError> {
    let (width, height) = (grid.width(), grid.height());
    let too_large = GridError::PaddingTooLarge {
        width,
        height,
        height_padding,
        width_padding,
    };
    let inner_width = width_padding
        .checked_mul(2)
        .and_then(|border| width.checked_sub(border))
        .ok_or_else(|| too_large.clone())?;
    let inner_height = height_padding
        .checked_mul(2)
        .and_then(|border| height.checked_sub(border))
        .ok_or(too_large)?;

    let cells = grid
        .rows()
        .skip(height_padding)
        .take(inner_height)
        .flat_map(|row| &row[width_padding..width_padding + inner_width])
        .copied()
        .collect();
    DenseGrid::from_cells(inner_width, inner_height, cells)
}
