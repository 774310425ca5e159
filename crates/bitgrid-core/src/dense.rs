//! Uncompressed one-value-per-cell grids.
//!
//! [`DenseGrid`] is the canonical representation of a grid and the interchange format
//! for correctness checks: packed grids are built from it and unpacked back into it.
//!
//! # Examples
//!
//! ```
//! use bitgrid_core::DenseGrid;
//!
//! let mut grid = DenseGrid::<u8>::new(4, 3);
//! grid.set(1, 2, 1);
//! assert_eq!(grid.at(1, 2), 1);
//! assert_eq!(grid[(0, 0)], 0);
//! assert_eq!(grid.get(4, 0), None);
//!
//! let parsed: DenseGrid = "
//!     ....
//!     ....
//!     .#..
//! ".parse()?;
//! assert_eq!(parsed, grid);
//! # Ok::<(), bitgrid_core::GridError>(())
//! ```

use std::{
    fmt::{self, Display},
    ops::{Index, IndexMut},
    str::FromStr,
};

use rand::{
    SeedableRng as _,
    distr::{Bernoulli, Distribution as _},
};
use rand_pcg::Pcg64;

use crate::{CellValue, GridError};

/// A row-major grid storing one value per cell.
///
/// The cell `(x, y)` is stored at index `y * width + x`. The buffer always holds exactly
/// `width * height` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenseGrid<T = u8> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// The first difference between two dense grids, as reported by
/// [`DenseGrid::first_mismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch<T> {
    /// The grids have different extents.
    Extent {
        /// `(width, height)` of the expected grid.
        expected: (usize, usize),
        /// `(width, height)` of the actual grid.
        actual: (usize, usize),
    },
    /// The grids differ at a cell.
    Cell {
        /// Column of the first differing cell.
        x: usize,
        /// Row of the first differing cell.
        y: usize,
        /// Value in the expected grid.
        expected: T,
        /// Value in the actual grid.
        actual: T,
    },
}

impl<T: CellValue> DenseGrid<T> {
    /// Creates a grid with every cell set to the default (dead) value.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("grid {width}x{height} overflows the address space"));
        Self {
            width,
            height,
            cells: vec![T::default(); len],
        }
    }

    /// Wraps an existing row-major cell buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellCountMismatch`] if `cells.len() != width * height`, or
    /// [`GridError::ExtentOverflow`] if `width * height` overflows.
    pub fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Result<Self, GridError> {
        let expected = width
            .checked_mul(height)
            .ok_or(GridError::ExtentOverflow { width, height })?;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Creates a grid where each cell is independently alive with probability `density`.
    ///
    /// The same `seed` always produces the same grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDensity`] if `density` is not within `[0, 1]`, or
    /// [`GridError::ExtentOverflow`] if `width * height` overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitgrid_core::DenseGrid;
    ///
    /// let a = DenseGrid::<u8>::random(64, 64, 0.3, 42)?;
    /// let b = DenseGrid::<u8>::random(64, 64, 0.3, 42)?;
    /// assert_eq!(a, b);
    /// assert!(DenseGrid::<u8>::random(8, 8, 1.5, 0).is_err());
    /// # Ok::<(), bitgrid_core::GridError>(())
    /// ```
    pub fn random(width: usize, height: usize, density: f64, seed: u64) -> Result<Self, GridError> {
        let dist = Bernoulli::new(density).map_err(|_| GridError::InvalidDensity { density })?;
        let len = width
            .checked_mul(height)
            .ok_or(GridError::ExtentOverflow { width, height })?;
        let mut rng = Pcg64::seed_from_u64(seed);
        let cells = (0..len)
            .map(|_| T::from_alive(dist.sample(&mut rng)))
            .collect();
        log::debug!("filled random {width}x{height} grid, density={density}, seed={seed}");
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of cells (`width * height`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `(x, y)`, or `None` if it is outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[must_use]
    #[track_caller]
    pub fn at(&self, x: usize, y: usize) -> T {
        self[(x, y)]
    }

    /// Sets the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    #[track_caller]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self[(x, y)] = value;
    }

    /// Returns the row-major cell buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Returns the row-major cell buffer mutably.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Consumes the grid and returns its row-major cell buffer.
    #[must_use]
    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        (0..self.height).map(|y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Returns the number of alive (nonzero) cells.
    #[must_use]
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Returns the first difference between `self` (expected) and `other` (actual).
    ///
    /// Cells are compared in row-major order. Returns `None` if the grids are equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitgrid_core::{DenseGrid, Mismatch};
    ///
    /// let expected = DenseGrid::<u8>::new(3, 3);
    /// let mut actual = expected.clone();
    /// assert_eq!(expected.first_mismatch(&actual), None);
    ///
    /// actual.set(2, 1, 1);
    /// assert_eq!(
    ///     expected.first_mismatch(&actual),
    ///     Some(Mismatch::Cell { x: 2, y: 1, expected: 0, actual: 1 })
    /// );
    /// ```
    #[must_use]
    pub fn first_mismatch(&self, other: &Self) -> Option<Mismatch<T>> {
        if (self.width, self.height) != (other.width, other.height) {
            return Some(Mismatch::Extent {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            });
        }
        let i = self
            .cells
            .iter()
            .zip(&other.cells)
            .position(|(a, b)| a != b)?;
        Some(Mismatch::Cell {
            x: i % self.width,
            y: i / self.width,
            expected: self.cells[i],
            actual: other.cells[i],
        })
    }

    /// Returns a copy with each cell normalized to `1` (alive) or `0` (dead).
    #[must_use]
    pub fn to_binary<U: CellValue>(&self) -> DenseGrid<U> {
        DenseGrid {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .map(|cell| U::from_alive(cell.is_alive()))
                .collect(),
        }
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl<T: CellValue> Index<(usize, usize)> for DenseGrid<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        let Some(i) = self.offset(x, y) else {
            panic!(
                "cell ({x}, {y}) is outside the {}x{} grid",
                self.width, self.height
            );
        };
        &self.cells[i]
    }
}

impl<T: CellValue> IndexMut<(usize, usize)> for DenseGrid<T> {
    #[track_caller]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        let Some(i) = self.offset(x, y) else {
            panic!(
                "cell ({x}, {y}) is outside the {}x{} grid",
                self.width, self.height
            );
        };
        &mut self.cells[i]
    }
}

/// Renders alive cells as `#` and dead cells as `.`, one line per row.
impl<T: CellValue> Display for DenseGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Parses a grid from text.
///
/// Each non-blank line is a row. `#` and `1` are alive cells, `.`, `_` and `0` are dead
/// cells, and whitespace inside a row is ignored. All rows must have the same width.
impl<T: CellValue> FromStr for DenseGrid<T> {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();
        for (i, line) in s.lines().enumerate() {
            let line_number = i + 1;
            let start = cells.len();
            for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
                let alive = match ch {
                    '#' | '1' => true,
                    '.' | '_' | '0' => false,
                    _ => {
                        return Err(GridError::Parse {
                            line: line_number,
                            reason: "unexpected character",
                        });
                    }
                };
                cells.push(T::from_alive(alive));
            }
            let row_width = cells.len() - start;
            if row_width == 0 {
                continue;
            }
            if *width.get_or_insert(row_width) != row_width {
                return Err(GridError::Parse {
                    line: line_number,
                    reason: "row width differs from the first row",
                });
            }
            height += 1;
        }
        Ok(Self {
            width: width.unwrap_or(0),
            height,
            cells,
        })
    }
}
