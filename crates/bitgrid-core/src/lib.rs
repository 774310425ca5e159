//! Bit-packed encodings of two-dimensional cellular-automaton grids.
//!
//! This crate translates between a dense one-value-per-cell grid and compact
//! one-bit-per-cell grids suitable for high-throughput simulation kernels.
//!
//! # Overview
//!
//! 1. **Dense grids** - [`DenseGrid`], the canonical row-major representation and the
//!    interchange format for correctness checks.
//! 2. **Layout policies** - [`layout`]: [`RowWise`], [`Tile`] and [`DynLayout`] map a
//!    cell to a `(word index, bit position)` pair. Words are any [`Word`] type.
//! 3. **Packed grids** - [`PackedGrid`], a word buffer bound to a layout policy, with
//!    per-cell access and bulk conversion to and from [`DenseGrid`].
//! 4. **Padding** - [`padding`]: zero-filled halos around dense grids.
//! 5. **Algorithm lifecycle** - [`GridAlgorithm`] and [`Session`], the contract for
//!    simulations that consume packed or dense grids.
//!
//! Data flows from a dense grid, optionally through padding, into a packed grid, through
//! an algorithm, and back into a dense grid for verification.
//!
//! [`RowWise`]: layout::RowWise
//! [`Tile`]: layout::Tile
//! [`DynLayout`]: layout::DynLayout
//!
//! # Features
//!
//! - `parallel` - bulk conversions on the rayon thread pool
//!   (`PackedGrid::par_from_dense`, `PackedGrid::par_to_dense`)
//!
//! # Examples
//!
//! ```
//! use bitgrid_core::{DenseGrid, Tile8x4Grid};
//!
//! let dense = DenseGrid::<u8>::random(64, 32, 0.3, 1)?;
//! let packed = Tile8x4Grid::from_dense(&dense)?;
//! assert_eq!(packed.memory_size(), 64 * 32 / 8);
//!
//! let unpacked = packed.to_dense::<u8>();
//! assert_eq!(dense.first_mismatch(&unpacked), None);
//! # Ok::<(), bitgrid_core::GridError>(())
//! ```

pub mod algorithm;
pub mod cell;
pub mod dense;
mod error;
pub mod layout;
pub mod packed;
pub mod padding;
pub mod word;

pub use self::{
    algorithm::{GridAlgorithm, Session},
    cell::CellValue,
    dense::{DenseGrid, Mismatch},
    error::GridError,
    layout::LayoutPolicy,
    packed::{DynGrid, PackedGrid, RowWiseGrid, Tile8x4Grid, Tile8x8Grid},
    word::Word,
};
