//! Element types of dense grids.

use std::fmt::Debug;

/// A value that can be stored in one cell of a [`DenseGrid`](crate::DenseGrid).
///
/// Packing only preserves whether a cell is alive: any nonzero value packs to a set bit,
/// and a set bit unpacks to `1`.
///
/// # Examples
///
/// ```
/// use bitgrid_core::CellValue;
///
/// assert!(7u8.is_alive());
/// assert!(!0u32.is_alive());
/// assert_eq!(u16::from_alive(true), 1);
/// assert_eq!(<bool as CellValue>::from_alive(false), false);
/// ```
pub trait CellValue: Copy + PartialEq + Default + Debug + Send + Sync + 'static {
    /// Returns `true` if the cell is alive (nonzero).
    #[must_use]
    fn is_alive(self) -> bool;

    /// Returns the canonical value for an alive (`1`) or dead (`0`) cell.
    #[must_use]
    fn from_alive(alive: bool) -> Self;
}

macro_rules! impl_cell_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellValue for $ty {
                #[inline]
                fn is_alive(self) -> bool {
                    self != 0
                }

                #[inline]
                fn from_alive(alive: bool) -> Self {
                    <$ty>::from(alive)
                }
            }
        )*
    };
}

impl_cell_value!(u8, u16, u32, u64, i32);

impl CellValue for bool {
    #[inline]
    fn is_alive(self) -> bool {
        self
    }

    #[inline]
    fn from_alive(alive: bool) -> Self {
        alive
    }
}
