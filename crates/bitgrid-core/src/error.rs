/// Errors returned when building or transforming grids.
///
/// Every variant is raised synchronously by the constructing call. Per-cell
/// accesses on a [`PackedGrid`](crate::PackedGrid) never fail: out-of-range
/// reads are dead cells and out-of-range writes are ignored.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The tile does not cover exactly one word.
    #[display(
        "tile {tile_width}x{tile_height} does not fill a {bits_per_word}-bit word"
    )]
    TileMismatch {
        /// Requested tile width.
        tile_width: usize,
        /// Requested tile height.
        tile_height: usize,
        /// Bits in the policy's word.
        bits_per_word: usize,
    },
    /// The grid extents are not multiples of the tile extents.
    #[display(
        "grid {width}x{height} is not a multiple of the {tile_width}x{tile_height} tile"
    )]
    UnalignedExtent {
        /// Requested grid width.
        width: usize,
        /// Requested grid height.
        height: usize,
        /// Tile width of the layout policy.
        tile_width: usize,
        /// Tile height of the layout policy.
        tile_height: usize,
    },
    /// `width * height` does not fit in `usize`.
    #[display("grid {width}x{height} overflows the address space")]
    ExtentOverflow {
        /// Requested grid width.
        width: usize,
        /// Requested grid height.
        height: usize,
    },
    /// The word buffer could not be allocated.
    #[display("failed to allocate {words} words")]
    Allocation {
        /// Number of words requested.
        words: usize,
    },
    /// A cell buffer does not match the grid extents.
    #[display("expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A word buffer does not match the grid extents.
    #[display("expected {expected} words, got {actual}")]
    WordCountMismatch {
        /// Words required by the extents and policy.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
    /// A fill density outside `[0, 1]`.
    #[display("density must be within [0, 1], got {density}")]
    InvalidDensity {
        /// The rejected density.
        density: f64,
    },
    /// The border to strip is larger than the grid.
    #[display(
        "cannot strip {height_padding}x{width_padding} padding from a {width}x{height} grid"
    )]
    PaddingTooLarge {
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
        /// Rows to remove from the top and bottom.
        height_padding: usize,
        /// Columns to remove from the left and right.
        width_padding: usize,
    },
    /// A malformed textual grid.
    #[display("invalid grid text at line {line}: {reason}")]
    Parse {
        /// One-based line number of the offending row.
        line: usize,
        /// What was wrong with the row.
        reason: &'static str,
    },
}
