//! Conversion round-trip driver for packed grid layouts.
//!
//! Fills a random dense grid, packs it with the chosen layout, unpacks it again and
//! checks that the result matches the original, reporting conversion times and the
//! packed buffer size.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release -p bitgrid-bench -- --layout tile8x8
//! ```
//!
//! Pad the grid with a halo before packing (the padded extents must still fit the
//! layout's tiles):
//!
//! ```sh
//! cargo run --release -p bitgrid-bench -- --layout tile8x4 --width 1022 --height 1022 \
//!     --pad-width 1 --pad-height 1
//! ```
//!
//! Use the rayon thread pool for both conversions:
//!
//! ```sh
//! cargo run --release -p bitgrid-bench -- --layout row --parallel
//! ```
//!
//! Set `RUST_LOG=debug` for library logs.

use std::{process::ExitCode, time::Instant};

use bitgrid_core::{
    DenseGrid, GridError, LayoutPolicy, Mismatch, PackedGrid, Word,
    layout::{RowWise, Tile},
    padding,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// Row-wise packing in 32-bit words.
    #[value(name = "row")]
    Row,
    /// 8x4 tiles in 32-bit words.
    #[value(name = "tile8x4")]
    Tile8x4,
    /// 8x8 tiles in 64-bit words.
    #[value(name = "tile8x8")]
    Tile8x8,
    /// 4x2 tiles in 8-bit words.
    #[value(name = "tile4x2")]
    Tile4x2,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Packed layout to test.
    #[arg(short, long, value_name = "LAYOUT", default_value = "row")]
    layout: LayoutArg,

    /// Grid width in cells, before padding.
    #[arg(long, value_name = "CELLS", default_value_t = 1024 * 16)]
    width: usize,

    /// Grid height in cells, before padding.
    #[arg(long, value_name = "CELLS", default_value_t = 2048 * 8)]
    height: usize,

    /// Probability that a cell starts alive.
    #[arg(long, value_name = "P", default_value_t = 0.3)]
    density: f64,

    /// Seed for the random fill.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,

    /// Rows of dead cells added above and below the grid.
    #[arg(long, value_name = "CELLS", default_value_t = 0)]
    pad_height: usize,

    /// Columns of dead cells added left and right of the grid.
    #[arg(long, value_name = "CELLS", default_value_t = 0)]
    pad_width: usize,

    /// Run both conversions on the rayon thread pool.
    #[arg(long)]
    parallel: bool,
}

/// Outcome of one round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Equal,
    Mismatch,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    log::debug!("{args:?}");

    match run(&args) {
        Ok(Verdict::Equal) => ExitCode::SUCCESS,
        Ok(Verdict::Mismatch) => ExitCode::from(1),
        Err(err) => {
            log::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<Verdict, GridError> {
    let mut original = DenseGrid::<u8>::random(args.width, args.height, args.density, args.seed)?;
    println!(
        "Created random grid: {}x{} (density {}, seed {})",
        args.width, args.height, args.density, args.seed
    );

    if args.pad_height > 0 || args.pad_width > 0 {
        original = padding::transform(original, args.pad_height, args.pad_width);
        println!(
            "Padded grid to {}x{}",
            original.width(),
            original.height()
        );
    }

    match args.layout {
        LayoutArg::Row => round_trip::<RowWise<u32>>(&original, args.parallel),
        LayoutArg::Tile8x4 => round_trip::<Tile<u32, 8, 4>>(&original, args.parallel),
        LayoutArg::Tile8x8 => round_trip::<Tile<u64, 8, 8>>(&original, args.parallel),
        LayoutArg::Tile4x2 => round_trip::<Tile<u8, 4, 2>>(&original, args.parallel),
    }
}

fn round_trip<P>(original: &DenseGrid<u8>, parallel: bool) -> Result<Verdict, GridError>
where
    P: LayoutPolicy + Default,
{
    let policy = P::default();
    println!(
        "Testing {}x{} tiles in {}-bit words{}",
        policy.tile_width(),
        policy.tile_height(),
        <P::Word as Word>::BITS,
        if parallel { " (parallel)" } else { "" }
    );

    let start = Instant::now();
    let packed = if parallel {
        PackedGrid::<P>::par_from_dense(original)?
    } else {
        PackedGrid::<P>::from_dense(original)?
    };
    let elapsed = start.elapsed();
    println!(
        "Converted to packed grid in {:.3} ms",
        elapsed.as_secs_f64() * 1000.0
    );
    println!("Packed memory size: {} bytes", packed.memory_size());

    let start = Instant::now();
    let converted = if parallel {
        packed.par_to_dense::<u8>()
    } else {
        packed.to_dense::<u8>()
    };
    let elapsed = start.elapsed();
    println!(
        "Converted back to dense grid in {:.3} ms",
        elapsed.as_secs_f64() * 1000.0
    );

    match original.first_mismatch(&converted) {
        None => {
            println!("Grids are equal after double conversion");
            Ok(Verdict::Equal)
        }
        Some(Mismatch::Cell {
            x,
            y,
            expected,
            actual,
        }) => {
            println!("Grids are NOT equal after double conversion");
            println!("First mismatch at ({x}, {y}): original={expected}, converted={actual}");
            Ok(Verdict::Mismatch)
        }
        Some(Mismatch::Extent { expected, actual }) => {
            println!(
                "Grids are NOT equal after double conversion: {}x{} became {}x{}",
                expected.0, expected.1, actual.0, actual.1
            );
            Ok(Verdict::Mismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::parse_from(["bitgrid-bench", "--layout", "tile8x8", "--parallel"]);
        assert_eq!(args.layout, LayoutArg::Tile8x8);
        assert!(args.parallel);
        assert_eq!(args.width, 16384);
        assert_eq!(args.pad_height, 0);
    }

    #[test]
    fn test_round_trip_all_layouts() {
        for layout in LayoutArg::value_variants() {
            for parallel in [false, true] {
                let args = Args {
                    layout: *layout,
                    width: 64,
                    height: 16,
                    density: 0.3,
                    seed: 7,
                    pad_height: 0,
                    pad_width: 0,
                    parallel,
                };
                assert_eq!(run(&args), Ok(Verdict::Equal));
            }
        }
    }

    #[test]
    fn test_padding_must_keep_tile_alignment() {
        let args = Args::parse_from([
            "bitgrid-bench",
            "--layout",
            "tile8x4",
            "--width",
            "30",
            "--height",
            "6",
            "--pad-width",
            "1",
            "--pad-height",
            "1",
        ]);
        assert_eq!(run(&args), Ok(Verdict::Equal));

        let args = Args {
            pad_height: 2,
            ..args
        };
        assert!(matches!(
            run(&args),
            Err(GridError::UnalignedExtent { .. })
        ));
    }
}
