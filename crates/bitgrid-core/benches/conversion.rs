//! Benchmarks for bulk dense ↔ packed conversion.
//!
//! Each layout converts the same seeded 1024×1024 grid with 30% live cells.
//!
//! # Benchmarks
//!
//! - **`from_dense`**: packs a dense grid (`row_u32`, `tile8x4`, `tile8x8`, `dyn_tile8x8`)
//! - **`to_dense`**: unpacks the packed grid back into bytes
//! - **`get`**: reads every cell through the layout arithmetic
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench conversion
//! ```

use std::hint;

use bitgrid_core::{
    DenseGrid, LayoutPolicy, PackedGrid,
    layout::{DynLayout, RowWise, Tile},
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const WIDTH: usize = 1024;
const HEIGHT: usize = 1024;
const DENSITY: f64 = 0.3;
const SEED: u64 = 0x5eed;

fn input() -> DenseGrid<u8> {
    DenseGrid::random(WIDTH, HEIGHT, DENSITY, SEED).unwrap()
}

fn bench_layout<P: LayoutPolicy>(c: &mut Criterion, name: &str, policy: P) {
    let dense = input();
    let packed = PackedGrid::from_dense_with(policy, &dense).unwrap();

    c.bench_with_input(BenchmarkId::new("from_dense", name), &dense, |b, dense| {
        b.iter(|| PackedGrid::from_dense_with(policy, hint::black_box(dense)).unwrap());
    });
    c.bench_with_input(BenchmarkId::new("to_dense", name), &packed, |b, packed| {
        b.iter(|| hint::black_box(packed).to_dense::<u8>());
    });
    c.bench_with_input(BenchmarkId::new("get", name), &packed, |b, packed| {
        b.iter(|| {
            let packed = hint::black_box(packed);
            let mut alive = 0usize;
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    alive += usize::from(packed.get(x, y));
                }
            }
            alive
        });
    });
}

fn bench_conversion(c: &mut Criterion) {
    bench_layout(c, "row_u32", RowWise::<u32>::new());
    bench_layout(c, "tile8x4", Tile::<u32, 8, 4>::new());
    bench_layout(c, "tile8x8", Tile::<u64, 8, 8>::new());
    bench_layout(c, "dyn_tile8x8", DynLayout::<u64>::new(8, 8).unwrap());
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
