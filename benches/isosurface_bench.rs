//! Benchmark for isosurface extraction over a height field.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;

use swe_viz::{extract_isosurface, BoundingBox, HeightFieldSdf};

fn wave_field(n: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, n), |(i, j)| {
        let x = i as f64 / (n - 1) as f64;
        let y = j as f64 / (n - 1) as f64;
        0.3 * (6.0 * x).sin() * (6.0 * y).cos()
    })
}

fn bench_extract(c: &mut Criterion) {
    let eta = wave_field(128);
    let bounds = BoundingBox::new([0.0, 0.0, -1.0], [1.0, 1.0, 1.0]).unwrap();
    let steps = bounds.grid_resolution(64);

    c.bench_function("extract_isosurface_64", |b| {
        b.iter(|| {
            let sdf = HeightFieldSdf::new(black_box(&eta), bounds);
            extract_isosurface(&sdf, &bounds, steps)
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
