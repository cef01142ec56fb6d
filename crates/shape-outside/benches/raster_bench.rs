//! Criterion benchmarks for raster scanning and margin dilation.
//! Focus sizes: square images of side {64, 256, 1024}; margins {0, 8, 32}.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shape_outside::api::{Raster, Rect};

/// Alpha of a disk inscribed in a `side × side` image.
fn disk_alpha(side: u32) -> impl Fn(u32, u32) -> u8 {
    let r = side as f64 / 2.0;
    move |x, y| {
        let (dx, dy) = (x as f64 + 0.5 - r, y as f64 + 0.5 - r);
        if dx * dx + dy * dy <= r * r {
            255
        } else {
            0
        }
    }
}

fn bench_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster");
    for &side in &[64u32, 256, 1024] {
        let clip = Rect::new(0.0, 0.0, side as f64, side as f64);
        for margin in [0.0, 8.0, 32.0] {
            let id = format!("scan_m{margin}");
            group.bench_with_input(BenchmarkId::new(id, side), &side, |b, &side| {
                b.iter(|| Raster::from_alpha(side, side, disk_alpha(side), 0.5, margin, clip))
            });
        }

        let raster = Raster::from_alpha(side, side, disk_alpha(side), 0.5, 8.0, clip);
        group.bench_with_input(BenchmarkId::new("bands", side), &raster, |b, raster| {
            let step = side as f64 / 32.0;
            b.iter(|| {
                let mut acc = 0.0;
                let mut y = 0.0;
                while y < side as f64 {
                    acc += raster.right_exclusion_edge(y, y + step).unwrap_or(0.0);
                    y += step;
                }
                acc
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_raster);
criterion_main!(benches);
