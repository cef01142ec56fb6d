//! Criterion benchmarks for polygon construction and band queries.
//! Focus sizes: n in {8, 32, 128, 512} vertices, margins {0, 10}.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use shape_outside::api::{
    draw_star_polygon, FillRule, Polygon, ReplayToken, StarCfg, VertexCount,
};

fn star(n: usize, seed: u64) -> Vec<shape_outside::Point> {
    let cfg = StarCfg {
        vertices: VertexCount::Exactly(n),
        ..StarCfg::default()
    };
    draw_star_polygon(cfg, ReplayToken { seed, index: n as u64 })
}

fn bench_polygon(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygon");
    for &n in &[8usize, 32, 128, 512] {
        group.bench_with_input(BenchmarkId::new("build", n), &n, |b, &n| {
            b.iter_batched(
                || star(n, 7),
                |vertices| Polygon::new(vertices, FillRule::Nonzero, 10.0),
                BatchSize::SmallInput,
            )
        });

        for margin in [0.0, 10.0] {
            let poly = Polygon::new(star(n, 11), FillRule::Nonzero, margin);
            let id = format!("bands_m{margin}");
            group.bench_with_input(BenchmarkId::new(id, n), &poly, |b, poly| {
                b.iter(|| {
                    let mut acc = 0.0;
                    let mut y = -10.0;
                    while y < 110.0 {
                        acc += poly.left_exclusion_edge(y, y + 16.0).unwrap_or(0.0);
                        acc += poly.right_exclusion_edge(y, y + 16.0).unwrap_or(0.0);
                        y += 16.0;
                    }
                    acc
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_polygon);
criterion_main!(benches);
