//! Seeded star-shaped polygons for property tests, benches and demos.
//!
//! A star is `n` vertices at increasing angles around `center`: evenly spaced
//! angles, each nudged by less than half a slot (so the angular order and
//! hence simplicity survive), at radii jittered around `radius`.
//! The same `(seed, index)` token always reproduces the same star.

use super::types::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// How many vertices a star gets. Counts below 3 are raised to 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexCount {
    Exactly(usize),
    /// Uniform over `lo..=hi`.
    Between(usize, usize),
}

impl VertexCount {
    fn draw(self, rng: &mut StdRng) -> usize {
        match self {
            VertexCount::Exactly(n) => n.max(3),
            VertexCount::Between(lo, hi) => {
                let lo = lo.max(3);
                rng.gen_range(lo..=hi.max(lo))
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StarCfg {
    pub vertices: VertexCount,
    /// Angular nudge as a fraction of one slot `2π/n`, clamped to `[0, 0.49]`.
    pub angle_jitter: f64,
    /// Radius factor spread: `radius · (1 ± radius_jitter)`, clamped to `[0, 0.95]`.
    pub radius_jitter: f64,
    pub radius: f64,
    pub center: Point,
    /// Start the first slot at a random angle instead of 0.
    pub random_rotation: bool,
}

impl Default for StarCfg {
    fn default() -> Self {
        Self {
            vertices: VertexCount::Exactly(12),
            angle_jitter: 0.3,
            radius_jitter: 0.5,
            radius: 50.0,
            center: Point::new(50.0, 50.0),
            random_rotation: true,
        }
    }
}

/// Addresses one draw in a reproducible sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    fn rng(self) -> StdRng {
        // SplitMix64 step over the seed, keyed by the index.
        let mut z = self
            .seed
            .wrapping_add(self.index.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        StdRng::seed_from_u64(z ^ (z >> 31))
    }
}

/// Vertices of the star addressed by `tok`, in increasing angle order.
pub fn draw_star_polygon(cfg: StarCfg, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.rng();
    let n = cfg.vertices.draw(&mut rng);
    let slot = TAU / n as f64;
    let angle_jitter = cfg.angle_jitter.clamp(0.0, 0.49) * slot;
    let radius_jitter = cfg.radius_jitter.clamp(0.0, 0.95);
    let radius = cfg.radius.max(1e-9);
    let rotation = if cfg.random_rotation { rng.gen_range(0.0..TAU) } else { 0.0 };

    let mut signed = move || rng.gen_range(-1.0..=1.0);
    (0..n)
        .map(|k| {
            let angle = rotation + k as f64 * slot + signed() * angle_jitter;
            let r = radius * (1.0 + signed() * radius_jitter);
            cfg.center + Point::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

/// `[p0, p1, ...]` as interleaved `[x0, y0, x1, y1, ...]`.
pub fn flatten(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}
