//! Random obstacle scenes (seeded, replayable).
//!
//! Model
//! - Each segment gets a uniform midpoint inside the bounds shrunk by
//!   `margin`, a uniform direction and a uniform length in
//!   `[min_len, max_len]`; draws that leave the shrunk bounds are retried.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so scene `index` of stream `seed` can be regenerated on its own.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Scene;
use crate::geom::{Bounds, Point};

/// Generator parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCfg {
    pub segments: usize,
    pub min_len: f64,
    pub max_len: f64,
    /// Distance kept from every boundary edge.
    pub margin: f64,
    /// Draws per segment before giving up on it.
    pub max_attempts: usize,
}

impl Default for SceneCfg {
    fn default() -> Self {
        Self {
            segments: 12,
            min_len: 20.0,
            max_len: 120.0,
            margin: 5.0,
            max_attempts: 32,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn rng(self, stream: u64) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index ^ mix(stream.wrapping_add(0x9e3779b97f4a7c15))));
        StdRng::seed_from_u64(k)
    }
}

const SEGMENT_STREAM: u64 = 1;
const SOURCE_STREAM: u64 = 2;

/// Draw a scene inside `bounds`. May hold fewer than `cfg.segments` segments
/// when the bounds are too small for the requested lengths.
pub fn random_scene(bounds: Bounds, cfg: SceneCfg, tok: ReplayToken) -> Scene {
    let mut rng = tok.rng(SEGMENT_STREAM);
    let inner = shrink(&bounds, cfg.margin);
    let mut scene = Scene::new(bounds);
    let lo = cfg.min_len.max(1e-6);
    let hi = cfg.max_len.max(lo);
    for _ in 0..cfg.segments {
        for _ in 0..cfg.max_attempts.max(1) {
            let mid = uniform_point(&mut rng, &inner);
            let theta = rng.gen::<f64>() * std::f64::consts::TAU;
            let half = 0.5 * rng.gen_range(lo..=hi);
            let d = Vector2::new(theta.cos(), theta.sin()) * half;
            let (a, b) = (mid - d, mid + d);
            if inner.contains(a) && inner.contains(b) {
                let kept = scene.push_segment(a, b);
                debug_assert!(matches!(kept, Ok(true)), "in-bounds and non-degenerate");
                break;
            }
        }
    }
    scene
}

/// Draw a source at least `clearance` away from every obstacle in `scene`.
///
/// Returns `None` if no candidate qualifies within a fixed number of draws.
pub fn random_source(scene: &Scene, clearance: f64, tok: ReplayToken) -> Option<Point> {
    let mut rng = tok.rng(SOURCE_STREAM);
    let inner = shrink(scene.bounds(), clearance);
    for _ in 0..256 {
        let p = uniform_point(&mut rng, &inner);
        let clear = scene
            .segments()
            .iter()
            .all(|&(a, b)| distance_to_segment(p, a, b) >= clearance);
        if clear {
            return Some(p);
        }
    }
    None
}

fn shrink(b: &Bounds, by: f64) -> Bounds {
    let by = by.max(0.0).min(0.49 * b.width().min(b.height()));
    let d = Vector2::new(by, by);
    Bounds::new(b.min + d, b.max - d)
}

fn uniform_point<R: Rng>(rng: &mut R, b: &Bounds) -> Point {
    Point::new(
        b.min.x + rng.gen::<f64>() * b.width(),
        b.min.y + rng.gen::<f64>() * b.height(),
    )
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (a + ab * t - p).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_is_deterministic() {
        let b = Bounds::WINDOW;
        let tok = ReplayToken { seed: 42, index: 3 };
        let s1 = random_scene(b, SceneCfg::default(), tok);
        let s2 = random_scene(b, SceneCfg::default(), tok);
        assert_eq!(s1, s2);
        let other = random_scene(b, SceneCfg::default(), ReplayToken { seed: 42, index: 4 });
        assert_ne!(s1, other);
        assert_eq!(random_source(&s1, 1.0, tok), random_source(&s2, 1.0, tok));
    }

    #[test]
    fn segments_respect_margin_and_lengths() {
        let b = Bounds::from_size(400.0, 300.0);
        let cfg = SceneCfg {
            segments: 30,
            min_len: 10.0,
            max_len: 50.0,
            margin: 8.0,
            max_attempts: 64,
        };
        let scene = random_scene(b, cfg, ReplayToken { seed: 1, index: 0 });
        assert!(scene.len() > 20);
        let inner = shrink(&b, 8.0);
        for &(a, q) in scene.segments() {
            assert!(inner.contains(a) && inner.contains(q));
            let len = (q - a).norm();
            assert!(len >= 10.0 - 1e-9 && len <= 50.0 + 1e-9);
        }
    }

    #[test]
    fn sources_keep_clearance() {
        let b = Bounds::from_size(400.0, 300.0);
        for index in 0..10 {
            let tok = ReplayToken { seed: 9, index };
            let scene = random_scene(b, SceneCfg::default(), tok);
            if let Some(p) = random_source(&scene, 3.0, tok) {
                assert!(b.contains_strict(p));
                for &(a, q) in scene.segments() {
                    assert!(distance_to_segment(p, a, q) >= 3.0);
                }
            }
        }
    }
}
