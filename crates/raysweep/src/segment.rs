//! Canonical segment orientation and endpoint keys.
//!
//! A segment's `start` is the endpoint the clockwise sweep reaches first, i.e.
//! the one with the larger `sweep_angle` around the query source. Equal angles
//! keep the input order.

use std::cmp::Ordering;

use crate::geom::{orientation, sweep_angle, Orientation, Point};

/// Directed obstacle segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Orient `(a, b)` so that `start` comes first in the sweep around `center`.
    pub fn canonical(a: Point, b: Point, center: Point) -> Self {
        if radial_cmp(center, a, b) == Ordering::Greater {
            Self::new(b, a)
        } else {
            Self::new(a, b)
        }
    }

    /// Swap `start` and `end`.
    #[inline]
    pub fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Lies on a ray from `center`: collinear with it and not straddling it.
    /// Such a segment has zero angular extent and never occludes.
    #[inline]
    pub fn is_radial(&self, center: Point) -> bool {
        orientation(center, self.start, self.end) == Orientation::Collinear
            && (self.start - center).dot(&(self.end - center)) > 0.0
    }

    /// Angular extent `sweep_angle(start) − sweep_angle(end)`, in [0, 2π) for a
    /// canonical segment. Above π the segment wraps the sweep's starting ray.
    #[inline]
    pub fn sweep_span(&self, center: Point) -> f64 {
        sweep_angle(center, self.start) - sweep_angle(center, self.end)
    }
}

/// Sweep order of two points around `center`: `Less` if `a` is visited first.
///
/// Larger `sweep_angle` comes first. Equal angles compare `Equal`; callers
/// needing a total order break ties themselves.
#[inline]
pub fn radial_cmp(center: Point, a: Point, b: Point) -> Ordering {
    let aa = sweep_angle(center, a);
    let bb = sweep_angle(center, b);
    bb.partial_cmp(&aa).unwrap_or(Ordering::Equal)
}

/// Hashable endpoint key on a grid of size `quantum`.
///
/// Endpoints closer than about one quantum usually share a key; points
/// straddling a grid line do not. `quantum == 0` keys by exact bit pattern,
/// with `-0.0` folded onto `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(i64, i64);

impl PointKey {
    pub fn new(p: Point, quantum: f64) -> Self {
        if quantum > 0.0 {
            Self(quantize(p.x, quantum), quantize(p.y, quantum))
        } else {
            Self(exact_bits(p.x), exact_bits(p.y))
        }
    }
}

#[inline]
fn quantize(v: f64, quantum: f64) -> i64 {
    // `as` saturates for out-of-range values.
    (v / quantum).round() as i64
}

#[inline]
fn exact_bits(v: f64) -> i64 {
    let v = if v == 0.0 { 0.0 } else { v };
    v.to_bits() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn canonical_start_is_visited_first() {
        let c = vector![0.0, 0.0];
        // Below the rightward ray the sweep meets the lower end first.
        let s = Segment::canonical(vector![-5.0, -10.0], vector![5.0, -10.0], c);
        assert_eq!(s.start, vector![5.0, -10.0]);
        assert_eq!(s.end, vector![-5.0, -10.0]);
        assert!(sweep_angle(c, s.start) > sweep_angle(c, s.end));
        // Input order does not matter.
        let t = Segment::canonical(vector![5.0, -10.0], vector![-5.0, -10.0], c);
        assert_eq!(s, t);
    }

    #[test]
    fn canonical_is_deterministic() {
        let c = vector![3.0, 4.0];
        let a = vector![10.0, 1.0];
        let b = vector![-2.0, 7.5];
        let first = Segment::canonical(a, b, c);
        for _ in 0..10 {
            assert_eq!(Segment::canonical(a, b, c), first);
        }
    }

    #[test]
    fn radial_ties_keep_input_order() {
        let c = vector![0.0, 0.0];
        let near = vector![0.0, 1.0];
        let far = vector![0.0, 2.0];
        assert_eq!(radial_cmp(c, near, far), Ordering::Equal);
        let s = Segment::canonical(far, near, c);
        assert_eq!(s.start, far);
        assert_eq!(s.end, near);
    }

    #[test]
    fn span_flags_segments_wrapping_the_start_ray() {
        let c = vector![0.0, 0.0];
        let crossing = Segment::canonical(vector![10.0, -5.0], vector![10.0, 5.0], c);
        assert!(crossing.sweep_span(c) > std::f64::consts::PI);
        let plain = Segment::canonical(vector![-10.0, -5.0], vector![-10.0, 5.0], c);
        assert!(plain.sweep_span(c) < std::f64::consts::PI);
        assert!(plain.sweep_span(c) >= 0.0);
    }

    #[test]
    fn radial_segments_are_detected() {
        let c = vector![50.0, 50.0];
        assert!(Segment::new(vector![50.0, 70.0], vector![50.0, 60.0]).is_radial(c));
        assert!(Segment::new(vector![60.0, 60.0], vector![70.0, 70.0]).is_radial(c));
        // collinear but through the center
        assert!(!Segment::new(vector![40.0, 50.0], vector![60.0, 50.0]).is_radial(c));
        assert!(!Segment::new(vector![60.0, 45.0], vector![60.0, 58.0]).is_radial(c));
    }

    #[test]
    fn point_keys_quantize() {
        let q = 1e-3;
        assert_eq!(
            PointKey::new(vector![1.0, 2.0], q),
            PointKey::new(vector![1.0 + 1e-5, 2.0 - 1e-5], q)
        );
        assert_ne!(
            PointKey::new(vector![1.0, 2.0], q),
            PointKey::new(vector![1.01, 2.0], q)
        );
        assert_eq!(
            PointKey::new(vector![0.0, 1.5], 0.0),
            PointKey::new(vector![-0.0, 1.5], 0.0)
        );
        assert_ne!(
            PointKey::new(vector![1.0, 1.5], 0.0),
            PointKey::new(vector![1.0 + 1e-15, 1.5], 0.0)
        );
    }
}
