use crate::cfg::{ORIENT_EPS, PARALLEL_EPS};

use super::Point;

/// Side of the directed line `a → b` on which a third point lies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Left,
    Right,
    Collinear,
}

impl Orientation {
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Orientation::Left => Orientation::Right,
            Orientation::Right => Orientation::Left,
            Orientation::Collinear => Orientation::Collinear,
        }
    }
}

#[inline]
fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area of triangle `(a, b, c)`; positive for a counterclockwise turn.
///
/// Written as `(b−a)×(c−a)` so swapping `b` and `c` negates the result exactly.
#[inline]
pub fn signed_area(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Turn direction at `a` from `b` to `c`, with `|area| < ORIENT_EPS` forced to `Collinear`.
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let area = signed_area(a, b, c);
    if area.abs() < ORIENT_EPS {
        Orientation::Collinear
    } else if area > 0.0 {
        Orientation::Left
    } else {
        Orientation::Right
    }
}

/// Crossing test for segments `p1p2` and `q1q2`.
///
/// True when the endpoints of each segment get different orientations with
/// respect to the other's supporting line. An endpoint lying on the other
/// segment counts as crossing. Collinear overlaps report `false`.
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    straddles(p1, p2, q1, q2) && straddles(q1, q2, p1, p2)
}

#[inline]
fn straddles(a: Point, b: Point, c: Point, d: Point) -> bool {
    orientation(a, b, c) != orientation(a, b, d)
}

/// Intersection of the lines through `p1p2` and `q1q2`.
///
/// Returns `None` when the lines are parallel. The point may lie outside both
/// segments; use `segments_intersect` first when that matters.
pub fn segment_intersection(p1: Point, p2: Point, q1: Point, q2: Point) -> Option<Point> {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = cross(r, s);
    // Relative test: |sin| of the angle between the lines.
    if denom.abs() <= PARALLEL_EPS * r.norm() * s.norm() {
        return None;
    }
    let t = cross(q1 - p1, s) / denom;
    Some(p1 + r * t)
}

/// Angle of the displacement `to − from`, in (−π, π].
#[inline]
pub fn polar_angle(from: Point, to: Point) -> f64 {
    let d = to - from;
    let a = d.y.atan2(d.x);
    // atan2(-0.0, x<0) is −π; fold it onto +π to keep the half-open range.
    if a == -std::f64::consts::PI {
        std::f64::consts::PI
    } else {
        a
    }
}

/// Sweep key of `p` around `source`: the polar angle of `p → source`.
///
/// Points just below the rightward ray from `source` sort first (key near π),
/// points just above it sort last (key near −π).
#[inline]
pub fn sweep_angle(source: Point, p: Point) -> f64 {
    polar_angle(p, source)
}

/// Squared Euclidean distance; only meaningful for comparisons.
#[inline]
pub fn distance_squared(a: Point, b: Point) -> f64 {
    (b - a).norm_squared()
}
