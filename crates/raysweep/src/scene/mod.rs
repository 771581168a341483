//! Host-side obstacle lists.
//!
//! `Scene` collects the segments an editor produces before they are handed to
//! a sweep: zero-length lines are dropped on entry, polylines are split into
//! chained segments, and everything outside the bounds is refused.

pub mod rand;

use std::fmt;

use tracing::debug;

use crate::cfg::SweepCfg;
use crate::geom::{Bounds, Point};
use crate::sweep::{sweep, SweepError, Visibility};

/// Errors raised while adding obstacles to a `Scene`.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneError {
    NonFinite,
    OutsideBounds { point: Point },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "segment has a non-finite coordinate"),
            Self::OutsideBounds { point } => {
                write!(f, "point ({}, {}) lies outside the scene", point.x, point.y)
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Obstacles plus the rectangle they live in.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    bounds: Bounds,
    segments: Vec<(Point, Point)>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Bounds::WINDOW)
    }
}

impl Scene {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn segments(&self) -> &[(Point, Point)] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn check(&self, p: Point) -> Result<(), SceneError> {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(SceneError::NonFinite);
        }
        if !self.bounds.contains(p) {
            return Err(SceneError::OutsideBounds { point: p });
        }
        Ok(())
    }

    /// Add `a → b`. Returns `Ok(false)` when the segment is a point and was dropped.
    pub fn push_segment(&mut self, a: Point, b: Point) -> Result<bool, SceneError> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            debug!(x = a.x, y = a.y, "dropping zero-length segment");
            return Ok(false);
        }
        self.segments.push((a, b));
        Ok(true)
    }

    /// Add the chain `points[0] → points[1] → …`; returns how many segments were kept.
    ///
    /// Nothing is added if any point is rejected.
    pub fn push_polyline(&mut self, points: &[Point]) -> Result<usize, SceneError> {
        for &p in points {
            self.check(p)?;
        }
        let before = self.segments.len();
        for w in points.windows(2) {
            self.push_segment(w[0], w[1])?;
        }
        Ok(self.segments.len() - before)
    }

    /// Remove the most recently added segment.
    pub fn pop_segment(&mut self) -> Option<(Point, Point)> {
        self.segments.pop()
    }

    /// Run a visibility query from `source` against this scene.
    pub fn sweep(&self, source: Point, cfg: &SweepCfg) -> Result<Visibility, SweepError> {
        sweep(source, &self.segments, &self.bounds, cfg)
    }
}
