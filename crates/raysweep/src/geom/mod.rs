//! 2D primitives for the radial sweep.
//!
//! Purpose
//! - Orientation and crossing predicates with an explicit collinearity
//!   tolerance (`cfg::ORIENT_EPS`).
//! - Line intersection, polar angles, comparison distances.
//! - Clipping rays against the scene rectangle so every ray has a finite end.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>` in a y-up frame; `Left` means
//!   counterclockwise.
//! - `sweep_angle(source, p)` is the key the sweep sorts by. Decreasing it turns
//!   clockwise starting at the rightward ray from the source.

mod bounds;
mod predicates;

pub use bounds::{cast_ray_to_boundary, Bounds};
pub use predicates::{
    distance_squared, orientation, polar_angle, segment_intersection, segments_intersect,
    signed_area, sweep_angle, Orientation,
};

/// A point in the plane.
pub type Point = nalgebra::Vector2<f64>;
