//! Visibility polygons from a point light via radial sweep.
//!
//! A single query takes a source point, opaque line-segment obstacles and the
//! scene rectangle, and returns the ordered hit points of a clockwise sweep
//! around the source. Consecutive hits form the triangle fan a renderer draws.
//!
//! Layout
//! - `geom`: orientation, crossing and intersection predicates, polar angles,
//!   ray clipping against `Bounds`.
//! - `segment`, `obstacles`: canonical start/end per obstacle and the
//!   endpoint indices.
//! - `events`, `active`: the angular event queue and the set of obstacles the
//!   sweeping ray currently crosses.
//! - `sweep`: the query-scoped driver and its output types.
//! - `scene`: host-side obstacle lists and a seeded random scene generator.

pub mod active;
pub mod cfg;
pub mod events;
pub mod geom;
pub mod obstacles;
pub mod scene;
pub mod segment;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::SweepCfg;
pub use geom::{Bounds, Orientation, Point};
pub use sweep::{sweep, DiagnosticRay, SweepContext, SweepError, Visibility, VisibilityPolygon};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{
        cast_ray_to_boundary, distance_squared, orientation, polar_angle, segment_intersection,
        segments_intersect, sweep_angle, Bounds, Orientation, Point,
    };
    pub use crate::scene::rand::{random_scene, random_source, ReplayToken, SceneCfg};
    pub use crate::scene::{Scene, SceneError};
    pub use crate::segment::Segment;
    pub use crate::sweep::{sweep, SweepError, Visibility, VisibilityPolygon};
    pub use crate::SweepCfg;
    pub use nalgebra::Vector2;
}
