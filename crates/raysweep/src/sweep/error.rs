use std::fmt;

use crate::geom::Point;

/// Errors surfaced by a sweep query.
///
/// Everything except `EmptyActiveSet` is rejected input, detected before the
/// sweep starts.
#[derive(Clone, Debug, PartialEq)]
pub enum SweepError {
    /// A coordinate of the source, the bounds or an obstacle is NaN or infinite.
    NonFinite { what: &'static str },
    /// Bounds with non-positive width or height.
    InvalidBounds,
    /// `SweepCfg` holds an unusable value.
    InvalidCfg { reason: &'static str },
    /// The source is not strictly inside the bounds.
    SourceOutsideBounds { source: Point },
    /// Obstacle `index` has coincident endpoints.
    DegenerateSegment { index: usize },
    /// An endpoint of obstacle `index` coincides with the source.
    EndpointAtSource { index: usize },
    /// Obstacle `index` leaves the bounds.
    ObstacleOutsideBounds { index: usize },
    /// No obstacle answered the ray through `event`. The boundary edges rule
    /// this out for valid input.
    EmptyActiveSet { event: Point },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { what } => write!(f, "non-finite coordinate in {what}"),
            Self::InvalidBounds => write!(f, "scene bounds must have positive width and height"),
            Self::InvalidCfg { reason } => write!(f, "invalid sweep config: {reason}"),
            Self::SourceOutsideBounds { source } => write!(
                f,
                "source ({}, {}) is not strictly inside the scene bounds",
                source.x, source.y
            ),
            Self::DegenerateSegment { index } => {
                write!(f, "obstacle {index} has zero length")
            }
            Self::EndpointAtSource { index } => {
                write!(f, "obstacle {index} has an endpoint on the source")
            }
            Self::ObstacleOutsideBounds { index } => {
                write!(f, "obstacle {index} is not inside the scene bounds")
            }
            Self::EmptyActiveSet { event } => write!(
                f,
                "no active obstacle along the ray through ({}, {})",
                event.x, event.y
            ),
        }
    }
}

impl std::error::Error for SweepError {}
