use crate::geom::{signed_area, Point};

/// Ordered sweep hits around `source`; consecutive hits span fan triangles.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityPolygon {
    pub source: Point,
    pub points: Vec<Point>,
}

impl VisibilityPolygon {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(source, hit_i, hit_{i+1})` for every consecutive pair of hits.
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.points
            .windows(2)
            .map(move |w| [self.source, w[0], w[1]])
    }

    /// Area covered by the fan. Triangles are clockwise, so each contributes
    /// the negated signed area.
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[s, a, b]| -0.5 * signed_area(s, a, b))
            .sum()
    }
}

/// Source→hit segment for one processed event (debug overlay).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagnosticRay {
    pub source: Point,
    pub hit: Point,
}

/// Result of one sweep query.
#[derive(Clone, Debug, PartialEq)]
pub struct Visibility {
    pub polygon: VisibilityPolygon,
    /// Empty unless `SweepCfg::diagnostics` was set.
    pub rays: Vec<DiagnosticRay>,
}
