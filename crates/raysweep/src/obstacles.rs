//! Canonical obstacles of one query plus their start/end endpoint indices.

use std::collections::HashMap;

use crate::geom::{segments_intersect, Bounds, Point};
use crate::segment::{PointKey, Segment};

/// Index of a segment inside an `ObstacleSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub usize);

/// Obstacles oriented around one source.
///
/// Invariants:
/// - `segments[i]` is canonical for `source`, except for segments straddling
///   the reference ray, which are stored reversed (see `crosses_reference`).
/// - `starts[key(s.start)]` and `ends[key(s.end)]` list `SegmentId(i)` in
///   insertion order, for every segment that is not radial.
/// - Radial segments are never seeded and never appear in either index; they
///   only contribute events.
#[derive(Clone, Debug)]
pub struct ObstacleSet {
    source: Point,
    quantum: f64,
    segments: Vec<Segment>,
    crosses_reference: Vec<bool>,
    radial: Vec<bool>,
    starts: HashMap<PointKey, Vec<SegmentId>>,
    ends: HashMap<PointKey, Vec<SegmentId>>,
}

impl ObstacleSet {
    /// Orient every pair around `source` and register its endpoints.
    ///
    /// The reference ray runs from `source` to the right edge of `bounds` at
    /// the source's height. A segment that crosses it and whose canonical span
    /// exceeds π is active when the sweep begins; its roles are swapped so that
    /// it leaves at its early endpoint and re-enters at its late one.
    pub fn build<I>(source: Point, pairs: I, bounds: &Bounds, quantum: f64) -> Self
    where
        I: IntoIterator<Item = (Point, Point)>,
    {
        let reference_end = Point::new(bounds.max.x, source.y);
        let mut set = Self {
            source,
            quantum,
            segments: Vec::new(),
            crosses_reference: Vec::new(),
            radial: Vec::new(),
            starts: HashMap::new(),
            ends: HashMap::new(),
        };
        for (a, b) in pairs {
            let mut seg = Segment::canonical(a, b, source);
            let radial = seg.is_radial(source);
            let crosses = !radial
                && segments_intersect(seg.start, seg.end, source, reference_end)
                && seg.sweep_span(source) > std::f64::consts::PI;
            if crosses {
                seg = seg.reversed();
            }
            set.push(seg, crosses, radial);
        }
        set
    }

    fn push(&mut self, seg: Segment, crosses: bool, radial: bool) {
        let id = SegmentId(self.segments.len());
        if !radial {
            self.starts
                .entry(PointKey::new(seg.start, self.quantum))
                .or_default()
                .push(id);
            self.ends
                .entry(PointKey::new(seg.end, self.quantum))
                .or_default()
                .push(id);
        }
        self.segments.push(seg);
        self.crosses_reference.push(crosses);
        self.radial.push(radial);
    }

    #[inline]
    pub fn source(&self) -> Point {
        self.source
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether `id` lies on a ray from the source.
    #[inline]
    pub fn is_radial(&self, id: SegmentId) -> bool {
        self.radial[id.0]
    }

    /// Segments active before the first event.
    pub fn initially_active(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.crosses_reference
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(|(i, _)| SegmentId(i))
    }

    /// Segments whose (stored) start is `p`.
    pub fn starting_at(&self, p: Point) -> &[SegmentId] {
        self.starts
            .get(&PointKey::new(p, self.quantum))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Segments whose (stored) end is `p`.
    pub fn ending_at(&self, p: Point) -> &[SegmentId] {
        self.ends
            .get(&PointKey::new(p, self.quantum))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every stored endpoint, starts and ends interleaved per segment.
    pub fn endpoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| [s.start, s.end])
    }
}
