//! Obstacles crossed by the sweeping ray, with the nearest-hit query.

use crate::geom::{distance_squared, segment_intersection, Point};
use crate::obstacles::{ObstacleSet, SegmentId};

/// Closest intersection of a ray with one obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub segment: SegmentId,
    pub point: Point,
    pub dist2: f64,
}

/// Unordered set of active segments.
///
/// Holds only the obstacles one ray crosses; queries scan linearly.
#[derive(Clone, Debug, Default)]
pub struct ActiveSet {
    members: Vec<SegmentId>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`; a segment already present is not duplicated.
    pub fn insert(&mut self, id: SegmentId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    /// Remove `id`; returns whether it was present.
    pub fn remove(&mut self, id: SegmentId) -> bool {
        match self.members.iter().position(|&m| m == id) {
            Some(k) => {
                self.members.swap_remove(k);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, id: SegmentId) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.members.iter().copied()
    }

    /// Nearest active segment along the ray `source → through`.
    pub fn nearest_hit(
        &self,
        obstacles: &ObstacleSet,
        source: Point,
        through: Point,
    ) -> Option<Hit> {
        nearest_hit(obstacles, self.iter(), source, through)
    }
}

/// Rank `candidates` by squared distance from `source` to where their
/// supporting line meets the line `source → through`.
///
/// Segments parallel to the ray are skipped, as are intersections at or
/// behind `source`. Equal distances resolve to the lower `SegmentId`, so the
/// answer does not depend on iteration order.
pub fn nearest_hit<I>(
    obstacles: &ObstacleSet,
    candidates: I,
    source: Point,
    through: Point,
) -> Option<Hit>
where
    I: IntoIterator<Item = SegmentId>,
{
    let dir = through - source;
    let mut best: Option<Hit> = None;
    for id in candidates {
        let seg = obstacles.segment(id);
        let Some(point) = segment_intersection(source, through, seg.start, seg.end) else {
            continue;
        };
        if (point - source).dot(&dir) <= 0.0 {
            continue;
        }
        let dist2 = distance_squared(source, point);
        let better = match best {
            None => true,
            Some(b) => dist2 < b.dist2 || (dist2 == b.dist2 && id < b.segment),
        };
        if better {
            best = Some(Hit {
                segment: id,
                point,
                dist2,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Bounds;
    use nalgebra::vector;

    fn two_walls() -> ObstacleSet {
        let b = Bounds::centered(vector![0.0, 0.0], 100.0, 100.0);
        ObstacleSet::build(
            vector![0.0, 0.0],
            [
                (vector![20.0, -8.0], vector![20.0, 8.0]),
                (vector![10.0, -5.0], vector![10.0, 5.0]),
            ],
            &b,
            1e-9,
        )
    }

    #[test]
    fn insert_remove_contains() {
        let mut a = ActiveSet::new();
        a.insert(SegmentId(3));
        a.insert(SegmentId(1));
        a.insert(SegmentId(3));
        assert_eq!(a.len(), 2);
        assert!(a.contains(SegmentId(1)));
        assert!(a.remove(SegmentId(3)));
        assert!(!a.remove(SegmentId(3)));
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![SegmentId(1)]);
        assert!(a.remove(SegmentId(1)));
        assert!(a.is_empty());
    }

    #[test]
    fn nearer_wall_wins_regardless_of_insertion_order() {
        let obstacles = two_walls();
        let s = obstacles.source();
        for order in [[0, 1], [1, 0]] {
            let mut a = ActiveSet::new();
            for k in order {
                a.insert(SegmentId(k));
            }
            for through in [vector![50.0, 0.0], vector![50.0, 10.0], vector![50.0, -20.0]] {
                let hit = a.nearest_hit(&obstacles, s, through).unwrap();
                assert_eq!(hit.segment, SegmentId(1));
                assert!((hit.point.x - 10.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn axis_ray_hits_the_wall_center() {
        let obstacles = two_walls();
        let mut a = ActiveSet::new();
        for id in obstacles.initially_active() {
            a.insert(id);
        }
        assert_eq!(a.len(), 2);
        let hit = a.nearest_hit(&obstacles, vector![0.0, 0.0], vector![50.0, 0.0]).unwrap();
        assert!((hit.point - vector![10.0, 0.0]).norm() < 1e-12);
        assert!((hit.dist2 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn hits_behind_the_source_are_skipped() {
        let b = Bounds::centered(vector![0.0, 0.0], 100.0, 100.0);
        let obstacles = ObstacleSet::build(
            vector![0.0, 0.0],
            [
                (vector![-10.0, -5.0], vector![-10.0, 5.0]),
                (vector![30.0, -5.0], vector![30.0, 5.0]),
            ],
            &b,
            1e-9,
        );
        let mut a = ActiveSet::new();
        a.insert(SegmentId(0));
        assert!(a.nearest_hit(&obstacles, vector![0.0, 0.0], vector![50.0, 0.0]).is_none());
        a.insert(SegmentId(1));
        let hit = a.nearest_hit(&obstacles, vector![0.0, 0.0], vector![50.0, 0.0]).unwrap();
        assert_eq!(hit.segment, SegmentId(1));
    }

    #[test]
    fn parallel_segments_are_skipped() {
        let b = Bounds::centered(vector![0.0, 0.0], 100.0, 100.0);
        let obstacles = ObstacleSet::build(
            vector![0.0, 0.0],
            [(vector![0.0, 5.0], vector![0.0, 9.0])],
            &b,
            1e-9,
        );
        let mut a = ActiveSet::new();
        a.insert(SegmentId(0));
        assert!(a.nearest_hit(&obstacles, vector![0.0, 0.0], vector![0.0, 50.0]).is_none());
        // its supporting line only meets other rays at the source itself
        assert!(a.nearest_hit(&obstacles, vector![0.0, 0.0], vector![50.0, 50.0]).is_none());
    }
}
