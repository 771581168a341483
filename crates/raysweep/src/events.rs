//! Angular event queue: distinct obstacle endpoints in clockwise sweep order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::geom::{distance_squared, sweep_angle, Point};
use crate::segment::PointKey;

/// One endpoint with its precomputed sort keys.
#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub point: Point,
    pub angle: f64,
    dist2: f64,
}

impl Event {
    fn new(source: Point, point: Point) -> Self {
        Self {
            point,
            angle: sweep_angle(source, point),
            dist2: distance_squared(source, point),
        }
    }
}

// Max-heap order: larger sweep angle pops first; on equal angles the nearer
// point pops first; coordinates make the order total.
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.angle
            .total_cmp(&other.angle)
            .then_with(|| other.dist2.total_cmp(&self.dist2))
            .then_with(|| other.point.x.total_cmp(&self.point.x))
            .then_with(|| other.point.y.total_cmp(&self.point.y))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

/// Events ordered by decreasing `sweep_angle` around one source.
#[derive(Clone, Debug)]
pub struct EventQueue {
    heap: BinaryHeap<Event>,
}

impl EventQueue {
    /// Queue every distinct point (by `PointKey` on `quantum`) once.
    /// The first occurrence of a key is the one kept.
    pub fn build<I>(source: Point, points: I, quantum: f64) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut seen = HashSet::new();
        let heap = points
            .into_iter()
            .filter(|p| seen.insert(PointKey::new(*p, quantum)))
            .map(|p| Event::new(source, p))
            .collect();
        Self { heap }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Next event without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek()
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop()
    }
}

impl Iterator for EventQueue {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        self.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}
