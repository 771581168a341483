//! Sweep driver: one visibility query from setup to polygon.
//!
//! Purpose
//! - Own every working structure of a query (`ObstacleSet`, `EventQueue`,
//!   `ActiveSet`, the emitted hits) in a `SweepContext` that is built per call
//!   and consumed by `run`.
//!
//! Per event, in order
//! 1. segments ending at the event leave the active set;
//! 2. nearest hit along the ray through the event;
//! 3. segments starting at the event join (after the query, so a segment never
//!    occludes the ray at its own start angle); with nothing else active the
//!    query falls back to the segments that just joined;
//! 4. emit the hit unless it repeats the last emitted one, and once two hits
//!    exist, a second post-insertion hit when it differs from the first.
//!
//! Radial obstacles never enter the active set (see `ObstacleSet`).
//!
//! Known gap
//! - The sweep does not revisit the first event after the last one, so the fan
//!   leaves out the wedge between them. `SweepCfg::close_fan` re-fires the
//!   first event to cover it.

mod error;
mod output;

pub use error::SweepError;
pub use output::{DiagnosticRay, Visibility, VisibilityPolygon};

use tracing::{debug, trace};

use crate::active::{nearest_hit, ActiveSet, Hit};
use crate::cfg::{SweepCfg, HIT_MERGE_EPS};
use crate::events::EventQueue;
use crate::geom::{cast_ray_to_boundary, distance_squared, Bounds, Point};
use crate::obstacles::ObstacleSet;
use crate::segment::PointKey;

/// Visibility polygon of `source` among `obstacles` inside `bounds`.
///
/// The four edges of `bounds` are always added as obstacles, so every ray has
/// a hit. Obstacles must lie inside `bounds`, have positive length and not
/// touch the source.
pub fn sweep(
    source: Point,
    obstacles: &[(Point, Point)],
    bounds: &Bounds,
    cfg: &SweepCfg,
) -> Result<Visibility, SweepError> {
    SweepContext::new(source, obstacles, bounds, *cfg)?.run()
}

/// Working state of one query.
#[derive(Clone, Debug)]
pub struct SweepContext {
    cfg: SweepCfg,
    bounds: Bounds,
    obstacles: ObstacleSet,
    queue: EventQueue,
    active: ActiveSet,
    hits: Vec<Point>,
    rays: Vec<DiagnosticRay>,
}

impl SweepContext {
    /// Validate input, orient segments, queue events and seed the active set.
    pub fn new(
        source: Point,
        obstacles: &[(Point, Point)],
        bounds: &Bounds,
        cfg: SweepCfg,
    ) -> Result<Self, SweepError> {
        validate(source, obstacles, bounds, &cfg)?;
        let pairs = obstacles.iter().copied().chain(bounds.edges());
        let set = ObstacleSet::build(source, pairs, bounds, cfg.endpoint_quantum);
        let queue = EventQueue::build(source, set.endpoints(), cfg.endpoint_quantum);
        let mut active = ActiveSet::new();
        for id in set.initially_active() {
            active.insert(id);
        }
        debug!(
            obstacles = set.len(),
            events = queue.len(),
            seeded = active.len(),
            "sweep setup"
        );
        Ok(Self {
            cfg,
            bounds: *bounds,
            obstacles: set,
            queue,
            active,
            hits: Vec::new(),
            rays: Vec::new(),
        })
    }

    #[inline]
    pub fn source(&self) -> Point {
        self.obstacles.source()
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Events not yet processed.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Hits emitted so far.
    pub fn hits(&self) -> &[Point] {
        &self.hits
    }

    /// Process the next event; `Ok(false)` once the queue is drained.
    pub fn step(&mut self) -> Result<bool, SweepError> {
        match self.queue.pop() {
            Some(event) => {
                self.fire(event.point)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drain all events and assemble the result.
    pub fn run(mut self) -> Result<Visibility, SweepError> {
        let first = self.queue.peek().map(|e| e.point);
        while self.step()? {}
        if self.cfg.close_fan {
            if let Some(p) = first {
                self.fire(p)?;
            }
        }
        debug!(hits = self.hits.len(), "sweep done");
        Ok(Visibility {
            polygon: VisibilityPolygon {
                source: self.source(),
                points: self.hits,
            },
            rays: self.rays,
        })
    }

    fn fire(&mut self, event: Point) -> Result<(), SweepError> {
        let source = self.source();
        for &id in self.obstacles.ending_at(event) {
            self.active.remove(id);
        }

        let ray_end = cast_ray_to_boundary(source, event, &self.bounds);
        let before = self.active.nearest_hit(&self.obstacles, source, ray_end);

        let starting = self.obstacles.starting_at(event);
        for &id in starting {
            self.active.insert(id);
        }
        let primary: Hit = match before {
            Some(hit) => hit,
            None => nearest_hit(&self.obstacles, starting.iter().copied(), source, ray_end)
                .ok_or(SweepError::EmptyActiveSet { event })?,
        };

        let emitted_before = self.hits.len();
        self.emit(primary.point);
        if self.cfg.diagnostics {
            self.rays.push(DiagnosticRay {
                source,
                hit: primary.point,
            });
        }

        if emitted_before >= 2 {
            if let Some(second) = self.active.nearest_hit(&self.obstacles, source, ray_end) {
                if distance_squared(primary.point, second.point) > HIT_MERGE_EPS {
                    self.emit(second.point);
                }
            }
        }
        trace!(
            x = event.x,
            y = event.y,
            active = self.active.len(),
            hits = self.hits.len(),
            "event"
        );
        Ok(())
    }

    /// Push `p` unless it coincides with the previous hit.
    fn emit(&mut self, p: Point) {
        match self.hits.last() {
            Some(&last) if distance_squared(last, p) <= HIT_MERGE_EPS => {}
            _ => self.hits.push(p),
        }
    }
}

fn validate(
    source: Point,
    obstacles: &[(Point, Point)],
    bounds: &Bounds,
    cfg: &SweepCfg,
) -> Result<(), SweepError> {
    if !(cfg.endpoint_quantum.is_finite() && cfg.endpoint_quantum >= 0.0) {
        return Err(SweepError::InvalidCfg {
            reason: "endpoint_quantum must be finite and >= 0",
        });
    }
    if !(source.x.is_finite() && source.y.is_finite()) {
        return Err(SweepError::NonFinite { what: "source" });
    }
    if !bounds.min.iter().chain(bounds.max.iter()).all(|v| v.is_finite()) {
        return Err(SweepError::NonFinite { what: "bounds" });
    }
    if !bounds.is_valid() {
        return Err(SweepError::InvalidBounds);
    }
    if !bounds.contains_strict(source) {
        return Err(SweepError::SourceOutsideBounds { source });
    }
    let q = cfg.endpoint_quantum;
    let source_key = PointKey::new(source, q);
    for (index, &(a, b)) in obstacles.iter().enumerate() {
        if !(a.iter().chain(b.iter()).all(|v| v.is_finite())) {
            return Err(SweepError::NonFinite { what: "obstacle" });
        }
        if PointKey::new(a, q) == PointKey::new(b, q) {
            return Err(SweepError::DegenerateSegment { index });
        }
        if PointKey::new(a, q) == source_key || PointKey::new(b, q) == source_key {
            return Err(SweepError::EndpointAtSource { index });
        }
        if !(bounds.contains(a) && bounds.contains(b)) {
            return Err(SweepError::ObstacleOutsideBounds { index });
        }
    }
    Ok(())
}
