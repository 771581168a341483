//! Tolerances and per-query sweep options.
//!
//! Policy
//! - Geometric tolerances are fixed constants. Inputs come from pixel
//!   positions, so the scales they are tuned for are O(1)..O(1e4).
//! - Behavioural switches live in `SweepCfg`, passed by value to each query.

/// Signed areas `|(b−a)×(c−a)|` below this are treated as collinear.
pub const ORIENT_EPS: f64 = 1e-5;
/// Line pairs whose direction cross product is below this are parallel.
pub const PARALLEL_EPS: f64 = 1e-12;
/// Two hits closer than this (squared distance) on the same ray are one vertex.
pub const HIT_MERGE_EPS: f64 = 1e-12;

/// Options for one sweep query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepCfg {
    /// Grid size used to key endpoints in the start/end indices and to dedup
    /// events. `0.0` keys by exact bit pattern.
    pub endpoint_quantum: f64,
    /// Re-fire the first event once the queue drains so the fan closes over the
    /// reference ray. Off by default, so the sweep stops after the last event.
    pub close_fan: bool,
    /// Record one source→hit ray per event.
    pub diagnostics: bool,
}

impl Default for SweepCfg {
    fn default() -> Self {
        Self {
            endpoint_quantum: 1e-9,
            close_fan: false,
            diagnostics: false,
        }
    }
}
