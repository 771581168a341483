use super::Point;

/// Axis-aligned scene rectangle `[min.x, max.x] × [min.y, max.y]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::WINDOW
    }
}

impl Bounds {
    /// The 800×600 window the interactive host draws into.
    pub const WINDOW: Bounds = Bounds {
        min: Point::new(0.0, 0.0),
        max: Point::new(800.0, 600.0),
    };

    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// `[0, width] × [0, height]`.
    #[inline]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Point::zeros(), Point::new(width, height))
    }

    /// Rectangle of the given size centered on `center`.
    #[inline]
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        let half = Point::new(width * 0.5, height * 0.5);
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Finite corners and positive extent on both axes.
    pub fn is_valid(&self) -> bool {
        let finite = self.min.iter().chain(self.max.iter()).all(|v| v.is_finite());
        finite && self.width() > 0.0 && self.height() > 0.0
    }

    /// Strictly inside (not on an edge).
    #[inline]
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Closed containment.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Corners counterclockwise from `min`.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    /// The four boundary edges: both horizontal edges, then both vertical ones.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let [a, b, c, d] = self.corners();
        [(a, b), (d, c), (a, d), (b, c)]
    }
}

/// Extend the ray `source → through` until it leaves `bounds`.
///
/// For each axis, take the scalar that reaches the far edge in the sign of the
/// displacement; the smaller one is the first exit. An axis without
/// displacement never constrains the ray. Returns `source` if `through == source`.
pub fn cast_ray_to_boundary(source: Point, through: Point, bounds: &Bounds) -> Point {
    let d = through - source;
    let ratio_x = axis_ratio(source.x, d.x, bounds.min.x, bounds.max.x);
    let ratio_y = axis_ratio(source.y, d.y, bounds.min.y, bounds.max.y);
    let ratio = ratio_x.min(ratio_y);
    if !ratio.is_finite() {
        return source;
    }
    source + d * ratio
}

#[inline]
fn axis_ratio(origin: f64, delta: f64, lo: f64, hi: f64) -> f64 {
    if delta == 0.0 {
        return f64::INFINITY;
    }
    let border = if delta > 0.0 { hi } else { lo };
    (border - origin) / delta
}
