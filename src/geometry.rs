//! Axis-aligned rectangle primitives shared by every entity.
//!
//! World space is in pixels: `x` grows rightward, `y` grows downward.

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width of the horizontal intersection with `other` (negative when apart).
    pub fn horizontal_overlap(&self, other: &Rect) -> f32 {
        self.right().min(other.right()) - self.x.max(other.x)
    }
}

/// True iff the two boxes intersect.
///
/// Every comparison is strict: boxes that only share an edge do not overlap.
/// Landing, adjacent platforms, and touching enemies all rely on this.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Euclidean distance between two points.
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

// ── World bounds ──────────────────────────────────────────────────────────────

/// Limits an entity may not leave. There is deliberately no `min_y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub max_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamped {
    pub x: f32,
    pub y: f32,
    /// Whether either coordinate moved.
    pub clamped: bool,
}

/// Clamp `rect` into `[min_x, max_x - width]` horizontally and
/// `(-inf, max_y - height]` vertically.
pub fn clamp_to_bounds(rect: &Rect, bounds: &Bounds) -> Clamped {
    let x = rect.x.min(bounds.max_x - rect.width).max(bounds.min_x);
    let y = rect.y.min(bounds.max_y - rect.height);
    Clamped {
        x,
        y,
        clamped: x != rect.x || y != rect.y,
    }
}
