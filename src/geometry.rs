//! ## MBR arithmetic
//!
//! Axis-aligned points and minimum bounding rectangles, and the handful of
//! operations the R-tree and the containment test are built from: union,
//! strict-inequality intersection, area, and enlargement.

/// An ordered pair of 64-bit floats. Freely copied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// A degenerate point-rectangle, used to run window queries against a single point.
    pub fn as_rect(&self) -> Rect {
        Rect {
            xmin: self.x,
            ymin: self.y,
            xmax: self.x,
            ymax: self.y,
        }
    }
}

/// An axis-aligned minimum bounding rectangle, `p = (xmin, ymin)`, `q = (xmax, ymax)`.
///
/// The invariant `xmin <= xmax && ymin <= ymax` holds for every `Rect` constructed through
/// this module's API. A degenerate rectangle (`xmin == xmax`, `ymin == ymax`) is legal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Rect {
    pub fn from_points(p: Point, q: Point) -> Self {
        Rect {
            xmin: p.x.min(q.x),
            ymin: p.y.min(q.y),
            xmax: p.x.max(q.x),
            ymax: p.y.max(q.y),
        }
    }

    /// Product of side lengths. May be zero for a degenerate rectangle.
    pub fn size(&self) -> f64 {
        (self.xmax - self.xmin) * (self.ymax - self.ymin)
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// True iff the two rectangles overlap on both axes, under a strict-inequality
    /// policy: rectangles that only touch along a boundary do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.xmax <= self.xmin
            || self.xmax <= other.xmin
            || other.ymax <= self.ymin
            || self.ymax <= other.ymin)
    }

    /// Additional area required to enlarge `self` to also cover `other`.
    pub fn enlargement(&self, other: &Rect) -> f64 {
        self.union(other).size() - self.size()
    }

    /// True iff `pt` lies within `self`, inclusive of the boundary.
    pub fn contains_point(&self, pt: Point) -> bool {
        pt.x >= self.xmin && pt.x <= self.xmax && pt.y >= self.ymin && pt.y <= self.ymax
    }
}
