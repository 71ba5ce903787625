//! ## Polygon primitive
//!
//! An immutable simple polygon with a cached minimum bounding rectangle and a
//! ray-casting containment test.

use crate::error::GeoError;
use crate::geometry::{Point, Rect};

/// An immutable simple polygon, as parsed from the input stream.
///
/// `ring` is stored closed: the containment test walks every edge
/// `(ring[i], ring[(i + 1) % N])`, including the wraparound edge from the
/// last vertex back to the first. See DESIGN.md for why this crate departs
/// from the source program's `0..N-1` loop.
#[derive(Debug, Clone)]
pub struct Polygon {
    id: u64,
    ring: Vec<Point>,
    mbr: Rect,
}

impl Polygon {
    /// Builds a polygon from a positive id and at least 3 vertices, computing its MBR.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnderSpecifiedPolygon`] if fewer than 3 vertices are given.
    pub fn new(id: u64, ring: Vec<Point>) -> Result<Self, GeoError> {
        if ring.len() < 3 {
            return Err(GeoError::UnderSpecifiedPolygon {
                id,
                vertices: ring.len(),
            });
        }
        let mut xmin = ring[0].x;
        let mut xmax = ring[0].x;
        let mut ymin = ring[0].y;
        let mut ymax = ring[0].y;
        for v in &ring[1..] {
            xmin = xmin.min(v.x);
            xmax = xmax.max(v.x);
            ymin = ymin.min(v.y);
            ymax = ymax.max(v.y);
        }
        Ok(Polygon {
            id,
            ring,
            mbr: Rect {
                xmin,
                ymin,
                xmax,
                ymax,
            },
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// The polygon's cached minimum bounding rectangle.
    pub fn bounds(&self) -> Rect {
        self.mbr
    }

    /// Ray-casting point-in-polygon test with an MBR early-out.
    ///
    /// For a point lying exactly on an edge the result is implementation-defined
    /// (either answer is admissible, per spec.md §4.2).
    pub fn contains(&self, pt: Point) -> bool {
        if !self.mbr.contains_point(pt) {
            return false;
        }
        let n = self.ring.len();
        let mut inside = false;
        for i in 0..n {
            let pi = self.ring[(i + 1) % n];
            let pj = self.ring[i];
            let straddles = (pt.y < pi.y) != (pt.y < pj.y);
            if straddles {
                let x_at_y = (pj.x - pi.x) * (pt.y - pi.y) / (pj.y - pi.y) + pi.x;
                if pt.x < x_at_y {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(
            7,
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
                Point::new(0.0, 4.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_under_specified_polygon() {
        let err = Polygon::new(1, vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(matches!(
            err,
            Err(GeoError::UnderSpecifiedPolygon { id: 1, vertices: 2 })
        ));
    }

    #[test]
    fn test_mbr_is_cached_correctly() {
        let p = square();
        let b = p.bounds();
        assert_eq!((b.xmin, b.ymin, b.xmax, b.ymax), (0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn test_contains_interior_point() {
        assert!(square().contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_rejects_point_outside_mbr() {
        assert!(!square().contains(Point::new(5.0, 5.0)));
        assert!(!square().contains(Point::new(-1.0, 2.0)));
    }

    #[test]
    fn test_triangle_containment_uses_closed_ring() {
        // Scenario 5 from the spec: triangle (0,0)-(2,0)-(1,2).
        let tri = Polygon::new(
            9,
            vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 2.0)],
        )
        .unwrap();
        assert!(tri.contains(Point::new(1.0, 0.5)));
        assert!(tri.contains(Point::new(0.5, 0.5)));
        assert!(!tri.contains(Point::new(1.5, 1.9)));
    }

    #[test]
    fn test_point_exactly_on_mbr_boundary_is_reachable() {
        let p = square();
        // On the boundary, contains() may return either value; it must not panic
        // or divide by zero.
        let _ = p.contains(Point::new(0.0, 2.0));
    }
}
