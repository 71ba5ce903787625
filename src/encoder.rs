//! ## GeoEncoder
//!
//! Composes the R-tree index with the polygon arena: for a query point, take
//! the candidate set the index returns and run containment, returning the
//! first match's id or `0`.

use crate::geometry::Point;
use crate::polygon::Polygon;
use crate::rtree::Rtree;
use tracing::{debug, info};

/// Reserved id meaning "no polygon contains this point".
pub const NO_MATCH: u64 = 0;

/// Batch point-in-polygon encoder: an R-tree over polygon MBRs plus the
/// polygon arena it indexes.
pub struct GeoEncoder {
    polygons: Vec<Polygon>,
    index: Rtree,
}

impl GeoEncoder {
    /// Builds an encoder over `polygons`, inserting each into a fresh R-tree
    /// in the given order (insertion order determines tie-breaking for
    /// overlapping polygons, per spec.md §4.4).
    pub fn build(polygons: Vec<Polygon>, min_children: usize, max_children: usize) -> Self {
        info!("Building GeoEncoder index over {} polygons", polygons.len());
        let mut index = Rtree::new(min_children, max_children)
            .expect("R-tree capacity must already be validated before building the encoder");
        for (i, polygon) in polygons.iter().enumerate() {
            index.insert(i, polygon.bounds());
        }
        GeoEncoder { polygons, index }
    }

    /// Returns the id of the first candidate polygon containing `pt`, scanned
    /// in the order the index returns candidates, or [`NO_MATCH`] if none do.
    pub fn encode(&self, pt: Point) -> u64 {
        let candidates = self.index.search(&pt.as_rect());
        debug!("Point {:?} has {} index candidates", pt, candidates.len());
        for &idx in &candidates {
            if self.polygons[idx].contains(pt) {
                return self.polygons[idx].id();
            }
        }
        NO_MATCH
    }

    /// Number of polygons held in the arena.
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: u64, x: f64, y: f64, side: f64) -> Polygon {
        Polygon::new(
            id,
            vec![
                Point::new(x, y),
                Point::new(x + side, y),
                Point::new(x + side, y + side),
                Point::new(x, y + side),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_1_point_inside_single_polygon() {
        let enc = GeoEncoder::build(vec![square(7, 0.0, 0.0, 4.0)], 1, 4);
        assert_eq!(enc.encode(Point::new(2.0, 2.0)), 7);
    }

    #[test]
    fn test_scenario_2_point_outside_mbr() {
        let enc = GeoEncoder::build(vec![square(7, 0.0, 0.0, 4.0)], 1, 4);
        assert_eq!(enc.encode(Point::new(5.0, 5.0)), 0);
    }

    #[test]
    fn test_scenario_3_point_left_of_mbr() {
        let enc = GeoEncoder::build(vec![square(7, 0.0, 0.0, 4.0)], 1, 4);
        assert_eq!(enc.encode(Point::new(-1.0, 2.0)), 0);
    }

    #[test]
    fn test_scenario_4_nested_polygons_tie_break_by_insertion_order() {
        let outer = square(1, 0.0, 0.0, 10.0);
        let inner = square(2, 2.0, 2.0, 2.0);
        let enc = GeoEncoder::build(vec![outer, inner], 1, 4);
        // Both polygons contain (3, 3); reference insertion order [1, 2] must yield 1.
        assert_eq!(enc.encode(Point::new(3.0, 3.0)), 1);
    }

    #[test]
    fn test_scenario_6_empty_polygon_set_always_zero() {
        let enc = GeoEncoder::build(vec![], 1, 4);
        assert_eq!(enc.encode(Point::new(1.0, 1.0)), 0);
        assert_eq!(enc.encode(Point::new(2.0, 2.0)), 0);
    }

    #[test]
    fn test_encoder_composition_invariant() {
        let polygons = vec![square(1, 0.0, 0.0, 5.0), square(2, 10.0, 10.0, 5.0)];
        let mbrs: Vec<_> = polygons.iter().map(|p| p.bounds()).collect();
        let enc = GeoEncoder::build(polygons, 1, 4);
        for (x, y) in [(1.0, 1.0), (12.0, 12.0), (20.0, 20.0)] {
            let pt = Point::new(x, y);
            let id = enc.encode(pt);
            if id != 0 {
                let poly = enc.polygons.iter().find(|p| p.id() == id).unwrap();
                assert!(poly.contains(pt));
                let poly_idx = enc.polygons.iter().position(|p| p.id() == id).unwrap();
                assert!(mbrs[poly_idx].intersects(&pt.as_rect()));
            }
        }
    }
}
