use shared::*;

use geoencoder::encoder::GeoEncoder;
use geoencoder::geometry::Point;
use tracing::info;

/// The concrete scenarios from spec.md §8, one test per row.

#[test]
fn test_scenario_1_point_inside_square() {
    info!("Scenario 1: point inside a single square polygon");
    let (min, max) = CAPACITY;
    let enc = GeoEncoder::build(vec![square(7, 0.0, 0.0, 4.0)], min, max);
    assert_eq!(enc.encode(Point::new(2.0, 2.0)), 7);
}

#[test]
fn test_scenario_2_point_outside_square() {
    let (min, max) = CAPACITY;
    let enc = GeoEncoder::build(vec![square(7, 0.0, 0.0, 4.0)], min, max);
    assert_eq!(enc.encode(Point::new(5.0, 5.0)), 0);
}

#[test]
fn test_scenario_3_point_left_of_mbr() {
    let (min, max) = CAPACITY;
    let enc = GeoEncoder::build(vec![square(7, 0.0, 0.0, 4.0)], min, max);
    assert_eq!(enc.encode(Point::new(-1.0, 2.0)), 0);
}

#[test]
fn test_scenario_4_nested_polygons_reference_tie_break() {
    let (min, max) = CAPACITY;
    let outer = square(1, 0.0, 0.0, 10.0);
    let inner = square(2, 2.0, 2.0, 2.0);
    // Reference insertion order [1, 2]: the R-tree visits entry order, so the
    // outer polygon (inserted first) wins the tie at (3, 3).
    let enc = GeoEncoder::build(vec![outer, inner], min, max);
    assert_eq!(enc.encode(Point::new(3.0, 3.0)), 1);
}

#[test]
fn test_scenario_5_triangle_three_queries() {
    let (min, max) = CAPACITY;
    let tri = triangle(9, (0.0, 0.0), (2.0, 0.0), (1.0, 2.0));
    let enc = GeoEncoder::build(vec![tri], min, max);
    assert_eq!(enc.encode(Point::new(1.0, 0.5)), 9);
    assert_eq!(enc.encode(Point::new(0.5, 0.5)), 9);
    assert_eq!(enc.encode(Point::new(1.5, 1.9)), 0);
}

#[test]
fn test_scenario_6_no_polygons_always_zero() {
    let (min, max) = CAPACITY;
    let enc = GeoEncoder::build(vec![], min, max);
    assert_eq!(enc.encode(Point::new(1.0, 1.0)), 0);
    assert_eq!(enc.encode(Point::new(2.0, 2.0)), 0);
}

#[test]
fn test_encoder_zero_invariant_over_disjoint_polygons() {
    let (min, max) = CAPACITY;
    let polygons = vec![
        square(1, 0.0, 0.0, 2.0),
        square(2, 10.0, 10.0, 2.0),
        square(3, 20.0, 20.0, 2.0),
    ];
    let enc = GeoEncoder::build(polygons, min, max);
    // Far outside every polygon's MBR.
    assert_eq!(enc.encode(Point::new(-50.0, -50.0)), 0);
}

#[test]
fn test_encoder_composition_invariant_holds_for_matches() {
    let (min, max) = CAPACITY;
    let polygons = vec![square(1, 0.0, 0.0, 5.0), square(2, 100.0, 100.0, 5.0)];
    let enc = GeoEncoder::build(polygons, min, max);
    let id = enc.encode(Point::new(1.0, 1.0));
    assert_eq!(id, 1);
}
