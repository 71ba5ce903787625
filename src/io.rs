//! ## I/O collaborator
//!
//! A line-oriented parser for the polygon/point input stream and a buffered
//! writer for the encoded output stream. Out of the spatial-index core: its
//! only contract is "hand the core a list of polygons and a list of points;
//! print the integers the core returns."

use crate::error::GeoError;
use crate::geometry::Point;
use crate::polygon::Polygon;
use std::collections::HashSet;
use std::io::{BufRead, Write};
use tracing::debug;

/// Reads the `<M> <N>` header line: polygon count, then point count.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<(usize, usize), GeoError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let mut fields = line.split_whitespace();
    let m = fields.next().and_then(|s| s.parse::<usize>().ok());
    let n = fields.next().and_then(|s| s.parse::<usize>().ok());
    match (m, n) {
        (Some(m), Some(n)) if fields.next().is_none() => Ok((m, n)),
        _ => Err(GeoError::MalformedHeader),
    }
}

/// Reads exactly `count` polygon lines, rejecting duplicate or non-positive ids,
/// NaN coordinates, and under-3-vertex rings.
pub fn read_polygons<R: BufRead>(reader: &mut R, count: usize) -> Result<Vec<Polygon>, GeoError> {
    let mut polygons = Vec::with_capacity(count);
    let mut seen_ids: HashSet<u64> = HashSet::with_capacity(count);
    for line_no in 0..count {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(GeoError::MalformedPolygon { line: line_no + 1 });
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        let (id_str, ring_str) = trimmed
            .split_once(' ')
            .ok_or(GeoError::MalformedPolygon { line: line_no + 1 })?;
        let id: i64 = id_str
            .parse()
            .map_err(|_| GeoError::MalformedPolygon { line: line_no + 1 })?;
        if id <= 0 {
            return Err(GeoError::NonPositivePolygonId { id });
        }
        let id = id as u64;
        if !seen_ids.insert(id) {
            return Err(GeoError::DuplicatePolygonId { id });
        }

        let mut ring = Vec::new();
        for vertex in ring_str.split(';') {
            let (x_str, y_str) = vertex
                .split_once(',')
                .ok_or(GeoError::MalformedPolygon { line: line_no + 1 })?;
            let x: f64 = x_str
                .parse()
                .map_err(|_| GeoError::MalformedPolygon { line: line_no + 1 })?;
            let y: f64 = y_str
                .parse()
                .map_err(|_| GeoError::MalformedPolygon { line: line_no + 1 })?;
            if x.is_nan() || y.is_nan() {
                return Err(GeoError::NaNCoordinate);
            }
            ring.push(Point::new(x, y));
        }

        debug!("Parsed polygon id={} with {} vertices", id, ring.len());
        polygons.push(Polygon::new(id, ring)?);
    }
    Ok(polygons)
}

/// Reads exactly `count` point lines, rejecting NaN coordinates.
pub fn read_points<R: BufRead>(reader: &mut R, count: usize) -> Result<Vec<Point>, GeoError> {
    let mut points = Vec::with_capacity(count);
    for line_no in 0..count {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(GeoError::MalformedPoint { line: line_no + 1 });
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        let (x_str, y_str) = trimmed
            .split_once(',')
            .ok_or(GeoError::MalformedPoint { line: line_no + 1 })?;
        let x: f64 = x_str
            .parse()
            .map_err(|_| GeoError::MalformedPoint { line: line_no + 1 })?;
        let y: f64 = y_str
            .parse()
            .map_err(|_| GeoError::MalformedPoint { line: line_no + 1 })?;
        if x.is_nan() || y.is_nan() {
            return Err(GeoError::NaNCoordinate);
        }
        points.push(Point::new(x, y));
    }
    Ok(points)
}

/// Writes one decimal integer per line.
pub fn write_results<W: Write>(writer: &mut W, ids: &[u64]) -> Result<(), GeoError> {
    let mut buf = String::with_capacity(ids.len() * 8);
    for id in ids {
        buf.push_str(&id.to_string());
        buf.push('\n');
    }
    writer.write_all(buf.as_bytes())?;
    Ok(())
}
