//! ## Errors for geoencoder
//!
//! This module defines the errors that can be returned while parsing input or
//! configuring the spatial index. All variants are fatal: once the pipeline is
//! assembled, `encode`/`contains`/`search` are total and never fail.

use std::error::Error;
use std::fmt;

/// Represents a fatal error in the geoencoder pipeline.
#[derive(Debug)]
pub enum GeoError {
    /// The `<M> <N>` header line is missing or not two non-negative integers.
    MalformedHeader,
    /// A polygon line could not be parsed.
    MalformedPolygon {
        /// 1-based line number within the polygon block.
        line: usize,
    },
    /// A point line could not be parsed.
    MalformedPoint {
        /// 1-based line number within the point block.
        line: usize,
    },
    /// A polygon id of zero or a non-positive value was supplied.
    NonPositivePolygonId {
        /// The offending id, as parsed.
        id: i64,
    },
    /// The same polygon id was used twice in one input.
    DuplicatePolygonId {
        /// The id that repeated.
        id: u64,
    },
    /// A polygon had fewer than 3 vertices.
    UnderSpecifiedPolygon {
        /// The polygon's id.
        id: u64,
        /// The number of vertices actually supplied.
        vertices: usize,
    },
    /// A coordinate parsed to NaN.
    NaNCoordinate,
    /// An R-tree was configured with an invalid `min_children`/`max_children` pair.
    InvalidCapacity {
        /// The requested minimum children per node.
        min: usize,
        /// The requested maximum children per node.
        max: usize,
    },
    /// Wraps an underlying I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::MalformedHeader => {
                write!(f, "malformed header: expected \"<M> <N>\"")
            }
            GeoError::MalformedPolygon { line } => {
                write!(f, "malformed polygon on line {line}")
            }
            GeoError::MalformedPoint { line } => {
                write!(f, "malformed point on line {line}")
            }
            GeoError::NonPositivePolygonId { id } => {
                write!(f, "polygon id must be a positive integer, got {id}")
            }
            GeoError::DuplicatePolygonId { id } => {
                write!(f, "duplicate polygon id: {id}")
            }
            GeoError::UnderSpecifiedPolygon { id, vertices } => {
                write!(
                    f,
                    "polygon {id} has {vertices} vertices, at least 3 are required"
                )
            }
            GeoError::NaNCoordinate => {
                write!(f, "NaN coordinate in input")
            }
            GeoError::InvalidCapacity { min, max } => {
                write!(
                    f,
                    "invalid R-tree capacity: min_children={min}, max_children={max} \
                     (require 1 <= min <= max/2)"
                )
            }
            GeoError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl Error for GeoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GeoError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GeoError {
    fn from(err: std::io::Error) -> Self {
        GeoError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_header_display() {
        let err = GeoError::MalformedHeader;
        assert_eq!(format!("{err}"), "malformed header: expected \"<M> <N>\"");
    }

    #[test]
    fn test_under_specified_polygon_display() {
        let err = GeoError::UnderSpecifiedPolygon { id: 7, vertices: 2 };
        assert_eq!(
            format!("{err}"),
            "polygon 7 has 2 vertices, at least 3 are required"
        );
    }

    #[test]
    fn test_invalid_capacity_display() {
        let err = GeoError::InvalidCapacity { min: 0, max: 50 };
        assert_eq!(
            format!("{err}"),
            "invalid R-tree capacity: min_children=0, max_children=50 \
             (require 1 <= min <= max/2)"
        );
    }

    #[test]
    fn test_io_error_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: GeoError = io_err.into();
        assert!(err.source().is_some());
    }
}
