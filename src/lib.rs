//! A batch point-in-polygon encoder: an R-tree spatial index over a fixed
//! set of simple polygons, and a ray-casting containment test, composed into
//! a single `encode(point) -> polygon_id` operation.

pub mod encoder;
pub mod error;
pub mod geometry;
pub mod io;
pub mod polygon;
pub mod rtree;
#[cfg(feature = "setup_tracing")]
mod settings;
pub mod timing;
