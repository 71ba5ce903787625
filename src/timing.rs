//! ## Per-phase timing
//!
//! Reproduces the seven-line diagnostic report the original program printed
//! to stderr: total, parse polygons, parse points, build index, encode
//! points, write result, plus a derived per-query time.

use std::time::{Duration, Instant};

/// Accumulates the duration of each pipeline phase.
#[derive(Debug, Default)]
pub struct PhaseTimings {
    pub parse_polygons: Duration,
    pub parse_points: Duration,
    pub build_index: Duration,
    pub encode_points: Duration,
    pub write_result: Duration,
}

impl PhaseTimings {
    pub fn total(&self) -> Duration {
        self.parse_polygons
            + self.parse_points
            + self.build_index
            + self.encode_points
            + self.write_result
    }

    /// Mean time per query, or `Duration::ZERO` when there were no points.
    pub fn per_query(&self, num_points: usize) -> Duration {
        if num_points == 0 {
            Duration::ZERO
        } else {
            self.encode_points / num_points as u32
        }
    }

    /// Writes the fixed-order seven-line diagnostic report to `out`.
    pub fn report<W: std::io::Write>(&self, out: &mut W, num_points: usize) -> std::io::Result<()> {
        writeln!(out, "total time:  \t{:?}", self.total())?;
        writeln!(out, "parse poly:  \t{:?}", self.parse_polygons)?;
        writeln!(out, "parse point: \t{:?}", self.parse_points)?;
        writeln!(out, "build index: \t{:?}", self.build_index)?;
        writeln!(out, "encode point:\t{:?}", self.encode_points)?;
        writeln!(out, "write result:\t{:?}", self.write_result)?;
        writeln!(out, "query time  :\t{:?}", self.per_query(num_points))?;
        Ok(())
    }
}

/// Measures the duration of `f` and returns both its result and the elapsed time.
pub fn time_phase<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
