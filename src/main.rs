//! Batch geo-encoder: reads polygons and query points from stdin, builds an
//! R-tree index, assigns each point the id of the first containing polygon
//! (`0` if none), and writes one id per line to stdout.
//!
//! Pipeline is strictly staged: parse-all -> build-index -> encode-all ->
//! emit. No concurrency within a run.

use geoencoder::encoder::GeoEncoder;
use geoencoder::error::GeoError;
use geoencoder::io;
use geoencoder::timing::{time_phase, PhaseTimings};
use std::io::{BufReader, BufWriter};
use std::process::ExitCode;
use tracing::info;

/// Reference R-tree configuration, per spec.md §6.
const DEFAULT_MIN_CHILDREN: usize = 25;
const DEFAULT_MAX_CHILDREN: usize = 50;

fn rtree_capacity_from_env() -> Result<(usize, usize), GeoError> {
    let min = env_usize("GEOENCODER_MIN_CHILDREN", DEFAULT_MIN_CHILDREN);
    let max = env_usize("GEOENCODER_MAX_CHILDREN", DEFAULT_MAX_CHILDREN);
    if min < 1 || min > max / 2 {
        return Err(GeoError::InvalidCapacity { min, max });
    }
    Ok((min, max))
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn run() -> Result<(), GeoError> {
    let (min_children, max_children) = rtree_capacity_from_env()?;
    info!(
        "Starting geoencoder with min_children={}, max_children={}",
        min_children, max_children
    );

    let stdin = std::io::stdin();
    let mut reader = BufReader::with_capacity(64 * 4096, stdin.lock());

    let (num_polygons, num_points) = io::read_header(&mut reader)?;

    let (polygons, parse_polygons) = time_phase(|| io::read_polygons(&mut reader, num_polygons));
    let polygons = polygons?;

    let (points, parse_points) = time_phase(|| io::read_points(&mut reader, num_points));
    let points = points?;

    let (encoder, build_index) =
        time_phase(|| GeoEncoder::build(polygons, min_children, max_children));

    let (ids, encode_points) = time_phase(|| {
        points
            .iter()
            .map(|&pt| encoder.encode(pt))
            .collect::<Vec<u64>>()
    });

    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let (write_result, write_result_duration) =
        time_phase(|| io::write_results(&mut writer, &ids));
    write_result?;

    let timings = PhaseTimings {
        parse_polygons,
        parse_points,
        build_index,
        encode_points,
        write_result: write_result_duration,
    };
    let stderr = std::io::stderr();
    let mut stderr_lock = stderr.lock();
    timings.report(&mut stderr_lock, num_points)?;

    info!("Encoded {} points against {} polygons", num_points, encoder.len());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("geoencoder: {err}");
            ExitCode::FAILURE
        }
    }
}
