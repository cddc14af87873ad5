use crate::core::io::score_table::ScoreTableFile;
use crate::core::models::pair::PairKey;
use crate::core::potential::params::PotentialConfig;
use crate::engine::error::EngineError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Samples drawn on each segment between two adjacent bins, endpoints included.
pub const POINTS_PER_SEGMENT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub distance: f64,
    pub score: f64,
}

#[derive(Debug, Serialize)]
struct ProfileRecord {
    pair: String,
    distance: String,
    score: String,
}

/// Linearly interpolates a stored profile into a dense curve.
///
/// Bin `i` (0-based) is placed at distance `(i + 1) * bin_width`. Each pair of
/// adjacent bins contributes [`POINTS_PER_SEGMENT`] evenly spaced points, so the
/// last point of one segment coincides with the first point of the next.
pub fn interpolate(scores: &[f64], bin_width: f64) -> Vec<ProfilePoint> {
    let steps = (POINTS_PER_SEGMENT - 1) as f64;
    scores
        .windows(2)
        .enumerate()
        .flat_map(|(i, w)| {
            let x1 = (i + 1) as f64 * bin_width;
            let x2 = (i + 2) as f64 * bin_width;
            let (y1, y2) = (w[0], w[1]);
            (0..POINTS_PER_SEGMENT).map(move |j| {
                let t = j as f64 / steps;
                ProfilePoint {
                    distance: x1 + (x2 - x1) * t,
                    score: y1 + (y2 - y1) * t,
                }
            })
        })
        .collect()
}

/// Loads the score table in `score_dir` and interpolates every stored profile.
#[instrument(skip_all, name = "profile_workflow")]
pub fn run(
    score_dir: &Path,
    config: &PotentialConfig,
) -> Result<BTreeMap<PairKey, Vec<ProfilePoint>>, EngineError> {
    let table = ScoreTableFile::read_from_dir(score_dir, config.num_bins)?;
    let profiles: BTreeMap<_, _> = table
        .iter()
        .map(|(key, scores)| (*key, interpolate(scores, config.bin_width)))
        .collect();
    info!(
        "Interpolated {} pair profile(s) from {:?}.",
        profiles.len(),
        score_dir
    );
    Ok(profiles)
}

/// Writes interpolated profiles as `pair,distance,score` rows.
pub fn write_csv<W: Write>(
    profiles: &BTreeMap<PairKey, Vec<ProfilePoint>>,
    writer: W,
) -> Result<(), EngineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (key, points) in profiles {
        for point in points {
            csv_writer.serialize(ProfileRecord {
                pair: key.to_string(),
                distance: format!("{:.4}", point.distance),
                score: format!("{:.4}", point.score),
            })?;
        }
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
