use super::histogram::DistanceHistogram;
use super::params::PotentialConfig;
use super::scoring::log_odds_profile;
use super::table::ScoreTable;
use crate::core::models::pair::PairKey;

/// Derives the score table from counts aggregated over a training corpus.
///
/// Every canonical pair receives a profile. A pair never observed within the
/// cutoff has all-zero counts and therefore a profile made entirely of the
/// sentinel score.
pub fn derive_score_table(aggregate: &DistanceHistogram, config: &PotentialConfig) -> ScoreTable {
    let empty = vec![0; config.num_bins];
    let mut table = ScoreTable::new();
    for key in PairKey::ALL {
        let counts = aggregate.get(&key).unwrap_or(empty.as_slice());
        table.insert(key, log_odds_profile(counts, config));
    }
    table
}
