use super::histogram::DistanceHistogram;
use super::params::PotentialConfig;
use super::table::ScoreTable;
use crate::core::models::pair::PairKey;
use crate::core::models::residue::Residue;
use std::collections::BTreeMap;

/// Log-odds pseudo-energy of one bin.
///
/// `-ln(observed / reference)` with a uniform reference over all bins, capped at
/// `max_score`. A bin without observations (or an empty pair) scores exactly
/// `max_score`.
#[inline]
pub fn log_odds_score(count: u64, total: u64, config: &PotentialConfig) -> f64 {
    let observed = if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    };
    if observed > 0.0 {
        (-(observed / config.reference_frequency()).ln()).min(config.max_score)
    } else {
        config.max_score
    }
}

/// Log-odds pseudo-energies of every bin of one pair's counts.
pub fn log_odds_profile(counts: &[u64], config: &PotentialConfig) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    counts
        .iter()
        .map(|&count| log_odds_score(count, total, config))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureScore {
    pub total: f64,
    pub per_pair: BTreeMap<PairKey, f64>,
}

/// Scores a single structure against a loaded score table.
///
/// The table acts as a filter on which pairs contribute. Each contributing pair is
/// scored with the log-odds formula applied to the structure's own counts, and the
/// per-bin scores are summed over bins and pairs.
pub struct Scorer<'a> {
    table: &'a ScoreTable,
    config: &'a PotentialConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(table: &'a ScoreTable, config: &'a PotentialConfig) -> Self {
        Self { table, config }
    }

    pub fn score_residues(&self, residues: &[Residue]) -> StructureScore {
        let histogram = DistanceHistogram::from_residues(residues, self.config);
        self.score_histogram(&histogram)
    }

    pub fn score_histogram(&self, histogram: &DistanceHistogram) -> StructureScore {
        let mut score = StructureScore::default();
        for (key, counts) in histogram.iter() {
            if !self.table.contains(key) {
                continue;
            }
            let pair_score: f64 = log_odds_profile(counts, self.config).iter().sum();
            score.per_pair.insert(*key, pair_score);
            score.total += pair_score;
        }
        score
    }
}
