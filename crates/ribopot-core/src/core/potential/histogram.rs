use super::params::PotentialConfig;
use crate::core::models::pair::PairKey;
use crate::core::models::residue::Residue;
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-pair distance counts, one fixed-length bin vector per [`PairKey`].
///
/// A key only appears once it has been counted (or merged in). Its bin vector is
/// created zero-filled on first access, so every present key has exactly
/// `num_bins` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceHistogram {
    num_bins: usize,
    counts: BTreeMap<PairKey, Vec<u64>>,
}

impl DistanceHistogram {
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            counts: BTreeMap::new(),
        }
    }

    /// Builds the chain-local distance histogram of one structure.
    ///
    /// Every two residues on the same chain whose sequence separation is at least
    /// `min_sequence_separation` are binned by the distance between their
    /// representative atoms. Each such pair is counted once per ordering, so a
    /// qualifying pair adds 2 to its bin. A residue is never paired with itself.
    pub fn from_residues(residues: &[Residue], config: &PotentialConfig) -> Self {
        #[cfg(not(feature = "parallel"))]
        let histogram = (0..residues.len()).fold(Self::new(config.num_bins), |mut acc, i| {
            acc.count_row(residues, i, config);
            acc
        });

        #[cfg(feature = "parallel")]
        let histogram = (0..residues.len())
            .into_par_iter()
            .fold(
                || Self::new(config.num_bins),
                |mut acc, i| {
                    acc.count_row(residues, i, config);
                    acc
                },
            )
            .reduce(|| Self::new(config.num_bins), Self::merge);

        histogram
    }

    fn count_row(&mut self, residues: &[Residue], i: usize, config: &PotentialConfig) {
        let first = &residues[i];
        for second in &residues[i + 1..] {
            if first.chain_id != second.chain_id
                || first.sequence_separation(second) < config.min_sequence_separation
            {
                continue;
            }
            if let Some(bin) = config.bin_index(first.distance_to(second)) {
                self.increment(PairKey::new(first.base, second.base), bin, 2);
            }
        }
    }

    /// Mutable bins of `key`, inserting a zero-filled vector if absent.
    pub fn bins_mut(&mut self, key: PairKey) -> &mut [u64] {
        let num_bins = self.num_bins;
        self.counts
            .entry(key)
            .or_insert_with(|| vec![0; num_bins])
    }

    /// Adds `amount` to one bin. Out-of-range bins are ignored.
    pub fn increment(&mut self, key: PairKey, bin: usize, amount: u64) {
        if bin < self.num_bins {
            self.bins_mut(key)[bin] += amount;
        }
    }

    pub fn get(&self, key: &PairKey) -> Option<&[u64]> {
        self.counts.get(key).map(Vec::as_slice)
    }

    /// Present pairs in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &[u64])> {
        self.counts.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn pair_total(&self, key: &PairKey) -> u64 {
        self.get(key).map_or(0, |bins| bins.iter().sum())
    }

    pub fn total(&self) -> u64 {
        self.counts.values().flatten().sum()
    }

    /// Adds every count of `other` into `self`, bin by bin.
    ///
    /// # Panics
    ///
    /// Panics if the two histograms use a different number of bins.
    pub fn merge_from(&mut self, other: &DistanceHistogram) {
        assert_eq!(
            self.num_bins, other.num_bins,
            "cannot merge histograms with different bin counts"
        );
        for (key, bins) in &other.counts {
            for (acc, count) in self.bins_mut(*key).iter_mut().zip(bins) {
                *acc += count;
            }
        }
    }

    pub fn merge(mut self, other: DistanceHistogram) -> Self {
        self.merge_from(&other);
        self
    }
}
