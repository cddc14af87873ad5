use crate::core::models::pair::PairKey;
use std::collections::BTreeMap;

/// Per-pair pseudo-energy profiles, one score per distance bin.
///
/// A pair missing from the table contributes nothing when scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    profiles: BTreeMap<PairKey, Vec<f64>>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PairKey, scores: Vec<f64>) {
        self.profiles.insert(key, scores);
    }

    pub fn get(&self, key: &PairKey) -> Option<&[f64]> {
        self.profiles.get(key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: &PairKey) -> bool {
        self.profiles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &[f64])> {
        self.profiles.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Whether a profile should be persisted: at least one score is strictly positive.
    pub fn is_persistable(scores: &[f64]) -> bool {
        scores.iter().any(|&s| s > 0.0)
    }
}
