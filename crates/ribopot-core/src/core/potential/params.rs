use thiserror::Error;

pub const DEFAULT_BACKBONE_ATOM: &str = "C3'";
pub const DEFAULT_NUM_BINS: usize = 20;
pub const DEFAULT_BIN_WIDTH: f64 = 1.0;
pub const DEFAULT_MIN_SEQUENCE_SEPARATION: usize = 3;
pub const DEFAULT_MAX_SCORE: f64 = 10.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Parameters shared by every stage of the potential.
///
/// The defaults describe the standard potential: C3' atoms, twenty 1 Å bins, a
/// minimum sequence separation of 3 and scores capped at 10.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialConfig {
    pub backbone_atom: String,
    pub num_bins: usize,
    pub bin_width: f64,
    pub min_sequence_separation: usize,
    pub max_score: f64,
}

impl PotentialConfig {
    /// Distance beyond which pairs are discarded.
    #[inline]
    pub fn distance_cutoff(&self) -> f64 {
        self.num_bins as f64 * self.bin_width
    }

    /// Bin index of a distance, or `None` once the distance reaches the cutoff.
    #[inline]
    pub fn bin_index(&self, distance: f64) -> Option<usize> {
        let bin = (distance / self.bin_width).floor();
        if bin >= 0.0 && bin < self.num_bins as f64 {
            Some(bin as usize)
        } else {
            None
        }
    }

    /// Uniform reference frequency of a single bin.
    #[inline]
    pub fn reference_frequency(&self) -> f64 {
        1.0 / self.num_bins as f64
    }
}

impl Default for PotentialConfig {
    fn default() -> Self {
        Self {
            backbone_atom: DEFAULT_BACKBONE_ATOM.to_string(),
            num_bins: DEFAULT_NUM_BINS,
            bin_width: DEFAULT_BIN_WIDTH,
            min_sequence_separation: DEFAULT_MIN_SEQUENCE_SEPARATION,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

#[derive(Default)]
pub struct PotentialConfigBuilder {
    backbone_atom: Option<String>,
    num_bins: Option<usize>,
    bin_width: Option<f64>,
    min_sequence_separation: Option<usize>,
    max_score: Option<f64>,
}

impl PotentialConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backbone_atom(mut self, name: impl Into<String>) -> Self {
        self.backbone_atom = Some(name.into());
        self
    }
    pub fn num_bins(mut self, n: usize) -> Self {
        self.num_bins = Some(n);
        self
    }
    pub fn bin_width(mut self, width: f64) -> Self {
        self.bin_width = Some(width);
        self
    }
    pub fn min_sequence_separation(mut self, separation: usize) -> Self {
        self.min_sequence_separation = Some(separation);
        self
    }
    pub fn max_score(mut self, score: f64) -> Self {
        self.max_score = Some(score);
        self
    }

    pub fn build(self) -> Result<PotentialConfig, ConfigError> {
        let defaults = PotentialConfig::default();

        let backbone_atom = self
            .backbone_atom
            .map(|name| name.trim().to_string())
            .unwrap_or(defaults.backbone_atom);
        if backbone_atom.is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "backbone_atom",
                reason: "atom name must not be empty".to_string(),
            });
        }

        let num_bins = self.num_bins.unwrap_or(defaults.num_bins);
        if num_bins == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "num_bins",
                reason: "at least one distance bin is required".to_string(),
            });
        }

        let bin_width = self.bin_width.unwrap_or(defaults.bin_width);
        if !(bin_width.is_finite() && bin_width > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "bin_width",
                reason: format!("must be a positive finite number, got {}", bin_width),
            });
        }

        let max_score = self.max_score.unwrap_or(defaults.max_score);
        if !(max_score.is_finite() && max_score > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_score",
                reason: format!("must be a positive finite number, got {}", max_score),
            });
        }

        Ok(PotentialConfig {
            backbone_atom,
            num_bins,
            bin_width,
            min_sequence_separation: self
                .min_sequence_separation
                .unwrap_or(defaults.min_sequence_separation),
            max_score,
        })
    }
}
