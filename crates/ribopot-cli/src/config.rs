use crate::error::{CliError, Result};
use ribopot::core::potential::params::{PotentialConfig, PotentialConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialStructureConfig {
    #[serde(rename = "backbone-atom")]
    backbone_atom: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPotentialParams {
    #[serde(rename = "num-bins")]
    num_bins: Option<usize>,
    #[serde(rename = "bin-width")]
    bin_width: Option<f64>,
    #[serde(rename = "min-sequence-separation")]
    min_sequence_separation: Option<usize>,
    #[serde(rename = "max-score")]
    max_score: Option<f64>,
}

/// Settings read from an optional TOML file, before defaults are applied.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialPotentialConfig {
    structure: Option<PartialStructureConfig>,
    potential: Option<PartialPotentialParams>,
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

impl PartialPotentialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let config_file_error = |source: anyhow::Error| CliError::ConfigFile {
            path: path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(path).map_err(|e| config_file_error(e.into()))?;
        toml::from_str(&content).map_err(|e| config_file_error(e.into()))
    }

    /// Loads the file if one is given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies `--set` overrides on top of the file values and validates the result.
    pub fn merge_with_cli(mut self, set_values: &[String]) -> Result<PotentialConfig> {
        self.apply_set_values(set_values)?;

        let structure = self.structure.take().unwrap_or_default();
        let potential = self.potential.take().unwrap_or_default();

        let mut builder = PotentialConfigBuilder::new();
        if let Some(atom) = structure.backbone_atom {
            builder = builder.backbone_atom(atom);
        }
        if let Some(n) = potential.num_bins {
            builder = builder.num_bins(n);
        }
        if let Some(width) = potential.bin_width {
            builder = builder.bin_width(width);
        }
        if let Some(separation) = potential.min_sequence_separation {
            builder = builder.min_sequence_separation(separation);
        }
        if let Some(score) = potential.max_score {
            builder = builder.max_score(score);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();

            match key {
                "structure.backbone-atom" => {
                    self.structure
                        .get_or_insert_with(Default::default)
                        .backbone_atom = Some(value_str.to_string());
                }
                "potential.num-bins" => {
                    self.potential
                        .get_or_insert_with(Default::default)
                        .num_bins = Some(parse_value(key, value_str, "integer")?);
                }
                "potential.bin-width" => {
                    self.potential
                        .get_or_insert_with(Default::default)
                        .bin_width = Some(parse_value(key, value_str, "float")?);
                }
                "potential.min-sequence-separation" => {
                    self.potential
                        .get_or_insert_with(Default::default)
                        .min_sequence_separation = Some(parse_value(key, value_str, "integer")?);
                }
                "potential.max-score" => {
                    self.potential
                        .get_or_insert_with(Default::default)
                        .max_score = Some(parse_value(key, value_str, "float")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
