use crate::core::models::pair::PairKey;
use crate::core::potential::table::ScoreTable;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ScoreTableError {
    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[error("Invalid score on line {line} of '{path}': '{value}'", path = path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[error("Expected {expected} scores in '{path}', found {found}", path = path.display())]
    BinCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

/// Directory-based persistence of a [`ScoreTable`].
///
/// Each canonical pair is stored in its own `<KEY>.txt` file, holding one score per
/// line with four decimals, in bin order.
pub struct ScoreTableFile;

impl ScoreTableFile {
    /// Writes every persistable profile of `table` into `dir`, creating it if needed.
    ///
    /// Profiles without any strictly positive score are skipped. Returns the keys
    /// that were written, in canonical order.
    pub fn write_to_dir(table: &ScoreTable, dir: &Path) -> Result<Vec<PairKey>, ScoreTableError> {
        fs::create_dir_all(dir).map_err(|e| ScoreTableError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut written = Vec::new();
        for key in PairKey::ALL {
            let Some(scores) = table.get(&key) else {
                continue;
            };
            if !ScoreTable::is_persistable(scores) {
                debug!("Skipping pair {} (no positive score).", key);
                continue;
            }
            let path = dir.join(key.file_name());
            Self::write_profile_to_path(scores, &path)?;
            written.push(key);
        }
        Ok(written)
    }

    /// Loads the profiles found in `dir`.
    ///
    /// A missing pair file is logged as a warning and the pair is left out of the
    /// returned table.
    pub fn read_from_dir(dir: &Path, num_bins: usize) -> Result<ScoreTable, ScoreTableError> {
        let mut table = ScoreTable::new();
        for key in PairKey::ALL {
            let path = dir.join(key.file_name());
            if !path.is_file() {
                warn!("{} not found in {:?}; pair {} will not contribute.", key.file_name(), dir, key);
                continue;
            }
            let scores = Self::read_profile_from_path(&path, num_bins)?;
            table.insert(key, scores);
        }
        Ok(table)
    }

    pub fn write_profile(scores: &[f64], writer: &mut impl Write) -> io::Result<()> {
        for score in scores {
            writeln!(writer, "{:.4}", score)?;
        }
        writer.flush()
    }

    fn write_profile_to_path(scores: &[f64], path: &Path) -> Result<(), ScoreTableError> {
        let io_err = |e| ScoreTableError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        let file = File::create(path).map_err(io_err)?;
        Self::write_profile(scores, &mut BufWriter::new(file)).map_err(io_err)
    }

    /// Parses one profile, one score per non-empty line.
    pub fn read_profile(
        reader: &mut impl BufRead,
        path: &Path,
        num_bins: usize,
    ) -> Result<Vec<f64>, ScoreTableError> {
        let mut scores = Vec::with_capacity(num_bins);
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res.map_err(|e| ScoreTableError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let value = line.trim();
            if value.is_empty() {
                continue;
            }
            let score: f64 = value.parse().map_err(|_| ScoreTableError::Parse {
                path: path.to_path_buf(),
                line: line_num + 1,
                value: value.to_string(),
            })?;
            scores.push(score);
        }
        if scores.len() != num_bins {
            return Err(ScoreTableError::BinCount {
                path: path.to_path_buf(),
                expected: num_bins,
                found: scores.len(),
            });
        }
        Ok(scores)
    }

    fn read_profile_from_path(path: &Path, num_bins: usize) -> Result<Vec<f64>, ScoreTableError> {
        let file = File::open(path).map_err(|e| ScoreTableError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::read_profile(&mut BufReader::new(file), path, num_bins)
    }
}
