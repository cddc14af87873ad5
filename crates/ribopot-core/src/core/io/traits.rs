use crate::core::models::residue::Residue;
use crate::core::potential::params::PotentialConfig;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading coarse-grained residues from a structure format.
///
/// Implementors decide which records of the format describe a residue's
/// representative atom; everything else in the file is ignored.
pub trait StructureFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error>;

    /// Reads the ordered residues of one structure from a buffered reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `config` - Supplies the name of the representative backbone atom.
    ///
    /// # Return
    ///
    /// Returns the residues in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the underlying source fails.
    fn read_from(
        reader: &mut impl BufRead,
        config: &PotentialConfig,
    ) -> Result<Vec<Residue>, Self::Error>;

    /// Reads the ordered residues of one structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        config: &PotentialConfig,
    ) -> Result<Vec<Residue>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, config)
    }
}
