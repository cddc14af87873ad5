use crate::core::io::traits::StructureFile;
use crate::core::models::residue::{BaseType, Residue};
use crate::core::potential::params::PotentialConfig;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> Option<&str> {
    line.get(start..end).map(str::trim)
}

fn parse_coordinate(line: &str, start: usize, end: usize) -> Option<f64> {
    slice_and_trim(line, start, end)?.parse().ok()
}

/// Extracts a residue from a single `ATOM` record.
///
/// Returns `None` for any record that is not an `ATOM` of the representative atom,
/// names a residue outside A/C/G/U, or has unreadable fixed-width fields.
fn parse_atom_record(line: &str, backbone_atom: &str) -> Option<Residue> {
    if !line.starts_with("ATOM") {
        return None;
    }
    if slice_and_trim(line, 12, 16)? != backbone_atom {
        return None;
    }
    let base = BaseType::from_residue_name(slice_and_trim(line, 17, 20)?)?;
    let chain_id = slice_and_trim(line, 21, 22)?;
    let sequence_number: isize = slice_and_trim(line, 22, 26)?.parse().ok()?;
    let x = parse_coordinate(line, 30, 38)?;
    let y = parse_coordinate(line, 38, 46)?;
    let z = parse_coordinate(line, 46, 54)?;

    Some(Residue::new(
        chain_id,
        sequence_number,
        base,
        Point3::new(x, y, z),
    ))
}

/// Reader for fixed-column PDB coordinate files.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
        config: &PotentialConfig,
    ) -> Result<Vec<Residue>, Self::Error> {
        let mut residues = Vec::new();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim_end_matches(['\n', '\r']);
            if let Some(residue) = parse_atom_record(line, &config.backbone_atom) {
                residues.push(residue);
            }
        }

        Ok(residues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::potential::params::PotentialConfigBuilder;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn atom_line(
        record: &str,
        name: &str,
        res_name: &str,
        chain: &str,
        seq: isize,
        pos: (f64, f64, f64),
    ) -> String {
        format!(
            "{:<6}{:>5} {:<4} {:>3} {:1}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C",
            record, 1, name, res_name, chain, seq, pos.0, pos.1, pos.2
        )
    }

    fn read(content: &str) -> Vec<Residue> {
        PdbFile::read_from(&mut Cursor::new(content), &PotentialConfig::default()).unwrap()
    }

    #[test]
    fn reads_representative_atom_from_literal_record() {
        let content = "ATOM      1  C3'   G A   1      50.193  51.190  50.534  1.00 99.99           C\n";
        let residues = read(content);
        assert_eq!(residues.len(), 1);
        let r = &residues[0];
        assert_eq!(r.chain_id, "A");
        assert_eq!(r.sequence_number, 1);
        assert_eq!(r.base, BaseType::Guanine);
        assert_eq!(r.position, Point3::new(50.193, 51.190, 50.534));
    }

    #[test]
    fn keeps_file_order_and_ignores_other_atoms() {
        let content = [
            atom_line("ATOM", "P", "A", "A", 1, (0.0, 0.0, 0.0)),
            atom_line("ATOM", "C3'", "A", "A", 1, (1.0, 2.0, 3.0)),
            atom_line("ATOM", "C4'", "A", "A", 1, (9.0, 9.0, 9.0)),
            atom_line("ATOM", "C3'", "U", "B", 7, (4.0, 5.0, 6.0)),
            atom_line("ATOM", "C3'", "C", "A", 2, (-1.5, 0.25, 8.0)),
        ]
        .join("\n");

        let residues = read(&content);
        let summary: Vec<_> = residues
            .iter()
            .map(|r| (r.chain_id.as_str(), r.sequence_number, r.base))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", 1, BaseType::Adenine),
                ("B", 7, BaseType::Uracil),
                ("A", 2, BaseType::Cytosine),
            ]
        );
        assert_eq!(residues[2].position, Point3::new(-1.5, 0.25, 8.0));
    }

    #[test]
    fn skips_hetatm_and_non_nucleotide_residues() {
        let content = [
            atom_line("HETATM", "C3'", "A", "A", 1, (0.0, 0.0, 0.0)),
            atom_line("ATOM", "C3'", "PSU", "A", 2, (0.0, 0.0, 0.0)),
            atom_line("ATOM", "C3'", "DA", "A", 3, (0.0, 0.0, 0.0)),
            atom_line("ATOM", "C3'", "G", "A", 4, (0.0, 0.0, 0.0)),
        ]
        .join("\n");

        let residues = read(&content);
        assert_eq!(residues.len(), 1);
        assert_eq!(residues[0].sequence_number, 4);
    }

    #[test]
    fn silently_skips_malformed_lines() {
        let mut bad_seq = atom_line("ATOM", "C3'", "A", "A", 1, (0.0, 0.0, 0.0));
        bad_seq.replace_range(22..26, "  x1");
        let mut bad_coord = atom_line("ATOM", "C3'", "A", "A", 2, (0.0, 0.0, 0.0));
        bad_coord.replace_range(30..38, "  abc.d ");
        let truncated = atom_line("ATOM", "C3'", "A", "A", 3, (0.0, 0.0, 0.0))[..40].to_string();

        let content = [
            "HEADER    RNA".to_string(),
            "ATOM".to_string(),
            bad_seq,
            bad_coord,
            truncated,
            "END".to_string(),
            atom_line("ATOM", "C3'", "U", "A", 9, (1.0, 1.0, 1.0)),
        ]
        .join("\n");

        let residues = read(&content);
        assert_eq!(residues.len(), 1);
        assert_eq!(residues[0].sequence_number, 9);
    }

    #[test]
    fn handles_crlf_line_endings_and_blank_chain() {
        let content = format!(
            "{}\r\n{}\r\n",
            atom_line("ATOM", "C3'", "A", " ", 1, (0.0, 0.0, 0.0)),
            atom_line("ATOM", "C3'", "G", " ", 2, (0.0, 0.0, 1.0)),
        );
        let residues = read(&content);
        assert_eq!(residues.len(), 2);
        assert!(residues.iter().all(|r| r.chain_id.is_empty()));
    }

    #[test]
    fn tolerates_invalid_utf8_bytes() {
        let mut bytes = b"REMARK \xff\xfe garbage\n".to_vec();
        bytes.extend_from_slice(atom_line("ATOM", "C3'", "C", "A", 5, (0.0, 0.0, 0.0)).as_bytes());
        let residues =
            PdbFile::read_from(&mut Cursor::new(bytes), &PotentialConfig::default()).unwrap();
        assert_eq!(residues.len(), 1);
    }

    #[test]
    fn honors_configured_backbone_atom() {
        let config = PotentialConfigBuilder::new()
            .backbone_atom("P")
            .build()
            .unwrap();
        let content = [
            atom_line("ATOM", "P", "A", "A", 1, (0.0, 0.0, 0.0)),
            atom_line("ATOM", "C3'", "A", "A", 1, (1.0, 1.0, 1.0)),
        ]
        .join("\n");
        let residues = PdbFile::read_from(&mut Cursor::new(content), &config).unwrap();
        assert_eq!(residues.len(), 1);
        assert_eq!(residues[0].position, Point3::origin());
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let path = PathBuf::from("/non/existent/structure.pdb");
        let result = PdbFile::read_from_path(&path, &PotentialConfig::default());
        assert!(matches!(result, Err(PdbError::Io(_))));
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        std::fs::write(
            &path,
            atom_line("ATOM", "C3'", "U", "A", 3, (1.0, 2.0, 3.0)),
        )
        .unwrap();
        let residues = PdbFile::read_from_path(&path, &PotentialConfig::default()).unwrap();
        assert_eq!(residues.len(), 1);
        assert_eq!(residues[0].base, BaseType::Uracil);
    }
}
