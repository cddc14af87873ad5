use crate::engine::error::EngineError;
use std::fs;
use std::path::{Path, PathBuf};

pub const STRUCTURE_EXTENSION: &str = "pdb";

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let dir_err = |e| EngineError::Directory {
        path: dir.to_path_buf(),
        source: e,
    };
    let mut paths = fs::read_dir(dir)
        .map_err(dir_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(dir_err)?;
    paths.sort();
    Ok(paths)
}

/// Structure files (`*.pdb`) directly inside `dir`, sorted by path.
pub fn list_structure_files(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == STRUCTURE_EXTENSION))
        .collect())
}

/// Sub-directories of `dir` as `(name, path)` pairs, sorted by name.
pub fn list_groups(dir: &Path) -> Result<Vec<(String, PathBuf)>, EngineError> {
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|p| p.is_dir())
        .filter_map(|p| {
            let name = p.file_name()?.to_string_lossy().into_owned();
            Some((name, p))
        })
        .collect())
}
