use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::CatalogError;

fn is_catalog_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext == "txt")
        .unwrap_or(false)
}

/// Names of the catalogs found directly under `base_dir`, sorted ignoring
/// case. The directory is created when missing.
///
/// Failing to read `base_dir` itself is an error. An entry that cannot be
/// inspected is skipped with a warning.
pub fn list_catalogs(base_dir: &Path) -> Result<Vec<String>, CatalogError> {
    if !base_dir.exists() {
        fs::create_dir_all(base_dir).map_err(|e| CatalogError::io(base_dir, e))?;
        return Ok(Vec::new());
    }
    if !base_dir.is_dir() {
        return Err(CatalogError::io(
            base_dir,
            io::Error::new(io::ErrorKind::NotADirectory, "catalog directory is a file"),
        ));
    }

    let mut names: Vec<String> = Vec::new();
    for entry in WalkDir::new(base_dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(CatalogError::io(base_dir, e.into())),
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {e}", base_dir.display());
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_catalog_file(path) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }

    names.sort_by_key(|n| n.to_lowercase());
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn list_catalogs_finds_txt_files_sorted_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("horror.txt"), "").unwrap();
        fs::write(dir.path().join("Comedy.txt"), "").unwrap();
        fs::write(dir.path().join("actions.log"), "").unwrap();
        let sub = dir.path().join("nested");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("deep.txt"), "").unwrap();

        let names = list_catalogs(dir.path()).unwrap();
        assert_eq!(names, vec!["Comedy".to_string(), "horror".to_string()]);
    }

    #[test]
    fn list_catalogs_creates_missing_dir() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("catalogs");

        assert!(list_catalogs(&base).unwrap().is_empty());
        assert!(base.is_dir());
    }

    #[test]
    fn list_catalogs_fails_when_base_dir_is_a_file() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("catalogs");
        fs::write(&base, "not a directory").unwrap();

        match list_catalogs(&base) {
            Err(CatalogError::Io { path, source }) => {
                assert_eq!(path, base);
                assert_eq!(source.kind(), io::ErrorKind::NotADirectory);
            }
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }
}
