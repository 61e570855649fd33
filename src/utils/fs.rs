use crate::error::{DatasnapError, Result};
use std::path::{Path, PathBuf};

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => DatasnapError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => DatasnapError::from(e),
        })?;
    }
    Ok(())
}

pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => DatasnapError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => DatasnapError::from(e),
        })?;
    }
    Ok(())
}

pub fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(std::fs::read_dir(path)?.next().is_none())
}

/// Recursively collect files under `dir` whose extension matches `ext`
/// (case-insensitive), sorted by path.
pub fn find_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if dir.exists() {
        collect_files(dir, &mut |path: &Path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(ext))
                .unwrap_or(false)
        }, &mut found)?;
    }
    found.sort();
    Ok(found)
}

/// Recursively collect every regular file under `dir`, sorted by path.
pub fn list_files_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if dir.exists() {
        collect_files(dir, &mut |_: &Path| true, &mut found)?;
    }
    found.sort();
    Ok(found)
}

fn collect_files(
    dir: &Path,
    keep: &mut dyn FnMut(&Path) -> bool,
    found: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_files(&path, keep, found)?;
        } else if keep(&path) {
            found.push(path);
        }
    }
    Ok(())
}
