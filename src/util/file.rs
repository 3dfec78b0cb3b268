use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Replaces `path` with `contents` through a sibling temp file and a
/// rename, so an interrupted write leaves the old file intact. Missing
/// parent directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let staging = staging_path(path);
    fs::write(&staging, contents)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path).with_context(|| {
        let _ = fs::remove_file(&staging);
        format!("Failed to replace {}", path.display())
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parents_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("state.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_no_staging_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        write_atomic(&path, b"{}").unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("config.json")]);
    }
}
