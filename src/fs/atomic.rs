//! Atomic file replacement for generated job specifications.
//!
//! A generated file is written as:
//! 1. a temporary sibling `.{filename}.tmp` in the same directory,
//! 2. fsync of the temporary file,
//! 3. rename over the target.
//!
//! `rename()` replaces an existing target atomically on POSIX when both paths
//! are on the same filesystem, so the scheduler never sees a half-written job.
//! On Windows `std::fs::rename` maps to `MoveFileExW` with
//! `MOVEFILE_REPLACE_EXISTING`, which also overwrites the target.

use crate::error::{EnvJobError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to `path`, replacing any existing file.
///
/// Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            EnvJobError::Output(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;
    replace(&temp_path, path)?;

    Ok(())
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            EnvJobError::Output(format!("invalid output path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        EnvJobError::Output(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        EnvJobError::Output(format!("failed to write temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        EnvJobError::Output(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

fn replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        EnvJobError::Output(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    // Persist the directory entry as well. Opening a directory fails on
    // Windows, which just skips this.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        })
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job.nomad.hcl");

        atomic_write(&file_path, b"job \"escrow\" {}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "job \"escrow\" {}");
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job.nomad.hcl");
        fs::write(&file_path, "stale job from a previous run, much longer").unwrap();

        atomic_write_file(&file_path, "fresh").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "fresh");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("build").join("nomad").join("job.hcl");

        atomic_write_file(&file_path, "nested").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "nested");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("job.hcl");

        atomic_write_file(&file_path, "content").unwrap();

        assert!(!temp_dir.path().join(".job.hcl.tmp").exists());
    }

    #[test]
    fn test_atomic_write_empty_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.hcl");

        atomic_write(&file_path, b"").unwrap();

        assert!(fs::read(&file_path).unwrap().is_empty());
    }

    #[test]
    fn test_atomic_write_into_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("occupied");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("child"), "x").unwrap();

        let err = atomic_write_file(&dir_path, "content").unwrap_err();

        assert!(matches!(err, EnvJobError::Output(_)));
        assert!(!temp_dir.path().join(".occupied.tmp").exists());
    }

    #[test]
    fn test_generate_temp_path() {
        let temp = generate_temp_path(Path::new("/srv/jobs/generated.hcl")).unwrap();

        assert_eq!(temp, Path::new("/srv/jobs/.generated.hcl.tmp"));
    }
}
