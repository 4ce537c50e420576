//! Environment variable utilities for fairdiv
//!
//! `FAIRDIV_DIR` anchors relative output paths (e.g. a `--dump-json` report);
//! unlike a strict project-root requirement, it defaults to the current
//! working directory when unset, since fairdiv has no fixed install layout.

use std::env;
use std::path::PathBuf;

/// Error type for environment/configuration issues.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("FAIRDIV_DIR points to a non-existent directory: {0}")]
    DirNotFound(PathBuf),

    #[error("failed to create output directory {0}: {1}")]
    OutputDirCreationFailed(PathBuf, std::io::Error),
}

/// Resolve the fairdiv working directory.
///
/// Returns `$FAIRDIV_DIR` if set and it exists on disk, otherwise the
/// current working directory.
///
/// # Errors
///
/// Returns an error if `FAIRDIV_DIR` is set but does not point to an
/// existing directory.
pub fn fairdiv_dir() -> Result<PathBuf, EnvError> {
    match env::var("FAIRDIV_DIR") {
        Ok(raw) => {
            let path = PathBuf::from(raw);
            if !path.exists() {
                return Err(EnvError::DirNotFound(path));
            }
            Ok(path)
        }
        Err(_) => Ok(env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
    }
}

/// Resolve `path` relative to [`fairdiv_dir`] when it is itself relative,
/// creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if `FAIRDIV_DIR` is invalid or the parent directory
/// cannot be created.
pub fn resolve_output_path(path: &std::path::Path) -> Result<PathBuf, EnvError> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        fairdiv_dir()?.join(path)
    };
    if let Some(parent) = resolved.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| EnvError::OutputDirCreationFailed(parent.to_path_buf(), e))?;
        }
    }
    Ok(resolved)
}
