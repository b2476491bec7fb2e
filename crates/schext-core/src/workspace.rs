//! Workspace directory: the base that relative output and manifest paths resolve against.

use std::path::{Path, PathBuf};

use crate::error::RunError;

/// Resolves the workspace directory: `explicit` if given, else the current directory.
///
/// Fails with `NoWorkspace` when the directory cannot be determined or is not a directory.
pub fn resolve_workspace(explicit: Option<&Path>) -> Result<PathBuf, RunError> {
    let dir = match explicit {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()
            .map_err(|e| RunError::NoWorkspace(format!("current directory unavailable: {}", e)))?,
    };
    if !dir.is_dir() {
        return Err(RunError::NoWorkspace(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    Ok(dir)
}

/// Joins `relative` onto `workspace`; absolute paths are returned unchanged.
pub fn resolve_in(workspace: &Path, relative: impl AsRef<Path>) -> PathBuf {
    let p = relative.as_ref();
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        workspace.join(p)
    }
}
