//! File-system primitives for the cleanup run.
//!
//! Every helper is idempotent: deleting something already gone succeeds and
//! reports that nothing was removed.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

/// Replace `path` with `contents` via a temp sibling + rename.
pub fn write_text_atomic(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("path has no file name {}", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".cleanup.tmp");
    let tmp_path = path.with_file_name(tmp_name);
    let permissions = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => return Err(err).with_context(|| format!("stat {}", path.display())),
    };
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    let replaced = permissions
        .map_or(Ok(()), |perms| fs::set_permissions(&tmp_path, perms))
        .and_then(|()| fs::rename(&tmp_path, path));
    if let Err(err) = replaced {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("replace {}", path.display()));
    }
    Ok(())
}

/// Remove a file or directory tree. Returns `false` when nothing was there.
pub fn remove_path(path: &Path) -> Result<bool> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err).with_context(|| format!("stat {}", path.display())),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("remove directory {}", path.display()))?;
    } else {
        fs::remove_file(path).with_context(|| format!("remove file {}", path.display()))?;
    }
    debug!(path = %path.display(), "removed");
    Ok(true)
}

/// Remove `path` only if it is an existing, empty directory.
pub fn remove_dir_if_empty(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries =
        fs::read_dir(path).with_context(|| format!("read directory {}", path.display()))?;
    if entries.next().is_some() {
        return Ok(false);
    }
    fs::remove_dir(path).with_context(|| format!("remove directory {}", path.display()))?;
    debug!(path = %path.display(), "removed empty directory");
    Ok(true)
}
