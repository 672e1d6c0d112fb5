use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{WorkspaceError, WorkspaceResult};

/// Pretty JSON, non-ASCII kept as-is, replaced atomically.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> WorkspaceResult<()> {
    let mut data = serde_json::to_vec_pretty(value)?;
    data.push(b'\n');
    write_bytes_atomic(path, &data)
}

/// Write to a sibling temp file, fsync, then rename over `path`.
///
/// Readers see either the old or the new content, never a torn file.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> WorkspaceResult<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    if let Err(err) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }
    if let Some(parent) = parent {
        sync_dir(parent)?;
    }

    Ok(())
}

/// Copy `path` to `<name>.bak` beside it, replacing any older backup.
pub fn backup_file(path: &Path) -> WorkspaceResult<PathBuf> {
    let backup = sibling_path(path, |name| format!("{name}.bak"))?;
    std::fs::copy(path, &backup)?;
    Ok(backup)
}

fn temp_path(path: &Path) -> WorkspaceResult<PathBuf> {
    sibling_path(path, |name| format!(".{name}.tmp"))
}

fn sibling_path(path: &Path, rename: impl FnOnce(&str) -> String) -> WorkspaceResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| WorkspaceError::Invalid(format!("not a file path: {}", path.display())))?;
    Ok(path.with_file_name(rename(&file_name.to_string_lossy())))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
