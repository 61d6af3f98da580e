//! Crash-safe file writes: temp-then-rename replacement, and
//! create-only writes for files that must never be replaced.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Replace the file at `path` with `data` **atomically**.
///
/// 1. Write to a temp file in the same directory.
/// 2. Flush it to disk.
/// 3. Rename the temp file over the target path.
///
/// Readers see either the old contents or the new ones, never a
/// truncated file.  On Unix the file is owner-only (0o600).
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path);
    let result = write_and_sync(&tmp_path, data).and_then(|()| {
        fs::rename(&tmp_path, path)?;
        Ok(())
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Create `path` with `data`, failing with `AlreadyExists` if anything is
/// already there.  The existence check and the create are one syscall
/// (`O_CREAT | O_EXCL`), so a file that appears concurrently is never
/// replaced.  A partially written file is removed again.
pub fn write_new(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let result = fill_and_sync(file, data);
    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}

fn write_and_sync(tmp_path: &Path, data: &[u8]) -> Result<()> {
    fill_and_sync(File::create(tmp_path)?, data)?;
    Ok(())
}

fn fill_and_sync(mut file: File, data: &[u8]) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}

/// `dir/.name.tmp` next to the target, so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}
