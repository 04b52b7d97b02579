use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::FileSystem;

/// Sibling temp path: `pinia-auto-refs.ts` → `pinia-auto-refs.ts.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` next to `path`, then rename over it, so readers see
/// either the previous artifact or the new one, never a partial file.
pub async fn write_atomic(fs: &dyn FileSystem, path: &Path, contents: &str) -> Result<()> {
    let temp = temp_path(path);
    fs.write(&temp, contents)
        .await
        .map_err(|e| Error::write(path, e))?;
    fs.rename(&temp, path)
        .await
        .map_err(|e| Error::write(path, e))?;
    Ok(())
}

/// Make sure the output directory exists. Best effort: failures are logged
/// and otherwise ignored; the write that follows reports the real error.
pub async fn bootstrap_output_dir(fs: &dyn FileSystem, dir: &Path) {
    if fs.read_dir_names(dir).await.is_ok() {
        return;
    }
    match fs.create_dir_all(dir).await {
        Ok(()) => tracing::debug!(dir = %dir.display(), "created output directory"),
        Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "could not create output directory"),
    }
}
