use std::path::Path;

use crate::error::{Error, Result};
use crate::fs::FileSystem;

use super::filter::{ModuleFilter, ModuleName};

/// List `dir` once, non-recursively, and keep the entries that are modules.
///
/// A missing or unreadable directory is an error; it is never created here
/// and never treated as empty.
pub async fn discover(
    fs: &dyn FileSystem,
    dir: &Path,
    filter: &ModuleFilter,
) -> Result<Vec<ModuleName>> {
    let names = fs
        .read_dir_names(dir)
        .await
        .map_err(|e| Error::discovery_read(dir, e))?;

    let modules = filter.apply(&names);
    tracing::debug!(
        dir = %dir.display(),
        entries = names.len(),
        modules = modules.len(),
        "discovered store modules"
    );

    Ok(modules)
}
