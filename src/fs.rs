//! Filesystem capability consumed by discovery and generation.
//!
//! The generator never touches `std::fs` directly; it goes through
//! [`FileSystem`] so hosts can supply their own primitives and tests can
//! run against [`MemoryFs`].

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Entry names of `dir`, non-recursive, in the order the backend lists them.
    async fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>>;
    async fn create_dir_all(&self, dir: &Path) -> io::Result<()>;
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real filesystem, through `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(dir).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents.as_bytes()).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        tokio::fs::rename(from, to).await
    }
}

/// In-memory filesystem.
///
/// Files are listed in insertion order, so a test controls the "listing
/// order" discovery sees. Writing into a directory that was never created
/// fails with `NotFound`, like the real thing.
#[derive(Debug, Default)]
pub struct MemoryFs {
    dirs: Mutex<Vec<PathBuf>>,
    files: Mutex<Vec<(PathBuf, String)>>,
    writes: AtomicUsize,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its ancestors).
    pub fn with_dir(self, dir: impl AsRef<Path>) -> Self {
        self.add_dir(dir.as_ref());
        self
    }

    /// Add a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.put(path, contents);
        self
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        lock(&self.files).retain(|(p, _)| p != path);
    }

    /// Number of successful `write` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = path.as_ref();
        lock(&self.files)
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.clone())
    }

    pub fn has_dir(&self, dir: impl AsRef<Path>) -> bool {
        let dir = dir.as_ref();
        dir.as_os_str().is_empty() || lock(&self.dirs).iter().any(|d| d == dir)
    }

    fn add_dir(&self, dir: &Path) {
        let mut dirs = lock(&self.dirs);
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            if !dirs.iter().any(|d| d == ancestor) {
                dirs.push(ancestor.to_path_buf());
            }
        }
    }

    fn put(&self, path: &Path, contents: &str) {
        let mut files = lock(&self.files);
        match files.iter_mut().find(|(p, _)| p == path) {
            Some((_, existing)) => *existing = contents.to_string(),
            None => files.push((path.to_path_buf(), contents.to_string())),
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) => self.has_dir(parent),
            None => true,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}

#[async_trait]
impl FileSystem for MemoryFs {
    async fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        if !self.has_dir(dir) {
            return Err(not_found(dir));
        }

        let mut names: Vec<String> = lock(&self.dirs)
            .iter()
            .filter(|d| d.parent() == Some(dir))
            .filter_map(|d| d.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.extend(
            lock(&self.files)
                .iter()
                .filter(|(p, _)| p.parent() == Some(dir))
                .filter_map(|(p, _)| p.file_name())
                .map(|n| n.to_string_lossy().into_owned()),
        );
        Ok(names)
    }

    async fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        self.add_dir(dir);
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| not_found(path))
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if !self.parent_exists(path) {
            return Err(not_found(path));
        }
        self.put(path, contents);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if !self.parent_exists(to) {
            return Err(not_found(to));
        }
        let contents = self.contents(from).ok_or_else(|| not_found(from))?;
        self.remove_file(from);
        self.put(to, &contents);
        Ok(())
    }
}
