use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failures of a single generation pass.
///
/// A pass outcome can be observed by several waiters at once, so the
/// error is `Clone` and I/O sources are shared behind an `Arc`.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("failed to read store directory {}", path.display())]
    DiscoveryRead {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("regeneration worker has stopped")]
    WorkerStopped,
}

impl Error {
    pub fn discovery_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::DiscoveryRead {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
