//! Generates a single TypeScript helper that re-exports every Pinia store
//! in a directory behind one typed `useStore()` accessor, and keeps it
//! current while the store directory changes.

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod generate;
pub mod plugin;
pub mod scan;

pub use config::{Config, Options};
pub use error::{Error, Result};
pub use generate::{Generation, Generator};
pub use plugin::{PassHandle, Plugin, State};
pub use scan::{discover, ModuleName};
