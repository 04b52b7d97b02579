//! Generator configuration.
//!
//! [`Options`] is the partial, user-facing record (TOML file or CLI flags);
//! [`Config`] is the resolved, immutable record every pass reads from.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "pinia-autorefs.toml";

pub const DEFAULT_STORE_DIR: &str = "src/store";
pub const DEFAULT_EXCLUDES: &[&str] = &["index"];
pub const DEFAULT_OUTPUT_FILE: &str = "src/helper/pinia-auto-refs.ts";
pub const DEFAULT_EXTENSION: &str = "ts";
pub const DEFAULT_ALIAS_FROM: &str = "src";
pub const DEFAULT_ALIAS_TO: &str = "@";

/// How discovered module names are ordered in the artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryOrder {
    /// Whatever order the directory listing returns.
    #[default]
    Listing,
    /// Byte-wise sorted, reproducible across filesystems.
    Sorted,
}

/// Literal substitution applied to `store_dir` to build import paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub from: String,
    pub to: String,
}

impl Default for AliasRule {
    fn default() -> Self {
        Self {
            from: DEFAULT_ALIAS_FROM.to_string(),
            to: DEFAULT_ALIAS_TO.to_string(),
        }
    }
}

impl AliasRule {
    /// Replace the first literal occurrence of `from`. No path semantics:
    /// `app/src/store` becomes `app/@/store`, `lib/store` is left alone.
    pub fn apply(&self, path: &str) -> String {
        if self.from.is_empty() {
            return path.to_string();
        }
        path.replacen(&self.from, &self.to, 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    #[serde(alias = "storeDir", skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excludes: Option<Vec<String>>,
    #[serde(alias = "outputFile", skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<AliasRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<DiscoveryOrder>,
}

impl Options {
    /// Shallow merge: every field set in `over` replaces ours.
    pub fn merge(self, over: Options) -> Options {
        Options {
            store_dir: over.store_dir.or(self.store_dir),
            excludes: over.excludes.or(self.excludes),
            output_file: over.output_file.or(self.output_file),
            extension: over.extension.or(self.extension),
            alias: over.alias.or(self.alias),
            order: over.order.or(self.order),
        }
    }

    pub fn load(path: &Path) -> Result<Options> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `<root>/pinia-autorefs.toml`, or defaults when it does not exist.
    pub fn load_or_default(root: &Path) -> Result<Options> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Options::default());
        }
        Options::load(&path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base path every relative path is resolved against.
    pub root: PathBuf,
    pub store_dir: String,
    pub excludes: BTreeSet<String>,
    pub output_file: String,
    pub extension: String,
    pub alias: AliasRule,
    pub order: DiscoveryOrder,
}

impl Config {
    pub fn resolve(root: impl Into<PathBuf>, options: Options) -> Config {
        let excludes = options
            .excludes
            .unwrap_or_else(|| DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect());

        Config {
            root: root.into(),
            store_dir: options
                .store_dir
                .unwrap_or_else(|| DEFAULT_STORE_DIR.to_string()),
            excludes: excludes.into_iter().collect(),
            output_file: options
                .output_file
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
            extension: options
                .extension
                .map(|e| e.trim_start_matches('.').to_string())
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            alias: options.alias.unwrap_or_default(),
            order: options.order.unwrap_or_default(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.root.join(&self.store_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_file)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone())
    }

    /// Prefix of every generated import path, e.g. `@/store`.
    pub fn import_base(&self) -> String {
        self.alias.apply(&self.store_dir)
    }

    /// Whether a changed path should trigger regeneration. Purely lexical.
    pub fn is_store_change(&self, changed: &Path) -> bool {
        changed.to_string_lossy().contains(self.store_dir.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::resolve(".", Options::default())
    }
}
