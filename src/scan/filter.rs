use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::config::{Config, DiscoveryOrder};

/// A store module's name: its file name minus the module-source extension.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier the generated file binds the default import to.
    pub fn binding(&self) -> String {
        format!("{}Store", self.0)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Strip `.<extension>` from a file name.
/// "user.ts" → "user", "user.tsx" → None, ".ts" → None
pub fn module_name(file_name: &str, extension: &str) -> Option<ModuleName> {
    let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ModuleName::new(stem))
}

/// Which listing entries become modules, and in what order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleFilter {
    pub extension: String,
    pub excludes: BTreeSet<String>,
    pub order: DiscoveryOrder,
}

impl ModuleFilter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            extension: config.extension.clone(),
            excludes: config.excludes.clone(),
            order: config.order,
        }
    }

    pub fn apply<I, S>(&self, names: I) -> Vec<ModuleName>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut modules: Vec<ModuleName> = names
            .into_iter()
            .filter_map(|name| module_name(name.as_ref(), &self.extension))
            .filter(|module| !self.excludes.contains(module.as_str()))
            .collect();

        if self.order == DiscoveryOrder::Sorted {
            modules.sort();
        }

        modules
    }
}
