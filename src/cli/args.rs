use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DiscoveryOrder, Options};

#[derive(Parser, Debug)]
#[command(name = "pinia-autorefs")]
#[command(version, about = "Generate a typed useStore() helper over a directory of Pinia stores")]
pub struct Args {
    /// Project root; store and output paths are resolved against it
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/pinia-autorefs.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the store modules
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// Module name to leave out (repeatable; replaces the configured list)
    #[arg(long = "exclude", global = true)]
    pub excludes: Vec<String>,

    /// Where the generated helper is written
    #[arg(long, global = true)]
    pub output_file: Option<String>,

    /// Extension of store module files
    #[arg(long, global = true)]
    pub extension: Option<String>,

    /// Sort module names instead of keeping directory listing order
    #[arg(long, global = true)]
    pub sorted: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate the helper once (default)
    Generate,

    /// Generate, then regenerate whenever the store directory changes
    Watch {
        /// Debounce window for filesystem events
        #[arg(long, default_value = "100")]
        debounce_ms: u64,
    },

    /// Exit with status 1 if the helper on disk is missing or stale
    Check,

    /// Print the discovered store modules
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Args {
    /// Options given on the command line; they win over the config file.
    pub fn options(&self) -> Options {
        Options {
            store_dir: self.store_dir.clone(),
            excludes: if self.excludes.is_empty() {
                None
            } else {
                Some(self.excludes.clone())
            },
            output_file: self.output_file.clone(),
            extension: self.extension.clone(),
            alias: None,
            order: self.sorted.then_some(DiscoveryOrder::Sorted),
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Generate)
    }

    pub fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        }
    }
}
