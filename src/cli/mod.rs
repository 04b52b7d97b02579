mod args;
mod check;
mod generate;
mod list;
mod watch;

pub use args::{Args, Command};
pub use check::{run_check, CheckStatus};
pub use generate::run_generate;
pub use list::run_list;
pub use watch::run_watch;

use anyhow::{Context, Result};

use crate::config::{Config, Options};

/// Defaults, then the config file, then command-line flags.
pub fn load_config(args: &Args) -> Result<Config> {
    let root = args.root.clone();
    let file_options = match &args.config {
        Some(path) => Options::load(path)?,
        None => Options::load_or_default(&root)?,
    };
    let config = Config::resolve(root, file_options.merge(args.options()));
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

pub async fn run(args: Args) -> Result<bool> {
    let config = load_config(&args).context("Failed to load configuration")?;

    match args.command() {
        Command::Generate => run_generate(config).await.map(|_| true),
        Command::Watch { debounce_ms } => run_watch(config, debounce_ms).await.map(|_| true),
        Command::Check => run_check(config)
            .await
            .map(|status| status == CheckStatus::UpToDate),
        Command::List { json } => run_list(config, json).await.map(|_| true),
    }
}
