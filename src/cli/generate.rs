use anyhow::Result;
use console::{style, Emoji};
use std::sync::Arc;

use crate::config::Config;
use crate::fs::LocalFs;
use crate::generate::{bootstrap_output_dir, Generation, Generator};

static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");

pub async fn run_generate(config: Config) -> Result<Generation> {
    let config = Arc::new(config);
    bootstrap_output_dir(&LocalFs, &config.output_dir()).await;

    let generator = Generator::new(Arc::clone(&config), Arc::new(LocalFs));
    let generation = generator.generate().await?;

    eprintln!(
        "{}Wrote {} ({} stores)",
        SUCCESS,
        style(generation.output.display()).green(),
        style(generation.modules.len()).cyan()
    );

    Ok(generation)
}
