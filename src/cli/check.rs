use anyhow::Result;
use console::style;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::config::Config;
use crate::fs::{FileSystem, LocalFs};
use crate::generate::Generator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Render the helper in memory and compare it with what is on disk.
pub async fn run_check(config: Config) -> Result<CheckStatus> {
    let output = config.output_path();
    let generator = Generator::new(Arc::new(config), Arc::new(LocalFs));
    let (_, expected) = generator.render().await?;

    let status = match LocalFs.read_to_string(&output).await {
        Ok(actual) if actual == expected => CheckStatus::UpToDate,
        Ok(_) => CheckStatus::Stale,
        Err(e) if e.kind() == ErrorKind::NotFound => CheckStatus::Missing,
        Err(e) => return Err(e.into()),
    };

    match status {
        CheckStatus::UpToDate => eprintln!("{} {} is up to date", style("✓").green(), output.display()),
        CheckStatus::Stale => eprintln!(
            "{} {} is stale; run `pinia-autorefs generate`",
            style("✗").red(),
            output.display()
        ),
        CheckStatus::Missing => eprintln!(
            "{} {} does not exist; run `pinia-autorefs generate`",
            style("✗").red(),
            output.display()
        ),
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let store = temp.path().join("src/store");
        std::fs::create_dir_all(&store).unwrap();
        std::fs::write(store.join("user.ts"), "").unwrap();
        temp
    }

    #[tokio::test]
    async fn test_missing_then_up_to_date_then_stale() {
        let temp = project();
        let config = || Config::resolve(temp.path(), Options::default());

        assert_eq!(run_check(config()).await.unwrap(), CheckStatus::Missing);

        crate::cli::run_generate(config()).await.unwrap();
        assert_eq!(run_check(config()).await.unwrap(), CheckStatus::UpToDate);

        std::fs::write(temp.path().join("src/store/cart.ts"), "").unwrap();
        assert_eq!(run_check(config()).await.unwrap(), CheckStatus::Stale);
    }
}
