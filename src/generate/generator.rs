use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::scan::{discover, ModuleFilter, ModuleName};

use super::template::render_artifact;
use super::writer::write_atomic;

/// Summary of one completed pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Generation {
    pub output: PathBuf,
    pub modules: Vec<ModuleName>,
}

/// Discovery + template + write, against a fixed config.
pub struct Generator {
    config: Arc<Config>,
    fs: Arc<dyn FileSystem>,
    filter: ModuleFilter,
}

impl Generator {
    pub fn new(config: Arc<Config>, fs: Arc<dyn FileSystem>) -> Self {
        let filter = ModuleFilter::from_config(&config);
        Self { config, fs, filter }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn discover(&self) -> Result<Vec<ModuleName>> {
        discover(self.fs.as_ref(), &self.config.store_path(), &self.filter).await
    }

    /// Build the artifact text without writing it.
    pub async fn render(&self) -> Result<(Vec<ModuleName>, String)> {
        let modules = self.discover().await?;
        let artifact = render_artifact(&self.config.import_base(), &modules);
        Ok((modules, artifact))
    }

    /// Run one full pass. On a discovery error nothing is written and the
    /// previous artifact stays as it was.
    pub async fn generate(&self) -> Result<Generation> {
        let (modules, artifact) = self.render().await?;
        let output = self.config.output_path();

        write_atomic(self.fs.as_ref(), &output, &artifact).await?;
        tracing::info!(
            output = %output.display(),
            modules = modules.len(),
            "wrote store aggregator"
        );

        Ok(Generation { output, modules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiscoveryOrder, Options};
    use crate::error::Error;
    use crate::fs::MemoryFs;

    fn generator(fs: Arc<MemoryFs>, options: Options) -> Generator {
        Generator::new(Arc::new(Config::resolve("app", options)), fs)
    }

    fn project() -> MemoryFs {
        MemoryFs::new()
            .with_file("app/src/store/user.ts", "")
            .with_file("app/src/store/cart.ts", "")
            .with_file("app/src/store/index.ts", "")
            .with_dir("app/src/helper")
    }

    #[tokio::test]
    async fn test_generate_writes_artifact() {
        let fs = Arc::new(project());
        let generation = generator(fs.clone(), Options::default())
            .generate()
            .await
            .unwrap();

        assert_eq!(
            generation.output,
            PathBuf::from("app/src/helper/pinia-auto-refs.ts")
        );
        assert_eq!(
            generation.modules,
            vec![ModuleName::new("user"), ModuleName::new("cart")]
        );

        let artifact = fs.contents(&generation.output).unwrap();
        let user = artifact.find("import userStore from '@/store/user'").unwrap();
        let cart = artifact.find("import cartStore from '@/store/cart'").unwrap();
        assert!(user < cart);
        assert!(!artifact.contains("indexStore"));
        assert!(artifact.contains("const storeExports = {\n  user: userStore,\n  cart: cartStore,\n}"));
    }

    #[tokio::test]
    async fn test_generate_twice_is_identical() {
        let fs = Arc::new(project());
        let generator = generator(fs.clone(), Options::default());

        let first = generator.generate().await.unwrap();
        let before = fs.contents(&first.output).unwrap();
        generator.generate().await.unwrap();
        let after = fs.contents(&first.output).unwrap();

        assert_eq!(before, after);
        assert_eq!(fs.write_count(), 2);
    }

    #[tokio::test]
    async fn test_export_keys_equal_discovered_set() {
        let fs = Arc::new(
            project()
                .with_file("app/src/store/auth.ts", "")
                .with_file("app/src/store/readme.md", ""),
        );
        let generation = generator(fs.clone(), Options::default())
            .generate()
            .await
            .unwrap();
        let artifact = fs.contents(&generation.output).unwrap();

        let body = artifact
            .split("const storeExports = {\n")
            .nth(1)
            .and_then(|rest| rest.split("}\n").next())
            .unwrap();
        let mut keys: Vec<&str> = body
            .lines()
            .filter_map(|l| l.trim().split_once(':'))
            .map(|(k, _)| k)
            .collect();
        keys.sort();

        let mut discovered: Vec<&str> = generation.modules.iter().map(|m| m.as_str()).collect();
        discovered.sort();
        assert_eq!(keys, discovered);
        assert_eq!(keys, vec!["auth", "cart", "user"]);
    }

    #[tokio::test]
    async fn test_sorted_order() {
        let fs = Arc::new(project());
        let options = Options {
            order: Some(DiscoveryOrder::Sorted),
            ..Default::default()
        };
        let generation = generator(fs, options).generate().await.unwrap();
        assert_eq!(
            generation.modules,
            vec![ModuleName::new("cart"), ModuleName::new("user")]
        );
    }

    #[tokio::test]
    async fn test_discovery_error_keeps_previous_artifact() {
        let fs = Arc::new(
            MemoryFs::new().with_file("app/src/helper/pinia-auto-refs.ts", "previous"),
        );
        let err = generator(fs.clone(), Options::default())
            .generate()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DiscoveryRead { .. }));
        assert_eq!(
            fs.contents("app/src/helper/pinia-auto-refs.ts").as_deref(),
            Some("previous")
        );
        assert_eq!(fs.write_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_output_dir_is_write_error() {
        let fs = Arc::new(MemoryFs::new().with_file("app/src/store/user.ts", ""));
        let err = generator(fs, Options::default())
            .generate()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }

    #[tokio::test]
    async fn test_render_does_not_write() {
        let fs = Arc::new(project());
        let (modules, artifact) = generator(fs.clone(), Options::default())
            .render()
            .await
            .unwrap();
        assert_eq!(modules.len(), 2);
        assert!(artifact.contains("useStore"));
        assert_eq!(fs.write_count(), 0);
    }
}
