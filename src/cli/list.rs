use anyhow::Result;
use console::style;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::fs::LocalFs;
use crate::generate::Generator;
use crate::scan::ModuleName;

#[derive(Serialize)]
struct ListOutput<'a> {
    store_dir: &'a str,
    import_base: String,
    modules: &'a [ModuleName],
}

pub async fn run_list(config: Config, json: bool) -> Result<Vec<ModuleName>> {
    let config = Arc::new(config);
    let generator = Generator::new(Arc::clone(&config), Arc::new(LocalFs));
    let modules = generator.discover().await?;

    if json {
        let output = ListOutput {
            store_dir: &config.store_dir,
            import_base: config.import_base(),
            modules: &modules,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if modules.is_empty() {
        println!("No stores found in {}", style(&config.store_dir).italic());
    } else {
        let base = config.import_base();
        for module in &modules {
            println!(
                "{:<20} {}",
                style(module).green(),
                style(format!("{}/{}", base, module)).dim()
            );
        }
    }

    Ok(modules)
}
