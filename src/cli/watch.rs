use anyhow::{Context, Result};
use console::{style, Emoji};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::fs::LocalFs;
use crate::plugin::{PassHandle, Plugin};

static WATCHING: Emoji<'_, '_> = Emoji("👀 ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static ERROR: Emoji<'_, '_> = Emoji("❌ ", "");

/// Generate once, then regenerate on every store change until Ctrl-C.
pub async fn run_watch(config: Config, debounce_ms: u64) -> Result<()> {
    let store_path = config.store_path();
    let plugin = Plugin::new(config, Arc::new(LocalFs));

    report(plugin.init());

    // The debouncer stops watching when dropped; keep it alive for the loop.
    let (_debouncer, mut rx) = watch_store(&store_path, Duration::from_millis(debounce_ms))?;

    eprintln!(
        "{}Watching {} (Ctrl-C to stop)",
        WATCHING,
        style(store_path.display()).cyan()
    );

    serve_events(&plugin, &mut rx, async {
        let _ = tokio::signal::ctrl_c().await;
        eprintln!();
    })
    .await;

    Ok(())
}

/// Watch `store_path` non-recursively, forwarding debounced batches.
pub fn watch_store(
    store_path: &Path,
    debounce: Duration,
) -> Result<(
    Debouncer<RecommendedWatcher>,
    mpsc::UnboundedReceiver<DebounceEventResult>,
)> {
    let (tx, rx) = mpsc::unbounded_channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(debounce, move |res: DebounceEventResult| {
        let _ = tx.send(res);
    })
    .context("Failed to create file watcher")?;
    debouncer
        .watcher()
        .watch(store_path, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", store_path.display()))?;

    Ok((debouncer, rx))
}

/// Route event batches to the plugin until the channel closes or `shutdown`
/// resolves. Returns how many batches scheduled a pass.
pub async fn serve_events<F>(
    plugin: &Plugin,
    rx: &mut mpsc::UnboundedReceiver<DebounceEventResult>,
    shutdown: F,
) -> usize
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut scheduled = 0;

    loop {
        tokio::select! {
            batch = rx.recv() => {
                let Some(batch) = batch else { break };
                match batch {
                    Ok(events) => {
                        // One batch, one pass: later handles cover earlier ones.
                        let last = events
                            .iter()
                            .filter_map(|event| plugin.handle_change(&event.path))
                            .last();
                        if let Some(handle) = last {
                            scheduled += 1;
                            report(handle);
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "file watcher error"),
                }
            }
            _ = &mut shutdown => break,
        }
    }

    scheduled
}

fn report(handle: PassHandle) {
    tokio::spawn(async move {
        match handle.wait().await {
            Ok(generation) => eprintln!(
                "{}Wrote {} ({} stores)",
                SUCCESS,
                style(generation.output.display()).green(),
                style(generation.modules.len()).cyan()
            ),
            Err(e) => eprintln!("{}{}", ERROR, style(format!("{:#}", anyhow::Error::new(e))).red()),
        }
    });
}
