//! Host lifecycle hooks and serialized regeneration.
//!
//! A [`Plugin`] owns one worker task. Hooks never run a pass themselves;
//! they bump a request counter and hand back a [`PassHandle`]. The worker
//! runs at most one pass at a time, and every request that arrives while a
//! pass is running is folded into a single follow-up pass.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::generate::{bootstrap_output_dir, Generation, Generator};

pub const PLUGIN_NAME: &str = "pinia-auto-refs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Generating,
}

#[derive(Debug, Clone)]
struct Outcome {
    /// Highest request number this pass covered.
    served: u64,
    result: Result<Generation>,
}

pub struct Plugin {
    config: Arc<Config>,
    requests: watch::Sender<u64>,
    outcomes: watch::Receiver<Outcome>,
    state: watch::Receiver<State>,
    worker: JoinHandle<()>,
}

impl Plugin {
    /// Spawn the worker on the current tokio runtime. The worker first makes
    /// sure the output directory exists (best effort), then waits for
    /// requests. Nothing is generated until a hook asks for it.
    pub fn new(config: Config, fs: Arc<dyn FileSystem>) -> Self {
        let config = Arc::new(config);
        let generator = Generator::new(Arc::clone(&config), Arc::clone(&fs));

        let (requests, request_rx) = watch::channel(0u64);
        let (outcome_tx, outcomes) = watch::channel(Outcome {
            served: 0,
            result: Ok(Generation::default()),
        });
        let (state_tx, state) = watch::channel(State::Idle);

        let output_dir = config.output_dir();
        let worker = tokio::spawn(async move {
            bootstrap_output_dir(fs.as_ref(), &output_dir).await;
            run_worker(generator, request_rx, outcome_tx, state_tx).await;
        });

        Self {
            config,
            requests,
            outcomes,
            state,
            worker,
        }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        *self.state.borrow()
    }

    /// Initialization hook: always schedules one full pass.
    pub fn init(&self) -> PassHandle {
        self.request()
    }

    /// Change-notification hook. Schedules a pass only when the path's text
    /// contains the configured store directory.
    pub fn handle_change(&self, changed: &Path) -> Option<PassHandle> {
        if !self.config.is_store_change(changed) {
            tracing::trace!(path = %changed.display(), "ignoring change outside store dir");
            return None;
        }
        tracing::debug!(path = %changed.display(), "store changed, scheduling regeneration");
        Some(self.request())
    }

    fn request(&self) -> PassHandle {
        let mut target = 0;
        self.requests.send_modify(|n| {
            *n += 1;
            target = *n;
        });
        PassHandle {
            target,
            outcomes: self.outcomes.clone(),
        }
    }
}

impl Drop for Plugin {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

/// Completion handle for one request.
#[must_use = "a pass is only known to be valid once its handle resolves"]
pub struct PassHandle {
    target: u64,
    outcomes: watch::Receiver<Outcome>,
}

impl PassHandle {
    /// Wait for the first pass that started after this request was made.
    /// Several handles may resolve to the same pass.
    pub async fn wait(mut self) -> Result<Generation> {
        let target = self.target;
        let outcome = self
            .outcomes
            .wait_for(|o| o.served >= target)
            .await
            .map_err(|_| Error::WorkerStopped)?;
        outcome.result.clone()
    }
}

async fn run_worker(
    generator: Generator,
    mut requests: watch::Receiver<u64>,
    outcomes: watch::Sender<Outcome>,
    state: watch::Sender<State>,
) {
    let mut served = 0u64;

    while requests.changed().await.is_ok() {
        let target = *requests.borrow_and_update();
        if target <= served {
            continue;
        }
        served = target;

        state.send_replace(State::Generating);
        let result = generator.generate().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "generation pass failed");
        }
        state.send_replace(State::Idle);

        outcomes.send_replace(Outcome { served, result });
    }

    tracing::debug!("regeneration worker stopped");
}
