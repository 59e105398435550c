//! Watch mode.
//!
//! ```text
//! notify ──bridge thread──► async channel ──► Debouncer ──batch──► Compiler::on_change
//! ```
//!
//! The watcher starts before the build-start pass so no change made during
//! that pass is lost. Everything after runs on one current-thread runtime;
//! a pass finishes before the next batch is taken.

mod debouncer;
mod watch_roots;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use crate::compiler::{Compiler, PassOutcome};
use crate::log;
use debouncer::{ChangeKind, Debouncer};
use watch_roots::WatchRoots;

/// How often missing watch roots are looked for.
const ROOT_POLL: Duration = Duration::from_secs(1);

/// File watcher feeding debounced batches to a [`Compiler`].
pub struct FileWatcher {
    /// notify callback side (sync)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Must stay alive while watching
    watcher: RecommendedWatcher,
    watch_roots: WatchRoots,
    debouncer: Debouncer,
}

impl FileWatcher {
    /// Start watching `paths` right away. Events buffer until [`run`](Self::run).
    pub fn new(paths: Vec<PathBuf>) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let mut watch_roots = WatchRoots::new(paths);
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            debouncer: Debouncer::new(),
        })
    }

    /// Feed change batches to `compiler` until Ctrl+C.
    ///
    /// `report` sees the outcome of every pass.
    pub fn run(self, compiler: &mut Compiler, mut report: impl FnMut(&PassOutcome)) -> Result<()> {
        let mut shutdown_rx = shutdown_signal()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("failed to create tokio runtime")?;

        runtime.block_on(self.event_loop(compiler, &mut report, &mut shutdown_rx));
        Ok(())
    }

    async fn event_loop(
        self,
        compiler: &mut Compiler,
        report: &mut impl FnMut(&PassOutcome),
        shutdown_rx: &mut mpsc::UnboundedReceiver<()>,
    ) {
        let Self {
            notify_rx,
            mut watcher,
            mut watch_roots,
            mut debouncer,
        } = self;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // notify delivers on its own thread; bridge into the runtime
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            let sleep = if watch_roots.all_attached() {
                debouncer.sleep_duration()
            } else {
                debouncer.sleep_duration().min(ROOT_POLL)
            };

            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    log!("watch"; "stopped");
                    break;
                }
                Some(event) = async_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(sleep) => {
                    for root in watch_roots.maintain(&mut watcher) {
                        debouncer.add_path(root, ChangeKind::Created);
                    }
                    if let Some(paths) = debouncer.take_if_ready() {
                        crate::debug!("watch"; "{} changed paths", paths.len());
                        report(&compiler.on_change(&paths));
                    }
                }
            }
        }
    }
}

/// Channel that receives once per Ctrl+C.
fn shutdown_signal() -> Result<mpsc::UnboundedReceiver<()>> {
    let (tx, rx) = mpsc::unbounded_channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .map_err(|e| anyhow!("failed to set Ctrl+C handler: {}", e))?;
    Ok(rx)
}
