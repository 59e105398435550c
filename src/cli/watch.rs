//! `watch` command: build-start pass, then a pass per change batch.

use anyhow::{Context, Result};

use crate::compiler::{Compiler, PassOutcome};
use crate::config::RoutegenConfig;
use crate::log;
use crate::logger::{status_error, status_success, status_unchanged};
use crate::watch::FileWatcher;

/// Generate the route tree and keep it current until Ctrl+C.
pub fn watch_routes(config: &RoutegenConfig) -> Result<()> {
    let mut compiler = Compiler::from_config(config);
    let roots = compiler.watch_roots();

    // Watch before the first pass so changes made during it are seen
    let watcher = FileWatcher::new(roots.clone()).context("failed to start file watcher")?;

    let outcome = compiler.on_build_start();
    super::build::report(&compiler, &outcome);

    for root in &roots {
        log!("watch"; "watching {}", config.root_relative(root).display());
    }

    let display_path = compiler.display_path().to_string();
    watcher.run(&mut compiler, |outcome| show_status(&display_path, outcome))
}

/// Single-line status for a watch-mode pass.
fn show_status(display_path: &str, outcome: &PassOutcome) {
    match outcome {
        PassOutcome::Emitted { .. } => {
            status_success(&format!("🌳 route tree generated in ({display_path})"));
        }
        PassOutcome::Unchanged => status_unchanged("routes unchanged"),
        PassOutcome::Ignored => {}
        PassOutcome::Failed(message) => status_error("route tree not generated", message),
    }
}
