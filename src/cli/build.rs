//! `build` command: one build-start pass.

use anyhow::{Result, bail};

use crate::compiler::{Compiler, PassOutcome};
use crate::config::RoutegenConfig;
use crate::log;
use crate::utils::plural_count;

/// Generate the route tree once.
///
/// A failed pass is logged; with `strict` it also fails the command.
pub fn build_routes(config: &RoutegenConfig, strict: bool) -> Result<()> {
    let mut compiler = Compiler::from_config(config);
    crate::debug!("build"; "discovering routes ({} strategy)", compiler.source_name());

    let outcome = compiler.on_build_start();
    report(&compiler, &outcome);

    if strict && let PassOutcome::Failed(message) = outcome {
        bail!("route tree not generated: {}", message);
    }
    Ok(())
}

/// Log the outcome of a pass.
pub(super) fn report(compiler: &Compiler, outcome: &PassOutcome) {
    match outcome {
        PassOutcome::Emitted { routes } => {
            log!("routes"; "🌳 route tree generated in ({})", compiler.display_path());
            crate::debug!("routes"; "{}", plural_count(*routes, "route"));
        }
        PassOutcome::Unchanged => log!("routes"; "route tree unchanged"),
        PassOutcome::Ignored => {}
        PassOutcome::Failed(message) => log!("error"; "route tree not generated: {}", message),
    }
}
