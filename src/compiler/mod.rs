//! Change coordinator.
//!
//! A [`Compiler`] owns the route source, the output location and the last
//! emitted table. The CLI drives it through two entry points:
//!
//! | Entry point          | Trigger                   | Re-emits when              |
//! |----------------------|---------------------------|----------------------------|
//! | [`on_build_start`]   | `build`, start of `watch` | always                     |
//! | [`on_change`]        | watcher batch             | fs: always, registry: diff |
//!
//! Passes take `&mut self`, so two passes never race on the output file.
//! Failures are reported through [`PassOutcome`], never as errors.
//!
//! [`on_build_start`]: Compiler::on_build_start
//! [`on_change`]: Compiler::on_change

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use crate::config::RoutegenConfig;
use crate::discover::{self, RouteSource};
use crate::emit;
use crate::log;
use crate::route::RouteTable;
use crate::utils::path::normalize_path;

/// Result of one compilation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Route tree written with this many routes.
    Emitted { routes: usize },
    /// Routes equal the last emitted table; nothing written.
    Unchanged,
    /// Only the generated file itself changed; nothing discovered.
    Ignored,
    /// Discovery or emission failed; the previous file is kept.
    Failed(String),
}

impl PassOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Route tree compiler context.
pub struct Compiler {
    source: Box<dyn RouteSource>,
    output_path: PathBuf,
    /// `./`-prefixed output path for log lines.
    display_path: String,
    import_source: Option<String>,
    last_emitted: Option<RouteTable>,
}

impl Compiler {
    pub fn new(
        source: Box<dyn RouteSource>,
        output_path: impl Into<PathBuf>,
        import_source: Option<String>,
    ) -> Self {
        let output_path = output_path.into();
        let display_path = output_path.display().to_string();
        Self {
            source,
            output_path,
            display_path,
            import_source,
            last_emitted: None,
        }
    }

    /// Compiler for a loaded configuration.
    pub fn from_config(config: &RoutegenConfig) -> Self {
        let mut compiler = Self::new(
            discover::source_for(config),
            config.output_path(),
            config.import_source(),
        );
        let relative = config.root_relative(config.output_path());
        compiler.display_path = format!("./{}", relative.display());
        compiler
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Paths whose changes should reach [`on_change`](Self::on_change).
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        self.source.watch_roots()
    }

    /// Table written by the last successful emission.
    pub fn last_emitted(&self) -> Option<&RouteTable> {
        self.last_emitted.as_ref()
    }

    /// Discover and emit unconditionally.
    pub fn on_build_start(&mut self) -> PassOutcome {
        self.compile(false)
    }

    /// React to changed paths.
    ///
    /// Changes to the generated file are dropped; a batch of only those is
    /// ignored without rediscovery.
    pub fn on_change(&mut self, paths: &[PathBuf]) -> PassOutcome {
        let relevant = paths.iter().filter(|path| !self.is_output(path)).count();
        if relevant == 0 {
            crate::debug!("compiler"; "ignoring change to generated file");
            return PassOutcome::Ignored;
        }
        self.compile(self.source.compare_before_emit())
    }

    fn is_output(&self, path: &Path) -> bool {
        path == self.output_path || normalize_path(path) == self.output_path
    }

    fn compile(&mut self, compare: bool) -> PassOutcome {
        let table = match self.discover() {
            Ok(table) => table,
            Err(outcome) => return outcome,
        };

        if compare
            && let Some(last) = &self.last_emitted
            && last.to_json() == table.to_json()
        {
            crate::debug!("compiler"; "{} routes unchanged", table.len());
            return PassOutcome::Unchanged;
        }

        match emit::emit(&table, self.import_source.as_deref(), &self.output_path) {
            Ok(()) => {
                let routes = table.len();
                self.last_emitted = Some(table);
                PassOutcome::Emitted { routes }
            }
            Err(e) => PassOutcome::Failed(format!("{:#}", anyhow::Error::new(e))),
        }
    }

    /// Discover and canonicalize.
    ///
    /// A source failure falls back to an empty table on the first pass only;
    /// later failures keep the previous file.
    fn discover(&self) -> Result<RouteTable, PassOutcome> {
        match self.source.discover() {
            Ok(raw) => Ok(RouteTable::canonicalize(raw)),
            Err(e) => {
                let message = format!("{:#}", anyhow::Error::new(e));
                if self.last_emitted.is_some() {
                    Err(PassOutcome::Failed(message))
                } else {
                    log!("warning"; "{}, generating an empty route tree", message);
                    Ok(RouteTable::default())
                }
            }
        }
    }
}
