use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

/// Watch roots that may not exist yet.
///
/// A pages directory or registry directory can be created (or deleted and
/// recreated) while watching; [`maintain`](Self::maintain) re-attaches it.
pub(super) struct WatchRoots {
    desired: Vec<PathBuf>,
    attached: FxHashSet<PathBuf>,
}

impl WatchRoots {
    pub(super) fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            desired: paths,
            attached: FxHashSet::default(),
        }
    }

    pub(super) fn attach_existing(
        &mut self,
        watcher: &mut RecommendedWatcher,
    ) -> notify::Result<()> {
        for path in &self.desired {
            if !path.exists() {
                crate::log!("watch"; "{} does not exist yet, waiting for it", path.display());
                continue;
            }
            watcher.watch(path, RecursiveMode::Recursive)?;
            self.attached.insert(path.clone());
        }

        Ok(())
    }

    /// Whether every desired root is being watched.
    pub(super) fn all_attached(&self) -> bool {
        self.desired.iter().all(|path| self.attached.contains(path))
    }

    /// Drop vanished roots and attach the ones that appeared.
    ///
    /// Returns the newly attached roots.
    pub(super) fn maintain(&mut self, watcher: &mut RecommendedWatcher) -> Vec<PathBuf> {
        self.attached.retain(|path| path.exists());

        let mut appeared = Vec::new();
        for path in &self.desired {
            if self.attached.contains(path) || !path.exists() {
                continue;
            }

            if watcher.watch(path, RecursiveMode::Recursive).is_ok() {
                self.attached.insert(path.clone());
                crate::debug!("watch"; "attached watch: {}", path.display());
                appeared.push(path.clone());
            }
        }
        appeared
    }
}
