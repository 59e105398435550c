//! File-system route discovery.
//!
//! Walks the pages directory and turns the directory layout into routes:
//!
//! ```text
//! pages/
//! ├── +Layout.tsx
//! ├── (marketing)/         # layout group: skipped
//! ├── _error/              # error boundary: skipped
//! ├── index/+Page.tsx      # -> /
//! ├── dashboard/
//! │   ├── +Page.tsx        # -> /dashboard
//! │   └── settings/+Page.tsx  # -> /dashboard/settings
//! ├── catchall/
//! │   ├── +Page.tsx        # -> /catchall/@
//! │   └── +route.ts        # contains "/catchall/*"
//! └── profiles/@id/+Page.tsx  # -> /profiles/@id
//! ```
//!
//! Unreadable directories are skipped; discovery never fails.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use super::marker::is_catchall_dir;
use super::{RegistryError, RouteSource};
use crate::route::RawRoute;

/// Accepted page-definition filenames (one per rendering back-end).
pub const PAGE_FILES: &[&str] = &[
    "+Page.tsx",
    "+Page.jsx",
    "+Page.ts",
    "+Page.js",
    "+Page.vue",
    "+Page.md",
    "+Page.mdx",
];

/// Directory holding error-boundary pages, never an addressable route.
pub const ERROR_DIR: &str = "_error";

/// Directory marking the default child of its parent path.
pub const INDEX_DIR: &str = "index";

/// How a directory affects the route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirRule<'a> {
    /// Not traversed (`(group)`, `_error`, hidden, `node_modules`).
    Skip,
    /// Traversed without adding a segment (`index`).
    Transparent,
    /// Traversed, adding its name as a segment.
    Segment(&'a str),
}

impl<'a> DirRule<'a> {
    pub fn classify(name: &'a str) -> Self {
        if is_layout_group(name) || name == ERROR_DIR || name == "node_modules" || name.starts_with('.')
        {
            Self::Skip
        } else if name == INDEX_DIR {
            Self::Transparent
        } else {
            Self::Segment(name)
        }
    }
}

/// Layout groups are wrapped in parentheses: `(auth)`.
#[inline]
fn is_layout_group(name: &str) -> bool {
    name.len() >= 2 && name.starts_with('(') && name.ends_with(')')
}

#[inline]
fn is_page_file(name: &str) -> bool {
    PAGE_FILES.contains(&name)
}

/// Discovers routes by walking a pages directory.
#[derive(Debug, Clone)]
pub struct FsDiscoverer {
    pages_dir: PathBuf,
}

impl FsDiscoverer {
    pub fn new(pages_dir: impl AsRef<Path>) -> Self {
        Self {
            pages_dir: pages_dir.as_ref().to_path_buf(),
        }
    }

    /// Walk the pages directory and collect raw routes.
    pub fn walk(&self) -> Vec<RawRoute> {
        let mut routes = Vec::new();
        if !self.pages_dir.is_dir() {
            crate::log!("warning"; "pages directory not found: {}", self.pages_dir.display());
            return routes;
        }
        walk_dir(&self.pages_dir, "", &mut FxHashSet::default(), &mut routes);
        routes
    }
}

impl RouteSource for FsDiscoverer {
    fn name(&self) -> &'static str {
        "fs"
    }

    fn discover(&self) -> Result<Vec<RawRoute>, RegistryError> {
        Ok(self.walk())
    }

    fn compare_before_emit(&self) -> bool {
        false
    }

    fn watch_roots(&self) -> Vec<PathBuf> {
        vec![self.pages_dir.clone()]
    }
}

/// Recursively collect routes under `dir`, where `base` is the route path
/// accumulated so far (without leading slash).
///
/// `ancestors` holds the canonical directories on the current descent; a
/// symlink leading back into one of them is not followed.
fn walk_dir(
    dir: &Path,
    base: &str,
    ancestors: &mut FxHashSet<PathBuf>,
    routes: &mut Vec<RawRoute>,
) {
    let canonical = match fs::canonicalize(dir) {
        Ok(canonical) => canonical,
        Err(e) => {
            crate::debug!("discover"; "skipping {}: {}", dir.display(), e);
            return;
        }
    };
    if ancestors.contains(&canonical) {
        crate::debug!("discover"; "skipping symlink cycle at {}", dir.display());
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            crate::debug!("discover"; "skipping {}: {}", dir.display(), e);
            return;
        }
    };
    ancestors.insert(canonical.clone());

    // Checked at most once per directory, and only if it has a page
    let mut catchall = None;

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            crate::debug!("discover"; "skipping non-UTF-8 name in {}", dir.display());
            continue;
        };

        let path = entry.path();
        // `metadata` follows symlinks, `file_type` would not
        let Ok(meta) = fs::metadata(&path) else {
            continue;
        };

        if meta.is_dir() {
            match DirRule::classify(name) {
                DirRule::Skip => {}
                DirRule::Transparent => walk_dir(&path, base, ancestors, routes),
                DirRule::Segment(segment) => {
                    let child = if base.is_empty() {
                        segment.to_string()
                    } else {
                        format!("{base}/{segment}")
                    };
                    walk_dir(&path, &child, ancestors, routes);
                }
            }
        } else if is_page_file(name) {
            let is_catchall = *catchall.get_or_insert_with(|| is_catchall_dir(dir));
            routes.push(RawRoute::new(format!("/{base}"), is_catchall));
        }
    }

    ancestors.remove(&canonical);
}
