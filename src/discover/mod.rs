//! Route discovery.
//!
//! Two interchangeable strategies implement [`RouteSource`]:
//!
//! | Strategy   | Input                                  | Re-emit on change |
//! |------------|----------------------------------------|-------------------|
//! | `fs`       | pages directory walk + `+route` files  | always            |
//! | `registry` | host framework's resolved page routes  | only if different |
//!
//! Both return [`RawRoute`]s that go through the same
//! [`RouteTable::canonicalize`](crate::route::RouteTable::canonicalize), so
//! equal logical page sets produce byte-identical tables.

pub mod fs;
pub mod marker;
pub mod registry;

use std::path::PathBuf;

use crate::config::{DiscoveryStrategy, RoutegenConfig};
use crate::route::RawRoute;

pub use fs::FsDiscoverer;
pub use registry::{RegistryDiscoverer, RegistryError};

/// A source of raw routes.
pub trait RouteSource {
    /// Short name for log output.
    fn name(&self) -> &'static str;

    /// Discover every raw route reachable from this source.
    fn discover(&self) -> Result<Vec<RawRoute>, RegistryError>;

    /// Whether a re-run should compare against the last emitted table and
    /// skip emission when nothing changed.
    fn compare_before_emit(&self) -> bool;

    /// Paths whose changes should trigger a re-run in watch mode.
    fn watch_roots(&self) -> Vec<PathBuf>;
}

/// Create the route source selected by `config`.
pub fn source_for(config: &RoutegenConfig) -> Box<dyn RouteSource> {
    match config.pages.strategy {
        DiscoveryStrategy::Fs => Box::new(FsDiscoverer::new(&config.pages.dir)),
        DiscoveryStrategy::Registry => Box::new(RegistryDiscoverer::new(&config.pages.registry)),
    }
}
