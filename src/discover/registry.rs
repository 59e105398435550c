//! Live-registry route discovery.
//!
//! Reads the page registry the host framework resolved at configuration
//! time, instead of walking the pages tree. The registry is a JSON file
//! mapping page ids to page metadata:
//!
//! ```json
//! {
//!   "pages": {
//!     "/pages/index":    { "route": "/" },
//!     "/pages/catchall": { "route": "/catchall/*" },
//!     "/pages/_error":   { "isErrorPage": true }
//!   }
//! }
//! ```
//!
//! The `pages` wrapper is optional. Entries without a string `route`
//! (error pages, route functions) are skipped. The host's wildcard segment
//! `/*` is rewritten to the catch-all marker.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::RouteSource;
use crate::route::RawRoute;

/// Wildcard notation of the host framework.
const HOST_WILDCARD: &str = "/*";

/// Registry read failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid page registry `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Metadata of one registered page. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageEntry {
    #[serde(default)]
    pub route: Option<JsonValue>,
}

impl PageEntry {
    /// The route string, if the page has one.
    pub fn route_str(&self) -> Option<&str> {
        self.route.as_ref().and_then(JsonValue::as_str)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryFile {
    Wrapped { pages: BTreeMap<String, PageEntry> },
    Bare(BTreeMap<String, PageEntry>),
}

impl RegistryFile {
    fn into_pages(self) -> BTreeMap<String, PageEntry> {
        match self {
            Self::Wrapped { pages } | Self::Bare(pages) => pages,
        }
    }
}

/// Parse registry JSON into a page map.
pub fn parse_registry(content: &str) -> serde_json::Result<BTreeMap<String, PageEntry>> {
    serde_json::from_str::<RegistryFile>(content).map(RegistryFile::into_pages)
}

/// Convert a host route string into a raw route.
///
/// `/catchall/*` -> `/catchall` flagged as catch-all, `/*` -> `/` flagged.
pub fn raw_route_from_host(route: &str) -> RawRoute {
    match route.strip_suffix(HOST_WILDCARD) {
        Some(base) if base.is_empty() => RawRoute::new("/", true),
        Some(base) => RawRoute::new(base, true),
        None => RawRoute::new(route, false),
    }
}

/// Collect raw routes from a page map.
pub fn routes_from_pages(pages: &BTreeMap<String, PageEntry>) -> Vec<RawRoute> {
    pages
        .iter()
        .filter_map(|(id, entry)| {
            let route = entry.route_str();
            if route.is_none() {
                crate::debug!("discover"; "page {} has no route string", id);
            }
            route
        })
        .map(raw_route_from_host)
        .collect()
}

/// Discovers routes from the host framework's page registry file.
#[derive(Debug, Clone)]
pub struct RegistryDiscoverer {
    registry: PathBuf,
}

impl RegistryDiscoverer {
    pub fn new(registry: impl AsRef<Path>) -> Self {
        Self {
            registry: registry.as_ref().to_path_buf(),
        }
    }

    /// Re-read the registry and collect raw routes.
    pub fn refresh(&self) -> Result<Vec<RawRoute>, RegistryError> {
        let content = fs::read_to_string(&self.registry)
            .map_err(|e| RegistryError::Io(self.registry.clone(), e))?;
        let pages =
            parse_registry(&content).map_err(|e| RegistryError::Json(self.registry.clone(), e))?;
        Ok(routes_from_pages(&pages))
    }
}

impl RouteSource for RegistryDiscoverer {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn discover(&self) -> Result<Vec<RawRoute>, RegistryError> {
        self.refresh()
    }

    fn compare_before_emit(&self) -> bool {
        true
    }

    fn watch_roots(&self) -> Vec<PathBuf> {
        // Watch the directory: registry writers often replace the file
        self.registry
            .parent()
            .map(Path::to_path_buf)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::FsDiscoverer;
    use crate::route::RouteTable;
    use tempfile::TempDir;

    const REGISTRY: &str = r#"{
        "pages": {
            "/pages/index": { "route": "/", "config": { "ssr": true } },
            "/pages/catchall": { "route": "/catchall/*" },
            "/pages/dashboard": { "route": "/dashboard" },
            "/pages/dashboard/settings": { "route": "/dashboard/settings" },
            "/pages/profiles/@id": { "route": "/profiles/@id" },
            "/pages/profiles/@id/@projectName": { "route": "/profiles/@id/@projectName" },
            "/pages/_error": { "isErrorPage": true },
            "/pages/custom": { "route": { "function": true } }
        }
    }"#;

    #[test]
    fn test_raw_route_from_host() {
        assert_eq!(raw_route_from_host("/catchall/*"), RawRoute::new("/catchall", true));
        assert_eq!(raw_route_from_host("/*"), RawRoute::new("/", true));
        assert_eq!(raw_route_from_host("/about"), RawRoute::new("/about", false));
        assert_eq!(raw_route_from_host("/"), RawRoute::new("/", false));
    }

    #[test]
    fn test_parse_wrapped_and_bare() {
        let wrapped = parse_registry(REGISTRY).unwrap();
        assert_eq!(wrapped.len(), 8);

        let bare = parse_registry(r#"{ "/pages/a": { "route": "/a" } }"#).unwrap();
        assert_eq!(bare["/pages/a"].route_str(), Some("/a"));
    }

    #[test]
    fn test_skips_pages_without_route_string() {
        let pages = parse_registry(REGISTRY).unwrap();
        let routes = routes_from_pages(&pages);
        assert_eq!(routes.len(), 6);
    }

    #[test]
    fn test_registry_table() {
        let pages = parse_registry(REGISTRY).unwrap();
        let table = RouteTable::canonicalize(routes_from_pages(&pages));
        let strs: Vec<_> = table.iter().map(|r| r.as_str()).collect();
        assert_eq!(
            strs,
            [
                "/",
                "/catchall/@",
                "/dashboard",
                "/dashboard/settings",
                "/profiles/@id",
                "/profiles/@id/@projectName",
            ]
        );
    }

    #[test]
    fn test_strategy_equivalence() {
        let temp = TempDir::new().unwrap();
        let pages = temp.path().join("pages");
        for rel in [
            "+Layout.tsx",
            "index/+Page.tsx",
            "catchall/+Page.tsx",
            "dashboard/+Page.tsx",
            "dashboard/settings/+Page.tsx",
            "profiles/@id/+Page.tsx",
            "profiles/@id/@projectName/+Page.tsx",
            "_error/+Page.tsx",
            "(auth)/login/+Page.tsx",
        ] {
            let path = pages.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        fs::write(pages.join("catchall/+route.ts"), r#"export default "/catchall/*""#).unwrap();

        let registry_path = temp.path().join("registry.json");
        fs::write(&registry_path, REGISTRY).unwrap();

        let from_fs = RouteTable::canonicalize(FsDiscoverer::new(&pages).discover().unwrap());
        let from_registry =
            RouteTable::canonicalize(RegistryDiscoverer::new(&registry_path).discover().unwrap());

        assert_eq!(from_fs, from_registry);
        assert_eq!(from_fs.to_json(), from_registry.to_json());
    }

    #[test]
    fn test_missing_registry() {
        let temp = TempDir::new().unwrap();
        let result = RegistryDiscoverer::new(temp.path().join("nope.json")).discover();
        assert!(matches!(result, Err(RegistryError::Io(..))));
    }

    #[test]
    fn test_malformed_registry() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("registry.json");
        fs::write(&path, "{ not json").unwrap();
        let result = RegistryDiscoverer::new(&path).discover();
        assert!(matches!(result, Err(RegistryError::Json(..))));
    }

    #[test]
    fn test_route_source_contract() {
        let source = RegistryDiscoverer::new("/project/.routegen/registry.json");
        assert_eq!(source.name(), "registry");
        assert!(source.compare_before_emit());
        assert_eq!(source.watch_roots(), vec![PathBuf::from("/project/.routegen")]);
    }
}
