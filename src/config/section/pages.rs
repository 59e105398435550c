//! `[pages]` section configuration.
//!
//! Where routes come from.
//!
//! # Example
//!
//! ```toml
//! [pages]
//! dir = "pages"                          # Pages root (relative to project root)
//! strategy = "fs"                        # fs | registry
//! registry = ".routegen/registry.json"   # Page registry for `strategy = "registry"`
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// How routes are discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    /// Walk the pages directory.
    #[default]
    Fs,
    /// Read the host framework's resolved page registry.
    Registry,
}

/// Route discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Pages root directory.
    pub dir: PathBuf,

    /// Discovery strategy.
    pub strategy: DiscoveryStrategy,

    /// Page registry JSON written by the host framework.
    pub registry: PathBuf,
}

impl PagesConfig {
    pub const DIR: FieldPath = FieldPath::new("pages.dir");
    pub const STRATEGY: FieldPath = FieldPath::new("pages.strategy");
    pub const REGISTRY: FieldPath = FieldPath::new("pages.registry");

    /// Validate raw (not yet root-joined) values.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.as_os_str().is_empty() {
            diag.error_with_hint(Self::DIR, "pages directory is empty", "use `dir = \"pages\"`");
        }
        if self.strategy == DiscoveryStrategy::Registry && self.registry.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::REGISTRY,
                "registry strategy needs a registry file",
                "set `registry = \".routegen/registry.json\"` or use `strategy = \"fs\"`",
            );
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: "pages".into(),
            strategy: DiscoveryStrategy::Fs,
            registry: ".routegen/registry.json".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_pages_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.pages.dir, PathBuf::from("pages"));
        assert_eq!(config.pages.strategy, DiscoveryStrategy::Fs);
        assert_eq!(config.pages.registry, PathBuf::from(".routegen/registry.json"));
    }

    #[test]
    fn test_pages_config_registry() {
        let config = test_parse_config(
            "[pages]\ndir = \"src/pages\"\nstrategy = \"registry\"\nregistry = \"dist/pages.json\"",
        );
        assert_eq!(config.pages.dir, PathBuf::from("src/pages"));
        assert_eq!(config.pages.strategy, DiscoveryStrategy::Registry);
        assert_eq!(config.pages.registry, PathBuf::from("dist/pages.json"));
    }

    #[test]
    fn test_invalid_strategy() {
        let result: Result<crate::config::RoutegenConfig, _> =
            toml::from_str("[pages]\nstrategy = \"glob\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_values() {
        let config = PagesConfig {
            dir: PathBuf::new(),
            strategy: DiscoveryStrategy::Registry,
            registry: PathBuf::new(),
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
