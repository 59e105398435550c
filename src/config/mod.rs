//! Project configuration for `routegen.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── output     # [output]
//! │   └── pages      # [pages]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # RoutegenConfig (this file)
//! ```
//!
//! The config file is optional. Without one, the current directory is the
//! project root and every section takes its defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    DEFAULT_OUTPUT_FILE, DiscoveryStrategy, Framework, ImportSource, OutputConfig, PagesConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, log, utils::path::normalize_path};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file searched for when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "routegen.toml";

/// Directory that, when present, holds the generated file by default.
const SOURCE_DIR: &str = "src";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing routegen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutegenConfig {
    /// Absolute path to the config file, which may not exist (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Resolved generated file path (internal use only)
    #[serde(skip)]
    output_path: PathBuf,

    /// Route discovery settings
    #[serde(default)]
    pub pages: PagesConfig,

    /// Generated file settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl RoutegenConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when there is no config file.
    pub fn load(cli: &Cli) -> Result<Self> {
        crate::logger::set_verbose(cli.verbose);
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            // An explicitly named config must exist
            None if cli.config != Path::new(DEFAULT_CONFIG_FILE) => {
                return Err(ConfigError::NotFound(cli.config.clone()).into());
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self {
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        config.apply_cli_options(cli);
        config.validate()?;

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.finalize(&root);

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set the project root and resolve every path against it.
    pub fn finalize(&mut self, root: &Path) {
        self.root = normalize_path(root);
        self.pages.dir = normalize_path(&self.root.join(&self.pages.dir));
        self.pages.registry = normalize_path(&self.root.join(&self.pages.registry));
        self.output_path = self.resolve_output_path();
    }

    /// Output path: explicit setting, else `src/route-tree.gen.ts` when the
    /// project has a `src` directory, else `route-tree.gen.ts` at the root.
    fn resolve_output_path(&self) -> PathBuf {
        let path = match &self.output.path {
            Some(path) => self.root.join(path),
            None => {
                let src = self.root.join(SOURCE_DIR);
                if src.is_dir() {
                    src.join(DEFAULT_OUTPUT_FILE)
                } else {
                    self.root.join(DEFAULT_OUTPUT_FILE)
                }
            }
        };
        normalize_path(&path)
    }

    /// Resolved generated file path. Empty until [`finalize`](Self::finalize).
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Module the params helper imports `usePageContext` from, if any.
    pub fn import_source(&self) -> Option<String> {
        self.output.resolve_import_source()
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply CLI overrides on top of file values.
    fn apply_cli_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.pages.dir, cli.pages.as_ref());
        Self::update_option(&mut self.pages.strategy, cli.strategy.as_ref());
        Self::update_option(&mut self.pages.registry, cli.registry.as_ref());

        if let Some(output) = &cli.output {
            self.output.path = Some(output.clone());
        }
        if let Some(framework) = cli.framework {
            self.output.framework = Some(framework);
        }
        if cli.no_params_helper {
            self.output.import_source = Some(ImportSource::Toggle(false));
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate raw values before paths are resolved.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.pages.validate(&mut diag);
        self.output.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RoutegenConfig {
    let (parsed, ignored) = RoutegenConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
