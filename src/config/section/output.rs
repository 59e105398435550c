//! `[output]` section configuration.
//!
//! Where the route tree goes and which parameter helper it carries.
//!
//! # Example
//!
//! ```toml
//! [output]
//! path = "src/route-tree.gen.ts"   # Default: src/route-tree.gen.ts if `src` exists
//! framework = "solid"              # react | solid | vue | none
//! import_source = false            # Override the `usePageContext` module, or disable
//! ```
//!
//! The `useParams` helper imports `usePageContext` from the framework's
//! Vike integration. `import_source` takes precedence over `framework`:
//!
//! | Setting                           | Helper import                   |
//! |-----------------------------------|---------------------------------|
//! | `framework = "react"`             | `vike-react/usePageContext`     |
//! | `framework = "solid"`             | `vike-solid/usePageContext`     |
//! | `framework = "vue"`               | `vike-vue/usePageContext`       |
//! | `framework = "none"`              | no helper                       |
//! | `import_source = "my/ctx"`        | `my/ctx`                        |
//! | `import_source = false`           | no helper                       |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Default generated file name.
pub const DEFAULT_OUTPUT_FILE: &str = "route-tree.gen.ts";

/// Front-end framework used with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Solid,
    Vue,
    None,
}

impl Framework {
    /// Module exporting `usePageContext` for this framework.
    pub const fn import_source(self) -> Option<&'static str> {
        match self {
            Self::React => Some("vike-react/usePageContext"),
            Self::Solid => Some("vike-solid/usePageContext"),
            Self::Vue => Some("vike-vue/usePageContext"),
            Self::None => None,
        }
    }

    /// Infer the framework from build plugin names.
    ///
    /// Case-insensitive substring match; react, then solid, then vue.
    pub fn detect<S: AsRef<str>>(plugins: &[S]) -> Self {
        let names: Vec<String> = plugins
            .iter()
            .map(|p| p.as_ref().to_ascii_lowercase())
            .collect();
        let any = |needle: &str| names.iter().any(|name| name.contains(needle));

        if any("react") {
            Self::React
        } else if any("solid") {
            Self::Solid
        } else if any("vue") {
            Self::Vue
        } else {
            Self::None
        }
    }
}

/// `import_source` accepts a module name or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportSource {
    /// `false` disables the helper; `true` keeps the framework default.
    Toggle(bool),
    Module(String),
}

/// Generated file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file, relative to the project root.
    pub path: Option<PathBuf>,

    /// Framework whose `usePageContext` the helper imports.
    pub framework: Option<Framework>,

    /// Explicit helper import module, or `false` to disable the helper.
    pub import_source: Option<ImportSource>,

    /// Build plugin names to infer `framework` from when it is not set.
    pub detect_from_plugins: Vec<String>,
}

impl OutputConfig {
    pub const PATH: FieldPath = FieldPath::new("output.path");
    pub const IMPORT_SOURCE: FieldPath = FieldPath::new("output.import_source");

    /// Resolve the module the parameter helper imports from.
    ///
    /// Returns `None` when no helper should be generated.
    pub fn resolve_import_source(&self) -> Option<String> {
        match &self.import_source {
            Some(ImportSource::Toggle(false)) => return None,
            Some(ImportSource::Module(module)) => return Some(module.clone()),
            Some(ImportSource::Toggle(true)) | None => {}
        }

        let framework = match self.framework {
            Some(framework) => framework,
            None => Framework::detect(self.detect_from_plugins.as_slice()),
        };
        framework.import_source().map(str::to_string)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(ImportSource::Module(module)) = &self.import_source
            && module.trim().is_empty()
        {
            diag.error_with_hint(
                Self::IMPORT_SOURCE,
                "import source is empty",
                "use `import_source = false` to disable the helper",
            );
        }
        if let Some(path) = &self.path
            && (path.as_os_str().is_empty() || path.file_name().is_none())
        {
            diag.error(Self::PATH, "output path must name a file");
        }
    }
}
