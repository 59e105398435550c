//! Artifact emitter.
//!
//! Renders a [`RouteTable`] into the generated TypeScript route tree:
//!
//! | Export               | Content                                        |
//! |----------------------|------------------------------------------------|
//! | `pageRoutes`         | the canonical table as data                    |
//! | `RouteParamsMap`     | parameter type per route                       |
//! | `getRoute`           | route builder                                  |
//! | `extractRouteParams` | raw captures to typed params (with helper)     |
//! | `useParams`          | current page params via `usePageContext`       |
//!
//! The file is always written whole.

mod template;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::route::{ParamKind, RoutePath, RouteTable};
use template::{Template, TemplateVars};

/// Emission failures.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("cannot create directory `{0}`")]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("cannot write `{0}`")]
    Write(PathBuf, #[source] io::Error),
}

/// Route tree module.
const ROUTE_TREE_TS: Template<RouteTreeVars> =
    Template::new(include_str!("templates/route_tree.ts"));

/// `extractRouteParams` / `useParams`, appended when an import source is set.
const USE_PARAMS_TS: &str = include_str!("templates/use_params.ts");

/// Variables for the route tree template.
pub struct RouteTreeVars {
    pub imports: String,
    pub page_routes: String,
    pub route_params_map: String,
    pub catchall_routes: String,
    pub named_routes: String,
    pub params_helper: String,
}

impl RouteTreeVars {
    pub fn new(table: &RouteTable, import_source: Option<&str>) -> Self {
        let (imports, params_helper) = match import_source {
            Some(source) => (
                format!("import {{ usePageContext }} from {};\n\n", quote(source)),
                USE_PARAMS_TS.to_string(),
            ),
            None => (String::new(), String::new()),
        };

        let route_params_map: String = table
            .iter()
            .map(|route| format!("  {}: {};\n", quote(route.as_str()), params_type(route)))
            .collect();

        Self {
            imports,
            page_routes: table.to_pretty_json(),
            route_params_map,
            catchall_routes: union_of(table, |kind| matches!(kind, ParamKind::Catchall)),
            named_routes: union_of(table, |kind| matches!(kind, ParamKind::Named(_))),
            params_helper,
        }
    }
}

impl TemplateVars for RouteTreeVars {
    fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "IMPORTS" => &self.imports,
            "PAGE_ROUTES" => &self.page_routes,
            "ROUTE_PARAMS_MAP" => &self.route_params_map,
            "CATCHALL_ROUTES" => &self.catchall_routes,
            "NAMED_ROUTES" => &self.named_routes,
            "PARAMS_HELPER" => &self.params_helper,
            _ => return None,
        };
        Some(value)
    }
}

/// JSON string literal, which is also a valid TS string literal.
fn quote(s: &str) -> String {
    JsonValue::from(s).to_string()
}

/// TS type of a route's parameters.
fn params_type(route: &RoutePath) -> String {
    match route.param_kind() {
        ParamKind::None => "{}".to_string(),
        ParamKind::Catchall => "string[]".to_string(),
        ParamKind::Named(names) => {
            let fields: Vec<_> = names
                .iter()
                .map(|name| format!("{}: string", quote(name)))
                .collect();
            format!("{{ {} }}", fields.join("; "))
        }
    }
}

/// TS union of the routes whose kind matches, `never` when there are none.
fn union_of(table: &RouteTable, pred: impl Fn(&ParamKind) -> bool) -> String {
    let members: Vec<_> = table
        .iter()
        .filter(|route| pred(&route.param_kind()))
        .map(|route| quote(route.as_str()))
        .collect();
    if members.is_empty() {
        "never".to_string()
    } else {
        members.join(" | ")
    }
}

/// Render the route tree module for `table`.
///
/// With an `import_source`, the params helper is included and imports
/// `usePageContext` from it.
pub fn render(table: &RouteTable, import_source: Option<&str>) -> String {
    ROUTE_TREE_TS.render(&RouteTreeVars::new(table, import_source))
}

/// Replace `path` with `content`, creating parent directories.
pub fn write_artifact(path: &Path, content: &str) -> Result<(), EmitError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| EmitError::CreateDir(parent.to_path_buf(), e))?;
    }
    fs::write(path, content).map_err(|e| EmitError::Write(path.to_path_buf(), e))
}

/// Render `table` and write it to `path`.
pub fn emit(table: &RouteTable, import_source: Option<&str>, path: &Path) -> Result<(), EmitError> {
    write_artifact(path, &render(table, import_source))
}
