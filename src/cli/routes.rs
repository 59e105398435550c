//! `routes` command: print the canonical route table.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::RoutegenConfig;
use crate::discover;
use crate::log;
use crate::route::{ParamKind, RoutePath, RouteTable};
use crate::utils::plural_count;

/// One row of `routes --json`.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct RouteEntry<'a> {
    route: &'a str,
    kind: &'static str,
    params: Vec<String>,
}

impl<'a> RouteEntry<'a> {
    fn new(route: &'a RoutePath) -> Self {
        let (kind, params) = match route.param_kind() {
            ParamKind::None => ("none", Vec::new()),
            ParamKind::Named(names) => ("named", names),
            ParamKind::Catchall => ("catchall", Vec::new()),
        };
        Self {
            route: route.as_str(),
            kind,
            params,
        }
    }
}

/// Discover routes and print them.
pub fn list_routes(config: &RoutegenConfig, json: bool) -> Result<()> {
    let source = discover::source_for(config);
    let raw = source
        .discover()
        .with_context(|| format!("{} discovery failed", source.name()))?;
    let table = RouteTable::canonicalize(raw);

    if json {
        println!("{}", to_json(&table)?);
        return Ok(());
    }

    if table.is_empty() {
        log!("routes"; "no routes found");
        return Ok(());
    }

    let width = table.iter().map(|r| r.as_str().len()).max().unwrap_or(0);
    for route in &table {
        println!("{:width$}  {}", route.as_str(), describe(route).dimmed());
    }
    log!("routes"; "{} ({})", plural_count(table.len(), "route"), source.name());
    Ok(())
}

fn to_json(table: &RouteTable) -> Result<String> {
    let entries: Vec<_> = table.iter().map(RouteEntry::new).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Human-readable parameter summary.
fn describe(route: &RoutePath) -> String {
    match route.param_kind() {
        ParamKind::None => String::new(),
        ParamKind::Named(names) => names
            .iter()
            .map(|name| format!("{name}: string"))
            .collect::<Vec<_>>()
            .join(", "),
        ParamKind::Catchall => "string[]".to_string(),
    }
}
