//! Canonical route table.

use std::collections::BTreeSet;

use serde::Serialize;

use super::{CATCHALL_SEGMENT, RoutePath};

/// A route as reported by a discoverer, before canonicalization.
///
/// `path` is the plain page path (`/catchall`); `catchall` records whether
/// the page captures the remaining segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawRoute {
    pub path: String,
    pub catchall: bool,
}

impl RawRoute {
    pub fn new(path: impl Into<String>, catchall: bool) -> Self {
        Self {
            path: path.into(),
            catchall,
        }
    }

    /// Route string with the catch-all marker appended when flagged.
    pub fn to_route_string(&self) -> String {
        if self.catchall {
            format!("{}/{}", self.path.trim_end_matches('/'), CATCHALL_SEGMENT)
        } else {
            self.path.clone()
        }
    }
}

/// Sorted, duplicate-free list of every route found in one pass.
///
/// Both discovery strategies feed [`RouteTable::canonicalize`], so the same
/// logical page set always yields the same table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RoutePath>,
}

impl RouteTable {
    /// Canonicalize raw discoverer output: normalize, dedup, sort.
    ///
    /// Routes that fail to parse are reported and dropped; a bad page must
    /// not take the whole table down.
    pub fn canonicalize<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = RawRoute>,
    {
        Self::from_patterns(raw.into_iter().map(|r| r.to_route_string()))
    }

    /// Build a table from route pattern strings (`/profiles/@id`).
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut routes = BTreeSet::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match RoutePath::parse(pattern) {
                Ok(route) => {
                    routes.insert(route);
                }
                Err(e) => crate::log!("warning"; "skipping route `{}`: {}", pattern, e),
            }
        }

        Self {
            routes: routes.into_iter().collect(),
        }
    }

    #[inline]
    pub fn routes(&self) -> &[RoutePath] {
        &self.routes
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RoutePath> {
        self.routes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Look up a route by its pattern string.
    pub fn get(&self, pattern: &str) -> Option<&RoutePath> {
        self.routes
            .binary_search_by(|route| route.as_str().cmp(pattern))
            .ok()
            .map(|i| &self.routes[i])
    }

    /// Compact JSON form, used to detect route set changes between passes.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.routes).unwrap_or_default()
    }

    /// Pretty JSON array with two-space indentation.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.routes).unwrap_or_else(|_| "[]".to_string())
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RoutePath;
    type IntoIter = std::slice::Iter<'a, RoutePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
