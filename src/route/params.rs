//! Parameter model.
//!
//! [`ParamKind`] is derived from a [`RoutePath`], never stored. It drives the
//! compile-time constraints in the generated route tree and the runtime
//! checks of the Rust builder.

use std::collections::BTreeMap;

use super::{RouteError, RoutePath, Segment};

/// Key under which the host router reports a catch-all capture.
pub const CATCHALL_PARAM_KEY: &str = "*";

/// Parameter shape of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    None,
    /// Named identifiers in left-to-right order.
    Named(Vec<String>),
    Catchall,
}

impl ParamKind {
    /// Derive the parameter shape of `route`.
    ///
    /// A trailing catch-all wins over any named segment before it.
    pub fn of(route: &RoutePath) -> Self {
        if route.is_catchall() {
            return Self::Catchall;
        }

        let names: Vec<String> = route
            .segments()
            .iter()
            .filter_map(|segment| match segment {
                Segment::Named(name) => Some(name.clone()),
                _ => None,
            })
            .collect();

        if names.is_empty() {
            Self::None
        } else {
            Self::Named(names)
        }
    }

    pub fn has_params(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "no",
            Self::Named(_) => "named",
            Self::Catchall => "catch-all",
        }
    }
}

/// Parameter values, supplied to the builder or extracted from a match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteParams {
    #[default]
    None,
    Named(BTreeMap<String, String>),
    Catchall(Vec<String>),
}

impl RouteParams {
    /// Named values from `(identifier, value)` pairs.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Catch-all segments, in order.
    pub fn catchall<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Catchall(segments.into_iter().map(Into::into).collect())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "no",
            Self::Named(_) => "named",
            Self::Catchall(_) => "catch-all",
        }
    }
}

impl RoutePath {
    /// Extract typed parameters from the host router's raw capture map.
    ///
    /// When `raw` carries the catch-all key, its value is split on `/` with
    /// empty pieces dropped (`"/123//123/"` -> `["123", "123"]`). Otherwise
    /// the map is returned unchanged as named values.
    ///
    /// The raw shape is checked against this route: a catch-all route needs
    /// the catch-all key, a named route needs every declared identifier.
    pub fn extract_params(&self, raw: &BTreeMap<String, String>) -> Result<RouteParams, RouteError> {
        let kind = self.param_kind();

        if let Some(captured) = raw.get(CATCHALL_PARAM_KEY) {
            if kind != ParamKind::Catchall {
                return Err(self.mismatch(&kind, "catch-all"));
            }
            return Ok(RouteParams::catchall(
                captured.split('/').filter(|s| !s.is_empty()),
            ));
        }

        match &kind {
            ParamKind::Catchall => Err(self.mismatch(&kind, "named")),
            ParamKind::Named(names) => {
                if let Some(missing) = names.iter().find(|name| !raw.contains_key(*name)) {
                    return Err(RouteError::MissingParam {
                        route: self.to_string(),
                        param: missing.clone(),
                    });
                }
                Ok(RouteParams::Named(raw.clone()))
            }
            ParamKind::None if raw.is_empty() => Ok(RouteParams::None),
            ParamKind::None => Ok(RouteParams::Named(raw.clone())),
        }
    }

    fn mismatch(&self, kind: &ParamKind, actual: &'static str) -> RouteError {
        RouteError::ParamsMismatch {
            route: self.to_string(),
            expected: kind.label(),
            actual,
        }
    }
}
