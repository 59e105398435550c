//! Typed route path.
//!
//! A route pattern is held as an ordered list of typed segments rather than a
//! flat string, so parameter substitution works by segment position and can
//! never be confused by one identifier being a prefix of another
//! (`@id` vs `@idx`).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::{ParamKind, RouteError, RouteParams};

/// Prefix marking a named-parameter segment (`@id`).
pub const NAMED_SIGIL: char = '@';

/// Trailing segment marking a catch-all route (`/docs/@`).
pub const CATCHALL_SEGMENT: &str = "@";

/// One `/`-delimited piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Named(String),
    Catchall,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(NAMED_SIGIL) {
            Some("") => Self::Catchall,
            Some(name) => Self::Named(name.to_string()),
            None => Self::Literal(raw.to_string()),
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Literal(text) => out.push_str(text),
            Self::Named(name) => {
                out.push(NAMED_SIGIL);
                out.push_str(name);
            }
            Self::Catchall => out.push_str(CATCHALL_SEGMENT),
        }
    }
}

/// Canonical route pattern.
///
/// Invariants:
/// - Always starts with `/`
/// - No trailing slash except for the root route
/// - No empty segments
/// - A catch-all segment can only be the last one
///
/// Equality, hashing and ordering use the canonical string, so sorting a set
/// of routes gives the same order as sorting their string forms.
#[derive(Debug, Clone)]
pub struct RoutePath {
    segments: Vec<Segment>,
    canonical: Arc<str>,
}

impl RoutePath {
    /// Parse a raw route string, normalizing slashes.
    ///
    /// `"profiles//@id/"` and `"/profiles/@id"` parse to the same route.
    pub fn parse(raw: &str) -> Result<Self, RouteError> {
        let segments: Vec<Segment> = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(Segment::parse)
            .collect();

        if let Some(pos) = segments.iter().position(|s| *s == Segment::Catchall)
            && pos + 1 != segments.len()
        {
            return Err(RouteError::CatchallNotLast(raw.to_string()));
        }

        Ok(Self::from_segments(segments))
    }

    /// The root route `/`.
    pub fn root() -> Self {
        Self::from_segments(Vec::new())
    }

    fn from_segments(segments: Vec<Segment>) -> Self {
        let mut canonical = String::with_capacity(segments.len() * 8 + 1);
        for segment in &segments {
            canonical.push('/');
            segment.write_to(&mut canonical);
        }
        if canonical.is_empty() {
            canonical.push('/');
        }

        Self {
            segments,
            canonical: Arc::from(canonical),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether the route ends with the catch-all marker.
    #[inline]
    pub fn is_catchall(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Catchall))
    }

    /// Parameter shape of this route.
    pub fn param_kind(&self) -> ParamKind {
        ParamKind::of(self)
    }

    /// The route with its trailing catch-all marker removed.
    ///
    /// Returns an empty string for the root catch-all `/@`.
    fn catchall_base(&self) -> &str {
        self.canonical
            .strip_suffix(CATCHALL_SEGMENT)
            .map_or(self.as_str(), |s| s.trim_end_matches('/'))
    }

    /// Build a concrete URL path from this pattern.
    pub fn build(&self, params: &RouteParams) -> Result<String, RouteError> {
        self.build_with_search(params, std::iter::empty::<(&str, &str)>())
    }

    /// Build a concrete URL path and append `search` as a query string.
    ///
    /// The query is serialized as `application/x-www-form-urlencoded`
    /// (the `URLSearchParams` format) in the given order. An empty `search`
    /// adds no `?`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let route = RoutePath::parse("/dashboard")?;
    /// let url = route.build_with_search(&RouteParams::None, [("tab", "x")])?;
    /// assert_eq!(url, "/dashboard?tab=x");
    /// ```
    pub fn build_with_search<I, K, V>(
        &self,
        params: &RouteParams,
        search: I,
    ) -> Result<String, RouteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut url = self.substitute(params)?;

        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(search)
            .finish();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        Ok(url)
    }

    fn substitute(&self, params: &RouteParams) -> Result<String, RouteError> {
        match (self.param_kind(), params) {
            (ParamKind::Catchall, RouteParams::Catchall(segments)) => {
                Ok(format!("{}/{}", self.catchall_base(), segments.join("/")))
            }
            (ParamKind::Named(_), RouteParams::Named(values)) => {
                let mut url = String::with_capacity(self.canonical.len());
                for segment in &self.segments {
                    url.push('/');
                    match segment {
                        Segment::Named(name) => {
                            let value = values.get(name).ok_or_else(|| RouteError::MissingParam {
                                route: self.to_string(),
                                param: name.clone(),
                            })?;
                            url.push_str(value);
                        }
                        other => other.write_to(&mut url),
                    }
                }
                Ok(url)
            }
            (ParamKind::None, RouteParams::None) => Ok(self.to_string()),
            (ParamKind::None, RouteParams::Named(values)) if values.is_empty() => {
                Ok(self.to_string())
            }
            (kind, params) => Err(RouteError::ParamsMismatch {
                route: self.to_string(),
                expected: kind.label(),
                actual: params.label(),
            }),
        }
    }
}

impl PartialEq for RoutePath {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for RoutePath {}

impl Hash for RoutePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for RoutePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RoutePath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for RoutePath {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RoutePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}
