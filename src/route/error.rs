//! Route model errors.

use thiserror::Error;

/// Errors from parsing route patterns, building URLs and extracting params.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("catch-all marker must be the last segment in `{0}`")]
    CatchallNotLast(String),

    #[error("missing value for parameter `{param}` of `{route}`")]
    MissingParam { route: String, param: String },

    #[error("`{route}` expects {expected} parameters, got {actual}")]
    ParamsMismatch {
        route: String,
        expected: &'static str,
        actual: &'static str,
    },
}
