//! Route model - typed route patterns and the canonical route table.
//!
//! ```text
//! raw strings ──parse──► RoutePath (typed segments) ──collect──► RouteTable
//!                            │
//!                            └── ParamKind / RouteParams (builder + extraction)
//! ```
//!
//! Sigils:
//!
//! | Segment   | Form     | Example                |
//! |-----------|----------|------------------------|
//! | literal   | `name`   | `/dashboard`           |
//! | named     | `@ident` | `/profiles/@id`        |
//! | catch-all | `@`      | `/catchall/@` (last)   |

mod error;
mod params;
mod path;
mod table;


pub use error::RouteError;
pub use params::{ParamKind, RouteParams};
pub use path::{CATCHALL_SEGMENT, RoutePath, Segment};
pub use table::{RawRoute, RouteTable};
