//! Configuration section definitions.
//!
//! Each module corresponds to a section in `routegen.toml`:
//!
//! | Module   | TOML Section | Purpose                                  |
//! |----------|--------------|------------------------------------------|
//! | `pages`  | `[pages]`    | Pages root, discovery strategy, registry |
//! | `output` | `[output]`   | Generated file path, parameter helper    |

mod output;
mod pages;

pub use output::{DEFAULT_OUTPUT_FILE, Framework, ImportSource, OutputConfig};
pub use pages::{DiscoveryStrategy, PagesConfig};
