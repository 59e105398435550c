//! Catch-all detection from route-configuration files.
//!
//! A page directory may hold a `+route.ts` (or `.js`/`.tsx`/`.jsx`) whose
//! route string ends in the host wildcard, e.g.
//!
//! ```ts
//! export default "/catchall/*"
//! ```
//!
//! Detection is lenient: a missing or unreadable file simply means
//! "not a catch-all".

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Accepted route-configuration filenames, checked in order.
pub const ROUTE_CONFIG_FILES: &[&str] = &["+route.ts", "+route.js", "+route.tsx", "+route.jsx"];

/// Wildcard terminator of a quoted route string: `/*"` or `/* "`.
static WILDCARD_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"/\* ?""#).unwrap());

/// Check whether the page in `dir` is a catch-all route.
pub fn is_catchall_dir(dir: &Path) -> bool {
    let Some(route_file) = ROUTE_CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
    else {
        return false;
    };

    match fs::read_to_string(&route_file) {
        Ok(content) => has_wildcard_marker(&content),
        Err(e) => {
            crate::debug!("discover"; "cannot read {}: {}", route_file.display(), e);
            false
        }
    }
}

/// Check route-configuration text for the wildcard marker.
#[inline]
pub fn has_wildcard_marker(content: &str) -> bool {
    WILDCARD_MARKER.is_match(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_has_wildcard_marker() {
        assert!(has_wildcard_marker(r#"export default "/catchall/*""#));
        assert!(has_wildcard_marker(r#"export default "/catchall/* ""#));
        assert!(!has_wildcard_marker(r#"export default "/catchall""#));
        assert!(!has_wildcard_marker(r#"export default "/catchall/*  ""#));
        assert!(!has_wildcard_marker(""));
    }

    #[test]
    fn test_missing_route_file() {
        let temp = TempDir::new().unwrap();
        assert!(!is_catchall_dir(temp.path()));
    }

    #[test]
    fn test_route_file_with_marker() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("+route.ts"), r#"export default "/docs/*""#).unwrap();
        assert!(is_catchall_dir(temp.path()));
    }

    #[test]
    fn test_js_route_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("+route.js"), r#"export default "/docs/* ""#).unwrap();
        assert!(is_catchall_dir(temp.path()));
    }

    #[test]
    fn test_route_file_without_marker() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("+route.ts"), r#"export default "/docs/@slug""#).unwrap();
        assert!(!is_catchall_dir(temp.path()));
    }

    #[test]
    fn test_route_file_is_directory() {
        // A directory in place of the file is not a route config
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("+route.ts")).unwrap();
        assert!(!is_catchall_dir(temp.path()));
    }

    #[test]
    fn test_invalid_utf8_route_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("+route.ts"), [0xff, 0xfe, b'/', b'*', b'"']).unwrap();
        assert!(!is_catchall_dir(temp.path()));
    }
}
