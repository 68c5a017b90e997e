//! Shared test utilities for the pagewright test suite.
//!
//! Fixture sites are built programmatically on a [`TempDir`] — all content
//! is plain text, so there is nothing to copy from disk. Each test gets an
//! isolated tree it can mutate freely.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixture_site();
//! let discovery = pipeline_for(tmp.path()).discover().unwrap();
//! let route = find_route(&discovery.index, "about");
//! assert_eq!(route.page.title, "About Us");
//! ```

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::build::Pipeline;
use crate::routes::{Route, RouteIndex};
use crate::types::NavItem;

// =========================================================================
// Fixture setup
// =========================================================================

/// Build the standard fixture site:
///
/// ```text
/// _pages/index.md                  # "Home", priority 0
/// _pages/about.md                  # "About Us"
/// _posts/2023-05-01-launch.md      # dated post, hidden by default
/// _docs/index.md                   # docs landing page
/// _docs/getting-started/install.md # grouped, flattened to docs/install
/// ```
pub fn setup_fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_page(
        tmp.path(),
        "_pages/index.md",
        "---\ntitle: Home\nnavigation:\n  priority: 0\n---\nWelcome.\n",
    );
    write_page(tmp.path(), "_pages/about.md", "# About Us\n\nWho we are.\n");
    write_page(
        tmp.path(),
        "_posts/2023-05-01-launch.md",
        "# We Launched\n\nBig day.\n",
    );
    write_page(tmp.path(), "_docs/index.md", "# Documentation\n");
    write_page(
        tmp.path(),
        "_docs/getting-started/install.md",
        "# Installing\n\nSteps.\n",
    );
    tmp
}

/// Write one content file, creating parent directories.
pub fn write_page(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A pipeline over `root` with config loaded from its `config.toml` (or
/// defaults when absent).
pub fn pipeline_for(root: &Path) -> Pipeline {
    let config = crate::config::load_config(root).unwrap();
    Pipeline::new(root, config)
}

// =========================================================================
// Index lookups — panics with a clear message on miss
// =========================================================================

/// Find a route by key. Panics if not found.
pub fn find_route<'a>(index: &'a RouteIndex, key: &str) -> &'a Route {
    index.get(key).unwrap_or_else(|| {
        let keys: Vec<&str> = index.iter().map(|r| r.key.as_str()).collect();
        panic!("route '{key}' not found. Available: {keys:?}")
    })
}

// =========================================================================
// Navigation helpers
// =========================================================================

/// Menu labels in order.
pub fn menu_labels(items: &[NavItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

/// Assert the main menu matches an expected label sequence.
pub fn assert_menu_shape(items: &[NavItem], expected: &[&str]) {
    assert_eq!(menu_labels(items), expected, "main menu labels mismatch");
}
