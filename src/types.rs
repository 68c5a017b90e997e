//! Shared types serialized between the pipeline and its consumers.
//!
//! Navigation structures are part of the `scan` manifest output and the
//! build report, so they derive serde traits and stay free of internal
//! references into the route index.

use serde::{Deserialize, Serialize};

/// A resolved main-menu entry.
///
/// `target` is either a site-relative output path (`/about.html`) for page
/// items or an absolute URL for configured external links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub target: String,
    pub priority: i32,
    /// Route key of the backing page. `None` for external links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_key: Option<String>,
}

/// One sidebar group: a named cluster of documentation items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub name: String,
    pub items: Vec<NavItem>,
}
