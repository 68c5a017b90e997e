//! Route index construction.
//!
//! Every page gets exactly one route key, and every route key maps to
//! exactly one page. The index is built once per pipeline run by inserting
//! pages in discovery order, then frozen; navigation resolution, feed
//! generation, and rendering all read from it.
//!
//! ## Collision Policy
//!
//! Two source files resolving to the same route key is a configuration bug
//! that would make the output destination ambiguous, so it aborts the whole
//! build rather than silently overwriting one page. Dynamically generated
//! pages are the one exception: when a hook registers a route that an
//! explicit source file already owns, the dynamic page defers and the skip
//! is recorded as a notice. Two dynamic pages colliding is fatal again.

use serde::Serialize;
use thiserror::Error;

use crate::page::PageModel;
use std::collections::HashMap;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("route collision on '{key}': {first} and {second}")]
    Collision {
        key: String,
        first: String,
        second: String,
    },
    #[error("no page found for identifier '{0}'")]
    NotFound(String),
}

/// A route key paired with its page.
#[derive(Debug, Clone)]
pub struct Route {
    pub key: String,
    pub page: PageModel,
}

/// Derive the output file path for a route key.
///
/// Plain form appends `.html`; pretty URLs nest into `key/index.html`,
/// except `index` itself which stays at the site root either way.
pub fn output_path(route_key: &str, pretty_urls: bool) -> String {
    if !pretty_urls || route_key == "index" || route_key.ends_with("/index") {
        format!("{route_key}.html")
    } else {
        format!("{route_key}/index.html")
    }
}

/// Frozen bidirectional index: route key ↔ page, iterable in discovery
/// order, O(1) lookup by key.
#[derive(Debug, Default)]
pub struct RouteIndex {
    routes: Vec<Route>,
    by_key: HashMap<String, usize>,
    /// Dynamic pages that deferred to an existing source route.
    notices: Vec<String>,
}

impl RouteIndex {
    pub fn get(&self, key: &str) -> Option<&Route> {
        self.by_key.get(key).map(|&i| &self.routes[i])
    }

    /// Look up a page by type and identifier. Callers asking for a specific
    /// page get a typed error rather than a generic failure.
    pub fn find_by_identifier(&self, type_id: &str, identifier: &str) -> Result<&Route, RouteError> {
        self.routes
            .iter()
            .find(|r| r.page.type_id == type_id && r.page.identifier == identifier)
            .ok_or_else(|| RouteError::NotFound(format!("{type_id}:{identifier}")))
    }

    /// Routes in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Informational skips recorded while merging dynamic pages.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

/// Accumulates routes during the build phase, enforcing uniqueness.
#[derive(Debug, Default)]
pub struct RouteIndexBuilder {
    index: RouteIndex,
}

impl RouteIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a source-file page. A duplicate key is fatal.
    pub fn insert(&mut self, page: PageModel) -> Result<(), RouteError> {
        let key = page.route_key.clone();
        if let Some(&existing) = self.index.by_key.get(&key) {
            return Err(RouteError::Collision {
                first: describe(&self.index.routes[existing].page),
                second: describe(&page),
                key,
            });
        }
        self.index.by_key.insert(key.clone(), self.index.routes.len());
        self.index.routes.push(Route { key, page });
        Ok(())
    }

    /// Insert a dynamically generated page. Defers to an existing source
    /// route with a recorded notice; colliding with another dynamic page is
    /// fatal, the ambiguity argument applies there too.
    pub fn insert_dynamic(&mut self, page: PageModel) -> Result<(), RouteError> {
        if let Some(&existing) = self.index.by_key.get(&page.route_key) {
            let existing_page = &self.index.routes[existing].page;
            if existing_page.source_path.is_some() {
                self.index.notices.push(format!(
                    "dynamic page '{}' skipped: route owned by {}",
                    page.route_key,
                    describe(existing_page)
                ));
                return Ok(());
            }
            return Err(RouteError::Collision {
                key: page.route_key.clone(),
                first: describe(existing_page),
                second: describe(&page),
            });
        }
        self.insert(page)
    }

    /// Freeze the index. No further mutation after this.
    pub fn finish(self) -> RouteIndex {
        self.index
    }
}

fn describe(page: &PageModel) -> String {
    page.source_path
        .clone()
        .unwrap_or_else(|| format!("<dynamic:{}>", page.type_id))
}

/// One row of the route manifest emitted by the `scan` command.
#[derive(Debug, Serialize)]
pub struct RouteManifestEntry {
    pub route_key: String,
    pub type_id: String,
    pub identifier: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    pub output_path: String,
}

impl RouteIndex {
    /// Serializable view of the index for manifest output.
    pub fn manifest(&self, pretty_urls: bool) -> Vec<RouteManifestEntry> {
        self.iter()
            .map(|route| RouteManifestEntry {
                route_key: route.key.clone(),
                type_id: route.page.type_id.clone(),
                identifier: route.page.identifier.clone(),
                title: route.page.title.clone(),
                source_path: route.page.source_path.clone(),
                output_path: output_path(&route.key, pretty_urls),
            })
            .collect()
    }
}
