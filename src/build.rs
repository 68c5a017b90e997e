//! Pipeline orchestration.
//!
//! Runs the full discovery-and-build pass:
//!
//! ```text
//! 1. Seal      page type registry (late registration becomes an error)
//! 2. Scan      source directories → sorted SourceFile list (+ hook files)
//! 3. Construct parse front matter + build page models, in parallel
//! 4. Index     serial route insertion, collision detection, dynamic pages
//! 5. Resolve   main menu + sidebar from the frozen index
//! 6. Render    markdown → HTML shell per route (build only)
//! ```
//!
//! Parsing and page construction are pure per-file work, so step 3 fans out
//! across rayon workers; the scanner already fixed discovery order by
//! sorting, and the collected results keep input order, so tie-breaking
//! stays deterministic. Step 4 stays single-threaded: collision detection
//! needs one consistent view of the index.
//!
//! ## Error Policy
//!
//! Per-file problems (bad YAML, missing image source) fail that page only
//! and are collected into the report, so an author sees every broken file
//! in one pass. Structural problems (route collisions, late registration)
//! abort the run immediately. A run with per-file failures still completes
//! but must exit non-zero; skipping is a courtesy for iterative authoring,
//! not a silent success.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::extension::HookRunner;
use crate::matter;
use crate::navigation::{resolve_main_menu, resolve_sidebar};
use crate::page::{self, PageModel};
use crate::pagetype::{PageTypeRegistry, RegistryError};
use crate::render::MarkdownRenderer;
use crate::routes::{RouteError, RouteIndex, RouteIndexBuilder, RouteManifestEntry, output_path};
use crate::scan::{self, ScanError, SourceFile};
use crate::types::{NavItem, SidebarGroup};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Route error: {0}")]
    Route(#[from] RouteError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("unknown page type '{0}' on discovered file")]
    UnknownPageType(String),
}

/// One page that could not be built, with the reason. The build continues
/// past these and reports them together at the end.
#[derive(Debug, Clone, Serialize)]
pub struct PageFailure {
    pub file: String,
    pub reason: String,
}

/// Result of the discovery phase: the frozen route index plus everything
/// the caller needs for reporting.
pub struct Discovery {
    pub index: RouteIndex,
    pub failures: Vec<PageFailure>,
    pub main_menu: Vec<NavItem>,
    pub sidebar: Vec<SidebarGroup>,
}

impl Discovery {
    /// Serializable manifest of the discovery results.
    pub fn manifest(&self, pretty_urls: bool) -> ScanManifest {
        ScanManifest {
            routes: self.index.manifest(pretty_urls),
            main_menu: self.main_menu.clone(),
            sidebar: self.sidebar.clone(),
            failures: self.failures.clone(),
        }
    }
}

/// JSON manifest emitted by the `scan` command.
#[derive(Serialize)]
pub struct ScanManifest {
    pub routes: Vec<RouteManifestEntry>,
    pub main_menu: Vec<NavItem>,
    pub sidebar: Vec<SidebarGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PageFailure>,
}

/// Result of a full build: discovery plus written output files.
pub struct BuildReport {
    pub discovery: Discovery,
    /// Output paths written, relative to the output directory.
    pub written: Vec<String>,
}

/// One pipeline run over a project tree.
///
/// Owned by the caller and safe to construct several times per process;
/// nothing here is global. The registry stays open for type registration
/// until the first discovery pass seals it.
pub struct Pipeline {
    root: PathBuf,
    config: SiteConfig,
    registry: PageTypeRegistry,
    hooks: HookRunner,
}

impl Pipeline {
    pub fn new(root: &Path, config: SiteConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            registry: PageTypeRegistry::with_defaults(),
            hooks: HookRunner::new(),
        }
    }

    /// Access the registry for extra type registration. Errors after the
    /// pipeline has started are surfaced by `register` itself.
    pub fn registry_mut(&mut self) -> &mut PageTypeRegistry {
        &mut self.registry
    }

    pub fn add_hook(&mut self, hook: Box<dyn crate::extension::ExtensionHook>) {
        self.hooks.add(hook);
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run discovery: scan, construct, index, resolve navigation.
    pub fn discover(&mut self) -> Result<Discovery, BuildError> {
        self.registry.seal();

        let mut files = scan::scan_all(&self.root, &self.registry)?;
        files.extend(self.hooks.run_discovered_files(&self.config));

        let (pages, failures) = self.construct_pages(&files)?;

        let dynamic = self.hooks.run_dynamic_pages(&pages, &self.config);

        let mut builder = RouteIndexBuilder::new();
        for page in pages {
            builder.insert(page)?;
        }
        for page in dynamic {
            builder.insert_dynamic(page)?;
        }
        let index = builder.finish();

        let main_menu = resolve_main_menu(&index, &self.registry, &self.config);
        let sidebar = resolve_sidebar(&index, &self.registry, &self.config);

        Ok(Discovery {
            index,
            failures,
            main_menu,
            sidebar,
        })
    }

    /// Parse and construct pages in parallel, preserving input order.
    fn construct_pages(
        &self,
        files: &[SourceFile],
    ) -> Result<(Vec<PageModel>, Vec<PageFailure>), BuildError> {
        for file in files {
            if self.registry.get(&file.type_id).is_none() {
                return Err(BuildError::UnknownPageType(file.type_id.clone()));
            }
        }

        let results: Vec<Result<PageModel, PageFailure>> = files
            .par_iter()
            .map(|file| self.construct_one(file))
            .collect();

        let mut pages = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(page) => pages.push(page),
                Err(failure) => failures.push(failure),
            }
        }
        Ok((pages, failures))
    }

    fn construct_one(&self, file: &SourceFile) -> Result<PageModel, PageFailure> {
        let descriptor = self
            .registry
            .get(&file.type_id)
            .expect("checked before dispatch");
        let display = file.display_path(descriptor);

        let raw = fs::read_to_string(&file.absolute_path).map_err(|e| PageFailure {
            file: display.clone(),
            reason: format!("cannot read file: {e}"),
        })?;
        let doc = matter::parse(&raw).map_err(|e| PageFailure {
            file: display.clone(),
            reason: e.to_string(),
        })?;
        page::build_page(descriptor, &self.config, file, doc).map_err(|e| PageFailure {
            file: display,
            reason: e.to_string(),
        })
    }

    /// Run discovery, then render every route to the output directory.
    pub fn build(
        &mut self,
        output_dir: &Path,
        renderer: &dyn MarkdownRenderer,
    ) -> Result<BuildReport, BuildError> {
        let discovery = self.discover()?;

        fs::create_dir_all(output_dir)?;
        let mut written = Vec::new();
        for route in discovery.index.iter() {
            let rel = output_path(&route.key, self.config.pretty_urls);
            let dest = output_dir.join(&rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            let body_html = if route.page.body.trim().is_empty() {
                String::new()
            } else {
                renderer.render(&route.page.body, Some(&route.page.type_id))
            };
            let html = page_shell(&route.page, &body_html, &self.config);
            fs::write(&dest, html)?;
            written.push(rel);
        }

        Ok(BuildReport { discovery, written })
    }
}

/// Wrap a rendered body in a minimal document shell. Templating proper is
/// a host concern; this keeps the output self-contained and valid.
fn page_shell(page: &PageModel, body_html: &str, config: &SiteConfig) -> String {
    let mut head = String::new();
    head.push_str(&format!(
        "<title>{} - {}</title>\n",
        escape_html(&page.title),
        escape_html(&config.name)
    ));
    if let Some(canonical) = &page.canonical_url {
        head.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            escape_html(canonical)
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n{head}</head>\n<body>\n{body_html}</body>\n</html>\n"
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
