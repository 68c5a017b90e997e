//! Extension hooks.
//!
//! External modules extend the pipeline by returning *additions* at fixed
//! extension points; the orchestrator merges them. Hooks never receive a
//! mutable view of pipeline state, so a hook cannot reorder, remove, or
//! edit what earlier stages produced.
//!
//! Two extension points exist:
//!
//! - after scanning: contribute extra [`SourceFile`]s that flow through the
//!   normal parse-and-construct path
//! - after page construction: contribute fully formed in-memory
//!   [`PageModel`]s (generated search pages, indexes) that join the route
//!   index under the dynamic-page collision policy
//!
//! New page *types* are not an extension point here: those must be
//! registered on the [`PageTypeRegistry`](crate::pagetype::PageTypeRegistry)
//! before it is sealed.

use crate::config::SiteConfig;
use crate::page::PageModel;
use crate::scan::SourceFile;

/// A pipeline extension. Implement the methods for the extension points you
/// need; the defaults contribute nothing.
pub trait ExtensionHook: Send + Sync {
    /// Name used in notices and reports.
    fn name(&self) -> &str;

    /// Extra source files, appended after the scanner's own results.
    fn discovered_files(&self, _config: &SiteConfig) -> Vec<SourceFile> {
        Vec::new()
    }

    /// In-memory pages generated from the constructed page set.
    fn dynamic_pages(&self, _pages: &[PageModel], _config: &SiteConfig) -> Vec<PageModel> {
        Vec::new()
    }
}

/// Runs registered hooks and collects their additions.
#[derive(Default)]
pub struct HookRunner {
    hooks: Vec<Box<dyn ExtensionHook>>,
}

impl HookRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hook: Box<dyn ExtensionHook>) {
        self.hooks.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Collect extra source files from every hook, in registration order.
    pub fn run_discovered_files(&self, config: &SiteConfig) -> Vec<SourceFile> {
        self.hooks
            .iter()
            .flat_map(|hook| hook.discovered_files(config))
            .collect()
    }

    /// Collect dynamic pages from every hook, in registration order.
    pub fn run_dynamic_pages(&self, pages: &[PageModel], config: &SiteConfig) -> Vec<PageModel> {
        self.hooks
            .iter()
            .flat_map(|hook| hook.dynamic_pages(pages, config))
            .collect()
    }
}
