//! # Pagewright
//!
//! A static site generator focused on content discovery, routing, and
//! navigation. Your filesystem is the data source: each page type owns a
//! source directory, markdown files become pages, and routes, menus, and
//! sidebars are derived from paths and front matter.
//!
//! # Architecture: Discovery Pipeline
//!
//! Content flows through a fixed sequence of stages inside
//! [`build::Pipeline`]:
//!
//! ```text
//! 1. Scan       registry → source files   (one walk per page type, sorted)
//! 2. Construct  file → PageModel          (front matter + derivation rules)
//! 3. Route      pages → RouteIndex        (collision-checked, serial)
//! 4. Navigate   index → menu + sidebar    (priority-sorted, grouped)
//! 5. Compile    index → HTML on disk      (render bodies, write files)
//! ```
//!
//! Stages 1–4 together form *discovery* ([`build::Pipeline::discover`]) and
//! never touch the output directory, so `scan` and `check` share the exact
//! code path with `build`. Page construction is the only parallel stage;
//! everything that assigns routes or orders navigation runs serially so two
//! runs over the same tree always produce the same site.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pagetype`] | Page type registry — source/output directories and capability flags per type |
//! | [`scan`] | Walks each type's source directory, skipping `_`-prefixed partials |
//! | [`matter`] | YAML front matter fence parsing, tolerant of missing or empty blocks |
//! | [`page`] | Page construction — title, date, author, image, and navigation derivation |
//! | [`routes`] | Route index with collision detection and output path derivation |
//! | [`navigation`] | Main menu and grouped sidebar resolution from the route index |
//! | [`extension`] | Hook trait for contributing extra source files and dynamic pages |
//! | [`build`] | Pipeline orchestrator — wires the stages together, collects failures |
//! | [`render`] | Markdown-to-HTML seam with a pulldown-cmark default |
//! | [`config`] | `config.toml` loading and validation |
//! | [`types`] | Navigation types serialized into the manifest (`NavItem`, `SidebarGroup`) |
//! | [`output`] | CLI output formatting for scan, check, and build |
//!
//! # Design Decisions
//!
//! ## Capabilities Over Type Inspection
//!
//! Nothing downstream of the registry branches on a type's name. Behavior
//! differences — date parsing, sidebar grouping, default nav visibility,
//! output flattening — are [`pagetype::Capabilities`] flags on the
//! descriptor. Registering a new page type needs no pipeline changes.
//!
//! ## Per-File Failure Isolation
//!
//! A page that fails to parse is recorded as a [`build::PageFailure`] and
//! skipped; the rest of the site still builds. Collisions are different:
//! two source files claiming one route is a tree-level contradiction no
//! single file can be blamed for, so it aborts the run.
//!
//! ## Deterministic By Construction
//!
//! Scan results are sorted before parallel page construction, `par_iter`
//! preserves input order on collect, and route insertion and navigation
//! sorting are serial with stable sorts. No HashMap iteration order ever
//! reaches the output.

pub mod build;
pub mod config;
pub mod extension;
pub mod matter;
pub mod navigation;
pub mod output;
pub mod page;
pub mod pagetype;
pub mod render;
pub mod routes;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
