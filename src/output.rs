//! CLI output formatting for the discovery and build commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary line
//! for every route is its semantic identity — positional index, title, and
//! destination — with the source file shown as secondary context via an
//! indented `Source:` line. The result reads as a content inventory while
//! still letting users trace every route back to a file.
//!
//! # Output Format
//!
//! ## Scan / Check
//!
//! ```text
//! Routes
//! 001 Home → index.html
//!     Source: _pages/index.md
//! 002 About Us → about.html
//!     Source: _pages/about.md
//! 003 Search → docs/search.html
//!     Source: (generated)
//!
//! Main menu
//! 001 Home
//! 002 About Us
//!
//! Sidebar
//! Getting Started
//!     001 Installing
//!
//! Errors
//! _pages/broken.md: invalid YAML in front matter: ...
//! ```
//!
//! ## Build
//!
//! The same inventory plus a closing `Generated N pages` line.
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::build::{BuildReport, Discovery, PageFailure};
use crate::routes::{RouteIndex, output_path};
use crate::types::{NavItem, SidebarGroup};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Route inventory: index, title, destination, source.
pub fn format_routes(index: &RouteIndex, pretty_urls: bool) -> Vec<String> {
    let mut lines = vec!["Routes".to_string()];
    for (pos, route) in index.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(pos + 1),
            route.page.title,
            output_path(&route.key, pretty_urls)
        ));
        match &route.page.source_path {
            Some(source) => lines.push(format!("{}Source: {}", indent(1), source)),
            None => lines.push(format!("{}Source: (generated)", indent(1))),
        }
    }
    lines
}

/// Flat main menu listing.
pub fn format_menu(items: &[NavItem]) -> Vec<String> {
    let mut lines = vec!["Main menu".to_string()];
    for (pos, item) in items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(pos + 1), item.label));
    }
    lines
}

/// Grouped sidebar listing.
pub fn format_sidebar(groups: &[SidebarGroup]) -> Vec<String> {
    let mut lines = vec!["Sidebar".to_string()];
    for group in groups {
        lines.push(group.name.clone());
        for (pos, item) in group.items.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(pos + 1), item.label));
        }
    }
    lines
}

/// Per-file error report, one `file: reason` line each.
pub fn format_failures(failures: &[PageFailure]) -> Vec<String> {
    let mut lines = vec!["Errors".to_string()];
    for failure in failures {
        lines.push(format!("{}: {}", failure.file, failure.reason));
    }
    lines
}

/// Full discovery display: routes, navigation, notices, errors.
pub fn format_discovery(discovery: &Discovery, pretty_urls: bool) -> Vec<String> {
    let mut lines = format_routes(&discovery.index, pretty_urls);

    lines.push(String::new());
    lines.extend(format_menu(&discovery.main_menu));

    if !discovery.sidebar.is_empty() {
        lines.push(String::new());
        lines.extend(format_sidebar(&discovery.sidebar));
    }

    for notice in discovery.index.notices() {
        lines.push(String::new());
        lines.push(format!("Note: {notice}"));
    }

    if !discovery.failures.is_empty() {
        lines.push(String::new());
        lines.extend(format_failures(&discovery.failures));
    }

    lines
}

pub fn print_discovery(discovery: &Discovery, pretty_urls: bool) {
    for line in format_discovery(discovery, pretty_urls) {
        println!("{line}");
    }
}

pub fn print_build_report(report: &BuildReport, pretty_urls: bool) {
    print_discovery(&report.discovery, pretty_urls);
    println!();
    println!("Generated {} pages", report.written.len());
}
