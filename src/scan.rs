//! Source file discovery.
//!
//! Stage 1 of the pagewright pipeline. Each registered page type owns a
//! source directory; the scanner walks it recursively and produces one
//! [`SourceFile`] descriptor per matching file.
//!
//! ## Directory Structure
//!
//! ```text
//! project/                         # Project root
//! ├── config.toml                  # Site configuration (optional)
//! ├── _pages/                      # `page` type → site root
//! │   ├── index.md
//! │   ├── about.md
//! │   └── _draft.md                # Underscore prefix = skipped
//! ├── _posts/                      # `post` type → posts/
//! │   ├── 2024-01-15-launch.md     # Date prefix convention
//! │   └── 2024/hello.md            # Nesting allowed, kept in the route
//! └── _docs/                       # `doc` type → docs/ (flattened)
//!     ├── index.md
//!     └── getting-started/
//!         └── install.md           # Routes as docs/install
//! ```
//!
//! ## Matching Rules
//!
//! - Files are matched by the type's extension, case-insensitively.
//! - Any file whose basename starts with `_` is skipped everywhere; these
//!   are partials/includes, not standalone pages.
//! - Nested directories are included to support categorized content.
//! - A missing source directory yields an empty list, not an error — a site
//!   with no `_docs/` simply has no documentation pages.
//!
//! ## Determinism
//!
//! Descriptors are returned sorted lexicographically by relative path. Later
//! stages may fan work out across threads, so discovery order must be fixed
//! here rather than inherited from filesystem enumeration.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::pagetype::{PageTypeDescriptor, PageTypeRegistry};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error under {dir}: {source}")]
    Walk {
        dir: PathBuf,
        source: walkdir::Error,
    },
}

/// A discovered source file, one per matched file. Never mutated after
/// creation and not persisted beyond a single build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub absolute_path: PathBuf,
    /// Path relative to the type's source directory.
    pub relative_path: PathBuf,
    pub type_id: String,
}

impl SourceFile {
    /// Relative path with `/` separators, used for error reports and for
    /// deriving the page identifier.
    pub fn relative_str(&self) -> String {
        path_to_slash(&self.relative_path)
    }

    /// Project-relative display path, e.g. `_posts/2024-01-15-launch.md`.
    pub fn display_path(&self, descriptor: &PageTypeDescriptor) -> String {
        format!("{}/{}", descriptor.source_dir, self.relative_str())
    }
}

/// Convert a path to a `/`-separated string, stable across host OSes.
pub fn path_to_slash(path: &Path) -> String {
    path.iter()
        .map(|c| c.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Scan one page type's source directory.
///
/// Returns descriptors sorted by relative path. Non-discoverable types and
/// missing directories produce an empty list.
pub fn scan_type(root: &Path, descriptor: &PageTypeDescriptor) -> Result<Vec<SourceFile>, ScanError> {
    if !descriptor.is_discoverable() {
        return Ok(Vec::new());
    }

    let source_dir = root.join(&descriptor.source_dir);
    if !source_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&source_dir) {
        let entry = entry.map_err(|e| ScanError::Walk {
            dir: source_dir.clone(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !matches_extension(path, &descriptor.extension) {
            continue;
        }
        if is_partial(path) {
            continue;
        }

        let relative = path
            .strip_prefix(&source_dir)
            .expect("walked entries live under source_dir")
            .to_path_buf();
        files.push(SourceFile {
            absolute_path: path.to_path_buf(),
            relative_path: relative,
            type_id: descriptor.type_id.clone(),
        });
    }

    files.sort_by_key(SourceFile::relative_str);
    Ok(files)
}

/// Scan every discoverable type in the registry, in registration order.
pub fn scan_all(root: &Path, registry: &PageTypeRegistry) -> Result<Vec<SourceFile>, ScanError> {
    let mut all = Vec::new();
    for descriptor in registry.all() {
        all.extend(scan_type(root, descriptor)?);
    }
    Ok(all)
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Files whose basename starts with `_` are partials, not standalone pages.
fn is_partial(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('_'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagetype::PageTypeDescriptor;
    use std::fs;
    use tempfile::TempDir;

    fn page_type() -> PageTypeDescriptor {
        PageTypeDescriptor::new("page", "_pages", "", "md")
    }

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_matching_files() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_pages/index.md", "# Home");
        write_file(tmp.path(), "_pages/about.md", "# About");

        let files = scan_type(tmp.path(), &page_type()).unwrap();
        let rels: Vec<String> = files.iter().map(SourceFile::relative_str).collect();
        assert_eq!(rels, vec!["about.md", "index.md"]);
    }

    #[test]
    fn nested_directories_included() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_pages/legal/privacy.md", "# Privacy");

        let files = scan_type(tmp.path(), &page_type()).unwrap();
        assert_eq!(files[0].relative_str(), "legal/privacy.md");
    }

    #[test]
    fn underscore_prefixed_files_skipped() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_pages/_partial.md", "shared include");
        write_file(tmp.path(), "_pages/nested/_include.md", "shared include");
        write_file(tmp.path(), "_pages/real.md", "# Real");

        let files = scan_type(tmp.path(), &page_type()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_str(), "real.md");
    }

    #[test]
    fn other_extensions_ignored() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_pages/notes.txt", "not a page");
        write_file(tmp.path(), "_pages/style.css", "body {}");
        write_file(tmp.path(), "_pages/about.md", "# About");

        let files = scan_type(tmp.path(), &page_type()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_pages/readme.MD", "# Readme");

        let files = scan_type(tmp.path(), &page_type()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_source_dir_yields_empty() {
        let tmp = TempDir::new().unwrap();
        let files = scan_type(tmp.path(), &page_type()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn non_discoverable_type_yields_empty() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_pages/about.md", "# About");

        let mut descriptor = page_type();
        descriptor.discoverable = false;
        let files = scan_type(tmp.path(), &descriptor).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn results_sorted_lexicographically() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_pages/zebra.md", "z");
        write_file(tmp.path(), "_pages/alpha.md", "a");
        write_file(tmp.path(), "_pages/middle/item.md", "m");

        let files = scan_type(tmp.path(), &page_type()).unwrap();
        let rels: Vec<String> = files.iter().map(SourceFile::relative_str).collect();
        assert_eq!(rels, vec!["alpha.md", "middle/item.md", "zebra.md"]);
    }

    #[test]
    fn scan_all_walks_types_in_registration_order() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_posts/2024-01-01-hello.md", "# Hello");
        write_file(tmp.path(), "_pages/about.md", "# About");

        let registry = crate::pagetype::PageTypeRegistry::with_defaults();
        let files = scan_all(tmp.path(), &registry).unwrap();

        let ids: Vec<&str> = files.iter().map(|f| f.type_id.as_str()).collect();
        assert_eq!(ids, vec!["page", "post"]);
    }
}
