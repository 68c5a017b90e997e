//! Page model construction.
//!
//! Turns a discovered source file plus its parsed front matter into a
//! [`PageModel`] with every derived field computed. This is where the
//! precedence rules live; each field is resolved independently and the
//! first available source wins:
//!
//! - **Title**: front matter `title` → first `# heading` in the body →
//!   humanized final identifier segment
//! - **Date** (posts): front matter `date` → `YYYY-MM-DD-` filename prefix
//! - **Author** (posts): front matter mapping → configured authors table →
//!   ad hoc author from the bare string
//! - **Navigation**: front matter `navigation:` block → path convention
//!   (subdirectory as sidebar group) → config tables keyed by route key →
//!   type capability defaults → global fallbacks
//!
//! Front matter is always optional. The only hard errors are an empty
//! identifier and an `image:` mapping without a `source`; everything else
//! degrades to `None` or a default. Errors here fail the one page, never
//! the build.

use serde::Serialize;
use serde_yaml::Value;
use std::fmt;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::matter::{Document, FrontMatter};
use crate::pagetype::PageTypeDescriptor;
use crate::scan::SourceFile;

/// Priority for pages with no explicit ordering. Sorts after anything
/// deliberately placed.
pub const DEFAULT_NAV_PRIORITY: i32 = 999;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("source path produced an empty identifier")]
    EmptyIdentifier,
    #[error("image front matter is missing its 'source' field")]
    MissingImageSource,
}

/// A calendar date parsed from front matter or a filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PageDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PageDate {
    /// Parse a `YYYY-MM-DD` string. Trailing content (a time component,
    /// say) is ignored. Returns `None` for anything non-conforming.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let date_part = s.get(..10)?;
        let rest = &s[10..];
        if !rest.is_empty() && !rest.starts_with([' ', 'T']) {
            return None;
        }
        let bytes = date_part.as_bytes();
        if bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year: u16 = date_part[..4].parse().ok()?;
        let month: u8 = date_part[5..7].parse().ok()?;
        let day: u8 = date_part[8..10].parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(Self { year, month, day })
    }
}

impl fmt::Display for PageDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A resolved post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub username: String,
    pub name: String,
    pub website: Option<String>,
}

/// Where a featured image lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImageSource {
    /// Absolute URL with a scheme.
    Remote(String),
    /// Path under the configured media directory.
    Local(String),
}

/// A post's featured image with attribution fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeaturedImage {
    pub source: Option<ImageSource>,
    pub alt_text: Option<String>,
    pub title_text: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub copyright_text: Option<String>,
    pub license_name: Option<String>,
    pub license_url: Option<String>,
}

/// Resolved navigation placement for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationData {
    pub label: String,
    /// Sidebar group for documentation pages.
    pub group: Option<String>,
    pub hidden: bool,
    pub priority: i32,
}

/// The central page entity: one per discovered source file, immutable after
/// construction, rebuilt from scratch on every pipeline run.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub type_id: String,
    /// Path relative to the type's source directory, without extension,
    /// `/`-separated regardless of host OS.
    pub identifier: String,
    /// Canonical output location: `output_dir/identifier`, or the bare
    /// identifier for root-level types.
    pub route_key: String,
    pub matter: FrontMatter,
    pub body: String,
    pub title: String,
    pub canonical_url: Option<String>,
    pub navigation: NavigationData,
    /// Post-only fields; `None` on types without date support.
    pub date: Option<PageDate>,
    pub author: Option<Author>,
    pub category: Option<String>,
    pub image: Option<FeaturedImage>,
    /// Project-relative source path. `None` for dynamically generated
    /// in-memory pages.
    pub source_path: Option<String>,
}

impl PageModel {
    /// A minimal in-memory page with no backing source file, for extension
    /// hooks that generate routes (search pages, generated indexes).
    pub fn dynamic(type_id: &str, route_key: &str, title: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            identifier: route_key
                .rsplit('/')
                .next()
                .unwrap_or(route_key)
                .to_string(),
            route_key: route_key.to_string(),
            matter: FrontMatter::empty(),
            body: String::new(),
            title: title.to_string(),
            canonical_url: None,
            navigation: NavigationData {
                label: title.to_string(),
                group: None,
                hidden: true,
                priority: DEFAULT_NAV_PRIORITY,
            },
            date: None,
            author: None,
            category: None,
            image: None,
            source_path: None,
        }
    }
}

/// Build a page model from a source file and its parsed document.
///
/// Each derived field reads the results computed before it and never
/// mutates them. Only two conditions fail a page: an empty identifier and
/// an image mapping without a source.
pub fn build_page(
    descriptor: &PageTypeDescriptor,
    config: &SiteConfig,
    source: &SourceFile,
    doc: Document,
) -> Result<PageModel, PageError> {
    let identifier = derive_identifier(source, descriptor)?;
    let route_key = derive_route_key(descriptor, &identifier);
    let title = resolve_title(&doc.matter, &doc.body, &identifier, descriptor);
    let canonical_url = resolve_canonical_url(&doc.matter, config, &route_key);

    let (date, author, category, image) = if descriptor.caps.supports_dates {
        (
            resolve_date(&doc.matter, &identifier),
            resolve_author(&doc.matter, config)?,
            doc.matter.get_str("category").map(str::to_string),
            resolve_image(&doc.matter, config)?,
        )
    } else {
        (None, None, None, None)
    };

    let navigation = resolve_navigation(&doc.matter, descriptor, config, &identifier, &route_key, &title);

    Ok(PageModel {
        type_id: descriptor.type_id.clone(),
        identifier,
        route_key,
        title,
        canonical_url,
        navigation,
        date,
        author,
        category,
        image,
        source_path: Some(source.display_path(descriptor)),
        matter: doc.matter,
        body: doc.body,
    })
}

/// Strip the extension and normalize separators to `/`.
fn derive_identifier(source: &SourceFile, descriptor: &PageTypeDescriptor) -> Result<String, PageError> {
    let rel = source.relative_str();
    let suffix = format!(".{}", descriptor.extension);
    let stem = if rel.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
        &rel[..rel.len() - suffix.len()]
    } else {
        rel.as_str()
    };
    if stem.is_empty() {
        return Err(PageError::EmptyIdentifier);
    }
    Ok(stem.to_string())
}

/// Combine output directory and identifier into the route key.
///
/// Flattening types route by the final identifier segment only; the
/// identifier itself keeps full nesting so the source stays traceable.
fn derive_route_key(descriptor: &PageTypeDescriptor, identifier: &str) -> String {
    let routed = if descriptor.caps.flattens_nested_output {
        identifier.rsplit('/').next().unwrap_or(identifier)
    } else {
        identifier
    };
    if descriptor.output_dir.is_empty() {
        routed.to_string()
    } else {
        format!("{}/{}", descriptor.output_dir, routed)
    }
}

fn resolve_title(
    matter: &FrontMatter,
    body: &str,
    identifier: &str,
    descriptor: &PageTypeDescriptor,
) -> String {
    if let Some(title) = matter.get_str("title") {
        return title.to_string();
    }
    if let Some(heading) = first_level_one_heading(body) {
        return heading;
    }
    let segment = identifier.rsplit('/').next().unwrap_or(identifier);
    // Dated filenames humanize without the date prefix
    let segment = if descriptor.caps.supports_dates {
        strip_date_prefix(segment).unwrap_or(segment)
    } else {
        segment
    };
    humanize(segment)
}

/// First `# heading` line of the body, if any.
fn first_level_one_heading(body: &str) -> Option<String> {
    body.lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .filter(|t| !t.is_empty())
}

/// `hello-world_v2` → `Hello World V2`.
pub fn humanize(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_canonical_url(matter: &FrontMatter, config: &SiteConfig, route_key: &str) -> Option<String> {
    if let Some(explicit) = matter.get_str("canonical_url") {
        return Some(explicit.to_string());
    }
    let base = config.base_url.as_ref()?;
    let output = crate::routes::output_path(route_key, config.pretty_urls);
    Some(format!("{}/{}", base.trim_end_matches('/'), output))
}

fn resolve_date(matter: &FrontMatter, identifier: &str) -> Option<PageDate> {
    if let Some(value) = matter.get("date") {
        // YAML may parse a bare date as a string or leave it quoted
        if let Some(s) = value.as_str()
            && let Some(date) = PageDate::parse(s)
        {
            return Some(date);
        }
    }
    let filename = identifier.rsplit('/').next().unwrap_or(identifier);
    PageDate::parse(filename.get(..10)?)
        .filter(|_| filename.len() == 10 || filename.as_bytes().get(10) == Some(&b'-'))
}

/// `2024-01-15-my-post` → `my-post`.
fn strip_date_prefix(segment: &str) -> Option<&str> {
    let date_part = segment.get(..10)?;
    PageDate::parse(date_part)?;
    let rest = &segment[10..];
    Some(rest.strip_prefix('-').unwrap_or(rest)).filter(|r| !r.is_empty())
}

/// Resolve the author from front matter, consulting the configured authors
/// table for bare string references. An inline mapping always wins over the
/// table.
fn resolve_author(matter: &FrontMatter, config: &SiteConfig) -> Result<Option<Author>, PageError> {
    let Some(value) = matter.get("author") else {
        return Ok(None);
    };
    match value {
        Value::String(username) => {
            if let Some(configured) = config.authors.get(username) {
                Ok(Some(Author {
                    username: username.clone(),
                    name: configured.name.clone().unwrap_or_else(|| username.clone()),
                    website: configured.website.clone(),
                }))
            } else {
                // Unknown usernames become ad hoc authors, not errors
                Ok(Some(Author {
                    username: username.clone(),
                    name: username.clone(),
                    website: None,
                }))
            }
        }
        Value::Mapping(map) => {
            let get = |key: &str| {
                map.get(Value::String(key.to_string()))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            let username = get("username");
            let name = get("name");
            let resolved_username = username.clone().or_else(|| name.clone());
            Ok(resolved_username.map(|u| Author {
                name: name.unwrap_or_else(|| u.clone()),
                username: u,
                website: get("website"),
            }))
        }
        _ => Ok(None),
    }
}

/// Normalize the `image` key: a bare string is a source shorthand, a
/// mapping carries attribution fields and must name its source.
fn resolve_image(matter: &FrontMatter, config: &SiteConfig) -> Result<Option<FeaturedImage>, PageError> {
    let Some(value) = matter.get("image") else {
        return Ok(None);
    };
    match value {
        Value::String(s) => Ok(Some(FeaturedImage {
            source: Some(classify_image_source(s, &config.media_dir)),
            ..FeaturedImage::default()
        })),
        Value::Mapping(map) => {
            let get = |key: &str| {
                map.get(Value::String(key.to_string()))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            let source = get("source").ok_or(PageError::MissingImageSource)?;
            Ok(Some(FeaturedImage {
                source: Some(classify_image_source(&source, &config.media_dir)),
                alt_text: get("alt_text"),
                title_text: get("title_text"),
                author_name: get("author_name"),
                author_url: get("author_url"),
                copyright_text: get("copyright_text"),
                license_name: get("license_name"),
                license_url: get("license_url"),
            }))
        }
        _ => Err(PageError::MissingImageSource),
    }
}

/// A scheme means a remote URL, kept verbatim; anything else is a path
/// under the media directory.
fn classify_image_source(s: &str, media_dir: &str) -> ImageSource {
    if s.contains("://") {
        return ImageSource::Remote(s.to_string());
    }
    let dir = media_dir.trim_end_matches('/');
    let rel = s.trim_start_matches('/');
    if dir.is_empty() {
        ImageSource::Local(rel.to_string())
    } else {
        ImageSource::Local(format!("{dir}/{rel}"))
    }
}

/// Resolve navigation placement per the field-by-field precedence chain.
fn resolve_navigation(
    matter: &FrontMatter,
    descriptor: &PageTypeDescriptor,
    config: &SiteConfig,
    identifier: &str,
    route_key: &str,
    title: &str,
) -> NavigationData {
    let nav_matter = matter.get_mapping("navigation");
    let nav_str = |key: &str| {
        nav_matter
            .and_then(|m| m.get(Value::String(key.to_string())))
            .and_then(Value::as_str)
    };
    let nav_bool = |key: &str| {
        nav_matter
            .and_then(|m| m.get(Value::String(key.to_string())))
            .and_then(Value::as_bool)
    };
    let nav_i64 = |key: &str| {
        nav_matter
            .and_then(|m| m.get(Value::String(key.to_string())))
            .and_then(Value::as_i64)
    };

    let label = nav_str("label")
        .map(str::to_string)
        .or_else(|| config.navigation.labels.get(route_key).cloned())
        .unwrap_or_else(|| title.to_string());

    // Path convention: the subdirectory of a sidebar-grouped page is its group
    let path_group = if descriptor.caps.supports_sidebar_grouping && identifier.contains('/') {
        identifier.split('/').next().map(humanize)
    } else {
        None
    };
    let group = nav_str("group").map(str::to_string).or(path_group);

    let hidden = match nav_bool("hidden") {
        Some(explicit) => explicit,
        None => {
            descriptor.caps.default_hidden_in_nav
                || config.navigation.exclude.iter().any(|k| k == route_key)
        }
    };

    let priority = nav_i64("priority")
        .map(|p| p as i32)
        .or_else(|| config.navigation.order.get(route_key).copied())
        .unwrap_or(DEFAULT_NAV_PRIORITY);

    NavigationData {
        label,
        group,
        hidden,
        priority,
    }
}
