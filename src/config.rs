//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the project root. All
//! values are optional: the file may be absent entirely, and a present file
//! only needs to specify the values it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! name = "Pagewright Site"   # Site name, used in page <title> suffixes
//! # base_url = "https://example.com"  # Enables canonical URL qualification
//! pretty_urls = false        # true: posts/hello → posts/hello/index.html
//! media_dir = "_media"       # Prefix for local featured image paths
//!
//! [navigation]
//! exclude = []               # Route keys hidden from the main menu
//! sidebar_order = []         # Sidebar group names in display order
//!
//! [navigation.labels]        # Route key → menu label overrides
//! # "docs/index" = "Documentation"
//!
//! [navigation.order]         # Route key → menu priority (lower = earlier)
//! # "about" = 10
//!
//! # [[navigation.custom_links]]
//! # label = "GitHub"
//! # url = "https://github.com/example"
//! # priority = 200
//!
//! [authors]
//! # [authors.jane]
//! # name = "Jane Doe"
//! # website = "https://jane.example.com"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name, used in generated page titles.
    pub name: String,
    /// Absolute base URL of the published site. When set, pages without an
    /// explicit canonical URL in front matter get one derived from their
    /// output path.
    pub base_url: Option<String>,
    /// Generate `route/index.html` instead of `route.html`.
    pub pretty_urls: bool,
    /// Directory prefix for local featured image sources.
    pub media_dir: String,
    /// Main menu and sidebar settings.
    pub navigation: NavigationConfig,
    /// Known authors, keyed by username. Post front matter referencing an
    /// author by string looks it up here.
    pub authors: BTreeMap<String, AuthorConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            base_url: None,
            pretty_urls: false,
            media_dir: default_media_dir(),
            navigation: NavigationConfig::default(),
            authors: BTreeMap::new(),
        }
    }
}

fn default_site_name() -> String {
    "Pagewright Site".to_string()
}

fn default_media_dir() -> String {
    "_media".to_string()
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation("name must not be empty".into()));
        }
        if let Some(url) = &self.base_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        for link in &self.navigation.custom_links {
            if link.label.trim().is_empty() || link.url.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "navigation.custom_links entries need both label and url".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Main menu and sidebar settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Route keys excluded from the main menu.
    pub exclude: Vec<String>,
    /// Menu label overrides, keyed by route key.
    pub labels: BTreeMap<String, String>,
    /// Menu priority overrides, keyed by route key. Lower sorts earlier.
    pub order: BTreeMap<String, i32>,
    /// Sidebar group names in display order. Groups not listed here keep
    /// first-seen order after the listed ones.
    pub sidebar_order: Vec<String>,
    /// External links injected into the main menu alongside page items.
    pub custom_links: Vec<CustomLink>,
}

/// An external main-menu link with no backing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomLink {
    pub label: String,
    pub url: String,
    /// Menu priority. Same scale as page priorities.
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    crate::page::DEFAULT_NAV_PRIORITY
}

/// A configured author entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorConfig {
    /// Display name. Falls back to the username when absent.
    pub name: Option<String>,
    pub website: Option<String>,
}

/// Load config from `<root>/config.toml`, falling back to defaults when the
/// file doesn't exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Stock `config.toml` content with every option documented.
pub fn stock_config_toml() -> String {
    r##"# pagewright site configuration
# All options are optional - the values shown are the defaults.

# Site name, used in generated page titles.
name = "Pagewright Site"

# Absolute base URL of the published site. When set, pages without an
# explicit canonical_url in front matter get one derived from their
# output path. Leave unset to skip canonical URLs.
# base_url = "https://example.com"

# Generate pretty URLs: posts/hello → posts/hello/index.html instead of
# posts/hello.html.
pretty_urls = false

# Directory prefix for local featured image sources.
media_dir = "_media"

[navigation]
# Route keys hidden from the main menu.
exclude = []

# Sidebar group names in display order. Unlisted groups follow in the
# order they are first seen.
sidebar_order = []

# Menu label overrides, keyed by route key.
[navigation.labels]
# "docs/index" = "Documentation"

# Menu priority overrides, keyed by route key. Lower sorts earlier.
[navigation.order]
# "about" = 10

# External links shown in the main menu.
# [[navigation.custom_links]]
# label = "GitHub"
# url = "https://github.com/example"
# priority = 200

# Known authors. Post front matter with `author: jane` resolves here.
[authors]
# [authors.jane]
# name = "Jane Doe"
# website = "https://jane.example.com"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.name, "Pagewright Site");
        assert!(config.base_url.is_none());
        assert!(!config.pretty_urls);
    }

    #[test]
    fn partial_config_overrides_only_named_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "pretty_urls = true\n").unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert!(config.pretty_urls);
        assert_eq!(config.name, "Pagewright Site");
    }

    #[test]
    fn unknown_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not_an_option = 1\n").unwrap();

        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn navigation_tables_parsed() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[navigation]
exclude = ["404"]

[navigation.order]
"about" = 10

[[navigation.custom_links]]
label = "GitHub"
url = "https://github.com/example"
priority = 200
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.navigation.exclude, vec!["404"]);
        assert_eq!(config.navigation.order.get("about"), Some(&10));
        assert_eq!(config.navigation.custom_links[0].label, "GitHub");
    }

    #[test]
    fn authors_table_parsed() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[authors.jane]\nname = \"Jane Doe\"\nwebsite = \"https://jane.example.com\"\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        let jane = config.authors.get("jane").unwrap();
        assert_eq!(jane.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn invalid_base_url_rejected() {
        let config = SiteConfig {
            base_url: Some("example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_custom_link_rejected() {
        let config = SiteConfig {
            navigation: NavigationConfig {
                custom_links: vec![CustomLink {
                    label: String::new(),
                    url: "https://example.com".to_string(),
                    priority: 100,
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn stock_config_parses_as_valid_config() {
        let config: SiteConfig = toml::from_str(&stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert!(!config.pretty_urls);
    }
}
