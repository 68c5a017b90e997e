//! Navigation resolution.
//!
//! Pure functions from the frozen [`RouteIndex`] plus configuration to
//! menu structures. No state is kept between calls; identical inputs give
//! identical output, since navigation order lands byte-for-byte in the
//! rendered HTML and must be stable across rebuilds.
//!
//! ## Main Menu
//!
//! Every visible route becomes an item, except documentation pages, which
//! live in the sidebar — only the docs index page represents them in the
//! main menu. Configured external links join at the same sorting stage.
//! Items sort by priority; ties keep discovery order. Two items resolving
//! to the same destination collapse to the first.
//!
//! ## Sidebar
//!
//! Documentation routes only, grouped by their resolved navigation group
//! (subdirectory convention, front matter, or the catch-all "Other").
//! Groups appear in first-seen order unless `navigation.sidebar_order`
//! pins them.

use crate::config::SiteConfig;
use crate::pagetype::PageTypeRegistry;
use crate::routes::{RouteIndex, output_path};
use crate::types::{NavItem, SidebarGroup};
use std::collections::HashSet;

/// Catch-all group for ungrouped documentation pages.
const FALLBACK_GROUP: &str = "Other";

/// Resolve the flat main menu.
pub fn resolve_main_menu(
    index: &RouteIndex,
    registry: &PageTypeRegistry,
    config: &SiteConfig,
) -> Vec<NavItem> {
    let mut items: Vec<NavItem> = Vec::new();

    for route in index.iter() {
        if route.page.navigation.hidden {
            continue;
        }
        let sidebar_type = registry
            .get(&route.page.type_id)
            .map(|t| t.caps.supports_sidebar_grouping)
            .unwrap_or(false);
        if sidebar_type && route.page.identifier != "index" {
            continue;
        }
        items.push(NavItem {
            label: route.page.navigation.label.clone(),
            target: format!("/{}", output_path(&route.key, config.pretty_urls)),
            priority: route.page.navigation.priority,
            route_key: Some(route.key.clone()),
        });
    }

    for link in &config.navigation.custom_links {
        items.push(NavItem {
            label: link.label.clone(),
            target: link.url.clone(),
            priority: link.priority,
            route_key: None,
        });
    }

    // Stable sort keeps discovery order within equal priorities
    items.sort_by_key(|item| item.priority);

    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.target.clone()));
    items
}

/// Resolve the grouped documentation sidebar.
pub fn resolve_sidebar(
    index: &RouteIndex,
    registry: &PageTypeRegistry,
    config: &SiteConfig,
) -> Vec<SidebarGroup> {
    let mut groups: Vec<SidebarGroup> = Vec::new();

    for route in index.iter() {
        let sidebar_type = registry
            .get(&route.page.type_id)
            .map(|t| t.caps.supports_sidebar_grouping)
            .unwrap_or(false);
        if !sidebar_type || route.page.navigation.hidden {
            continue;
        }
        // The docs landing page is the main menu's entry, not a sidebar row
        if route.page.identifier == "index" {
            continue;
        }

        let group_name = route
            .page
            .navigation
            .group
            .clone()
            .unwrap_or_else(|| FALLBACK_GROUP.to_string());
        let item = NavItem {
            label: route.page.navigation.label.clone(),
            target: format!("/{}", output_path(&route.key, config.pretty_urls)),
            priority: route.page.navigation.priority,
            route_key: Some(route.key.clone()),
        };

        match groups.iter_mut().find(|g| g.name == group_name) {
            Some(group) => group.items.push(item),
            None => groups.push(SidebarGroup {
                name: group_name,
                items: vec![item],
            }),
        }
    }

    for group in &mut groups {
        group.items.sort_by_key(|item| item.priority);
    }

    // Configured group order first, then first-seen order for the rest
    let order = &config.navigation.sidebar_order;
    if !order.is_empty() {
        groups.sort_by_key(|g| {
            order
                .iter()
                .position(|name| name == &g.name)
                .unwrap_or(order.len())
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomLink;
    use crate::page::PageModel;
    use crate::pagetype::PageTypeRegistry;
    use crate::routes::RouteIndexBuilder;
    use crate::test_helpers::menu_labels as labels;

    fn visible_page(type_id: &str, route_key: &str, label: &str, priority: i32) -> PageModel {
        let mut page = PageModel::dynamic(type_id, route_key, label);
        page.source_path = Some(format!("_{type_id}s/{route_key}.md"));
        page.navigation.hidden = false;
        page.navigation.priority = priority;
        page
    }

    fn index_of(pages: Vec<PageModel>) -> RouteIndex {
        let mut builder = RouteIndexBuilder::new();
        for page in pages {
            builder.insert(page).unwrap();
        }
        builder.finish()
    }

    #[test]
    fn menu_sorted_by_priority() {
        let index = index_of(vec![
            visible_page("page", "contact", "Contact", 30),
            visible_page("page", "index", "Home", 0),
            visible_page("page", "about", "About", 10),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let menu = resolve_main_menu(&index, &registry, &SiteConfig::default());

        assert_eq!(labels(&menu), vec!["Home", "About", "Contact"]);
    }

    #[test]
    fn priority_ties_keep_discovery_order() {
        let index = index_of(vec![
            visible_page("page", "zebra", "Zebra", 100),
            visible_page("page", "alpha", "Alpha", 100),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let menu = resolve_main_menu(&index, &registry, &SiteConfig::default());

        assert_eq!(labels(&menu), vec!["Zebra", "Alpha"]);
    }

    #[test]
    fn hidden_routes_excluded_but_stay_in_index() {
        let mut hidden = visible_page("post", "posts/secret", "Secret", 1);
        hidden.navigation.hidden = true;
        let index = index_of(vec![visible_page("page", "index", "Home", 0), hidden]);
        let registry = PageTypeRegistry::with_defaults();
        let menu = resolve_main_menu(&index, &registry, &SiteConfig::default());

        assert_eq!(labels(&menu), vec!["Home"]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn doc_pages_excluded_except_their_index() {
        let mut docs_index = visible_page("doc", "docs/index", "Docs", 50);
        docs_index.identifier = "index".to_string();
        let index = index_of(vec![
            visible_page("page", "index", "Home", 0),
            docs_index,
            visible_page("doc", "docs/install", "Install", 1),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let menu = resolve_main_menu(&index, &registry, &SiteConfig::default());

        assert_eq!(labels(&menu), vec!["Home", "Docs"]);
    }

    #[test]
    fn custom_links_merge_at_sort_stage() {
        let index = index_of(vec![visible_page("page", "about", "About", 100)]);
        let registry = PageTypeRegistry::with_defaults();
        let mut config = SiteConfig::default();
        config.navigation.custom_links.push(CustomLink {
            label: "GitHub".to_string(),
            url: "https://github.com/example".to_string(),
            priority: 50,
        });
        let menu = resolve_main_menu(&index, &registry, &config);

        assert_eq!(labels(&menu), vec!["GitHub", "About"]);
        assert!(menu[0].route_key.is_none());
    }

    #[test]
    fn duplicate_destinations_collapse_to_first() {
        let index = index_of(vec![visible_page("page", "about", "About", 10)]);
        let registry = PageTypeRegistry::with_defaults();
        let mut config = SiteConfig::default();
        config.navigation.custom_links.push(CustomLink {
            label: "Also About".to_string(),
            url: "/about.html".to_string(),
            priority: 999,
        });
        let menu = resolve_main_menu(&index, &registry, &config);

        assert_eq!(labels(&menu), vec!["About"]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let index = index_of(vec![
            visible_page("page", "index", "Home", 0),
            visible_page("page", "about", "About", 10),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let config = SiteConfig::default();

        let first = resolve_main_menu(&index, &registry, &config);
        let second = resolve_main_menu(&index, &registry, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn pretty_urls_change_targets() {
        let index = index_of(vec![visible_page("page", "about", "About", 10)]);
        let registry = PageTypeRegistry::with_defaults();
        let config = SiteConfig {
            pretty_urls: true,
            ..Default::default()
        };
        let menu = resolve_main_menu(&index, &registry, &config);
        assert_eq!(menu[0].target, "/about/index.html");
    }

    // =========================================================================
    // Sidebar
    // =========================================================================

    fn doc_page(route_key: &str, label: &str, group: Option<&str>, priority: i32) -> PageModel {
        let mut page = visible_page("doc", route_key, label, priority);
        page.navigation.group = group.map(str::to_string);
        page
    }

    #[test]
    fn sidebar_groups_in_first_seen_order() {
        let index = index_of(vec![
            doc_page("docs/install", "Install", Some("Getting Started"), 1),
            doc_page("docs/queries", "Queries", Some("Advanced"), 1),
            doc_page("docs/setup", "Setup", Some("Getting Started"), 2),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let sidebar = resolve_sidebar(&index, &registry, &SiteConfig::default());

        let names: Vec<&str> = sidebar.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Getting Started", "Advanced"]);
        assert_eq!(labels(&sidebar[0].items), vec!["Install", "Setup"]);
    }

    #[test]
    fn ungrouped_docs_fall_into_other() {
        let index = index_of(vec![doc_page("docs/faq", "FAQ", None, 1)]);
        let registry = PageTypeRegistry::with_defaults();
        let sidebar = resolve_sidebar(&index, &registry, &SiteConfig::default());

        assert_eq!(sidebar[0].name, "Other");
    }

    #[test]
    fn sidebar_order_config_pins_groups() {
        let index = index_of(vec![
            doc_page("docs/a", "A", Some("Alpha"), 1),
            doc_page("docs/b", "B", Some("Beta"), 1),
            doc_page("docs/c", "C", Some("Gamma"), 1),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let mut config = SiteConfig::default();
        config.navigation.sidebar_order = vec!["Gamma".to_string(), "Alpha".to_string()];
        let sidebar = resolve_sidebar(&index, &registry, &config);

        let names: Vec<&str> = sidebar.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn sidebar_items_sorted_by_priority_with_stable_ties() {
        let index = index_of(vec![
            doc_page("docs/later", "Later", Some("G"), 5),
            doc_page("docs/first", "First", Some("G"), 1),
            doc_page("docs/tie-a", "Tie A", Some("G"), 5),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let sidebar = resolve_sidebar(&index, &registry, &SiteConfig::default());

        assert_eq!(labels(&sidebar[0].items), vec!["First", "Later", "Tie A"]);
    }

    #[test]
    fn sidebar_excludes_docs_index_and_non_docs() {
        let mut docs_index = doc_page("docs/index", "Docs", None, 0);
        docs_index.identifier = "index".to_string();
        let index = index_of(vec![
            docs_index,
            doc_page("docs/install", "Install", None, 1),
            visible_page("page", "about", "About", 1),
        ]);
        let registry = PageTypeRegistry::with_defaults();
        let sidebar = resolve_sidebar(&index, &registry, &SiteConfig::default());

        assert_eq!(sidebar.len(), 1);
        assert_eq!(labels(&sidebar[0].items), vec!["Install"]);
    }

    #[test]
    fn hidden_docs_excluded_from_sidebar() {
        let mut hidden = doc_page("docs/internal", "Internal", None, 1);
        hidden.navigation.hidden = true;
        let index = index_of(vec![hidden, doc_page("docs/public", "Public", None, 1)]);
        let registry = PageTypeRegistry::with_defaults();
        let sidebar = resolve_sidebar(&index, &registry, &SiteConfig::default());

        assert_eq!(labels(&sidebar[0].items), vec!["Public"]);
    }
}
