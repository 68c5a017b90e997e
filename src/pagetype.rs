//! Page type registry.
//!
//! Every piece of content belongs to a page type: a record naming where its
//! sources live, where its output goes, and which behaviors it opts into.
//! Behavior differences between types are expressed as capability flags on
//! the descriptor, consulted by data lookup — adding a new page type means
//! registering a descriptor, not branching in factory code.
//!
//! ## Default Types
//!
//! | type id | source dir | output dir | capabilities |
//! |---------|-----------|------------|--------------|
//! | `page`  | `_pages`  | (root)     | — |
//! | `post`  | `_posts`  | `posts`    | dates, hidden from nav by default |
//! | `doc`   | `_docs`   | `docs`     | sidebar grouping, flattened output |
//!
//! ## Registration Window
//!
//! Types are registered during initialization, before scanning begins. The
//! registry is sealed when the pipeline starts; registering afterwards is an
//! error, since pages of the new type would be missing from the already-built
//! index. Re-registering an existing `type_id` before sealing overwrites the
//! previous descriptor, so host applications can replace the defaults.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("page type '{0}' registered after discovery started")]
    Sealed(String),
}

/// Behavior flags for a page type.
///
/// All flags default to off; the plain `page` type is the zero value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Pages carry a publication date (front matter or filename prefix)
    /// plus author and category fields.
    pub supports_dates: bool,
    /// Pages participate in the grouped sidebar instead of the main menu.
    pub supports_sidebar_grouping: bool,
    /// Pages are hidden from the main menu unless front matter opts in.
    pub default_hidden_in_nav: bool,
    /// Nested source paths collapse to their final segment for routing.
    /// The identifier keeps full nesting; only the route key flattens.
    pub flattens_nested_output: bool,
}

/// A registered page type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTypeDescriptor {
    /// Stable identifier, e.g. `"post"`.
    pub type_id: String,
    /// Directory scanned for source files, relative to the project root.
    pub source_dir: String,
    /// Output directory prefix for route keys. Empty for root-level types.
    pub output_dir: String,
    /// Source file extension without the dot, e.g. `"md"`.
    pub extension: String,
    /// Whether the scanner visits this type at all.
    pub discoverable: bool,
    pub caps: Capabilities,
}

impl PageTypeDescriptor {
    pub fn new(type_id: &str, source_dir: &str, output_dir: &str, extension: &str) -> Self {
        Self {
            type_id: type_id.to_string(),
            source_dir: source_dir.to_string(),
            output_dir: output_dir.to_string(),
            extension: extension.to_string(),
            discoverable: true,
            caps: Capabilities::default(),
        }
    }

    pub fn with_caps(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    /// A type needs a source directory and an extension to be scanned.
    pub fn is_discoverable(&self) -> bool {
        self.discoverable && !self.source_dir.is_empty() && !self.extension.is_empty()
    }
}

/// Registry of page types, sealed before scanning begins.
#[derive(Debug, Default)]
pub struct PageTypeRegistry {
    types: Vec<PageTypeDescriptor>,
    sealed: bool,
}

impl PageTypeRegistry {
    /// An empty registry with no types.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the `page`, `post`, and `doc` defaults.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for descriptor in default_types() {
            registry.register(descriptor).expect("registry not sealed");
        }
        registry
    }

    /// Register a page type, replacing any existing descriptor with the same
    /// `type_id`.
    pub fn register(&mut self, descriptor: PageTypeDescriptor) -> Result<(), RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed(descriptor.type_id));
        }
        if let Some(existing) = self
            .types
            .iter_mut()
            .find(|t| t.type_id == descriptor.type_id)
        {
            *existing = descriptor;
        } else {
            self.types.push(descriptor);
        }
        Ok(())
    }

    /// Close the registration window. Called by the pipeline before scanning.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// All registered types, in registration order.
    pub fn all(&self) -> &[PageTypeDescriptor] {
        &self.types
    }

    pub fn get(&self, type_id: &str) -> Option<&PageTypeDescriptor> {
        self.types.iter().find(|t| t.type_id == type_id)
    }
}

/// The three built-in page types.
pub fn default_types() -> Vec<PageTypeDescriptor> {
    vec![
        PageTypeDescriptor::new("page", "_pages", "", "md"),
        PageTypeDescriptor::new("post", "_posts", "posts", "md").with_caps(Capabilities {
            supports_dates: true,
            default_hidden_in_nav: true,
            ..Capabilities::default()
        }),
        PageTypeDescriptor::new("doc", "_docs", "docs", "md").with_caps(Capabilities {
            supports_sidebar_grouping: true,
            flattens_nested_output: true,
            ..Capabilities::default()
        }),
    ]
}
