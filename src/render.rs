//! Markdown rendering collaborator.
//!
//! The pipeline treats Markdown-to-HTML conversion as an external concern:
//! it hands a body over, receives HTML back, and embeds it. The seam is a
//! trait so hosts can swap in a renderer with their own pre/post-processing
//! (shortcodes, syntax highlighting, link rewriting) without the pipeline
//! knowing.

use pulldown_cmark::{Options, Parser, html};

/// Converts a Markdown body to an HTML fragment. Called once per
/// Markdown-bearing page during compilation, after page construction.
pub trait MarkdownRenderer: Sync {
    /// `type_id` lets renderers vary processing per page type; the default
    /// implementation ignores it.
    fn render(&self, body: &str, type_id: Option<&str>) -> String;
}

/// Default renderer backed by pulldown-cmark with the common extensions
/// (tables, footnotes, strikethrough, task lists) enabled.
#[derive(Debug, Default)]
pub struct CmarkRenderer;

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, body: &str, _type_id: Option<&str>) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(body, options);
        let mut out = String::with_capacity(body.len() * 2);
        html::push_html(&mut out, parser);
        out
    }
}
