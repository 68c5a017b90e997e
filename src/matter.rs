//! Front matter parsing.
//!
//! Content files may begin with a fenced YAML block:
//!
//! ```text
//! ---
//! title: "Hello World"
//! navigation:
//!   priority: 10
//! ---
//! Body starts here.
//! ```
//!
//! The fence is `---` on its own line, opening and closing, at the very
//! start of the file. Everything after the closing fence is the body. Front
//! matter is always optional: a file without a fence is all body, and no
//! key is required — absent keys fall back to computed defaults downstream.
//!
//! Keys not known to any schema are preserved verbatim in the mapping, in
//! declaration order, so extensions can read their own keys.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatterError {
    #[error("front matter fence opened but never closed")]
    UnclosedFence,
    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a key-value mapping, got {0}")]
    NotAMapping(&'static str),
}

/// Parsed front matter: an ordered key → value mapping.
///
/// Wraps a YAML mapping so unknown keys survive untouched. Accessors return
/// `None` for absent keys rather than erroring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(Value::String(key.to_string()))
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Nested mapping under `key`, e.g. the `navigation:` block.
    pub fn get_mapping(&self, key: &str) -> Option<&Mapping> {
        self.get(key).and_then(Value::as_mapping)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl From<Mapping> for FrontMatter {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// A content file split into front matter and body.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub matter: FrontMatter,
    pub body: String,
}

const FENCE: &str = "---";

/// Split raw content into front matter and body.
///
/// Content not starting with a `---` line is all body with empty matter.
/// An empty block between fences is valid empty matter. Malformed YAML
/// inside the fence is an error; callers attach the file path and skip
/// that one page rather than aborting the build.
pub fn parse(raw: &str) -> Result<Document, MatterError> {
    let Some(rest) = strip_fence_line(raw) else {
        return Ok(Document {
            matter: FrontMatter::empty(),
            body: raw.to_string(),
        });
    };

    let Some((block, body)) = split_at_closing_fence(rest) else {
        return Err(MatterError::UnclosedFence);
    };

    let matter = if block.trim().is_empty() {
        FrontMatter::empty()
    } else {
        match serde_yaml::from_str::<Value>(block)? {
            Value::Mapping(mapping) => FrontMatter::from(mapping),
            Value::Null => FrontMatter::empty(),
            Value::Sequence(_) => return Err(MatterError::NotAMapping("a sequence")),
            _ => return Err(MatterError::NotAMapping("a scalar")),
        }
    };

    Ok(Document {
        matter,
        body: body.to_string(),
    })
}

/// If `raw` starts with a fence line, return the content after it.
fn strip_fence_line(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix(FENCE)?;
    // A fence is "---" followed by a newline; a bare "---" file or a line
    // like "---foo" is body, not a fence.
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Find the closing `---` line; returns (block, body-after-fence).
fn split_at_closing_fence(content: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let body_start = offset + line.len();
            return Some((&content[..offset], &content[body_start..]));
        }
        offset += line.len();
    }
    None
}
